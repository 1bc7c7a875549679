//! Pixel access interface between the engine and decoded images
//!
//! The engine only needs random-access reads, a blank canvas of the same
//! pixel format, and rectangular copies. Every `image::ImageBuffer` gets these
//! for free, so any channel layout and subpixel depth the codec produces is
//! reconstructed in its own format.

use image::{ImageBuffer, Pixel, Primitive};
use num_traits::ToPrimitive;

/// Largest channel count of any supported pixel type
pub const MAX_CHANNELS: usize = 4;

/// Channel intensities of one pixel scaled to `0.0..=255.0`
///
/// Channels beyond the pixel's own count are zero, so distances between
/// pixels of the same format are unaffected by them.
pub type PixelSample = [f64; MAX_CHANNELS];

/// Rectangle in pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a region from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Test whether the region covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Read-only random access to decoded pixels
pub trait PixelAccessor {
    /// Image width in pixels
    fn width(&self) -> u32;

    /// Image height in pixels
    fn height(&self) -> u32;

    /// Scaled channel intensities at `(x, y)`
    ///
    /// Coordinates outside the image read as all-zero samples.
    fn get(&self, x: u32, y: u32) -> PixelSample;
}

/// Writable image of the same pixel format as its source
pub trait PixelCanvas: PixelAccessor + Sized {
    /// Allocate a zero-filled canvas
    fn blank(width: u32, height: u32) -> Self;

    /// Copy `region` of `source` so its top-left corner lands on `(dest_x, dest_y)`
    ///
    /// Pixels falling outside either image are skipped.
    fn copy_region(&mut self, source: &Self, region: Region, dest_x: u32, dest_y: u32);
}

impl<P> PixelAccessor for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get(&self, x: u32, y: u32) -> PixelSample {
        let mut sample = [0.0; MAX_CHANNELS];
        let Some(pixel) = self.get_pixel_checked(x, y) else {
            return sample;
        };

        let scale = 255.0 / max_channel_value::<P::Subpixel>();
        for (slot, channel) in sample.iter_mut().zip(pixel.channels()) {
            *slot = channel.to_f64().unwrap_or(0.0) * scale;
        }
        sample
    }
}

impl<P> PixelCanvas for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    fn copy_region(&mut self, source: &Self, region: Region, dest_x: u32, dest_y: u32) {
        for dy in 0..region.height {
            for dx in 0..region.width {
                let Some(pixel) = source.get_pixel_checked(region.x + dx, region.y + dy) else {
                    continue;
                };
                let pixel = *pixel;
                if let Some(target) = self.get_pixel_mut_checked(dest_x + dx, dest_y + dy) {
                    *target = pixel;
                }
            }
        }
    }
}

// Integer subpixels span their full range, floats span 0.0..=1.0
fn max_channel_value<T: Primitive>() -> f64 {
    T::DEFAULT_MAX_VALUE
        .to_f64()
        .filter(|value| *value > 0.0)
        .unwrap_or(255.0)
}
