//! Image file loading, descrambling in the decoded format, and export

use crate::algorithm::executor::Descrambler;
use crate::algorithm::solutions::RecordOutcome;
use crate::io::error::{DescrambleError, Result};
use crate::spatial::tiles::TileGeometry;
use image::{DynamicImage, ImageBuffer, Pixel};
use std::path::Path;

/// A descrambled image ready for export
#[derive(Debug)]
pub struct RestoredImage {
    /// Reconstructed image in the same pixel format as the input
    pub image: DynamicImage,
    /// Geometry the image was solved with
    pub geometry: TileGeometry,
    /// Whether a trusted cached solution was replayed
    pub from_cache: bool,
    /// Effect on the solution cache, if any
    pub record: Option<RecordOutcome>,
}

/// Decode an image file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| DescrambleError::Decode {
        path: Some(path.to_path_buf()),
        source,
    })
}

/// Encode an image to a file, with the format chosen from the extension
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded and written.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DescrambleError::Io {
            path: Some(parent.to_path_buf()),
            operation: "create output directory",
            source,
        })?;
    }

    image.save(path).map_err(|source| DescrambleError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Descramble a decoded image without converting its pixel format
///
/// Formats the engine has no direct buffer type for are converted to 8-bit
/// RGBA first. Returns `Ok(None)` if no geometry could be solved.
///
/// # Errors
///
/// Returns an error if the image is empty or the engine rejects it.
pub fn descramble_dynamic(
    engine: &Descrambler,
    image: &DynamicImage,
    source_key: Option<&str>,
) -> Result<Option<RestoredImage>> {
    match image {
        DynamicImage::ImageLuma8(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageLumaA8(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageRgb8(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageRgba8(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageLuma16(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageLumaA16(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageRgb16(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageRgba16(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageRgb32F(buffer) => restore_buffer(engine, buffer, source_key),
        DynamicImage::ImageRgba32F(buffer) => restore_buffer(engine, buffer, source_key),
        other => restore_buffer(engine, &other.to_rgba8(), source_key),
    }
}

/// Load, descramble and save one image file
///
/// Returns `Ok(None)` without writing anything if the image could not be
/// descrambled.
///
/// # Errors
///
/// Returns an error if loading, the engine, or saving fails.
pub fn descramble_file(
    engine: &Descrambler,
    input_path: &Path,
    output_path: &Path,
    source_key: Option<&str>,
) -> Result<Option<RestoredImage>> {
    let image = load_image(input_path)?;
    let Some(restored) = descramble_dynamic(engine, &image, source_key)? else {
        return Ok(None);
    };
    save_image(&restored.image, output_path)?;
    Ok(Some(restored))
}

fn restore_buffer<P>(
    engine: &Descrambler,
    buffer: &ImageBuffer<P, Vec<P::Subpixel>>,
    source_key: Option<&str>,
) -> Result<Option<RestoredImage>>
where
    P: Pixel,
    DynamicImage: From<ImageBuffer<P, Vec<P::Subpixel>>>,
{
    Ok(engine
        .solve_image(buffer, source_key)?
        .map(|restoration| RestoredImage {
            image: DynamicImage::from(restoration.image),
            geometry: restoration.geometry,
            from_cache: restoration.from_cache,
            record: restoration.record,
        }))
}
