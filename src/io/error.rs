//! Error types for descrambling operations
//!
//! Search failures (a geometry with no solution, an exhausted sweep) are not
//! errors; they are reported through `SolveOutcome` and `Option`. This type
//! covers contract violations and I/O only.

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all descrambling operations
#[derive(Debug)]
pub enum DescrambleError {
    /// A scrambled image could not be read or decoded
    Decode {
        /// File the image was read from, when known
        path: Option<PathBuf>,
        /// Codec error
        source: image::ImageError,
    },

    /// A restored image could not be encoded or written
    Encode {
        /// Destination file
        path: PathBuf,
        /// Codec error
        source: image::ImageError,
    },

    /// Image cannot be descrambled at all
    ///
    /// Raised for zero-sized images and for layouts whose shape does not
    /// match the image they are applied to.
    UnusableImage {
        /// What is wrong with the image
        reason: String,
    },

    /// Configuration or command-line value out of range
    InvalidParameter {
        /// Parameter name
        parameter: &'static str,
        /// Rejected value
        value: String,
        /// Constraint the value breaks
        reason: String,
    },

    /// Arrangement refers to a slot the layout does not have
    UnknownTile {
        /// Offending slot index
        index: usize,
        /// Number of slots in the layout
        tile_count: usize,
    },

    /// Filesystem operation failed
    Io {
        /// Path involved, when known
        path: Option<PathBuf>,
        /// Operation attempted
        operation: &'static str,
        /// OS error
        source: std::io::Error,
    },

    /// Logger could not be installed
    Logging {
        /// Description of the failure
        reason: String,
    },
}

fn path_suffix(path: Option<&Path>) -> String {
    path.map(|p| format!(" '{}'", p.display()))
        .unwrap_or_default()
}

impl fmt::Display for DescrambleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(
                    f,
                    "Could not decode image{}: {source}",
                    path_suffix(path.as_deref())
                )
            }
            Self::Encode { path, source } => {
                write!(f, "Could not write image '{}': {source}", path.display())
            }
            Self::UnusableImage { reason } => write!(f, "Unusable image: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "{parameter} = {value} is invalid: {reason}"),
            Self::UnknownTile { index, tile_count } => {
                write!(f, "Slot {index} does not exist in a layout of {tile_count} tiles")
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "Failed to {operation}{}: {source}",
                path_suffix(path.as_deref())
            ),
            Self::Logging { reason } => write!(f, "Logger initialization failed: {reason}"),
        }
    }
}

impl std::error::Error for DescrambleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::UnusableImage { .. }
            | Self::InvalidParameter { .. }
            | Self::UnknownTile { .. }
            | Self::Logging { .. } => None,
        }
    }
}

/// Convenience type alias for descrambling results
pub type Result<T> = std::result::Result<T, DescrambleError>;

impl From<image::ImageError> for DescrambleError {
    fn from(source: image::ImageError) -> Self {
        Self::Decode { path: None, source }
    }
}

impl From<std::io::Error> for DescrambleError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: None,
            operation: "access the filesystem",
            source,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DescrambleError {
    DescrambleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an unusable image error
pub fn unusable_image(reason: &impl ToString) -> DescrambleError {
    DescrambleError::UnusableImage {
        reason: reason.to_string(),
    }
}
