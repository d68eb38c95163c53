//! Error types for the orm-unpack crate.

use std::path::PathBuf;

/// Errors that can occur while unpacking a packed texture.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source image could not be read or decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// Path of the source image.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// The requested preset is not part of the registry.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Batch input is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An I/O error occurred while preparing the output location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A grayscale map could not be encoded or written.
    #[error("failed to save {}: {source}", path.display())]
    Save {
        /// Destination path of the map.
        path: PathBuf,
        /// Underlying encoder error.
        source: image::ImageError,
    },
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
