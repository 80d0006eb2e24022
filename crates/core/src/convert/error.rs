//! Error types for the conversion module.

use thiserror::Error;

/// Errors that abort a conversion batch.
///
/// A single frame failing to convert is not an error: it is logged and
/// skipped.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Neither ImageMagick nor the needed Netpbm tools are installed.
    #[error("No image converter available: neither {imagemagick} nor {netpbm} was found")]
    NoConverterAvailable { imagemagick: String, netpbm: String },

    /// I/O error while preparing the conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
