//! Error types for command building.

use thiserror::Error;

use super::kind::EncoderKind;
use crate::convert::ConvertError;

/// Errors raised while preparing an encoder command.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// The encoder cannot produce the requested frame rate.
    #[error("{encoder} only supports the following frame rates: {legal} (got {fps})")]
    UnsupportedFrameRate {
        encoder: EncoderKind,
        fps: f64,
        legal: String,
    },

    /// The encoder cannot produce the requested aspect ratio.
    #[error("{encoder} only supports the following aspect ratios: {legal} (got {aspect})")]
    UnsupportedAspectRatio {
        encoder: EncoderKind,
        aspect: String,
        legal: String,
    },

    /// A helper program the encoder pipes through is not installed.
    #[error("{encoder} needs {program}, which is not installed")]
    MissingHelper {
        encoder: EncoderKind,
        program: String,
    },

    /// Every frame failed to convert.
    #[error("None of the {attempted} input frames could be converted")]
    NoFramesConverted { attempted: usize },

    /// Frame conversion could not start.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// I/O error while writing an encoder input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncoderError {
    /// Whether this error stems from the configuration rather than the host.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFrameRate { .. } | Self::UnsupportedAspectRatio { .. }
        )
    }
}
