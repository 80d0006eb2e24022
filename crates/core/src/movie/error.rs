//! Error types for the movie orchestrator.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::encoder::{EncoderError, EncoderKind};
use crate::pattern::ResolveError;

/// Hard failures of an encoding job.
///
/// A job whose encoder merely exits non-zero is not an error; see
/// [`EncodeStatus`](super::EncodeStatus).
#[derive(Debug, Error)]
pub enum MovieError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Encoder(#[from] EncoderError),

    /// Auto-detection found none of the supported encoders.
    #[error("None of the supported encoders are installed (tried {})", .tried.join(", "))]
    NoEncoderAvailable { tried: Vec<String> },

    /// The explicitly requested encoder is not installed.
    #[error("Encoder {encoder} is not installed")]
    EncoderNotAvailable { encoder: EncoderKind },

    #[error("Output file {} already exists, set overwrite_output to replace it", .path.display())]
    OutputExists { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MovieError {
    /// Whether the caller can fix this by changing the configuration alone.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Config(_) | Self::OutputExists { .. } => true,
            Self::Encoder(e) => e.is_configuration_error(),
            Self::Resolve(ResolveError::InvalidPattern { .. })
            | Self::Resolve(ResolveError::UnsupportedFileType { .. })
            | Self::Resolve(ResolveError::EmptyInput) => true,
            _ => false,
        }
    }

    /// Whether a required program is missing from the host.
    pub fn is_missing_tool(&self) -> bool {
        matches!(
            self,
            Self::NoEncoderAvailable { .. }
                | Self::EncoderNotAvailable { .. }
                | Self::Encoder(EncoderError::MissingHelper { .. })
                | Self::Encoder(EncoderError::Convert(
                    crate::convert::ConvertError::NoConverterAvailable { .. }
                ))
        )
    }

    /// Whether the input frames are missing or unusable.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Resolve(ResolveError::MissingInput { .. })
                | Self::Resolve(ResolveError::NoMatchingFiles { .. })
                | Self::Encoder(EncoderError::NoFramesConverted { .. })
        )
    }
}
