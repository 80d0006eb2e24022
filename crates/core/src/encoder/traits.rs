//! Trait definitions for the encoder module.

use crate::config::EncodingConfig;

use super::context::BuildContext;
use super::error::EncoderError;
use super::kind::EncoderKind;

/// Builds the shell command of one external encoder.
pub trait CommandBuilder: Send + Sync {
    /// The encoder this builder drives.
    fn kind(&self) -> EncoderKind;

    /// Extension of the default output file, `movie.<ext>`.
    fn default_extension(&self) -> &'static str;

    /// Validates encoder-specific constraints on the configuration.
    ///
    /// Runs before any file is touched or process started.
    fn check(&self, _config: &EncodingConfig) -> Result<(), EncoderError> {
        Ok(())
    }

    /// Composes the command, converting frames or writing helper files
    /// through `ctx` as needed.
    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, EncoderError>;
}
