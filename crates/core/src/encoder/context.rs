//! Everything a command builder may use while composing a command.

use std::path::{Path, PathBuf};

use crate::config::{EncodingConfig, FrameSize};
use crate::convert::{FormatConverter, TemporaryArtifactSet};
use crate::pattern::{ImageFormat, ResolvedFileSet};
use crate::system::ProgramLocator;

use super::error::EncoderError;

/// Inputs and services for one [`CommandBuilder::build`](super::CommandBuilder::build) call.
pub struct BuildContext<'a> {
    pub config: &'a EncodingConfig,
    pub frames: &'a ResolvedFileSet,
    /// Final movie path.
    pub output: &'a Path,
    pub locator: &'a dyn ProgramLocator,
    pub converter: &'a FormatConverter<'a>,
    pub artifacts: &'a mut TemporaryArtifactSet,
}

impl<'a> BuildContext<'a> {
    /// Converts every frame to `target`, failing if none survive.
    pub fn convert_frames(
        &mut self,
        target: ImageFormat,
        size: Option<FrameSize>,
    ) -> Result<Vec<PathBuf>, EncoderError> {
        let converted = self.converter.convert(
            &self.frames.files,
            self.frames.format,
            target,
            size,
            self.artifacts,
        )?;
        if converted.is_empty() {
            return Err(EncoderError::NoFramesConverted {
                attempted: self.frames.len(),
            });
        }
        Ok(converted)
    }

    /// Whether the frames can be handed to a tool reading `formats` as they
    /// are, i.e. they are in one of them and conversion is not forced.
    pub fn readable_as_is(&self, formats: &[ImageFormat]) -> bool {
        self.frames.is_format(formats) && !self.config.force_conversion
    }
}
