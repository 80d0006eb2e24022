//! Scratch environment for exercising a single command builder.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::fixtures::write_frames;
use super::{MockLocator, MockRunner};
use crate::config::EncodingConfig;
use crate::convert::{FormatConverter, TemporaryArtifactSet};
use crate::encoder::{BuildContext, CommandBuilder, EncoderError};
use crate::pattern::{ImageFormat, ResolvedFileSet, SequencePattern};

pub(crate) struct BuildHarness {
    pub frames: ResolvedFileSet,
    pub locator: MockLocator,
    pub runner: MockRunner,
    pub artifacts: TemporaryArtifactSet,
    dir: TempDir,
}

impl BuildHarness {
    /// `count` frames `frame_0000.<ext>`, ... given as a plain list.
    pub fn frames(ext: &str, count: usize) -> Self {
        let dir = TempDir::new().unwrap();
        let files = write_frames(dir.path(), "frame_", ext, count).unwrap();
        let format = ImageFormat::from_extension(ext).unwrap();
        Self::with_frames(
            dir,
            ResolvedFileSet {
                files,
                format,
                sequence: None,
            },
        )
    }

    /// Same frames, given as the sequence `frame_%04d.<ext>`.
    pub fn sequence(ext: &str, count: usize) -> Self {
        let mut harness = Self::frames(ext, count);
        let pattern = harness.path(&format!("frame_%04d.{}", ext));
        harness.frames.sequence = SequencePattern::parse(&pattern.to_string_lossy());
        harness
    }

    pub fn png_frames(count: usize) -> Self {
        Self::frames("png", count)
    }

    pub fn png_sequence(count: usize) -> Self {
        Self::sequence("png", count)
    }

    fn with_frames(dir: TempDir, frames: ResolvedFileSet) -> Self {
        let artifacts = TemporaryArtifactSet::new(dir.path(), "reel_tmp_");
        Self {
            frames,
            locator: MockLocator::new(),
            runner: MockRunner::new().creating_outputs(),
            artifacts,
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// The frame paths joined with `sep`.
    pub fn frame_list(&self, sep: &str) -> String {
        self.frames
            .files
            .iter()
            .map(|f| f.to_string_lossy())
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Checks `config` and builds the command writing `output`.
    pub fn build(
        &mut self,
        builder: &dyn CommandBuilder,
        config: &EncodingConfig,
        output: &str,
    ) -> Result<String, EncoderError> {
        builder.check(config)?;
        let output = self.dir.path().join(output);
        let converter = FormatConverter::new(&self.locator, &self.runner)
            .with_preference(config.preferred_package)
            .with_quiet(config.quiet)
            .with_work_dir(self.dir.path());
        let mut ctx = BuildContext {
            config,
            frames: &self.frames,
            output: &output,
            locator: &self.locator,
            converter: &converter,
            artifacts: &mut self.artifacts,
        };
        builder.build(&mut ctx)
    }
}
