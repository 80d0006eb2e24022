//! Runs one encoding job from configuration to movie file.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{validate_config, EncodingConfig};
use crate::convert::{FormatConverter, TemporaryArtifactSet};
use crate::encoder::{BuildContext, EncoderKind};
use crate::pattern::{anchor, resolve};
use crate::system::{CommandRunner, ProgramLocator, ShellRunner, WhichLocator};

use super::error::MovieError;
use super::types::{EncodeOutcome, EncodeStatus};

/// Drives encoding jobs against a host described by a locator and a runner.
pub struct MovieEncoder<'a> {
    locator: &'a dyn ProgramLocator,
    runner: &'a dyn CommandRunner,
}

impl<'a> MovieEncoder<'a> {
    pub fn new(locator: &'a dyn ProgramLocator, runner: &'a dyn CommandRunner) -> Self {
        Self { locator, runner }
    }

    /// The configured encoder if installed, otherwise the first installed
    /// one in [`EncoderKind::ALL`] order.
    pub fn select_encoder(&self, config: &EncodingConfig) -> Result<EncoderKind, MovieError> {
        if let Some(encoder) = config.encoder {
            if !self.locator.is_available(encoder.program()) {
                return Err(MovieError::EncoderNotAvailable { encoder });
            }
            return Ok(encoder);
        }

        EncoderKind::ALL
            .into_iter()
            .find(|e| self.locator.is_available(e.program()))
            .ok_or_else(|| MovieError::NoEncoderAvailable {
                tried: EncoderKind::ALL
                    .iter()
                    .map(|e| e.program().to_string())
                    .collect(),
            })
    }

    /// Encodes the frames named by `config` into a movie.
    ///
    /// Every check that does not need the frames runs before anything is
    /// read or written. A movie tool that runs but fails yields an outcome
    /// with [`EncodeStatus::Failed`], not an error. Temporary files are
    /// removed on every path unless `config.cleanup` is off.
    pub fn encode(&self, config: &EncodingConfig) -> Result<EncodeOutcome, MovieError> {
        validate_config(config)?;
        let encoder = self.select_encoder(config)?;
        let builder = encoder.builder();
        builder.check(config)?;

        let work_dir = std::path::absolute(&config.work_dir)?;
        let frames = resolve(&config.input_files, &work_dir)?;
        debug!(
            encoder = %encoder,
            count = frames.len(),
            format = %frames.format,
            "resolved input frames"
        );

        let output = self.output_path(config, &work_dir, builder.default_extension())?;

        let mut artifacts = TemporaryArtifactSet::new(&work_dir, &config.temp_basename);
        let converter = FormatConverter::new(self.locator, self.runner)
            .with_preference(config.preferred_package)
            .with_quiet(config.quiet)
            .with_work_dir(&work_dir);
        let mut ctx = BuildContext {
            config,
            frames: &frames,
            output: &output,
            locator: self.locator,
            converter: &converter,
            artifacts: &mut artifacts,
        };
        let command = match builder.build(&mut ctx) {
            Ok(command) => command,
            Err(e) => {
                release(artifacts, config.cleanup);
                return Err(e.into());
            }
        };

        if config.quiet {
            debug!("{}", command);
        } else {
            info!("{}", command);
        }

        let status = match self.runner.run(&command, &work_dir) {
            Ok(status) if status.success() => EncodeStatus::Success,
            Ok(status) => {
                warn!(encoder = %encoder, code = ?status.code, "could not make movie");
                EncodeStatus::Failed { code: status.code }
            }
            Err(e) => {
                warn!(encoder = %encoder, error = %e, "could not make movie");
                EncodeStatus::Failed { code: None }
            }
        };

        if status.is_success() && !config.quiet {
            info!(output = %output.display(), "movie written");
        }

        let kept_files = release(artifacts, config.cleanup);
        Ok(EncodeOutcome {
            encoder,
            command,
            output,
            status,
            kept_files,
        })
    }

    fn output_path(
        &self,
        config: &EncodingConfig,
        work_dir: &Path,
        extension: &str,
    ) -> Result<PathBuf, MovieError> {
        let name = config
            .output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("movie.{}", extension)));
        let output = anchor(work_dir, &name);
        if output.exists() && !config.overwrite_output {
            return Err(MovieError::OutputExists { path: output });
        }
        Ok(output)
    }
}

/// Deletes or keeps the temporaries; returns the kept paths.
fn release(mut artifacts: TemporaryArtifactSet, cleanup: bool) -> Vec<PathBuf> {
    if cleanup {
        artifacts.cleanup();
        Vec::new()
    } else {
        let kept = artifacts.persist();
        if !kept.is_empty() {
            info!(count = kept.len(), "keeping temporary files");
        }
        kept
    }
}

/// Encodes with the programs installed on this host, through `sh`.
pub fn movie(config: &EncodingConfig) -> Result<EncodeOutcome, MovieError> {
    let locator = WhichLocator::new();
    let runner = ShellRunner::new();
    MovieEncoder::new(&locator, &runner).encode(config)
}
