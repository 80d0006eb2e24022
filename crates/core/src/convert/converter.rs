//! Batch image conversion through external tools.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{FrameSize, ImagePackage};
use crate::pattern::ImageFormat;
use crate::system::{quote_path, CommandRunner, ProgramLocator};

use super::artifacts::TemporaryArtifactSet;
use super::error::ConvertError;
use super::toolchain::{Toolchain, IMAGEMAGICK_CONVERT};

/// Converts frames into the format an encoder can read.
pub struct FormatConverter<'a> {
    locator: &'a dyn ProgramLocator,
    runner: &'a dyn CommandRunner,
    preferred: ImagePackage,
    quiet: bool,
    work_dir: PathBuf,
}

impl<'a> FormatConverter<'a> {
    /// Creates a converter running tools in the current directory.
    pub fn new(locator: &'a dyn ProgramLocator, runner: &'a dyn CommandRunner) -> Self {
        Self {
            locator,
            runner,
            preferred: ImagePackage::default(),
            quiet: false,
            work_dir: PathBuf::from("."),
        }
    }

    /// Sets the package used when both are installed.
    pub fn with_preference(mut self, preferred: ImagePackage) -> Self {
        self.preferred = preferred;
        self
    }

    /// Passes `-quiet` to Netpbm tools and demotes progress logs to debug.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Sets the directory the conversion tools run in.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Converts `files` (all in format `from`) into `to`, optionally
    /// resizing them.
    ///
    /// Outputs are named `<prefix>0001.<ext>`, `<prefix>0002.<ext>`, ... in
    /// input order and registered with `artifacts`. A frame whose conversion
    /// fails is logged and skipped, so the returned list may be shorter than
    /// `files`.
    pub fn convert(
        &self,
        files: &[PathBuf],
        from: ImageFormat,
        to: ImageFormat,
        size: Option<FrameSize>,
        artifacts: &mut TemporaryArtifactSet,
    ) -> Result<Vec<PathBuf>, ConvertError> {
        let toolchain = Toolchain::select(self.locator, from, to, self.preferred)?;
        debug!(
            toolchain = %toolchain.describe(),
            from = %from,
            to = %to,
            count = files.len(),
            "converting frames"
        );

        let mut converted = Vec::with_capacity(files.len());
        let mut index = 1;
        for file in files {
            let target = artifacts.frame_path(index, to.extension());
            // Registered up front so a partial output is swept too.
            artifacts.register(&target);

            let cmd = self.command_for(&toolchain, file, &target, size);
            if !self.quiet {
                info!("{}", cmd);
            }

            let succeeded = match self.runner.run(&cmd, &self.work_dir) {
                Ok(status) if status.success() => true,
                Ok(status) => {
                    warn!(
                        file = %file.display(),
                        code = ?status.code,
                        "{} failed, skipping to next file",
                        toolchain.describe()
                    );
                    false
                }
                Err(e) => {
                    warn!(
                        file = %file.display(),
                        "{} could not be started ({}), skipping to next file",
                        toolchain.describe(),
                        e
                    );
                    false
                }
            };
            if !succeeded {
                continue;
            }

            if !self.quiet {
                let kb = fs::metadata(&target).map(|m| m.len() / 1000).unwrap_or(0);
                info!(
                    "{} transformed via {} to {} ({} Kb)",
                    file.display(),
                    toolchain.describe(),
                    target.display(),
                    kb
                );
            }
            converted.push(target);
            index += 1;
        }

        Ok(converted)
    }

    /// Composes the shell command converting one frame.
    pub fn command_for(
        &self,
        toolchain: &Toolchain,
        input: &Path,
        output: &Path,
        size: Option<FrameSize>,
    ) -> String {
        match toolchain {
            Toolchain::ImageMagick => {
                let mut cmd = IMAGEMAGICK_CONVERT.to_string();
                if let Some(size) = size {
                    cmd.push_str(&format!(" -resize {}", size));
                }
                cmd.push_str(&format!(" {} {}", quote_path(input), quote_path(output)));
                cmd
            }
            Toolchain::Netpbm {
                reader,
                writer,
                scaler,
            } => {
                let mut cmd = reader.to_string();
                if self.quiet && *reader != "cat" {
                    cmd.push_str(" -quiet");
                }
                if *reader == "pstopnm" {
                    cmd.push_str(" -stdout");
                }
                cmd.push_str(&format!(" {}", quote_path(input)));

                if let (Some(size), Some(scaler)) = (size, scaler) {
                    cmd.push_str(&format!(
                        " | {} -width {} -height {}",
                        scaler, size.width, size.height
                    ));
                }

                if let Some(writer) = writer {
                    cmd.push_str(&format!(" | {}", writer));
                    if self.quiet {
                        cmd.push_str(" -quiet");
                    }
                    if *writer == "pnmtojpeg" {
                        cmd.push_str(" -quality 100");
                    }
                }

                cmd.push_str(&format!(" > {}", quote_path(output)));
                cmd
            }
        }
    }
}
