//! Results of an encoding job.

use std::path::PathBuf;

use serde::Serialize;

use crate::encoder::EncoderKind;

/// How the encoder process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EncodeStatus {
    Success,
    /// Non-zero exit, killed by a signal (`code` is `None`), or the shell
    /// could not be started.
    Failed { code: Option<i32> },
}

impl EncodeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// What an encoding job did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeOutcome {
    pub encoder: EncoderKind,
    /// The exact shell command that was run.
    pub command: String,
    pub output: PathBuf,
    #[serde(flatten)]
    pub status: EncodeStatus,
    /// Temporary files left on disk because cleanup was disabled.
    pub kept_files: Vec<PathBuf>,
}

impl EncodeOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
