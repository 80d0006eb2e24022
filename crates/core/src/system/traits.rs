//! Trait definitions for host interaction.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exit information of a finished shell command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatus {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    /// A status with the given exit code.
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A status for a process that terminated without an exit code.
    pub fn killed() -> Self {
        Self { code: None }
    }

    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Answers whether an external program is installed.
pub trait ProgramLocator: Send + Sync {
    /// Returns true if `program` can be executed from this host.
    fn is_available(&self, program: &str) -> bool;

    /// Returns true if every program in `programs` is available.
    fn all_available(&self, programs: &[&str]) -> bool {
        programs.iter().all(|p| self.is_available(p))
    }
}

/// Executes composed shell command lines.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` through a shell with `dir` as working directory and
    /// blocks until it exits.
    fn run(&self, command: &str, dir: &Path) -> std::io::Result<RunStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct SetLocator(HashSet<&'static str>);

    impl ProgramLocator for SetLocator {
        fn is_available(&self, program: &str) -> bool {
            self.0.contains(program)
        }
    }

    #[test]
    fn test_all_available() {
        let locator = SetLocator(["pngtopnm", "pnmtopng"].into_iter().collect());
        assert!(locator.all_available(&["pngtopnm", "pnmtopng"]));
        assert!(!locator.all_available(&["pngtopnm", "convert"]));
        assert!(locator.all_available(&[]));
    }

    #[test]
    fn test_run_status() {
        assert!(RunStatus::exited(0).success());
        assert!(!RunStatus::exited(1).success());
        assert!(!RunStatus::killed().success());
    }
}
