//! Shell command execution.

use std::borrow::Cow;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::traits::{CommandRunner, RunStatus};

/// Quotes `arg` for a POSIX shell when it contains anything beyond a
/// conservative set of safe characters.
pub fn quote(arg: &str) -> Cow<'_, str> {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./%:,+=@".contains(c));
    if safe {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', "'\\''")))
    }
}

/// Quotes a path for a POSIX shell.
pub fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy()).into_owned()
}

/// Runs command lines with `sh -c`.
///
/// Commands are composed strings (pipes and redirections included), so they
/// need a shell rather than a direct `execve`. Standard streams are inherited
/// so encoder output reaches the terminal unless the command redirects it.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different POSIX shell binary.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, dir: &Path) -> std::io::Result<RunStatus> {
        debug!(shell = %self.shell, dir = %dir.display(), "spawning: {}", command);
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(dir)
            .stdin(Stdio::null())
            .status()?;

        Ok(match status.code() {
            Some(code) => RunStatus::exited(code),
            None => RunStatus::killed(),
        })
    }
}
