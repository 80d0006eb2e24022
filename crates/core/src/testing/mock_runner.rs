//! Mock command runner for testing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::system::{CommandRunner, RunStatus};

type Handler = dyn Fn(&str, &Path) -> io::Result<RunStatus> + Send + Sync;

#[derive(Default)]
struct State {
    commands: Vec<String>,
    exit_code: i32,
    failing: Vec<String>,
    creating_outputs: bool,
    handler: Option<Arc<Handler>>,
}

/// Mock implementation of the [`CommandRunner`] trait.
///
/// Records every command instead of running it. By default every command
/// exits 0 and touches nothing; with [`creating_outputs`](Self::creating_outputs)
/// the file a command would write is created, which is enough for the
/// conversion and encoding paths to see their results on disk.
///
/// Clones share state, so a clone handed to the code under test can be
/// inspected afterwards.
#[derive(Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<State>>,
}

impl std::fmt::Debug for MockRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRunner")
            .field("commands", &self.commands())
            .finish()
    }
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command exits with `code`.
    pub fn with_exit_code(self, code: i32) -> Self {
        self.state.lock().unwrap().exit_code = code;
        self
    }

    /// Commands containing `needle` exit with 1 and create nothing.
    pub fn failing_when(self, needle: impl Into<String>) -> Self {
        self.state.lock().unwrap().failing.push(needle.into());
        self
    }

    /// Successful commands create the file they write to.
    pub fn creating_outputs(self) -> Self {
        self.state.lock().unwrap().creating_outputs = true;
        self
    }

    /// Replaces the default behaviour entirely. Commands are still recorded.
    pub fn with_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&str, &Path) -> io::Result<RunStatus> + Send + Sync + 'static,
    {
        self.state.lock().unwrap().handler = Some(Arc::new(handler));
        self
    }

    /// Commands run so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().commands.len()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &str, dir: &Path) -> io::Result<RunStatus> {
        let (handler, code, create) = {
            let mut state = self.state.lock().unwrap();
            state.commands.push(command.to_string());
            let code = if state.failing.iter().any(|n| command.contains(n.as_str())) {
                1
            } else {
                state.exit_code
            };
            (state.handler.clone(), code, state.creating_outputs)
        };

        if let Some(handler) = handler {
            return handler(command, dir);
        }

        if code == 0 && create {
            if let Some(output) = output_of(command, dir) {
                if !output.exists() {
                    fs::write(&output, b"mock output")?;
                }
            }
        }
        Ok(RunStatus::exited(code))
    }
}

/// Guesses the file a generated command writes.
///
/// Handles the shapes produced by the builders: `-o <out>`, `> <out>`, a
/// trailing output argument, and `mpeg_encode` parameter files whose
/// `OUTPUT` line names the movie.
fn output_of(command: &str, dir: &Path) -> Option<PathBuf> {
    let command = command
        .trim_end_matches(" > /dev/null 2>&1")
        .trim_end_matches(" -v 0");

    let token = if let Some((_, rest)) = command.rsplit_once(" -o ") {
        rest.split_whitespace().next()?
    } else if let Some((_, rest)) = command.rsplit_once(" > ") {
        rest.trim()
    } else {
        command.split_whitespace().last()?
    };
    let path = absolute(unquote(token), dir);

    if path.to_string_lossy().ends_with(".mpeg_encode-input") {
        let params = fs::read_to_string(&path).ok()?;
        let output = params
            .lines()
            .find_map(|l| l.strip_prefix("OUTPUT"))?
            .trim();
        return Some(absolute(output.to_string(), dir));
    }
    Some(path)
}

fn unquote(token: &str) -> String {
    token
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .map(|t| t.replace("'\\''", "'"))
        .unwrap_or_else(|| token.to_string())
}

fn absolute(path: String, dir: &Path) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        dir.join(path)
    }
}
