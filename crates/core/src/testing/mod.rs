//! Testing utilities and mock implementations.
//!
//! The mocks stand in for the two host seams, [`ProgramLocator`] and
//! [`CommandRunner`], so whole encoding jobs can run without any encoder
//! installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use reel_core::testing::{MockLocator, MockRunner};
//!
//! let locator = MockLocator::with_programs(["ffmpeg", "convert"]);
//! let runner = MockRunner::new().creating_outputs();
//!
//! let outcome = MovieEncoder::new(&locator, &runner).encode(&config)?;
//! assert_eq!(runner.commands().len(), 1);
//! ```
//!
//! [`ProgramLocator`]: crate::system::ProgramLocator
//! [`CommandRunner`]: crate::system::CommandRunner

mod mock_locator;
mod mock_runner;

#[cfg(test)]
mod harness;

pub use mock_locator::MockLocator;
pub use mock_runner::MockRunner;

#[cfg(test)]
pub(crate) use harness::BuildHarness;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Writes `count` dummy frames `<dir>/<stem>0000.<ext>`, `...0001.<ext>`, ...
    pub fn write_frames(dir: &Path, stem: &str, ext: &str, count: usize) -> io::Result<Vec<PathBuf>> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("{}{:04}.{}", stem, i, ext));
                fs::write(&path, format!("frame {}", i))?;
                Ok(path)
            })
            .collect()
    }

    /// Names of the files in `dir` starting with `prefix`, sorted.
    pub fn files_with_prefix(dir: &Path, prefix: &str) -> io::Result<Vec<String>> {
        let mut names = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(prefix))
            .collect::<Vec<_>>();
        names.sort();
        Ok(names)
    }
}
