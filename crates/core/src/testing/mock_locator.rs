//! Mock program locator for testing.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::system::ProgramLocator;

/// Mock implementation of the [`ProgramLocator`] trait.
///
/// Only the programs it was told about are "installed". Every query is
/// recorded so tests can assert the probe order.
#[derive(Debug, Clone, Default)]
pub struct MockLocator {
    installed: Arc<RwLock<HashSet<String>>>,
    probed: Arc<RwLock<Vec<String>>>,
}

impl MockLocator {
    /// A host with nothing installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with exactly `programs` installed.
    pub fn with_programs<I, S>(programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locator = Self::new();
        for program in programs {
            locator.add(program);
        }
        locator
    }

    /// Installs a program.
    pub fn add(&self, program: impl Into<String>) {
        self.installed.write().unwrap().insert(program.into());
    }

    /// Uninstalls a program.
    pub fn remove(&self, program: &str) {
        self.installed.write().unwrap().remove(program);
    }

    /// Every program queried so far, in order.
    pub fn probed(&self) -> Vec<String> {
        self.probed.read().unwrap().clone()
    }
}

impl ProgramLocator for MockLocator {
    fn is_available(&self, program: &str) -> bool {
        self.probed.write().unwrap().push(program.to_string());
        self.installed.read().unwrap().contains(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_probes() {
        let locator = MockLocator::with_programs(["ffmpeg"]);
        assert!(!locator.is_available("mencoder"));
        assert!(locator.is_available("ffmpeg"));
        assert_eq!(locator.probed(), vec!["mencoder", "ffmpeg"]);

        locator.remove("ffmpeg");
        assert!(!locator.is_available("ffmpeg"));
    }

    #[test]
    fn test_all_available() {
        let locator = MockLocator::with_programs(["giftopnm", "pnmtopng"]);
        assert!(locator.all_available(&["giftopnm", "pnmtopng"]));
        assert!(!locator.all_available(&["giftopnm", "pnmtojpeg"]));
    }
}
