//! `PATH` based program lookup.

use super::traits::ProgramLocator;

/// Locates programs on the executable search path.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichLocator;

impl WhichLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ProgramLocator for WhichLocator {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_not_available() {
        let locator = WhichLocator::new();
        assert!(!locator.is_available("reel-no-such-program-4c1d"));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_available() {
        assert!(WhichLocator::new().is_available("sh"));
    }
}
