//! Ownership of temporary files created during one encoding job.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// Temporary files owned by one encoding job.
///
/// Every job gets its own namespace, `<dir>/<basename><8 hex digits>_`, so
/// concurrent jobs sharing a directory never touch each other's files.
/// Registered files are removed when the set is dropped, whatever path the
/// job took to get there, unless [`persist`](Self::persist) was called.
#[derive(Debug)]
pub struct TemporaryArtifactSet {
    dir: PathBuf,
    prefix: String,
    files: Vec<PathBuf>,
    keep: bool,
}

impl TemporaryArtifactSet {
    /// Creates an empty set with a fresh namespace under `dir`.
    pub fn new(dir: impl Into<PathBuf>, basename: &str) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self {
            dir: dir.into(),
            prefix: format!("{}{}_", basename, &id[..8]),
            files: Vec::new(),
            keep: false,
        }
    }

    /// The unique file name prefix of this job.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Directory the temporaries live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a namespaced file, `<dir>/<prefix><suffix>`.
    pub fn path(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}{}", self.prefix, suffix))
    }

    /// Path of converted frame `index` (1-based, 4 digits).
    pub fn frame_path(&self, index: usize, extension: &str) -> PathBuf {
        self.path(&format!("{:04}.{}", index, extension))
    }

    /// printf pattern matching the paths from [`frame_path`](Self::frame_path).
    pub fn frame_pattern(&self, extension: &str) -> PathBuf {
        self.path(&format!("%04d.{}", extension))
    }

    /// Takes ownership of `path`. Registering the same path twice is a no-op.
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.files.contains(&path) {
            self.files.push(path);
        }
    }

    /// Files currently owned.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Releases ownership; the files stay on disk. Returns the kept paths.
    pub fn persist(mut self) -> Vec<PathBuf> {
        self.keep = true;
        std::mem::take(&mut self.files)
    }

    /// Deletes every owned file now. Returns how many were removed.
    ///
    /// Files that are already gone are skipped; other failures are logged
    /// and do not stop the sweep.
    pub fn cleanup(&mut self) -> usize {
        let mut removed = 0;
        for file in self.files.drain(..) {
            match fs::remove_file(&file) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(
                    "Failed to remove temporary file {}: {}",
                    file.display(),
                    e
                ),
            }
        }
        if removed > 0 {
            debug!(removed, prefix = %self.prefix, "removed temporary files");
        }
        removed
    }
}

impl Drop for TemporaryArtifactSet {
    fn drop(&mut self) {
        if !self.keep {
            self.cleanup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_namespace_is_unique() {
        let a = TemporaryArtifactSet::new("/tmp", "reel_tmp_");
        let b = TemporaryArtifactSet::new("/tmp", "reel_tmp_");
        assert_ne!(a.prefix(), b.prefix());
        assert!(a.prefix().starts_with("reel_tmp_"));
        assert_eq!(a.prefix().len(), "reel_tmp_".len() + 9);
    }

    #[test]
    fn test_frame_paths() {
        let set = TemporaryArtifactSet::new("/w", "t_");
        let prefix = set.prefix().to_string();
        assert_eq!(
            set.frame_path(3, "png"),
            PathBuf::from(format!("/w/{}0003.png", prefix))
        );
        assert_eq!(
            set.frame_pattern("png"),
            PathBuf::from(format!("/w/{}%04d.png", prefix))
        );
    }

    #[test]
    fn test_drop_removes_files() {
        let dir = TempDir::new().unwrap();
        let path;
        {
            let mut set = TemporaryArtifactSet::new(dir.path(), "t_");
            path = set.frame_path(1, "pnm");
            fs::write(&path, b"P3").unwrap();
            set.register(&path);
            set.register(set.path("never-created"));
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_persist_keeps_files() {
        let dir = TempDir::new().unwrap();
        let mut set = TemporaryArtifactSet::new(dir.path(), "t_");
        let path = set.path(".mpeg_encode-input");
        fs::write(&path, b"PATTERN I").unwrap();
        set.register(&path);
        set.register(&path);
        let kept = set.persist();
        assert_eq!(kept, vec![path.clone()]);
        assert!(path.exists());
    }

    #[test]
    fn test_cleanup_counts_removed() {
        let dir = TempDir::new().unwrap();
        let mut set = TemporaryArtifactSet::new(dir.path(), "t_");
        for i in 1..=3 {
            let p = set.frame_path(i, "png");
            fs::write(&p, b"x").unwrap();
            set.register(p);
        }
        assert_eq!(set.cleanup(), 3);
        assert!(set.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
