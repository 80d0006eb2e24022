//! Resolution of input specifications into existing frame files.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ResolveError;
use super::types::{ImageFormat, InputSpec, ResolvedFileSet, SequencePattern};

/// Resolves `path` against `base` unless it is already absolute.
pub fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() || base == Path::new(".") {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Anchors a pattern string, escaping glob metacharacters in the base.
fn anchor_pattern(base: &Path, pattern: &str) -> String {
    let path = Path::new(pattern);
    if path.is_absolute() || base.as_os_str().is_empty() || base == Path::new(".") {
        return pattern.to_string();
    }
    let escaped = glob::Pattern::escape(&base.to_string_lossy());
    let sep = std::path::MAIN_SEPARATOR;
    if escaped.ends_with(sep) {
        format!("{}{}", escaped, pattern)
    } else {
        format!("{}{}{}", escaped, sep, pattern)
    }
}

/// Resolves an input specification into the frames to encode.
///
/// Relative paths and patterns are interpreted against `base`.
pub fn resolve(spec: &InputSpec, base: &Path) -> Result<ResolvedFileSet, ResolveError> {
    let (files, sequence) = match spec {
        InputSpec::Files(paths) => (resolve_list(paths, base)?, None),
        InputSpec::Pattern(pattern) => resolve_pattern(pattern, base)?,
    };

    let format = detect_format(&files[0])?;
    debug!(
        count = files.len(),
        format = %format,
        "resolved input frames"
    );

    Ok(ResolvedFileSet {
        files,
        format,
        sequence,
    })
}

fn resolve_list(paths: &[PathBuf], base: &Path) -> Result<Vec<PathBuf>, ResolveError> {
    if paths.is_empty() {
        return Err(ResolveError::EmptyInput);
    }

    let files: Vec<PathBuf> = paths.iter().map(|p| anchor(base, p)).collect();
    let missing: Vec<PathBuf> = files.iter().filter(|p| !p.is_file()).cloned().collect();
    if !missing.is_empty() {
        return Err(ResolveError::MissingInput { paths: missing });
    }
    Ok(files)
}

fn resolve_pattern(
    pattern: &str,
    base: &Path,
) -> Result<(Vec<PathBuf>, Option<SequencePattern>), ResolveError> {
    let sequence = SequencePattern::parse(pattern);
    let glob_pattern = match &sequence {
        Some(seq) => anchor_pattern(base, &seq.glob_form()),
        None => anchor_pattern(base, pattern),
    };
    let sequence = sequence.map(|mut seq| {
        seq.prefix = anchor(base, Path::new(&seq.prefix))
            .to_string_lossy()
            .into_owned();
        seq
    });

    let entries = glob::glob(&glob_pattern).map_err(|e| ResolveError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(ResolveError::NoMatchingFiles {
            pattern: pattern.to_string(),
        });
    }

    Ok((files, sequence))
}

fn detect_format(first: &Path) -> Result<ImageFormat, ResolveError> {
    let extension = first
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    ImageFormat::from_extension(extension).ok_or_else(|| ResolveError::UnsupportedFileType {
        extension: extension.to_string(),
        expected: ImageFormat::expected_list(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"frame").unwrap();
        path
    }

    #[test]
    fn test_sequence_pattern_yields_all_frames_in_order() {
        for width in 1..=5usize {
            let dir = TempDir::new().unwrap();
            let n = 7usize.min(10usize.pow(width as u32));
            // Created out of order on purpose.
            for i in (0..n).rev() {
                touch(dir.path(), &format!("shot_{:0w$}.png", i, w = width));
            }
            touch(dir.path(), "shot_notes.txt");

            let spec = InputSpec::Pattern(format!("shot_%0{}d.png", width));
            let set = resolve(&spec, dir.path()).unwrap();

            let expected: Vec<PathBuf> = (0..n)
                .map(|i| dir.path().join(format!("shot_{:0w$}.png", i, w = width)))
                .collect();
            assert_eq!(set.files, expected);
            assert_eq!(set.format, ImageFormat::Png);
            assert_eq!(set.sequence.as_ref().unwrap().width, width);
        }
    }

    #[test]
    fn test_sequence_width_excludes_other_widths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "f_001.jpg");
        touch(dir.path(), "f_0002.jpg");
        let set = resolve(&InputSpec::from("f_%03d.jpg"), dir.path()).unwrap();
        assert_eq!(set.files, vec![dir.path().join("f_001.jpg")]);
    }

    #[test]
    fn test_glob_pattern() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.gif");
        touch(dir.path(), "a.gif");
        let set = resolve(&InputSpec::from("*.gif"), dir.path()).unwrap();
        assert_eq!(
            set.files,
            vec![dir.path().join("a.gif"), dir.path().join("b.gif")]
        );
        assert!(set.sequence.is_none());
        assert_eq!(set.format, ImageFormat::Gif);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = resolve(&InputSpec::from("frame_%04d.png"), dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::NoMatchingFiles { .. }));

        let err = resolve(&InputSpec::from("*.png"), dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::NoMatchingFiles { .. }));
    }

    #[test]
    fn test_explicit_list_keeps_order() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b.png");
        let a = touch(dir.path(), "a.png");
        let spec = InputSpec::Files(vec![b.clone(), a.clone()]);
        let set = resolve(&spec, Path::new(".")).unwrap();
        assert_eq!(set.files, vec![b, a]);
    }

    #[test]
    fn test_explicit_list_reports_all_missing() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.png");
        let spec = InputSpec::Files(vec![
            PathBuf::from("a.png"),
            PathBuf::from("b.png"),
            PathBuf::from("c.png"),
        ]);
        match resolve(&spec, dir.path()).unwrap_err() {
            ResolveError::MissingInput { paths } => {
                assert_eq!(
                    paths,
                    vec![dir.path().join("b.png"), dir.path().join("c.png")]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_list() {
        let err = resolve(&InputSpec::Files(vec![]), Path::new(".")).unwrap_err();
        assert!(matches!(err, ResolveError::EmptyInput));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "frame.webp");
        touch(dir.path(), "noext");
        let err = resolve(&InputSpec::from("*.webp"), dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedFileType { ref extension, .. } if extension == "webp"));

        let err = resolve(&InputSpec::Files(vec![PathBuf::from("noext")]), dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedFileType { ref extension, .. } if extension.is_empty()));
    }

    #[test]
    fn test_base_with_glob_metacharacters() {
        let root = TempDir::new().unwrap();
        let base = root.path().join("run[1]");
        fs::create_dir(&base).unwrap();
        touch(&base, "f_01.png");
        let set = resolve(&InputSpec::from("f_%02d.png"), &base).unwrap();
        assert_eq!(set.files, vec![base.join("f_01.png")]);
        let seq = set.sequence.unwrap();
        assert_eq!(seq.path_for(1), base.join("f_01.png"));
        assert_eq!(seq.first_existing_index(), Some(1));
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor(Path::new("."), Path::new("a.png")), PathBuf::from("a.png"));
        assert_eq!(anchor(Path::new("/w"), Path::new("a.png")), PathBuf::from("/w/a.png"));
        assert_eq!(anchor(Path::new("/w"), Path::new("/x/a.png")), PathBuf::from("/x/a.png"));
    }
}
