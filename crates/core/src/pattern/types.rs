//! Types for input resolution.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// How the caller names the input frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSpec {
    /// Glob (`img_*.png`) or printf sequence (`img_%04d.png`).
    Pattern(String),
    /// Explicit paths, used in the given order.
    Files(Vec<PathBuf>),
}

impl From<&str> for InputSpec {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

impl From<String> for InputSpec {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<Vec<PathBuf>> for InputSpec {
    fn from(files: Vec<PathBuf>) -> Self {
        Self::Files(files)
    }
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(p) => f.write_str(p),
            Self::Files(files) => write!(f, "{} file(s)", files.len()),
        }
    }
}

/// Image formats accepted as movie frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Gif,
    Jpg,
    Ps,
    Eps,
    Bmp,
    Tif,
    Tga,
    Pnm,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 9] = [
        Self::Png,
        Self::Gif,
        Self::Jpg,
        Self::Ps,
        Self::Eps,
        Self::Bmp,
        Self::Tif,
        Self::Tga,
        Self::Pnm,
    ];

    /// Parses a file extension (without the dot, case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            "jpeg" => Some(Self::Jpg),
            "tiff" => Some(Self::Tif),
            "ppm" | "pgm" | "pbm" => Some(Self::Pnm),
            _ => Self::ALL.into_iter().find(|f| f.extension() == ext),
        }
    }

    /// Detects the format of a path from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Jpg => "jpg",
            Self::Ps => "ps",
            Self::Eps => "eps",
            Self::Bmp => "bmp",
            Self::Tif => "tif",
            Self::Tga => "tga",
            Self::Pnm => "pnm",
        }
    }

    /// Netpbm program converting this format to PNM.
    pub fn netpbm_reader(&self) -> &'static str {
        match self {
            Self::Png => "pngtopnm",
            Self::Gif => "giftopnm",
            Self::Jpg => "jpegtopnm",
            Self::Ps | Self::Eps => "pstopnm",
            Self::Bmp => "bmptopnm",
            Self::Tif => "tifftopnm",
            Self::Tga => "tgatopnm",
            Self::Pnm => "cat",
        }
    }

    /// Netpbm program converting PNM to this format. `None` for PNM itself.
    pub fn netpbm_writer(&self) -> Option<&'static str> {
        match self {
            Self::Png => Some("pnmtopng"),
            Self::Gif => Some("ppmtogif"),
            Self::Jpg => Some("pnmtojpeg"),
            Self::Ps | Self::Eps => Some("pnmtops"),
            Self::Bmp => Some("ppmtobmp"),
            Self::Tif => Some("pnmtotiff"),
            Self::Tga => Some("ppmtotga"),
            Self::Pnm => None,
        }
    }

    /// Comma separated list of all extensions, for error messages.
    pub fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.extension())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A printf-style frame sequence such as `frame_%04d.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePattern {
    /// Everything before the `%`.
    pub prefix: String,
    /// Number of digits of the frame index.
    pub width: usize,
    /// Whether the index is zero padded (`%04d` rather than `%4d`).
    pub zero_pad: bool,
    /// Everything after the `d`, including the extension.
    pub suffix: String,
}

fn sequence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*)%(\d+)d(.*\..*)$").expect("static regex"))
}

impl SequencePattern {
    /// Parses `<prefix>%<width>d<suffix>`; the suffix must contain a dot.
    pub fn parse(pattern: &str) -> Option<Self> {
        let caps = sequence_regex().captures(pattern)?;
        let digits = caps.get(2)?.as_str();
        let width = digits.parse::<usize>().ok()?;
        if width == 0 {
            return None;
        }
        Some(Self {
            prefix: caps.get(1)?.as_str().to_string(),
            width,
            zero_pad: digits.starts_with('0'),
            suffix: caps.get(3)?.as_str().to_string(),
        })
    }

    /// The printf form, e.g. `frame_%04d.png`.
    pub fn printf_form(&self) -> String {
        let zero = if self.zero_pad { "0" } else { "" };
        format!("{}%{}{}d{}", self.prefix, zero, self.width, self.suffix)
    }

    /// The digit-class glob form, e.g. `frame_[0-9][0-9][0-9][0-9].png`.
    pub fn glob_form(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            "[0-9]".repeat(self.width),
            self.suffix
        )
    }

    /// The concrete path of frame `index`.
    pub fn path_for(&self, index: usize) -> PathBuf {
        let number = if self.zero_pad {
            format!("{:0width$}", index, width = self.width)
        } else {
            format!("{:width$}", index, width = self.width)
        };
        PathBuf::from(format!("{}{}{}", self.prefix, number, self.suffix))
    }

    /// First index in `0..=9999` whose frame exists on disk.
    pub fn first_existing_index(&self) -> Option<usize> {
        (0..=9999).find(|&i| self.path_for(i).is_file())
    }
}

impl fmt::Display for SequencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.printf_form())
    }
}

/// Concrete frames of one encoding job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFileSet {
    /// Existing frame files, in encoding order. Never empty.
    pub files: Vec<PathBuf>,
    /// Format detected from the first frame.
    pub format: ImageFormat,
    /// Set when the input was given as a printf sequence.
    pub sequence: Option<SequencePattern>,
}

impl ResolvedFileSet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether the frames are already in one of `formats`.
    pub fn is_format(&self, formats: &[ImageFormat]) -> bool {
        formats.contains(&self.format)
    }
}
