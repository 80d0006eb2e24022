use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::encoder::EncoderKind;
use crate::pattern::InputSpec;

/// One movie encoding job.
///
/// Built once per call, validated with
/// [`validate_config`](super::validate_config), and read-only afterwards.
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EncodingConfig {
    /// Frames to encode: a glob / printf pattern or an explicit list.
    pub input_files: InputSpec,
    /// Resulting movie; defaults to `movie.<ext>` for the chosen encoder.
    #[serde(default)]
    pub output_file: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub overwrite_output: bool,
    /// Encoding tool; probed in a fixed order when unset.
    #[serde(default)]
    pub encoder: Option<EncoderKind>,
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default = "default_vcodec")]
    pub vcodec: String,
    /// Video bit rate in kbps.
    #[serde(default)]
    pub vbitrate: Option<u32>,
    /// Video buffer size in kB.
    #[serde(default)]
    pub vbuffer: Option<u32>,
    #[serde(default)]
    pub qscale: Option<u32>,
    #[serde(default = "default_qmin")]
    pub qmin: u32,
    #[serde(default = "default_qmax")]
    pub qmax: u32,
    #[serde(default)]
    pub iqscale: Option<u32>,
    #[serde(default)]
    pub pqscale: Option<u32>,
    #[serde(default)]
    pub bqscale: Option<u32>,
    /// Final movie size; source size when unset.
    #[serde(default)]
    pub size: Option<FrameSize>,
    #[serde(default)]
    pub aspect: Option<AspectRatio>,
    /// Sequence of I, P and B frames.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default)]
    pub gop_size: Option<u32>,
    #[serde(default)]
    pub preferred_package: ImagePackage,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default = "default_true")]
    pub cleanup: bool,
    /// Convert frames even when the encoder could read them directly.
    #[serde(default)]
    pub force_conversion: bool,
    /// Directory relative paths are resolved against; encoders run here.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// Stem of the per-job temporary file namespace.
    #[serde(default = "default_temp_basename")]
    pub temp_basename: String,
}

fn default_true() -> bool {
    true
}

fn default_fps() -> f64 {
    25.0
}

fn default_vcodec() -> String {
    "mpeg4".to_string()
}

fn default_qmin() -> u32 {
    2
}

fn default_qmax() -> u32 {
    31
}

fn default_pattern() -> String {
    "I".to_string()
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_temp_basename() -> String {
    "reel_tmp_".to_string()
}

impl EncodingConfig {
    /// Creates a config for `input_files` with every option at its default.
    pub fn new(input_files: impl Into<InputSpec>) -> Self {
        Self {
            input_files: input_files.into(),
            output_file: None,
            overwrite_output: true,
            encoder: None,
            fps: default_fps(),
            vcodec: default_vcodec(),
            vbitrate: None,
            vbuffer: None,
            qscale: None,
            qmin: default_qmin(),
            qmax: default_qmax(),
            iqscale: None,
            pqscale: None,
            bqscale: None,
            size: None,
            aspect: None,
            pattern: default_pattern(),
            gop_size: None,
            preferred_package: ImagePackage::default(),
            quiet: false,
            cleanup: true,
            force_conversion: false,
            work_dir: default_work_dir(),
            temp_basename: default_temp_basename(),
        }
    }

    /// Sets the encoder.
    pub fn with_encoder(mut self, encoder: EncoderKind) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Sets the output file.
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Sets the frame rate.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the working directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// The frame-type pattern in the upper case form encoders expect.
    pub fn frame_pattern(&self) -> String {
        self.pattern.to_ascii_uppercase()
    }
}

/// Image conversion toolkit preferred when both are installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePackage {
    #[default]
    #[serde(alias = "ImageMagick")]
    ImageMagick,
    #[serde(alias = "Netpbm")]
    Netpbm,
}

impl FromStr for ImagePackage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "imagemagick" => Ok(Self::ImageMagick),
            "netpbm" => Ok(Self::Netpbm),
            other => Err(format!(
                "preferred package must be 'imagemagick' or 'netpbm', not '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for ImagePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ImageMagick => "imagemagick",
            Self::Netpbm => "netpbm",
        })
    }
}

/// Movie frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "FrameSizeRepr", into = "String")]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Named sizes accepted in place of `WxH`.
const SIZE_PRESETS: [(&str, u32, u32); 4] = [
    ("sqcif", 128, 96),
    ("qcif", 176, 144),
    ("cif", 352, 288),
    ("4cif", 704, 576),
];

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Looks up a named preset such as `cif`.
    pub fn preset(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        SIZE_PRESETS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|&(_, w, h)| Self::new(w, h))
    }
}

impl FromStr for FrameSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(size) = Self::preset(s) {
            return Ok(size);
        }
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("size must be 'WxH' or a preset name, not '{}'", s))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid width in size '{}'", s))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid height in size '{}'", s))?;
        if width == 0 || height == 0 {
            return Err(format!("size dimensions must be positive, not '{}'", s));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<FrameSize> for String {
    fn from(size: FrameSize) -> Self {
        size.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameSizeRepr {
    Pair([u32; 2]),
    Text(String),
}

impl TryFrom<FrameSizeRepr> for FrameSize {
    type Error = String;

    fn try_from(repr: FrameSizeRepr) -> Result<Self, Self::Error> {
        match repr {
            FrameSizeRepr::Pair([0, _]) | FrameSizeRepr::Pair([_, 0]) => {
                Err("size dimensions must be positive".to_string())
            }
            FrameSizeRepr::Pair([width, height]) => Ok(Self::new(width, height)),
            FrameSizeRepr::Text(s) => s.parse(),
        }
    }
}

/// Display aspect ratio.
///
/// Keeps the text the caller wrote (`4:3`, `16/9`, `1.3333`) for tools that
/// take it verbatim, along with its numeric value for tools that validate it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "AspectRepr", into = "String")]
pub struct AspectRatio {
    text: String,
    value: f64,
}

impl AspectRatio {
    /// An aspect ratio given as a decimal number.
    pub fn from_value(value: f64) -> Result<Self, String> {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("aspect ratio must be positive, not {}", value));
        }
        Ok(Self {
            text: value.to_string(),
            value,
        })
    }

    /// The ratio as written by the caller.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width divided by height.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid aspect ratio '{}'", text))
        };
        let value = match text.split_once([':', '/']) {
            Some((w, h)) => {
                let (w, h) = (parse(w)?, parse(h)?);
                if h == 0.0 {
                    return Err(format!("invalid aspect ratio '{}'", text));
                }
                w / h
            }
            None => parse(text)?,
        };
        let mut ratio = Self::from_value(value)?;
        ratio.text = text.to_string();
        Ok(ratio)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.text
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AspectRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<AspectRepr> for AspectRatio {
    type Error = String;

    fn try_from(repr: AspectRepr) -> Result<Self, Self::Error> {
        match repr {
            AspectRepr::Number(v) => Self::from_value(v),
            AspectRepr::Text(s) => s.parse(),
        }
    }
}
