//! Berkeley `mpeg_encode` (also shipped by Netpbm as `ppmtompeg`).

use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::EncodingConfig;
use crate::pattern::ImageFormat;
use crate::system::quote_path;

use super::context::BuildContext;
use super::error::EncoderError;
use super::kind::EncoderKind;
use super::traits::CommandBuilder;
use super::approx_eq;

/// Frame rates the MPEG-1 encoder can write.
pub const LEGAL_FRAME_RATES: [f64; 8] = [23.976, 24.0, 25.0, 29.97, 30.0, 50.0, 59.94, 60.0];

/// Pixel aspect ratios the MPEG-1 encoder can write.
pub const LEGAL_ASPECTS: [f64; 14] = [
    1.0, 0.6735, 0.7031, 0.7615, 0.8055, 0.8437, 0.8935, 0.9157, 0.9815, 1.0255, 1.0695, 1.0950,
    1.1575, 1.2015,
];

const DEFAULT_IQSCALE: u32 = 8;
const DEFAULT_PQSCALE: u32 = 10;
const DEFAULT_BQSCALE: u32 = 25;
const DEFAULT_GOP_SIZE: u32 = 15;

/// Suffix of the parameter file written next to the converted frames.
const PARAM_FILE_SUFFIX: &str = ".mpeg_encode-input";

fn join_legal(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Contents of an `mpeg_encode` parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct MpegEncodeParams {
    /// I/P/B frame pattern, uppercase.
    pub pattern: String,
    pub output: PathBuf,
    pub input_dir: PathBuf,
    /// Frame entries, relative to `input_dir`.
    pub files: Vec<String>,
    pub gop_size: u32,
    pub iqscale: u32,
    pub pqscale: u32,
    pub bqscale: u32,
    pub frame_rate: f64,
    pub aspect: f64,
    /// Bits per second.
    pub bit_rate: Option<u64>,
    /// Bits.
    pub buffer_size: Option<u64>,
}

impl MpegEncodeParams {
    /// Collects the parameters for encoding `frames` into `output`.
    ///
    /// `aspect` must already be one of [`LEGAL_ASPECTS`].
    pub fn new(config: &EncodingConfig, frames: &[PathBuf], output: &Path, aspect: f64) -> Self {
        let (input_dir, files) = split_input_dir(frames);
        let fill = |frame: Option<u32>, default: u32| frame.or(config.qscale).unwrap_or(default);

        Self {
            pattern: config.frame_pattern(),
            output: output.to_path_buf(),
            input_dir,
            files,
            gop_size: config.gop_size.unwrap_or(DEFAULT_GOP_SIZE),
            iqscale: fill(config.iqscale, DEFAULT_IQSCALE),
            pqscale: fill(config.pqscale, DEFAULT_PQSCALE),
            bqscale: fill(config.bqscale, DEFAULT_BQSCALE),
            frame_rate: config.fps,
            aspect,
            bit_rate: config.vbitrate.map(|b| u64::from(b) * 1000),
            buffer_size: config.vbuffer.map(|b| u64::from(b) * 1000),
        }
    }

    /// Renders the parameter file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        field(&mut out, "PATTERN", &self.pattern);
        field(&mut out, "OUTPUT", self.output.display());
        field(&mut out, "BASE_FILE_FORMAT", "PNM");
        field(&mut out, "INPUT_CONVERT", "*");
        field(&mut out, "GOP_SIZE", self.gop_size);
        field(&mut out, "SLICES_PER_FRAME", 1);
        field(&mut out, "INPUT_DIR", self.input_dir.display());
        out.push_str("INPUT\n");
        for file in &self.files {
            out.push_str(file);
            out.push('\n');
        }
        out.push_str("END_INPUT\n");
        field(&mut out, "PIXEL", "FULL");
        field(&mut out, "RANGE", 10);
        field(&mut out, "PSEARCH_ALG", "LOGARITHMIC");
        field(&mut out, "BSEARCH_ALG", "CROSS2");
        field(&mut out, "IQSCALE", self.iqscale);
        field(&mut out, "PQSCALE", self.pqscale);
        field(&mut out, "BQSCALE", self.bqscale);
        field(&mut out, "REFERENCE_FRAME", "ORIGINAL");
        field(&mut out, "FRAME_RATE", self.frame_rate);
        field(&mut out, "ASPECT_RATIO", self.aspect);
        out.push_str("FORCE_ENCODE_LAST_FRAME\n");
        if let Some(bit_rate) = self.bit_rate {
            field(&mut out, "BIT_RATE", bit_rate);
        }
        if let Some(buffer_size) = self.buffer_size {
            field(&mut out, "BUFFER_SIZE", buffer_size);
        }
        out
    }
}

fn field(out: &mut String, key: &str, value: impl fmt::Display) {
    let _ = writeln!(out, "{:<17}{}", key, value);
}

/// Splits frames into a shared `INPUT_DIR` and per-frame entries.
///
/// Frames spread over several directories are listed with their full paths
/// under `INPUT_DIR .`.
fn split_input_dir(frames: &[PathBuf]) -> (PathBuf, Vec<String>) {
    let parent = frames.first().and_then(|f| f.parent());
    let shared = parent.filter(|p| frames.iter().all(|f| f.parent() == Some(*p)));

    match shared {
        Some(dir) if !dir.as_os_str().is_empty() => (
            dir.to_path_buf(),
            frames
                .iter()
                .filter_map(|f| f.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        ),
        _ => (
            PathBuf::from("."),
            frames
                .iter()
                .map(|f| f.to_string_lossy().into_owned())
                .collect(),
        ),
    }
}

/// Builds `<tool> [-realquiet] <param file>` after writing the parameter
/// file.
#[derive(Debug, Clone, Copy)]
pub struct MpegEncodeBuilder {
    kind: EncoderKind,
}

impl MpegEncodeBuilder {
    /// `kind` is either [`EncoderKind::MpegEncode`] or
    /// [`EncoderKind::Ppmtompeg`].
    pub const fn new(kind: EncoderKind) -> Self {
        Self { kind }
    }

    /// The legal aspect value matching the configured one, 1 when unset.
    fn legal_aspect(&self, config: &EncodingConfig) -> Result<f64, EncoderError> {
        let Some(aspect) = &config.aspect else {
            return Ok(1.0);
        };
        LEGAL_ASPECTS
            .iter()
            .copied()
            .find(|legal| approx_eq(*legal, aspect.value()))
            .ok_or_else(|| EncoderError::UnsupportedAspectRatio {
                encoder: self.kind,
                aspect: aspect.to_string(),
                legal: join_legal(&LEGAL_ASPECTS),
            })
    }
}

impl CommandBuilder for MpegEncodeBuilder {
    fn kind(&self) -> EncoderKind {
        self.kind
    }

    fn default_extension(&self) -> &'static str {
        "mpeg"
    }

    fn check(&self, config: &EncodingConfig) -> Result<(), EncoderError> {
        if !LEGAL_FRAME_RATES.iter().any(|r| approx_eq(*r, config.fps)) {
            return Err(EncoderError::UnsupportedFrameRate {
                encoder: self.kind,
                fps: config.fps,
                legal: join_legal(&LEGAL_FRAME_RATES),
            });
        }
        self.legal_aspect(config).map(|_| ())
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, EncoderError> {
        let config = ctx.config;
        let aspect = self.legal_aspect(config)?;

        // Resizing only happens during conversion.
        let frames = if config.size.is_none() && ctx.readable_as_is(&[ImageFormat::Pnm]) {
            ctx.frames.files.clone()
        } else {
            ctx.convert_frames(ImageFormat::Pnm, config.size)?
        };

        let params = MpegEncodeParams::new(config, &frames, ctx.output, aspect);
        let param_file = ctx.artifacts.path(PARAM_FILE_SUFFIX);
        ctx.artifacts.register(&param_file);
        fs::write(&param_file, params.render())?;
        debug!(path = %param_file.display(), frames = frames.len(), "wrote parameter file");

        let mut cmd = self.kind.program().to_string();
        if config.quiet {
            cmd.push_str(" -realquiet");
        }
        cmd.push(' ');
        cmd.push_str(&quote_path(&param_file));
        Ok(cmd)
    }
}
