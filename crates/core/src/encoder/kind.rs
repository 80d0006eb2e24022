//! The closed set of supported encoders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::convert_gif::ConvertBuilder;
use super::ffmpeg::FfmpegBuilder;
use super::mencoder::MencoderBuilder;
use super::mpeg2enc::Mpeg2encBuilder;
use super::mpeg_encode::MpegEncodeBuilder;
use super::traits::CommandBuilder;

/// An external encoding tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// MEncoder (MPlayer project)
    Mencoder,
    /// FFmpeg
    Ffmpeg,
    /// Berkeley mpeg_encode
    MpegEncode,
    /// Netpbm's build of mpeg_encode
    Ppmtompeg,
    /// mpeg2enc (MJPEG Tools)
    Mpeg2enc,
    /// ImageMagick convert
    Convert,
}

static MENCODER: MencoderBuilder = MencoderBuilder;
static FFMPEG: FfmpegBuilder = FfmpegBuilder;
static MPEG_ENCODE: MpegEncodeBuilder = MpegEncodeBuilder::new(EncoderKind::MpegEncode);
static PPMTOMPEG: MpegEncodeBuilder = MpegEncodeBuilder::new(EncoderKind::Ppmtompeg);
static MPEG2ENC: Mpeg2encBuilder = Mpeg2encBuilder;
static CONVERT: ConvertBuilder = ConvertBuilder;

impl EncoderKind {
    /// Every encoder, in auto-detection order.
    pub const ALL: [EncoderKind; 6] = [
        Self::Mencoder,
        Self::Ffmpeg,
        Self::MpegEncode,
        Self::Ppmtompeg,
        Self::Mpeg2enc,
        Self::Convert,
    ];

    /// Name of the executable.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Mencoder => "mencoder",
            Self::Ffmpeg => "ffmpeg",
            Self::MpegEncode => "mpeg_encode",
            Self::Ppmtompeg => "ppmtompeg",
            Self::Mpeg2enc => "mpeg2enc",
            Self::Convert => "convert",
        }
    }

    /// The command builder for this encoder.
    pub fn builder(&self) -> &'static dyn CommandBuilder {
        match self {
            Self::Mencoder => &MENCODER,
            Self::Ffmpeg => &FFMPEG,
            Self::MpegEncode => &MPEG_ENCODE,
            Self::Ppmtompeg => &PPMTOMPEG,
            Self::Mpeg2enc => &MPEG2ENC,
            Self::Convert => &CONVERT,
        }
    }

    /// Comma separated list of every program name.
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|e| e.program())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for EncoderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.program() == s)
            .ok_or_else(|| format!("encoder must be one of {}, not '{}'", Self::names(), s))
    }
}
