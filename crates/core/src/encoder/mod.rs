//! Command builders for the supported external encoders.
//!
//! Each [`EncoderKind`] maps to one [`CommandBuilder`] that turns the resolved
//! frames and the [`EncodingConfig`](crate::config::EncodingConfig) into the
//! exact shell command its tool expects:
//!
//! | Encoder | Reads | Output | Notes |
//! |---|---|---|---|
//! | `convert` | any | `.gif` | ImageMagick, frame delay from fps |
//! | `mencoder` | jpg, png | `.avi` | separate xvid quantizer path |
//! | `ffmpeg` | jpg, png sequences | `.avi` | `-qscale` or `-qmin`/`-qmax` |
//! | `mpeg_encode`, `ppmtompeg` | pnm | `.mpeg` | parameter file, fixed fps/aspect sets |
//! | `mpeg2enc` | jpg, png sequences | `.mpeg` | `png2yuv`/`jpeg2yuv` pipeline |
//!
//! Frames in any other format are converted first (see [`crate::convert`]).

mod context;
mod convert_gif;
mod error;
mod ffmpeg;
mod kind;
mod mencoder;
mod mpeg2enc;
mod mpeg_encode;
mod traits;

pub use context::BuildContext;
pub use convert_gif::ConvertBuilder;
pub use error::EncoderError;
pub use ffmpeg::FfmpegBuilder;
pub use kind::EncoderKind;
pub use mencoder::MencoderBuilder;
pub use mpeg2enc::Mpeg2encBuilder;
pub use mpeg_encode::{MpegEncodeBuilder, MpegEncodeParams};
pub use traits::CommandBuilder;

/// Bit rate in kbps used by `mencoder` and `ffmpeg` when none is configured.
pub const DEFAULT_VBITRATE: u32 = 800;

/// Appended to commands run in quiet mode by tools without a quiet flag.
const QUIET_REDIRECT: &str = " > /dev/null 2>&1";

/// Whether two frame rates or ratios denote the same legal value.
fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}
