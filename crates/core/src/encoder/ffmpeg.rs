//! FFmpeg command builder.

use crate::pattern::ImageFormat;
use crate::system::{quote, quote_path};

use super::context::BuildContext;
use super::error::EncoderError;
use super::kind::EncoderKind;
use super::traits::CommandBuilder;
use super::{DEFAULT_VBITRATE, QUIET_REDIRECT};

/// Builds `ffmpeg -framerate .. -start_number .. -i <pattern> ... <output>`.
///
/// FFmpeg's image2 demuxer wants a printf sequence of JPEG or PNG frames.
/// A sequence given by the caller is passed through; any other input (globs,
/// explicit lists, other formats, forced conversion) is converted into a
/// fresh PNG sequence first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegBuilder;

impl CommandBuilder for FfmpegBuilder {
    fn kind(&self) -> EncoderKind {
        EncoderKind::Ffmpeg
    }

    fn default_extension(&self) -> &'static str {
        "avi"
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, EncoderError> {
        let frames = ctx.frames;
        let direct = frames
            .sequence
            .as_ref()
            .filter(|_| ctx.readable_as_is(&[ImageFormat::Jpg, ImageFormat::Png]));

        let (input, start) = match direct {
            Some(seq) => (seq.printf_form(), seq.first_existing_index().unwrap_or(0)),
            None => {
                ctx.convert_frames(ImageFormat::Png, None)?;
                let pattern = ctx.artifacts.frame_pattern(ImageFormat::Png.extension());
                (pattern.to_string_lossy().into_owned(), 1)
            }
        };
        let config = ctx.config;

        let mut cmd = format!(
            "{} -framerate {} -start_number {} -i {}",
            self.kind().program(),
            config.fps,
            start,
            quote(&input)
        );

        let vbitrate = config.vbitrate.unwrap_or(DEFAULT_VBITRATE);
        cmd.push_str(&format!(" -b:v {}k", vbitrate));
        cmd.push_str(&format!(" -r {}", config.fps));

        if let Some(size) = config.size {
            cmd.push_str(&format!(" -s {}", size));
        }
        cmd.push_str(&format!(" -vcodec {}", config.vcodec));
        if config.overwrite_output {
            cmd.push_str(" -y");
        }
        if let Some(aspect) = &config.aspect {
            cmd.push_str(&format!(" -aspect {}", aspect));
        }
        match config.qscale {
            Some(q) => cmd.push_str(&format!(" -qscale {}", q)),
            None => cmd.push_str(&format!(" -qmin {} -qmax {}", config.qmin, config.qmax)),
        }
        if let Some(vbuffer) = config.vbuffer {
            cmd.push_str(&format!(" -bufsize {}k", vbuffer));
        }
        if let Some(gop) = config.gop_size {
            cmd.push_str(&format!(" -g {}", gop));
        }

        cmd.push(' ');
        cmd.push_str(&quote_path(ctx.output));
        if config.quiet {
            cmd.push_str(QUIET_REDIRECT);
        }
        Ok(cmd)
    }
}
