//! MEncoder command builder.

use crate::pattern::ImageFormat;
use crate::system::{quote, quote_path};

use super::context::BuildContext;
use super::error::EncoderError;
use super::kind::EncoderKind;
use super::traits::CommandBuilder;
use super::{DEFAULT_VBITRATE, QUIET_REDIRECT};

/// Builds `mencoder "mf://<frames>" -mf fps=..:type=.. -ovc ... -o <output>`.
///
/// MEncoder's multi-file input only reads JPEG and PNG; anything else is
/// converted to PNG first. The `xvid` codec goes through `-xvidencopts`,
/// every other codec through libavcodec's `-lavcopts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MencoderBuilder;

impl CommandBuilder for MencoderBuilder {
    fn kind(&self) -> EncoderKind {
        EncoderKind::Mencoder
    }

    fn default_extension(&self) -> &'static str {
        "avi"
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, EncoderError> {
        let (files, file_type) = if ctx.readable_as_is(&[ImageFormat::Jpg, ImageFormat::Png]) {
            (ctx.frames.files.clone(), ctx.frames.format)
        } else {
            (ctx.convert_frames(ImageFormat::Png, None)?, ImageFormat::Png)
        };
        let config = ctx.config;

        let list = files
            .iter()
            .map(|f| f.to_string_lossy())
            .collect::<Vec<_>>()
            .join(",");
        let mut cmd = format!(
            "{} {} -mf fps={}:type={}",
            self.kind().program(),
            quote(&format!("mf://{}", list)),
            config.fps,
            file_type
        );

        let vbitrate = config.vbitrate.unwrap_or(DEFAULT_VBITRATE);
        let (qmin, qmax) = (config.qmin, config.qmax);

        if config.vcodec == "xvid" {
            cmd.push_str(" -ovc xvid -xvidencopts");
            match config.qscale {
                Some(q) => cmd.push_str(&format!(" fixed_quant={}", q)),
                None => cmd.push_str(&format!(
                    " bitrate={b}:min_iquant={lo}:max_iquant={hi}:\
                     min_pquant={lo}:max_pquant={hi}:min_bquant={lo}:max_bquant={hi}",
                    b = vbitrate,
                    lo = qmin,
                    hi = qmax
                )),
            }
        } else {
            // mbd: macroblock decision
            cmd.push_str(&format!(
                " -ovc lavc -lavcopts vcodec={}:mbd=1:vbitrate={}",
                config.vcodec, vbitrate
            ));
            match config.qscale {
                Some(q) => cmd.push_str(&format!(":vqscale={}", q)),
                None => cmd.push_str(&format!(":vqmin={}:vqmax={}", qmin, qmax)),
            }
            if let Some(vbuffer) = config.vbuffer {
                cmd.push_str(&format!(":vrc_buf_size={}", vbuffer));
            }
        }

        // ':' separates suboptions, so ratios are written as w/h.
        if let Some(aspect) = &config.aspect {
            cmd.push_str(&format!(":aspect={}", aspect.text().replace(':', "/")));
        }

        if let Some(size) = config.size {
            cmd.push_str(&format!(" -vf scale={}:{}", size.width, size.height));
        }

        cmd.push_str(&format!(" -o {}", quote_path(ctx.output)));
        if config.quiet {
            cmd.push_str(QUIET_REDIRECT);
        }
        Ok(cmd)
    }
}
