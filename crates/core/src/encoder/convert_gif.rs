//! ImageMagick `convert` as an animated image encoder.

use crate::system::quote_path;

use super::context::BuildContext;
use super::error::EncoderError;
use super::kind::EncoderKind;
use super::traits::CommandBuilder;

/// Builds `convert -delay <ticks> [-scale WxH] <frames...> <output>`.
///
/// The output format follows the output extension (`.gif`, `.mng`, ...).
/// `convert` reads every supported frame format itself, so frames are never
/// converted beforehand.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertBuilder;

impl ConvertBuilder {
    /// Frame delay in hundredths of a second, truncated.
    pub fn delay_ticks(fps: f64) -> u32 {
        (100.0 / fps) as u32
    }
}

impl CommandBuilder for ConvertBuilder {
    fn kind(&self) -> EncoderKind {
        EncoderKind::Convert
    }

    fn default_extension(&self) -> &'static str {
        "gif"
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, EncoderError> {
        let config = ctx.config;
        let mut cmd = self.kind().program().to_string();

        cmd.push_str(&format!(" -delay {}", Self::delay_ticks(config.fps)));

        if let Some(size) = config.size {
            cmd.push_str(&format!(" -scale {}", size));
        }

        for file in &ctx.frames.files {
            cmd.push(' ');
            cmd.push_str(&quote_path(file));
        }

        cmd.push(' ');
        cmd.push_str(&quote_path(ctx.output));
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncodingConfig, FrameSize};
    use crate::testing::BuildHarness;

    #[test]
    fn test_delay_ticks() {
        assert_eq!(ConvertBuilder::delay_ticks(2.0), 50);
        assert_eq!(ConvertBuilder::delay_ticks(25.0), 4);
        assert_eq!(ConvertBuilder::delay_ticks(3.0), 33);
        assert_eq!(ConvertBuilder::delay_ticks(0.5), 200);
    }

    #[test]
    fn test_command() {
        let mut harness = BuildHarness::png_frames(3);
        let config = EncodingConfig {
            fps: 2.0,
            size: Some(FrameSize::new(128, 96)),
            ..EncodingConfig::new("ignored")
        };
        let cmd = harness.build(&ConvertBuilder, &config, "out.gif").unwrap();

        let frames = harness.frame_list(" ");
        assert_eq!(
            cmd,
            format!(
                "convert -delay 50 -scale 128x96 {} {}",
                frames,
                harness.path("out.gif").display()
            )
        );
        assert!(harness.runner.commands().is_empty());
    }

    #[test]
    fn test_reads_any_format_without_conversion() {
        let mut harness = BuildHarness::frames("eps", 2);
        let cmd = harness
            .build(&ConvertBuilder, &EncodingConfig::new("ignored"), "movie.gif")
            .unwrap();
        assert!(cmd.contains("frame_0000.eps"));
        assert!(harness.runner.commands().is_empty());
    }
}
