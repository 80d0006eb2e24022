//! `mpeg2enc` from the MJPEG Tools, fed by `png2yuv` or `jpeg2yuv`.

use tracing::warn;

use crate::config::EncodingConfig;
use crate::pattern::ImageFormat;
use crate::system::{quote, quote_path};

use super::approx_eq;
use super::context::BuildContext;
use super::error::EncoderError;
use super::kind::EncoderKind;
use super::traits::CommandBuilder;

pub const PNG2YUV: &str = "png2yuv";
pub const JPEG2YUV: &str = "jpeg2yuv";
pub const YUVSCALER: &str = "yuvscaler";

/// `-F` codes by frame rate.
const FRAME_RATE_CODES: [(f64, u8); 8] = [
    (23.976, 1),
    (24.0, 2),
    (25.0, 3),
    (29.97, 4),
    (30.0, 5),
    (50.0, 6),
    (59.94, 7),
    (60.0, 8),
];

/// `-a` codes by leading digits of the ratio: 1:1, 4:3, 16:9 and 2.21:1.
const ASPECT_CODES: [(&str, u8); 4] = [("1.0", 1), ("1.3", 2), ("1.7", 3), ("2.21", 4)];

/// Builds `<png2yuv|jpeg2yuv> ... | [yuvscaler ... |] mpeg2enc ... -o <output>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mpeg2encBuilder;

impl Mpeg2encBuilder {
    /// The `-F` code for `fps`.
    pub fn frame_rate_code(fps: f64) -> Result<u8, EncoderError> {
        FRAME_RATE_CODES
            .iter()
            .find(|(rate, _)| approx_eq(*rate, fps))
            .map(|(_, code)| *code)
            .ok_or_else(|| EncoderError::UnsupportedFrameRate {
                encoder: EncoderKind::Mpeg2enc,
                fps,
                legal: FRAME_RATE_CODES
                    .iter()
                    .map(|(rate, _)| rate.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// The `-a` code for the configured aspect ratio, if any.
    pub fn aspect_code(config: &EncodingConfig) -> Result<Option<u8>, EncoderError> {
        let Some(aspect) = &config.aspect else {
            return Ok(None);
        };
        let digits = format!("{:.4}", aspect.value());
        ASPECT_CODES
            .iter()
            .find(|(prefix, _)| digits.starts_with(prefix))
            .map(|(_, code)| Some(*code))
            .ok_or_else(|| EncoderError::UnsupportedAspectRatio {
                encoder: EncoderKind::Mpeg2enc,
                aspect: aspect.to_string(),
                legal: "1:1, 4:3, 16:9, 2.21:1".to_string(),
            })
    }
}

impl CommandBuilder for Mpeg2encBuilder {
    fn kind(&self) -> EncoderKind {
        EncoderKind::Mpeg2enc
    }

    fn default_extension(&self) -> &'static str {
        "mpeg"
    }

    fn check(&self, config: &EncodingConfig) -> Result<(), EncoderError> {
        Self::frame_rate_code(config.fps)?;
        Self::aspect_code(config)?;
        Ok(())
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, EncoderError> {
        let config = ctx.config;
        let frames = ctx.frames;
        let fps_code = Self::frame_rate_code(config.fps)?;
        let aspect_code = Self::aspect_code(config)?;

        let direct = frames
            .sequence
            .as_ref()
            .filter(|_| ctx.readable_as_is(&[ImageFormat::Jpg, ImageFormat::Png]));

        let helper = match direct {
            Some(_) if frames.format == ImageFormat::Jpg => JPEG2YUV,
            _ => PNG2YUV,
        };
        if !ctx.locator.is_available(helper) {
            return Err(EncoderError::MissingHelper {
                encoder: EncoderKind::Mpeg2enc,
                program: helper.to_string(),
            });
        }

        let (input, start) = match direct {
            Some(seq) => (seq.printf_form(), seq.first_existing_index().unwrap_or(0)),
            None => {
                ctx.convert_frames(ImageFormat::Png, None)?;
                let pattern = ctx.artifacts.frame_pattern(ImageFormat::Png.extension());
                (pattern.to_string_lossy().into_owned(), 1)
            }
        };

        // p: progressive, no interlacing
        let mut cmd = format!(
            "{} -f {} -I p -j {} -b {}",
            helper,
            config.fps,
            quote(&input),
            start
        );
        if config.quiet {
            cmd.push_str(" -v 0");
        }

        if let Some(size) = config.size {
            if ctx.locator.is_available(YUVSCALER) {
                cmd.push_str(&format!(" | {} -O SIZE_{}", YUVSCALER, size));
            } else {
                warn!(size = %size, "{} is not installed, movie keeps the frame size", YUVSCALER);
            }
        }

        cmd.push_str(" | ");
        cmd.push_str(self.kind().program());
        // 3: generic MPEG-2, 0: generic MPEG-1
        let format = if config.vcodec == "mpeg2video" { 3 } else { 0 };
        cmd.push_str(&format!(" -f {}", format));
        if let Some(vbitrate) = config.vbitrate {
            cmd.push_str(&format!(" -b {}", vbitrate));
        }
        if let Some(vbuffer) = config.vbuffer {
            cmd.push_str(&format!(" -V {}", vbuffer));
        }
        if let Some(q) = config.qscale {
            cmd.push_str(&format!(" -q {}", q));
        }
        cmd.push_str(&format!(" -F {}", fps_code));
        if let Some(gop) = config.gop_size {
            cmd.push_str(&format!(" -g {} -G {}", gop, gop));
        }
        if let Some(code) = aspect_code {
            cmd.push_str(&format!(" -a {}", code));
        }
        cmd.push_str(&format!(" -o {}", quote_path(ctx.output)));
        if config.quiet {
            cmd.push_str(" -v 0");
        }
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FrameSize;
    use crate::testing::BuildHarness;

    #[test]
    fn test_frame_rate_codes() {
        assert_eq!(Mpeg2encBuilder::frame_rate_code(23.976).unwrap(), 1);
        assert_eq!(Mpeg2encBuilder::frame_rate_code(25.0).unwrap(), 3);
        assert_eq!(Mpeg2encBuilder::frame_rate_code(59.94).unwrap(), 7);
        let err = Mpeg2encBuilder::frame_rate_code(15.0).unwrap_err();
        assert!(matches!(err, EncoderError::UnsupportedFrameRate { .. }));
    }

    #[test]
    fn test_aspect_codes() {
        let code = |text: &str| {
            let config = EncodingConfig {
                aspect: Some(text.parse().unwrap()),
                ..EncodingConfig::new("x")
            };
            Mpeg2encBuilder::aspect_code(&config)
        };
        assert_eq!(code("1:1").unwrap(), Some(1));
        assert_eq!(code("4:3").unwrap(), Some(2));
        assert_eq!(code("16:9").unwrap(), Some(3));
        assert_eq!(code("2.21").unwrap(), Some(4));
        assert!(matches!(
            code("3:1").unwrap_err(),
            EncoderError::UnsupportedAspectRatio { .. }
        ));
        assert_eq!(
            Mpeg2encBuilder::aspect_code(&EncodingConfig::new("x")).unwrap(),
            None
        );
    }

    #[test]
    fn test_png_sequence_pipeline() {
        let mut harness = BuildHarness::png_sequence(3);
        harness.locator.add(PNG2YUV);
        let cmd = harness
            .build(&Mpeg2encBuilder, &EncodingConfig::new("x"), "movie.mpeg")
            .unwrap();
        assert_eq!(
            cmd,
            format!(
                "png2yuv -f 25 -I p -j {} -b 0 | mpeg2enc -f 0 -F 3 -o {}",
                harness.path("frame_%04d.png").display(),
                harness.path("movie.mpeg").display()
            )
        );
    }

    #[test]
    fn test_jpeg_sequence_uses_jpeg2yuv() {
        let mut harness = BuildHarness::sequence("jpg", 2);
        harness.locator.add(JPEG2YUV);
        let cmd = harness
            .build(&Mpeg2encBuilder, &EncodingConfig::new("x"), "movie.mpeg")
            .unwrap();
        assert!(cmd.starts_with("jpeg2yuv -f 25 -I p -j "));
    }

    #[test]
    fn test_missing_helper() {
        let mut harness = BuildHarness::png_sequence(2);
        let err = harness
            .build(&Mpeg2encBuilder, &EncodingConfig::new("x"), "movie.mpeg")
            .unwrap_err();
        assert!(matches!(err, EncoderError::MissingHelper { ref program, .. } if program == PNG2YUV));
    }

    #[test]
    fn test_missing_helper_checked_before_conversion() {
        let mut harness = BuildHarness::frames("gif", 2);
        harness.locator.add("convert");
        assert!(harness
            .build(&Mpeg2encBuilder, &EncodingConfig::new("x"), "movie.mpeg")
            .is_err());
        assert!(harness.runner.commands().is_empty());
    }

    #[test]
    fn test_converted_frames_start_at_one() {
        let mut harness = BuildHarness::frames("gif", 2);
        harness.locator.add("convert");
        harness.locator.add(PNG2YUV);
        let cmd = harness
            .build(&Mpeg2encBuilder, &EncodingConfig::new("x"), "movie.mpeg")
            .unwrap();
        let pattern = harness.artifacts.frame_pattern("png");
        assert!(cmd.contains(&format!("-j {} -b 1", pattern.display())));
        assert_eq!(harness.runner.commands().len(), 2);
    }

    #[test]
    fn test_options() {
        let mut harness = BuildHarness::png_sequence(2);
        harness.locator.add(PNG2YUV);
        harness.locator.add(YUVSCALER);
        let config = EncodingConfig {
            vcodec: "mpeg2video".to_string(),
            vbitrate: Some(2000),
            vbuffer: Some(224),
            qscale: Some(6),
            gop_size: Some(12),
            aspect: Some("16:9".parse().unwrap()),
            size: Some(FrameSize::new(352, 288)),
            fps: 30.0,
            quiet: true,
            ..EncodingConfig::new("x")
        };
        let cmd = harness.build(&Mpeg2encBuilder, &config, "movie.mpeg").unwrap();
        assert!(cmd.contains("-b 0 -v 0 | yuvscaler -O SIZE_352x288 | mpeg2enc"));
        assert!(cmd.contains("mpeg2enc -f 3 -b 2000 -V 224 -q 6 -F 5 -g 12 -G 12 -a 3 -o "));
        assert!(cmd.ends_with("movie.mpeg -v 0"));
    }

    #[test]
    fn test_resize_without_yuvscaler() {
        let mut harness = BuildHarness::png_sequence(1);
        harness.locator.add(PNG2YUV);
        let config = EncodingConfig {
            size: Some(FrameSize::new(352, 288)),
            ..EncodingConfig::new("x")
        };
        let cmd = harness.build(&Mpeg2encBuilder, &config, "movie.mpeg").unwrap();
        assert!(!cmd.contains(YUVSCALER));
    }
}
