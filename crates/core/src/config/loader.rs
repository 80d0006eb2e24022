use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::EncodingConfig, ConfigError};

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "REEL_";

/// Build the figment for a config file (if any) with environment overrides.
///
/// Callers can merge further providers (e.g. command-line flags) before
/// extracting.
pub fn config_figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }
    Ok(figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"])))
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<EncodingConfig, ConfigError> {
    let config: EncodingConfig = config_figment(Some(path))?
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<EncodingConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AspectRatio, FrameSize, ImagePackage};
    use crate::encoder::EncoderKind;
    use crate::pattern::InputSpec;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_minimal() {
        let config = load_config_from_str(r#"input_files = "frame_%04d.png""#).unwrap();
        assert_eq!(config.input_files, InputSpec::from("frame_%04d.png"));
        assert_eq!(config.fps, 25.0);
        assert_eq!(config.vcodec, "mpeg4");
        assert!(config.overwrite_output);
        assert!(config.cleanup);
        assert_eq!(config.encoder, None);
        assert_eq!(config.preferred_package, ImagePackage::ImageMagick);
    }

    #[test]
    fn test_load_config_from_str_full() {
        let toml = r#"
input_files = ["a.eps", "b.eps"]
output_file = "wave.mpeg"
encoder = "mpeg_encode"
fps = 30
size = "cif"
aspect = "4:3"
qscale = 4
pattern = "ibbpbb"
preferred_package = "netpbm"
quiet = true
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(
            config.input_files,
            InputSpec::Files(vec![PathBuf::from("a.eps"), PathBuf::from("b.eps")])
        );
        assert_eq!(config.output_file, Some(PathBuf::from("wave.mpeg")));
        assert_eq!(config.encoder, Some(EncoderKind::MpegEncode));
        assert_eq!(config.fps, 30.0);
        assert_eq!(config.size, Some(FrameSize::new(352, 288)));
        assert_eq!(config.aspect.as_ref().map(AspectRatio::text), Some("4:3"));
        assert_eq!(config.qscale, Some(4));
        assert_eq!(config.preferred_package, ImagePackage::Netpbm);
        assert!(config.quiet);
    }

    #[test]
    fn test_load_config_missing_input_files() {
        let result = load_config_from_str("fps = 10");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_rejects_unknown_option() {
        let toml = r#"
input_files = "*.png"
frames_per_second = 10
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(ref msg) if msg.contains("frames_per_second")));
    }

    #[test]
    fn test_load_config_rejects_unknown_encoder() {
        let toml = r#"
input_files = "*.png"
encoder = "handbrake"
"#;
        assert!(matches!(
            load_config_from_str(toml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/reel.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
input_files = "img_*.jpg"
encoder = "ffmpeg"
vbitrate = 2400
size = [640, 480]
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.encoder, Some(EncoderKind::Ffmpeg));
        assert_eq!(config.vbitrate, Some(2400));
        assert_eq!(config.size, Some(FrameSize::new(640, 480)));
    }

    #[test]
    fn test_config_figment_without_file() {
        let figment = config_figment(None).unwrap();
        let result: Result<EncodingConfig, _> = figment
            .merge(("input_files", "x_%02d.png"))
            .merge(("fps", 12))
            .extract();
        let config = result.unwrap();
        assert_eq!(config.fps, 12.0);
    }
}
