use super::{types::EncodingConfig, ConfigError};
use crate::pattern::InputSpec;

/// Validate configuration
/// Currently validates:
/// - Input list/pattern is not empty
/// - Frame rate is a positive finite number
/// - Quantization values are within 1..=31 and qmin <= qmax
/// - Frame-type pattern only contains I, P and B
/// - GOP size, bit rate and buffer size are not 0
/// - Temporary basename is a plain file name stem
pub fn validate_config(config: &EncodingConfig) -> Result<(), ConfigError> {
    match &config.input_files {
        InputSpec::Pattern(p) if p.trim().is_empty() => {
            return Err(invalid("input_files pattern cannot be empty"));
        }
        InputSpec::Files(files) if files.is_empty() => {
            return Err(invalid("input_files list cannot be empty"));
        }
        _ => {}
    }

    if !config.fps.is_finite() || config.fps <= 0.0 {
        return Err(invalid(format!(
            "fps must be a positive number, not {}",
            config.fps
        )));
    }

    let scales = [
        ("qscale", config.qscale),
        ("qmin", Some(config.qmin)),
        ("qmax", Some(config.qmax)),
        ("iqscale", config.iqscale),
        ("pqscale", config.pqscale),
        ("bqscale", config.bqscale),
    ];
    for (name, value) in scales {
        if let Some(v) = value {
            if !(1..=31).contains(&v) {
                return Err(invalid(format!(
                    "{} must be between 1 and 31, not {}",
                    name, v
                )));
            }
        }
    }
    if config.qmin > config.qmax {
        return Err(invalid(format!(
            "qmin ({}) cannot be larger than qmax ({})",
            config.qmin, config.qmax
        )));
    }

    if config.pattern.is_empty()
        || !config
            .pattern
            .chars()
            .all(|c| matches!(c.to_ascii_uppercase(), 'I' | 'P' | 'B'))
    {
        return Err(invalid(format!(
            "pattern must be a sequence of I, P and B frames, not '{}'",
            config.pattern
        )));
    }

    let counts = [
        ("gop_size", config.gop_size),
        ("vbitrate", config.vbitrate),
        ("vbuffer", config.vbuffer),
    ];
    for (name, value) in counts {
        if value == Some(0) {
            return Err(invalid(format!("{} cannot be 0", name)));
        }
    }

    if config.vcodec.trim().is_empty() {
        return Err(invalid("vcodec cannot be empty"));
    }

    if config.temp_basename.is_empty()
        || config.temp_basename.contains(['/', '\\'])
    {
        return Err(invalid(format!(
            "temp_basename must be a plain file name stem, not '{}'",
            config.temp_basename
        )));
    }

    Ok(())
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(reason.into())
}
