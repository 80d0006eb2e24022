//! Command-line arguments and how they layer onto the config file.

use std::path::PathBuf;

use clap::Parser;
use figment::providers::Serialized;
use serde::Serialize;

use reel_core::config::config_figment;
use reel_core::{
    AspectRatio, ConfigError, EncoderKind, EncodingConfig, FrameSize, ImagePackage, InputSpec,
};

/// Assemble a sequence of image frames into a movie with an external encoder.
#[derive(Debug, Parser)]
#[command(name = "reel", version)]
pub struct Args {
    /// Frames: one glob or printf pattern such as `frame_%04d.png`, or
    /// several file names
    pub inputs: Vec<String>,

    /// TOML file with encoding options; flags override it
    #[arg(short, long, env = "REEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Movie file, `movie.<ext>` by default
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail instead of replacing an existing movie
    #[arg(long)]
    pub no_overwrite: bool,

    /// mencoder, ffmpeg, mpeg_encode, ppmtompeg, mpeg2enc or convert
    #[arg(short, long)]
    pub encoder: Option<EncoderKind>,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<f64>,

    /// Codec passed to mencoder / ffmpeg
    #[arg(long)]
    pub vcodec: Option<String>,

    /// Video bit rate in kbps
    #[arg(long)]
    pub vbitrate: Option<u32>,

    /// Video buffer size in kB
    #[arg(long)]
    pub vbuffer: Option<u32>,

    /// Constant quantizer (1-31)
    #[arg(long)]
    pub qscale: Option<u32>,

    #[arg(long)]
    pub qmin: Option<u32>,

    #[arg(long)]
    pub qmax: Option<u32>,

    /// I frame quantizer (mpeg_encode)
    #[arg(long)]
    pub iqscale: Option<u32>,

    /// P frame quantizer (mpeg_encode)
    #[arg(long)]
    pub pqscale: Option<u32>,

    /// B frame quantizer (mpeg_encode)
    #[arg(long)]
    pub bqscale: Option<u32>,

    /// WxH, or one of sqcif, qcif, cif, 4cif
    #[arg(long)]
    pub size: Option<FrameSize>,

    /// 4:3, 16/9 or a decimal ratio
    #[arg(long)]
    pub aspect: Option<AspectRatio>,

    /// I/P/B frame pattern (mpeg_encode)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Frames per group of pictures
    #[arg(long)]
    pub gop_size: Option<u32>,

    /// imagemagick or netpbm, when converting frames
    #[arg(long)]
    pub preferred_package: Option<ImagePackage>,

    /// Only log warnings and silence the encoders
    #[arg(short, long)]
    pub quiet: bool,

    /// Leave converted frames and parameter files on disk
    #[arg(long)]
    pub keep_temp: bool,

    /// Convert frames even when the encoder reads them as they are
    #[arg(long)]
    pub force_conversion: bool,

    /// Directory relative paths resolve against
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Stem of temporary file names
    #[arg(long)]
    pub temp_basename: Option<String>,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Show which encoders are installed and exit
    #[arg(long)]
    pub list_encoders: bool,
}

/// The config keys set on the command line.
#[derive(Debug, Default, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    input_files: Option<InputSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overwrite_output: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoder: Option<EncoderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vcodec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vbitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vbuffer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qscale: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qmin: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qmax: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iqscale: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pqscale: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bqscale: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<FrameSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect: Option<AspectRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gop_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_package: Option<ImagePackage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quiet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cleanup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    force_conversion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    work_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temp_basename: Option<String>,
}

impl Args {
    /// One argument is a pattern; several are an explicit file list.
    fn input_spec(&self) -> Option<InputSpec> {
        match self.inputs.as_slice() {
            [] => None,
            [pattern] => Some(InputSpec::from(pattern.as_str())),
            files => Some(InputSpec::Files(files.iter().map(PathBuf::from).collect())),
        }
    }

    fn overrides(&self) -> Overrides {
        let set = |flag: bool, value: bool| flag.then_some(value);
        Overrides {
            input_files: self.input_spec(),
            output_file: self.output.clone(),
            overwrite_output: set(self.no_overwrite, false),
            encoder: self.encoder,
            fps: self.fps,
            vcodec: self.vcodec.clone(),
            vbitrate: self.vbitrate,
            vbuffer: self.vbuffer,
            qscale: self.qscale,
            qmin: self.qmin,
            qmax: self.qmax,
            iqscale: self.iqscale,
            pqscale: self.pqscale,
            bqscale: self.bqscale,
            size: self.size,
            aspect: self.aspect.clone(),
            pattern: self.pattern.clone(),
            gop_size: self.gop_size,
            preferred_package: self.preferred_package,
            quiet: set(self.quiet, true),
            cleanup: set(self.keep_temp, false),
            force_conversion: set(self.force_conversion, true),
            work_dir: self.work_dir.clone(),
            temp_basename: self.temp_basename.clone(),
        }
    }

    /// Config file, then `REEL_*` variables, then flags.
    pub fn encoding_config(&self) -> Result<EncodingConfig, ConfigError> {
        config_figment(self.config.as_deref())?
            .merge(Serialized::defaults(self.overrides()))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
