pub mod config;
pub mod convert;
pub mod encoder;
pub mod movie;
pub mod pattern;
pub mod system;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, AspectRatio, ConfigError, EncodingConfig,
    FrameSize, ImagePackage,
};
pub use encoder::{CommandBuilder, EncoderError, EncoderKind};
pub use movie::{movie, EncodeOutcome, EncodeStatus, MovieEncoder, MovieError};
pub use pattern::{ImageFormat, InputSpec, ResolveError, ResolvedFileSet};
pub use system::{CommandRunner, ProgramLocator, RunStatus, ShellRunner, WhichLocator};
