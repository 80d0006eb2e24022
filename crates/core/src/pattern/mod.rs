//! Input file resolution.
//!
//! Turns an [`InputSpec`] (explicit list or pattern string) into a
//! [`ResolvedFileSet`]: the concrete, ordered frames that exist on disk plus
//! their common [`ImageFormat`].
//!
//! Pattern strings may be plain globs (`frame_*.png`) or printf-style
//! sequences (`frame_%04d.png`). Sequences are rewritten to a digit-class glob
//! (`frame_[0-9][0-9][0-9][0-9].png`) before expansion, and the parsed
//! [`SequencePattern`] is kept so encoders that want the printf form can use
//! it directly.

mod error;
mod resolver;
mod types;

pub use error::ResolveError;
pub use resolver::{anchor, resolve};
pub use types::{ImageFormat, InputSpec, ResolvedFileSet, SequencePattern};
