//! The movie orchestrator.
//!
//! [`MovieEncoder::encode`] ties the other modules together: it validates
//! the configuration, picks an encoder, resolves the frames, lets the
//! encoder's [`CommandBuilder`](crate::encoder::CommandBuilder) compose the
//! command (converting frames on the way if needed), runs it and cleans up.

mod error;
mod orchestrator;
mod types;

pub use error::MovieError;
pub use orchestrator::{movie, MovieEncoder};
pub use types::{EncodeOutcome, EncodeStatus};
