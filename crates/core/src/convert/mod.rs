//! On-demand image format conversion.
//!
//! Encoders that cannot read the supplied frames get a converted copy. The
//! conversion is delegated to either ImageMagick (`convert`) or a Netpbm
//! reader/writer pair, chosen by availability and the configured
//! [`ImagePackage`](crate::config::ImagePackage) preference.
//!
//! Converted frames, and any other file created only to bridge the gap
//! between the caller's frames and the encoder, are owned by a
//! [`TemporaryArtifactSet`] that deletes them when the job ends.

mod artifacts;
mod converter;
mod error;
mod toolchain;

pub use artifacts::TemporaryArtifactSet;
pub use converter::FormatConverter;
pub use error::ConvertError;
pub use toolchain::Toolchain;
