//! Selection of the image conversion toolchain.

use crate::config::ImagePackage;
use crate::pattern::ImageFormat;
use crate::system::ProgramLocator;

use super::error::ConvertError;

/// The ImageMagick conversion program.
pub const IMAGEMAGICK_CONVERT: &str = "convert";

/// The Netpbm scaling filter, used when a resize is requested.
pub const NETPBM_SCALER: &str = "pnmscale";

/// Programs used to convert one batch of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    /// ImageMagick `convert <in> <out>`.
    ImageMagick,
    /// `<reader> <in> [| pnmscale] [| <writer>] > <out>`.
    Netpbm {
        reader: &'static str,
        writer: Option<&'static str>,
        /// Set when `pnmscale` is installed.
        scaler: Option<&'static str>,
    },
}

impl Toolchain {
    /// Picks the toolchain converting `from` into `to`.
    ///
    /// When both packages are installed `preferred` decides; otherwise the
    /// installed one is used.
    pub fn select(
        locator: &dyn ProgramLocator,
        from: ImageFormat,
        to: ImageFormat,
        preferred: ImagePackage,
    ) -> Result<Self, ConvertError> {
        let reader = from.netpbm_reader();
        let writer = to.netpbm_writer();
        let netpbm_programs: Vec<&str> = std::iter::once(reader).chain(writer).collect();

        let has_imagemagick = locator.is_available(IMAGEMAGICK_CONVERT);
        let has_netpbm = locator.all_available(&netpbm_programs);

        let netpbm = || Self::Netpbm {
            reader,
            writer,
            scaler: locator
                .is_available(NETPBM_SCALER)
                .then_some(NETPBM_SCALER),
        };

        match (has_imagemagick, has_netpbm) {
            (true, true) => Ok(match preferred {
                ImagePackage::ImageMagick => Self::ImageMagick,
                ImagePackage::Netpbm => netpbm(),
            }),
            (true, false) => Ok(Self::ImageMagick),
            (false, true) => Ok(netpbm()),
            (false, false) => Err(ConvertError::NoConverterAvailable {
                imagemagick: IMAGEMAGICK_CONVERT.to_string(),
                netpbm: netpbm_programs.join("/"),
            }),
        }
    }

    /// Human readable program list, e.g. `pngtopnm and pnmtojpeg`.
    pub fn describe(&self) -> String {
        match self {
            Self::ImageMagick => IMAGEMAGICK_CONVERT.to_string(),
            Self::Netpbm {
                reader,
                writer: Some(writer),
                ..
            } => format!("{} and {}", reader, writer),
            Self::Netpbm { reader, .. } => reader.to_string(),
        }
    }
}
