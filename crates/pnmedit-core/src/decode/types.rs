//! Core types for Netpbm decoding.

use std::path::PathBuf;

use image::codecs::pnm::SampleEncoding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::EditError;

/// Error types for Netpbm decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The data does not start with a `P1`..`P6` magic word.
    #[error("Invalid or unsupported Netpbm format")]
    InvalidFormat,

    /// Samples wider than 8 bits (max value above 255).
    #[error("Unsupported sample layout: {0}")]
    UnsupportedColorType(String),

    /// The header declares more pixels than the data could possibly hold.
    #[error("Header declares {declared} bytes of pixels but the file has {available}")]
    Truncated { declared: u64, available: usize },

    /// The Netpbm codec rejected the header or the raster.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(#[from] image::ImageError),

    /// The decoded raster could not back an image.
    #[error("Invalid image data: {0}")]
    Image(#[from] EditError),

    /// I/O error while reading the file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How the raster is stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encoding {
    /// Raw bytes (P4, P5, P6).
    #[default]
    Binary,
    /// Whitespace-separated ASCII decimals (P1, P2, P3).
    Plain,
}

impl Encoding {
    /// Encoding implied by a Netpbm magic digit (`1`..=`6`).
    pub fn from_magic_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1'..=b'3' => Some(Encoding::Plain),
            b'4'..=b'6' => Some(Encoding::Binary),
            _ => None,
        }
    }

    /// Convert to the image crate's sample encoding.
    pub fn to_sample_encoding(self) -> SampleEncoding {
        match self {
            Encoding::Binary => SampleEncoding::Binary,
            Encoding::Plain => SampleEncoding::Ascii,
        }
    }
}
