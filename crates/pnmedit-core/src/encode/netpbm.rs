//! Netpbm (P1-P6) encoding.
//!
//! This module writes images through the `image` crate's PNM encoder.
//! Greymaps and pixmaps are always written with a max value of 255. Bitmaps
//! carry no max value and store a `1` for every non-zero sample.

use std::path::{Path, PathBuf};

use image::codecs::pnm::{PnmEncoder, PnmSubtype};
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::decode::Encoding;
use crate::image::Image;
use crate::ImageKind;

/// Errors that can occur while saving an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height does not fit a Netpbm header
    #[error("Invalid dimensions: {columns}x{rows} exceeds the encoder limit")]
    InvalidDimensions { columns: usize, rows: usize },

    /// The PNM encoder rejected the raster
    #[error("Netpbm encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the output file failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode an image as Netpbm bytes.
///
/// The magic number follows from the image kind and `encoding`.
pub fn encode_netpbm(image: &Image, encoding: Encoding) -> Result<Vec<u8>, EncodeError> {
    let kind = image.kind();
    let (columns, rows) = (image.columns(), image.rows());
    let (width, height) = u32::try_from(columns)
        .ok()
        .zip(u32::try_from(rows).ok())
        .ok_or(EncodeError::InvalidDimensions { columns, rows })?;

    let sample_encoding = encoding.to_sample_encoding();
    let (subtype, color) = match kind {
        ImageKind::BiLevel => (PnmSubtype::Bitmap(sample_encoding), ExtendedColorType::L8),
        ImageKind::Greyscale => (PnmSubtype::Graymap(sample_encoding), ExtendedColorType::L8),
        ImageKind::Colour => (PnmSubtype::Pixmap(sample_encoding), ExtendedColorType::Rgb8),
    };

    // The encoder writes luma 0 as a black (1) bit
    let bitmap;
    let samples = if kind == ImageKind::BiLevel {
        bitmap = image
            .matrix()
            .samples()
            .iter()
            .map(|&sample| if sample != 0 { 0 } else { 255 })
            .collect::<Vec<u8>>();
        bitmap.as_slice()
    } else {
        image.matrix().samples()
    };

    let mut out = Vec::new();
    PnmEncoder::new(&mut out)
        .with_subtype(subtype)
        .write_image(samples, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    debug!(
        rows,
        columns,
        kind = %kind,
        encoding = ?encoding,
        bytes = out.len(),
        "encoded netpbm image"
    );
    Ok(out)
}

/// Encode an image and write it to `path`, replacing any existing file.
#[instrument(skip_all, fields(path = %path.as_ref().display(), encoding = ?encoding))]
pub fn save_netpbm<P: AsRef<Path>>(
    image: &Image,
    path: P,
    encoding: Encoding,
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let bytes = encode_netpbm(image, encoding)?;
    std::fs::write(path, bytes).map_err(|source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
