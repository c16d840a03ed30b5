//! Netpbm (P1-P6) decoding.

use std::path::Path;

use image::codecs::pnm::PnmDecoder;
use image::{ColorType, ImageDecoder};
use tracing::{debug, instrument};

use super::{DecodeError, Encoding};
use crate::image::Image;
use crate::ImageKind;

/// Identify the image kind and raster encoding from a Netpbm magic word.
///
/// Only `P1`..`P6` are accepted; PAM (`P7`) and anything else is
/// [`DecodeError::InvalidFormat`].
pub fn sniff_netpbm(data: &[u8]) -> Result<(ImageKind, Encoding), DecodeError> {
    match data {
        [b'P', digit, ..] => ImageKind::from_magic_digit(*digit)
            .zip(Encoding::from_magic_digit(*digit))
            .ok_or(DecodeError::InvalidFormat),
        _ => Err(DecodeError::InvalidFormat),
    }
}

/// Decode a Netpbm image from bytes.
///
/// Bitmap samples are stored as `1` for black and `0` for white. Greymap and
/// pixmap samples come out stretched to `0..=255` when the file's max value
/// is lower.
///
/// # Errors
///
/// - [`DecodeError::InvalidFormat`] if the data is not P1-P6
/// - [`DecodeError::UnsupportedColorType`] for 16-bit samples
/// - [`DecodeError::Truncated`] if the header claims more pixels than the
///   data can hold
/// - [`DecodeError::CorruptedFile`] if the codec rejects the header or raster
pub fn decode_netpbm(data: &[u8]) -> Result<Image, DecodeError> {
    let (kind, encoding) = sniff_netpbm(data)?;
    let decoder = PnmDecoder::new(data)?;

    let expected = match kind {
        ImageKind::BiLevel | ImageKind::Greyscale => ColorType::L8,
        ImageKind::Colour => ColorType::Rgb8,
    };
    let color = decoder.color_type();
    if color != expected {
        return Err(DecodeError::UnsupportedColorType(format!("{color:?}")));
    }

    // A packed bitmap stores 8 pixels per byte; no valid file is denser.
    let declared = decoder.total_bytes();
    if declared > (data.len() as u64).saturating_mul(8) {
        return Err(DecodeError::Truncated {
            declared,
            available: data.len(),
        });
    }

    let (width, height) = decoder.dimensions();
    let mut samples = vec![0u8; declared as usize];
    decoder.read_image(&mut samples)?;

    if kind == ImageKind::BiLevel {
        // The codec yields luma, black = 0
        for sample in &mut samples {
            *sample = u8::from(*sample == 0);
        }
    }

    debug!(
        rows = height,
        columns = width,
        kind = %kind,
        encoding = ?encoding,
        "decoded netpbm image"
    );
    Ok(Image::from_samples(
        height as usize,
        width as usize,
        kind,
        samples,
    )?)
}

/// Load and decode a Netpbm file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_netpbm<P: AsRef<Path>>(path: P) -> Result<Image, DecodeError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_netpbm(&data)
}
