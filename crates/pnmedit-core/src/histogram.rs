//! Greyscale histogram binning and equalisation.
//!
//! Both operations work on the whole image and ignore the active selection.
//! Only greyscale images are accepted.

use tracing::debug;

use crate::error::EditError;
use crate::image::Image;
use crate::{ImageKind, PIXEL_MAX_VALUE};

/// Number of distinct sample values.
pub const LEVELS: usize = PIXEL_MAX_VALUE as usize + 1;

/// Largest star budget a histogram may be scaled to.
pub const MAX_STARS: u64 = 10_000;

/// A histogram folded into equal-width bins and scaled for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BinnedHistogram {
    /// Pixel count per bin, in value order.
    pub counts: Vec<u64>,
    /// Marker count per bin, scaled so the fullest bin gets `max_stars`.
    pub stars: Vec<u64>,
}

impl BinnedHistogram {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of pixels counted across all bins.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Count how many pixels hold each sample value.
///
/// Reads the first channel of every pixel, over the whole image.
pub fn frequencies(image: &Image) -> [u64; LEVELS] {
    let mut freq = [0u64; LEVELS];
    let channels = image.matrix().channels();
    for pixel in image.matrix().samples().chunks_exact(channels) {
        freq[pixel[0] as usize] += 1;
    }
    freq
}

/// Build a `bins`-bin histogram of a greyscale image.
///
/// Each bin spans `256 / bins` consecutive values (integer division). When
/// `bins` does not divide 256 the highest values fall past the last bin and
/// are not counted.
///
/// # Errors
///
/// - [`EditError::WrongImageKind`] for non-greyscale images
/// - [`EditError::InvalidBins`] when `bins` is 0 or above 256
/// - [`EditError::InvalidStars`] when `max_stars` is above [`MAX_STARS`]
pub fn binned_histogram(
    image: &Image,
    max_stars: u64,
    bins: usize,
) -> Result<BinnedHistogram, EditError> {
    require_greyscale(image, "histogram")?;
    if bins == 0 || bins > LEVELS {
        return Err(EditError::InvalidBins(bins));
    }
    if max_stars > MAX_STARS {
        return Err(EditError::InvalidStars(max_stars));
    }

    let freq = frequencies(image);
    let width = LEVELS / bins;

    let counts: Vec<u64> = freq
        .chunks_exact(width)
        .take(bins)
        .map(|interval| interval.iter().sum())
        .collect();

    let max_count = counts.iter().copied().max().unwrap_or(0);
    let stars = counts
        .iter()
        .map(|&count| {
            if max_count == 0 {
                0
            } else {
                (u128::from(count) * u128::from(max_stars) / u128::from(max_count)) as u64
            }
        })
        .collect();

    debug!(bins, width, max_count, "histogram binned");
    Ok(BinnedHistogram { counts, stars })
}

/// Equalise a greyscale image in place.
///
/// Every value `v` becomes `round(255 * cdf(v) / area)`, where `cdf` is the
/// cumulative frequency. The selection is ignored.
pub fn equalize(image: &mut Image) -> Result<(), EditError> {
    require_greyscale(image, "equalize")?;

    let area = image.matrix().area();
    if area == 0 {
        return Ok(());
    }

    let freq = frequencies(image);
    let mut lut = [0u8; LEVELS];
    let mut cumulative = 0u64;
    for (value, &count) in freq.iter().enumerate() {
        cumulative += count;
        let mapped = f64::from(PIXEL_MAX_VALUE) * cumulative as f64 / area as f64;
        lut[value] = mapped.round().clamp(0.0, f64::from(PIXEL_MAX_VALUE)) as u8;
    }

    debug!(area, "equalizing image");
    let matrix = image.matrix_mut();
    for row in 0..matrix.rows() {
        for column in 0..matrix.columns() {
            let sample = &mut matrix.pixel_mut(row, column)[0];
            *sample = lut[*sample as usize];
        }
    }
    Ok(())
}

fn require_greyscale(image: &Image, operation: &'static str) -> Result<(), EditError> {
    if image.kind() != ImageKind::Greyscale {
        return Err(EditError::WrongImageKind {
            operation,
            kind: image.kind(),
        });
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
