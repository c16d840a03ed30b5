//! pnmedit Core - Netpbm image editing library
//!
//! This crate provides the pixel-matrix transformation engine behind the
//! `pnmedit` command editor: selections, cropping, 3x3 convolution effects,
//! quarter-turn rotation, histogram binning and equalisation, plus the Netpbm
//! (P1-P6) codec used to get images in and out of memory.

pub mod convolution;
pub mod decode;
pub mod encode;
pub mod error;
pub mod histogram;
pub mod image;
pub mod matrix;
pub mod transform;

pub use convolution::{apply_effect, apply_kernel, Effect, Kernel};
pub use decode::{decode_netpbm, load_netpbm, sniff_netpbm, DecodeError, Encoding};
pub use encode::{encode_netpbm, save_netpbm, EncodeError};
pub use error::EditError;
pub use histogram::{binned_histogram, equalize, frequencies, BinnedHistogram, MAX_STARS};
pub use image::Image;
pub use matrix::PixelMatrix;
pub use transform::{
    apply_crop, apply_rotation, crop_to_selection, quarter_turns, rotate_image,
    rotate_square_in_place,
};

/// Largest value a sample may hold.
pub const PIXEL_MAX_VALUE: u8 = 255;

/// The three Netpbm image families.
///
/// The kind fixes how many samples make up one pixel and never changes for
/// the lifetime of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ImageKind {
    /// Black and white (P1 / P4), one sample per pixel.
    BiLevel,
    /// Greyscale (P2 / P5), one sample per pixel.
    Greyscale,
    /// RGB colour (P3 / P6), three samples per pixel.
    Colour,
}

impl ImageKind {
    /// Number of samples stored per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ImageKind::BiLevel | ImageKind::Greyscale => 1,
            ImageKind::Colour => 3,
        }
    }

    /// Map a Netpbm magic digit (`1`..=`6`) to its image kind.
    pub fn from_magic_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1' | b'4' => Some(ImageKind::BiLevel),
            b'2' | b'5' => Some(ImageKind::Greyscale),
            b'3' | b'6' => Some(ImageKind::Colour),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImageKind::BiLevel => "bi-level",
            ImageKind::Greyscale => "greyscale",
            ImageKind::Colour => "colour",
        };
        f.write_str(name)
    }
}

/// Axis-aligned half-open rectangle over an image.
///
/// Covers rows `[top, bottom)` and columns `[left, right)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Selection {
    /// First selected row.
    pub top: usize,
    /// One past the last selected row.
    pub bottom: usize,
    /// First selected column.
    pub left: usize,
    /// One past the last selected column.
    pub right: usize,
}

impl Selection {
    pub fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Selection covering a whole `rows x columns` image.
    pub fn full(rows: usize, columns: usize) -> Self {
        Self::new(0, rows, 0, columns)
    }

    /// Build a selection from two corner points given as `(x, y)` pairs,
    /// in any order.
    pub fn from_corners(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self::new(y1.min(y2), y1.max(y2), x1.min(x2), x1.max(x2))
    }

    /// Number of selected rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Number of selected columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn is_square(&self) -> bool {
        self.height() == self.width()
    }

    /// Check whether this selection covers exactly a `rows x columns` image.
    pub fn is_full(&self, rows: usize, columns: usize) -> bool {
        *self == Self::full(rows, columns)
    }

    /// Check that the bounds are ordered and lie inside a `rows x columns` image.
    pub fn fits(&self, rows: usize, columns: usize) -> bool {
        self.top <= self.bottom
            && self.bottom <= rows
            && self.left <= self.right
            && self.right <= columns
    }

    /// Overlap of two selections, or `None` when they share no pixel.
    pub fn intersect(&self, other: &Selection) -> Option<Selection> {
        let overlap = Selection::new(
            self.top.max(other.top),
            self.bottom.min(other.bottom),
            self.left.max(other.left),
            self.right.min(other.right),
        );
        if overlap.top >= overlap.bottom || overlap.left >= overlap.right {
            None
        } else {
            Some(overlap)
        }
    }

    /// Check whether `(row, column)` lies inside the selection.
    #[inline]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        (self.top..self.bottom).contains(&row) && (self.left..self.right).contains(&column)
    }
}
