//! The editable image: pixel storage, kind and active selection.

use tracing::debug;

use crate::error::EditError;
use crate::matrix::PixelMatrix;
use crate::{ImageKind, Selection};

/// An in-memory Netpbm image.
///
/// The image exclusively owns its [`PixelMatrix`]. Dimensions are read from
/// the matrix, so they only change when the matrix is replaced, and every
/// replacement resets the selection to the new full extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    kind: ImageKind,
    matrix: PixelMatrix,
    selection: Selection,
}

impl Image {
    /// Create a zero-filled image with everything selected.
    pub fn new(rows: usize, columns: usize, kind: ImageKind) -> Self {
        Self {
            kind,
            matrix: PixelMatrix::new(rows, columns, kind.channels()),
            selection: Selection::full(rows, columns),
        }
    }

    /// Create an image from row-major samples (`kind.channels()` per pixel).
    pub fn from_samples(
        rows: usize,
        columns: usize,
        kind: ImageKind,
        samples: Vec<u8>,
    ) -> Result<Self, EditError> {
        let matrix = PixelMatrix::from_samples(rows, columns, kind.channels(), samples)?;
        Ok(Self {
            kind,
            matrix,
            selection: Selection::full(rows, columns),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.matrix.columns()
    }

    #[inline]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// The active selection.
    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn matrix(&self) -> &PixelMatrix {
        &self.matrix
    }

    pub(crate) fn matrix_mut(&mut self) -> &mut PixelMatrix {
        &mut self.matrix
    }

    /// Samples of the pixel at `(row, column)`.
    pub fn pixel(&self, row: usize, column: usize) -> &[u8] {
        self.matrix.pixel(row, column)
    }

    /// Overwrite the pixel at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds or `samples` has the wrong
    /// number of channels.
    pub fn set_pixel(&mut self, row: usize, column: usize, samples: &[u8]) {
        self.matrix.pixel_mut(row, column).copy_from_slice(samples);
    }

    /// Make `selection` the active selection.
    ///
    /// Empty selections and selections reaching outside the image are
    /// rejected and leave the current selection in place.
    pub fn select(&mut self, selection: Selection) -> Result<(), EditError> {
        self.check_selection(&selection)?;
        debug!(?selection, "selection updated");
        self.selection = selection;
        Ok(())
    }

    /// Select the whole image.
    pub fn select_all(&mut self) {
        self.selection = Selection::full(self.rows(), self.columns());
    }

    /// Check whether the active selection covers the whole image.
    pub fn is_fully_selected(&self) -> bool {
        self.selection.is_full(self.rows(), self.columns())
    }

    /// Validate that `selection` is non-empty and inside the image.
    pub fn check_selection(&self, selection: &Selection) -> Result<(), EditError> {
        if selection.is_empty() || !selection.fits(self.rows(), self.columns()) {
            return Err(EditError::InvalidSelection {
                selection: *selection,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(())
    }

    /// Install a new backing matrix, releasing the previous one and
    /// selecting the new full extent.
    pub(crate) fn replace_matrix(&mut self, matrix: PixelMatrix) {
        debug_assert_eq!(matrix.channels(), self.kind.channels());
        let mut previous = std::mem::replace(&mut self.matrix, matrix);
        previous.release();
        self.select_all();
    }
}
