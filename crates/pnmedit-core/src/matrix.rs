//! Owned 2-D pixel storage.
//!
//! A [`PixelMatrix`] keeps `rows x columns` pixels in a single row-major
//! buffer, `channels` samples per pixel. All access goes through
//! index-checked accessors; the raw buffer is only exposed read-only.

use crate::error::EditError;
use crate::Selection;

/// Row-major grid of pixels with 1 (mono) or 3 (RGB) samples each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    rows: usize,
    columns: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelMatrix {
    /// Allocate a zero-filled matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns * channels` overflows `usize`. Allocation
    /// failure aborts the process; there is no recoverable out-of-memory path.
    pub fn new(rows: usize, columns: usize, channels: usize) -> Self {
        let len = sample_len(rows, columns, channels)
            .unwrap_or_else(|| panic!("pixel matrix {rows}x{columns}x{channels} is too large"));
        Self {
            rows,
            columns,
            channels,
            samples: vec![0u8; len],
        }
    }

    /// Wrap an existing row-major sample buffer.
    pub fn from_samples(
        rows: usize,
        columns: usize,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, EditError> {
        let expected = sample_len(rows, columns, channels).unwrap_or(usize::MAX);
        if samples.len() != expected {
            return Err(EditError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            channels,
            samples,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Samples per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels.
    #[inline]
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    /// The row-major sample buffer.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.rows && column < self.columns,
            "pixel ({row}, {column}) out of bounds for {}x{} matrix",
            self.rows,
            self.columns
        );
        (row * self.columns + column) * self.channels
    }

    /// Samples of the pixel at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    #[inline]
    pub fn pixel(&self, row: usize, column: usize) -> &[u8] {
        let start = self.offset(row, column);
        &self.samples[start..start + self.channels]
    }

    /// Mutable samples of the pixel at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    #[inline]
    pub fn pixel_mut(&mut self, row: usize, column: usize) -> &mut [u8] {
        let start = self.offset(row, column);
        let channels = self.channels;
        &mut self.samples[start..start + channels]
    }

    /// Samples of the pixel at `(row, column)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<&[u8]> {
        (row < self.rows && column < self.columns).then(|| self.pixel(row, column))
    }

    /// All samples of one row.
    pub fn row(&self, row: usize) -> &[u8] {
        assert!(row < self.rows, "row {row} out of bounds for {} rows", self.rows);
        let stride = self.columns * self.channels;
        &self.samples[row * stride..(row + 1) * stride]
    }

    /// Exchange two pixels.
    pub fn swap_pixels(&mut self, a: (usize, usize), b: (usize, usize)) {
        let first = self.offset(a.0, a.1);
        let second = self.offset(b.0, b.1);
        if first == second {
            return;
        }
        for channel in 0..self.channels {
            self.samples.swap(first + channel, second + channel);
        }
    }

    /// Deep-copy the pixels under `selection` into a new matrix.
    ///
    /// # Panics
    ///
    /// Panics if the selection does not fit inside the matrix.
    pub fn copy_region(&self, selection: &Selection) -> PixelMatrix {
        assert!(
            selection.fits(self.rows, self.columns),
            "selection {selection:?} outside {}x{} matrix",
            self.rows,
            self.columns
        );
        let mut region = PixelMatrix::new(selection.height(), selection.width(), self.channels);
        let span = selection.width() * self.channels;
        for row in 0..selection.height() {
            let src = self.offset_unchecked(selection.top + row, selection.left);
            let dst = row * span;
            region.samples[dst..dst + span].copy_from_slice(&self.samples[src..src + span]);
        }
        region
    }

    /// Write `region` back with its top-left pixel at `(top, left)`.
    ///
    /// # Panics
    ///
    /// Panics if the region does not fit, or its channel count differs.
    pub fn paste(&mut self, top: usize, left: usize, region: &PixelMatrix) {
        assert_eq!(self.channels, region.channels, "channel count mismatch");
        assert!(
            top + region.rows <= self.rows && left + region.columns <= self.columns,
            "region {}x{} at ({top}, {left}) outside {}x{} matrix",
            region.rows,
            region.columns,
            self.rows,
            self.columns
        );
        let span = region.columns * self.channels;
        for row in 0..region.rows {
            let dst = self.offset_unchecked(top + row, left);
            let src = row * span;
            self.samples[dst..dst + span].copy_from_slice(&region.samples[src..src + span]);
        }
    }

    /// Free the pixel storage. Calling this on a released matrix does nothing.
    pub fn release(&mut self) {
        if self.is_released() {
            return;
        }
        self.samples = Vec::new();
        self.rows = 0;
        self.columns = 0;
    }

    /// Check whether the storage has been released (or was never allocated).
    pub fn is_released(&self) -> bool {
        self.samples.is_empty() && self.samples.capacity() == 0
    }

    // Row starts are computed for spans that may be empty, where the
    // bounds check in `offset` would reject `left == columns`.
    #[inline]
    fn offset_unchecked(&self, row: usize, column: usize) -> usize {
        (row * self.columns + column) * self.channels
    }
}

fn sample_len(rows: usize, columns: usize, channels: usize) -> Option<usize> {
    rows.checked_mul(columns)?.checked_mul(channels)
}
