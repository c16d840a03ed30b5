//! Rejection reasons for editing operations.
//!
//! Every variant describes an operation that was refused before any pixel was
//! touched, so an image is never left half-modified.

use thiserror::Error;

use crate::{ImageKind, Selection};

/// Error types for editing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The operation is not defined for this kind of image.
    #[error("{operation} is not supported on {kind} images")]
    WrongImageKind {
        operation: &'static str,
        kind: ImageKind,
    },

    /// In-place rotation needs a square selection.
    #[error("selection {height}x{width} is not square")]
    SelectionNotSquare { height: usize, width: usize },

    /// Rotation angle is not a multiple of 90 degrees.
    #[error("unsupported rotation angle: {0}")]
    UnsupportedAngle(i32),

    /// Selection is empty or reaches outside the image.
    #[error("invalid selection {selection:?} for a {rows}x{columns} image")]
    InvalidSelection {
        selection: Selection,
        rows: usize,
        columns: usize,
    },

    /// Histogram bin count outside `1..=256`.
    #[error("invalid histogram bin count: {0}")]
    InvalidBins(usize),

    /// Histogram star budget above the display limit.
    #[error("invalid histogram star count: {0}")]
    InvalidStars(u64),

    /// Sample buffer length does not match the requested dimensions.
    #[error("sample buffer size mismatch: expected {expected}, got {actual}")]
    SampleCount { expected: usize, actual: usize },
}
