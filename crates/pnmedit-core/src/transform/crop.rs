//! Image cropping.
//!
//! Cropping materialises a new matrix holding exactly the selected pixels and
//! swaps it in as the image's backing store.
//!
//! # Example
//!
//! ```ignore
//! // Keep rows 1..3 and columns 2..6
//! apply_crop(&mut image, Selection::new(1, 3, 2, 6))?;
//! ```

use tracing::debug;

use crate::error::EditError;
use crate::image::Image;
use crate::Selection;

/// Crop an image to `selection`.
///
/// The result has `selection.height()` rows and `selection.width()` columns
/// and the selection is reset to cover all of it.
///
/// # Behavior
///
/// - A selection covering the whole image is a no-op (nothing is copied)
/// - Empty or out-of-bounds selections are rejected and the image is left
///   untouched
pub fn apply_crop(image: &mut Image, selection: Selection) -> Result<(), EditError> {
    image.check_selection(&selection)?;

    // Fast path: full crop keeps the current matrix
    if selection.is_full(image.rows(), image.columns()) {
        image.select_all();
        return Ok(());
    }

    let cropped = image.matrix().copy_region(&selection);
    debug!(
        from_rows = image.rows(),
        from_columns = image.columns(),
        rows = cropped.rows(),
        columns = cropped.columns(),
        "cropping image"
    );
    image.replace_matrix(cropped);
    Ok(())
}

/// Crop an image to its own active selection.
pub fn crop_to_selection(image: &mut Image) -> Result<(), EditError> {
    let selection = image.selection();
    apply_crop(image, selection)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
