//! Quarter-turn rotation.
//!
//! Two paths share one angle normalisation rule:
//! - **Whole image**: remaps every pixel into a freshly allocated matrix, swapping
//!   the dimensions on odd turn counts
//! - **Square selection**: rotates a square sub-block in place, ring by ring,
//!   without a second buffer
//!
//! # Algorithm
//!
//! A clockwise quarter turn sends source pixel `(r, c)` of an `n x n` block to
//! `(c, n - 1 - r)`. In place, each ring of the block is walked once and every
//! group of four symmetric positions is cycled with three swaps:
//!
//! ```text
//! top <- left <- bottom <- right <- top
//! ```

use tracing::debug;

use crate::error::EditError;
use crate::image::Image;
use crate::matrix::PixelMatrix;
use crate::Selection;

/// Degrees in one quarter turn.
const QUARTER_TURN: i32 = 90;

/// Normalise an angle in degrees to a number of clockwise quarter turns (0-3).
///
/// Angles that are not a multiple of 90 are rejected. Negative angles count
/// counter-clockwise, so `-90` is three clockwise turns.
pub fn quarter_turns(angle: i32) -> Result<u8, EditError> {
    if angle % QUARTER_TURN != 0 {
        return Err(EditError::UnsupportedAngle(angle));
    }
    Ok((angle / QUARTER_TURN).rem_euclid(4) as u8)
}

/// Rotate an image by `angle` degrees.
///
/// When the whole image is selected the image itself is rotated and may
/// change shape. Otherwise the selection must be square and only its pixels
/// rotate, in place.
pub fn apply_rotation(image: &mut Image, angle: i32) -> Result<(), EditError> {
    let turns = quarter_turns(angle)?;

    if image.is_fully_selected() {
        rotate_image(image, turns);
        return Ok(());
    }

    let selection = image.selection();
    rotate_square_in_place(image.matrix_mut(), selection, turns)
}

/// Rotate the whole image clockwise by `turns` quarter turns.
///
/// A fresh matrix is allocated (with swapped dimensions for odd turns), the
/// old one is released and the selection is reset.
pub fn rotate_image(image: &mut Image, turns: u8) {
    let turns = turns % 4;
    if turns == 0 {
        return;
    }

    let src = image.matrix();
    let (rows, columns) = (src.rows(), src.columns());
    let (dst_rows, dst_columns) = if turns % 2 == 1 {
        (columns, rows)
    } else {
        (rows, columns)
    };

    debug!(rows, columns, turns, "rotating whole image");

    let mut rotated = PixelMatrix::new(dst_rows, dst_columns, src.channels());
    for i in 0..dst_rows {
        for j in 0..dst_columns {
            let (sr, sc) = match turns {
                1 => (rows - 1 - j, i),
                2 => (rows - 1 - i, columns - 1 - j),
                _ => (j, columns - 1 - i),
            };
            rotated.pixel_mut(i, j).copy_from_slice(src.pixel(sr, sc));
        }
    }

    image.replace_matrix(rotated);
}

/// Rotate the square block under `selection` clockwise by `turns` quarter
/// turns, in place.
///
/// Pixels outside the selection are untouched. A selection covering a whole
/// square matrix is allowed and gives the same pixels as [`rotate_image`].
pub fn rotate_square_in_place(
    matrix: &mut PixelMatrix,
    selection: Selection,
    turns: u8,
) -> Result<(), EditError> {
    if !selection.is_square() {
        return Err(EditError::SelectionNotSquare {
            height: selection.height(),
            width: selection.width(),
        });
    }
    if selection.is_empty() || !selection.fits(matrix.rows(), matrix.columns()) {
        return Err(EditError::InvalidSelection {
            selection,
            rows: matrix.rows(),
            columns: matrix.columns(),
        });
    }

    let turns = turns % 4;
    debug!(?selection, turns, "rotating selection in place");
    for _ in 0..turns {
        rotate_block_once(matrix, &selection);
    }
    Ok(())
}

/// One clockwise quarter turn of a square block.
fn rotate_block_once(matrix: &mut PixelMatrix, block: &Selection) {
    let size = block.height();
    // The centre cell of an odd block is its own ring and never moves.
    for depth in 0..size / 2 {
        let last = size - 1 - depth;
        for step in 0..last - depth {
            let [top, right, bottom, left] = ring_positions(depth, step, size)
                .map(|(r, c)| (block.top + r, block.left + c));
            matrix.swap_pixels(top, left);
            matrix.swap_pixels(left, bottom);
            matrix.swap_pixels(bottom, right);
        }
    }
}

/// The four block-relative positions visited together when rotating ring
/// `depth` of a `size x size` block, `step` cells along the ring.
///
/// Returned in `[top, right, bottom, left]` order; a clockwise turn moves each
/// pixel to the next position in that order.
#[inline]
fn ring_positions(depth: usize, step: usize, size: usize) -> [(usize, usize); 4] {
    let last = size - 1 - depth;
    [
        (depth, depth + step),
        (depth + step, last),
        (last, last - step),
        (last - step, depth),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageKind;

    /// Greyscale image where each pixel holds its row-major index.
    fn test_image(rows: usize, columns: usize) -> Image {
        let samples = (0..rows * columns).map(|i| (i % 256) as u8).collect();
        Image::from_samples(rows, columns, ImageKind::Greyscale, samples).unwrap()
    }

    fn values(image: &Image) -> Vec<u8> {
        image.matrix().samples().to_vec()
    }

    #[test]
    fn test_quarter_turns_normalisation() {
        assert_eq!(quarter_turns(0), Ok(0));
        assert_eq!(quarter_turns(90), Ok(1));
        assert_eq!(quarter_turns(180), Ok(2));
        assert_eq!(quarter_turns(270), Ok(3));
        assert_eq!(quarter_turns(360), Ok(0));
        assert_eq!(quarter_turns(450), Ok(1));
        assert_eq!(quarter_turns(-90), Ok(3));
        assert_eq!(quarter_turns(-180), Ok(2));
        assert_eq!(quarter_turns(-270), Ok(1));
        assert_eq!(quarter_turns(-360), Ok(0));
    }

    #[test]
    fn test_quarter_turns_rejects_other_angles() {
        assert_eq!(quarter_turns(45), Err(EditError::UnsupportedAngle(45)));
        assert_eq!(quarter_turns(-100), Err(EditError::UnsupportedAngle(-100)));
    }

    #[test]
    fn test_rotate_image_90() {
        // 0 1 2        3 0
        // 3 4 5   ->   4 1
        //              5 2
        let mut img = test_image(2, 3);
        rotate_image(&mut img, 1);
        assert_eq!(img.rows(), 3);
        assert_eq!(img.columns(), 2);
        assert_eq!(values(&img), vec![3, 0, 4, 1, 5, 2]);
        assert!(img.is_fully_selected());
    }

    #[test]
    fn test_rotate_image_180() {
        let mut img = test_image(2, 3);
        rotate_image(&mut img, 2);
        assert_eq!(img.rows(), 2);
        assert_eq!(img.columns(), 3);
        assert_eq!(values(&img), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_rotate_image_270() {
        // 0 1 2        2 5
        // 3 4 5   ->   1 4
        //              0 3
        let mut img = test_image(2, 3);
        rotate_image(&mut img, 3);
        assert_eq!(img.rows(), 3);
        assert_eq!(img.columns(), 2);
        assert_eq!(values(&img), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_rotate_image_zero_turns_is_noop() {
        let mut img = test_image(3, 2);
        let before = img.clone();
        rotate_image(&mut img, 0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_rotate_colour_image_moves_whole_pixels() {
        let samples = vec![
            1, 2, 3, 4, 5, 6, //
            7, 8, 9, 10, 11, 12,
        ];
        let mut img = Image::from_samples(2, 2, ImageKind::Colour, samples).unwrap();
        rotate_image(&mut img, 1);
        assert_eq!(img.pixel(0, 0), &[7, 8, 9]);
        assert_eq!(img.pixel(0, 1), &[1, 2, 3]);
        assert_eq!(img.pixel(1, 0), &[10, 11, 12]);
        assert_eq!(img.pixel(1, 1), &[4, 5, 6]);
    }

    #[test]
    fn test_selection_2x2_rotation_in_4x4() {
        let mut img = test_image(4, 4);
        let before = img.clone();
        img.select(Selection::new(1, 3, 1, 3)).unwrap();
        apply_rotation(&mut img, 90).unwrap();

        // [[a, b], [c, d]] -> [[c, a], [d, b]]
        let (a, b, c, d) = (5, 6, 9, 10);
        assert_eq!(img.pixel(1, 1), &[c]);
        assert_eq!(img.pixel(1, 2), &[a]);
        assert_eq!(img.pixel(2, 1), &[d]);
        assert_eq!(img.pixel(2, 2), &[b]);

        for r in 0..4 {
            for col in 0..4 {
                if !img.selection().contains(r, col) {
                    assert_eq!(img.pixel(r, col), before.pixel(r, col));
                }
            }
        }
        // Selection and dimensions survive an in-place rotation
        assert_eq!(img.selection(), Selection::new(1, 3, 1, 3));
        assert_eq!(img.rows(), 4);
    }

    #[test]
    fn test_selection_off_diagonal() {
        // 3x3 block at rows 0..3, columns 2..5 of a 3x6 image
        let mut img = test_image(3, 6);
        img.select(Selection::new(0, 3, 2, 5)).unwrap();
        apply_rotation(&mut img, 90).unwrap();

        // block before:   2  3  4 / 8  9 10 / 14 15 16
        // block after:   14  8  2 / 15 9  3 / 16 10  4
        assert_eq!(img.matrix().row(0), &[0, 1, 14, 8, 2, 5]);
        assert_eq!(img.matrix().row(1), &[6, 7, 15, 9, 3, 11]);
        assert_eq!(img.matrix().row(2), &[12, 13, 16, 10, 4, 17]);
    }

    #[test]
    fn test_selection_odd_size_keeps_centre() {
        let mut img = test_image(5, 5);
        img.select(Selection::new(1, 4, 1, 4)).unwrap();
        let centre = img.pixel(2, 2).to_vec();
        apply_rotation(&mut img, 90).unwrap();
        assert_eq!(img.pixel(2, 2), centre.as_slice());
    }

    #[test]
    fn test_selection_rotation_negative_angle() {
        let mut clockwise = test_image(4, 4);
        clockwise.select(Selection::new(0, 3, 0, 3)).unwrap();
        let mut counter = clockwise.clone();

        apply_rotation(&mut clockwise, 270).unwrap();
        apply_rotation(&mut counter, -90).unwrap();
        assert_eq!(clockwise, counter);
    }

    #[test]
    fn test_non_square_selection_rejected() {
        let mut img = test_image(4, 4);
        img.select(Selection::new(0, 2, 0, 3)).unwrap();
        let before = img.clone();

        let err = apply_rotation(&mut img, 90).unwrap_err();
        assert_eq!(
            err,
            EditError::SelectionNotSquare {
                height: 2,
                width: 3
            }
        );
        assert_eq!(img, before);
    }

    #[test]
    fn test_unsupported_angle_rejected_before_anything() {
        let mut img = test_image(4, 4);
        img.select(Selection::new(0, 2, 0, 3)).unwrap();
        let before = img.clone();

        assert_eq!(
            apply_rotation(&mut img, 30),
            Err(EditError::UnsupportedAngle(30))
        );
        assert_eq!(img, before);
    }

    #[test]
    fn test_full_selection_uses_whole_image_path() {
        // Non-square but fully selected: the image is reshaped
        let mut img = test_image(2, 5);
        apply_rotation(&mut img, 90).unwrap();
        assert_eq!(img.rows(), 5);
        assert_eq!(img.columns(), 2);
    }

    #[test]
    fn test_single_pixel_selection_rotation() {
        let mut img = test_image(3, 3);
        img.select(Selection::new(1, 2, 1, 2)).unwrap();
        let before = img.clone();
        apply_rotation(&mut img, 90).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_ring_positions_outer_ring() {
        // 4x4 block, outer ring, first step: the four corners
        assert_eq!(
            ring_positions(0, 0, 4),
            [(0, 0), (0, 3), (3, 3), (3, 0)]
        );
        // inner ring of a 4x4 block
        assert_eq!(
            ring_positions(1, 0, 4),
            [(1, 1), (1, 2), (2, 2), (2, 1)]
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
