//! Geometric operations: cropping and quarter-turn rotation.
//!
//! Both operations may replace the image's backing matrix. Whenever they do,
//! the old matrix is released and the selection is reset to the new full
//! extent.
//!
//! # Coordinate System
//!
//! - Selections are half-open pixel rectangles, `[top, bottom) x [left, right)`
//! - Rotation angles are in degrees, positive = clockwise, multiples of 90 only
//! - Origin is the top-left corner

mod crop;
mod rotation;

pub use crop::{apply_crop, crop_to_selection};
pub use rotation::{apply_rotation, quarter_turns, rotate_image, rotate_square_in_place};
