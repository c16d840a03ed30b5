//! 3x3 convolution effects.
//!
//! Each effect is a fixed [`Kernel`] (integer weights plus a divisor) applied
//! independently to every channel of the selected pixels.
//!
//! ## Edge Handling
//!
//! Pixels on the outer frame of the *image* (first/last row, first/last
//! column) have an incomplete neighbourhood and are left unchanged, even when
//! they are part of the selection.
//!
//! ## Algorithm
//!
//! ```text
//! out = clamp(round(sum(k[i][j] * src[row - 1 + i][col - 1 + j]) / divisor), 0, 255)
//! ```
//!
//! Results for the whole selection are computed into a scratch matrix first
//! and written back at the end, so no output pixel ever reads a neighbour
//! that has already been overwritten.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::EditError;
use crate::image::Image;
use crate::matrix::PixelMatrix;
use crate::{ImageKind, Selection, PIXEL_MAX_VALUE};

/// Side length of every kernel.
pub const KERNEL_SIZE: usize = 3;

/// A 3x3 integer convolution kernel with its normalisation divisor.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Kernel {
    /// Row-major weights.
    pub weights: [[i32; KERNEL_SIZE]; KERNEL_SIZE],
    /// The weighted sum is divided by this before rounding.
    pub divisor: f64,
}

impl Kernel {
    /// Box blur: plain average of the neighbourhood.
    pub const BLUR: Kernel = Kernel::new([[1, 1, 1], [1, 1, 1], [1, 1, 1]], 9.0);

    /// Gaussian-style blur, centre weighted.
    pub const GAUSSIAN_BLUR: Kernel = Kernel::new([[1, 2, 1], [2, 4, 2], [1, 2, 1]], 16.0);

    /// Sharpen.
    pub const SHARPEN: Kernel = Kernel::new([[0, -1, 0], [-1, 5, -1], [0, -1, 0]], 1.0);

    /// Edge detection (8-connectivity laplacian).
    pub const EDGE: Kernel = Kernel::new([[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]], 1.0);

    pub const fn new(weights: [[i32; KERNEL_SIZE]; KERNEL_SIZE], divisor: f64) -> Self {
        Self { weights, divisor }
    }

    /// Convolve one channel of the neighbourhood centred on `(row, column)`.
    ///
    /// The caller guarantees the centre is not on the matrix border.
    #[inline]
    fn convolve_at(&self, src: &PixelMatrix, row: usize, column: usize, channel: usize) -> u8 {
        let mut sum = 0.0f64;
        for (i, weights) in self.weights.iter().enumerate() {
            for (j, &weight) in weights.iter().enumerate() {
                let sample = src.pixel(row + i - 1, column + j - 1)[channel];
                sum += f64::from(weight) * f64::from(sample);
            }
        }
        (sum / self.divisor)
            .round()
            .clamp(0.0, f64::from(PIXEL_MAX_VALUE)) as u8
    }
}

/// The named effects available to the `APPLY` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    Blur,
    GaussianBlur,
    Sharpen,
    Edge,
}

impl Effect {
    /// All effects, in command-reference order.
    pub const ALL: [Effect; 4] = [
        Effect::Blur,
        Effect::GaussianBlur,
        Effect::Sharpen,
        Effect::Edge,
    ];

    /// The preset kernel behind this effect.
    pub fn kernel(self) -> Kernel {
        match self {
            Effect::Blur => Kernel::BLUR,
            Effect::GaussianBlur => Kernel::GAUSSIAN_BLUR,
            Effect::Sharpen => Kernel::SHARPEN,
            Effect::Edge => Kernel::EDGE,
        }
    }

    /// Command keyword, e.g. `GAUSSIAN_BLUR`.
    pub fn name(self) -> &'static str {
        match self {
            Effect::Blur => "BLUR",
            Effect::GaussianBlur => "GAUSSIAN_BLUR",
            Effect::Sharpen => "SHARPEN",
            Effect::Edge => "EDGE",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown effect: {0}")]
pub struct UnknownEffect(pub String);

impl FromStr for Effect {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Effect::ALL
            .into_iter()
            .find(|effect| effect.name() == s)
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

/// Apply a named effect over the image's active selection.
pub fn apply_effect(image: &mut Image, effect: Effect) -> Result<(), EditError> {
    let selection = image.selection();
    debug!(%effect, ?selection, "applying effect");
    apply_kernel(image, selection, &effect.kernel())
}

/// Convolve the pixels under `selection` with `kernel`.
///
/// Bi-level images are rejected. Border pixels of the image keep their
/// values.
pub fn apply_kernel(
    image: &mut Image,
    selection: Selection,
    kernel: &Kernel,
) -> Result<(), EditError> {
    if image.kind() == ImageKind::BiLevel {
        return Err(EditError::WrongImageKind {
            operation: "convolution",
            kind: image.kind(),
        });
    }
    image.check_selection(&selection)?;

    let (rows, columns) = (image.rows(), image.columns());
    let src = image.matrix();

    // Starts as a verbatim copy, so border pixels need no special write
    let mut result = src.copy_region(&selection);

    for row in selection.top..selection.bottom {
        if row == 0 || row + 1 >= rows {
            continue;
        }
        for column in selection.left..selection.right {
            if column == 0 || column + 1 >= columns {
                continue;
            }
            let out = result.pixel_mut(row - selection.top, column - selection.left);
            for (channel, sample) in out.iter_mut().enumerate() {
                *sample = kernel.convolve_at(src, row, column, channel);
            }
        }
    }

    image.matrix_mut().paste(selection.top, selection.left, &result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(rows: usize, columns: usize, kind: ImageKind, value: u8) -> Image {
        Image::from_samples(
            rows,
            columns,
            kind,
            vec![value; rows * columns * kind.channels()],
        )
        .unwrap()
    }

    /// Greyscale image where each pixel holds `(row * columns + column) * 7 % 256`.
    fn pattern(rows: usize, columns: usize) -> Image {
        let samples = (0..rows * columns).map(|i| (i * 7 % 256) as u8).collect();
        Image::from_samples(rows, columns, ImageKind::Greyscale, samples).unwrap()
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let mut img = uniform(6, 6, ImageKind::Greyscale, 100);
        apply_effect(&mut img, Effect::Blur).unwrap();
        assert!(img.matrix().samples().iter().all(|&s| s == 100));
    }

    #[test]
    fn test_all_presets_preserve_uniform_colour_image() {
        // Smoothing and sharpening weights sum to the divisor, edge weights to 0
        for effect in Effect::ALL {
            let mut img = uniform(5, 5, ImageKind::Colour, 80);
            apply_effect(&mut img, effect).unwrap();
            let expected = if effect == Effect::Edge { 0 } else { 80 };
            assert_eq!(img.pixel(2, 2), &[expected; 3], "{effect}");
        }
    }

    #[test]
    fn test_sharpen_known_value() {
        // centre 50 surrounded by 10: 5*50 - 4*10 = 210
        let mut img = uniform(3, 3, ImageKind::Greyscale, 10);
        img.set_pixel(1, 1, &[50]);
        apply_effect(&mut img, Effect::Sharpen).unwrap();
        assert_eq!(img.pixel(1, 1), &[210]);
    }

    #[test]
    fn test_edge_clamps_to_range() {
        // bright centre: 8*200 - 8*0 = 1600 -> 255
        let mut img = uniform(3, 3, ImageKind::Greyscale, 0);
        img.set_pixel(1, 1, &[200]);
        apply_effect(&mut img, Effect::Edge).unwrap();
        assert_eq!(img.pixel(1, 1), &[255]);

        // dark centre: 8*0 - 8*200 -> 0
        let mut img = uniform(3, 3, ImageKind::Greyscale, 200);
        img.set_pixel(1, 1, &[0]);
        apply_effect(&mut img, Effect::Edge).unwrap();
        assert_eq!(img.pixel(1, 1), &[0]);
    }

    #[test]
    fn test_gaussian_rounding() {
        // neighbours 10, centre 20: (4*20 + 12*10) / 16 = 12.5 -> 13
        let mut img = uniform(3, 3, ImageKind::Greyscale, 10);
        img.set_pixel(1, 1, &[20]);
        apply_effect(&mut img, Effect::GaussianBlur).unwrap();
        assert_eq!(img.pixel(1, 1), &[13]);
    }

    #[test]
    fn test_channels_convolved_independently() {
        let mut img = uniform(3, 3, ImageKind::Colour, 0);
        img.set_pixel(1, 1, &[90, 0, 180]);
        apply_effect(&mut img, Effect::Blur).unwrap();
        assert_eq!(img.pixel(1, 1), &[10, 0, 20]);
    }

    #[test]
    fn test_reads_unmodified_neighbours() {
        // A single bright pixel spread by blur: each interior neighbour sees
        // the original 90, never a blurred value.
        let mut img = uniform(5, 5, ImageKind::Greyscale, 0);
        img.set_pixel(2, 2, &[90]);
        apply_effect(&mut img, Effect::Blur).unwrap();
        for r in 1..4 {
            for c in 1..4 {
                assert_eq!(img.pixel(r, c), &[10], "({r}, {c})");
            }
        }
    }

    #[test]
    fn test_only_selection_changes() {
        let mut img = pattern(6, 6);
        let before = img.clone();
        img.select(Selection::new(2, 4, 2, 4)).unwrap();
        apply_effect(&mut img, Effect::Edge).unwrap();

        for r in 0..6 {
            for c in 0..6 {
                if !img.selection().contains(r, c) {
                    assert_eq!(img.pixel(r, c), before.pixel(r, c));
                }
            }
        }
    }

    #[test]
    fn test_selection_on_border_leaves_border() {
        let mut img = pattern(4, 4);
        let before = img.clone();
        img.select(Selection::new(0, 2, 0, 4)).unwrap();
        apply_effect(&mut img, Effect::Sharpen).unwrap();

        for c in 0..4 {
            assert_eq!(img.pixel(0, c), before.pixel(0, c));
        }
        assert_eq!(img.pixel(1, 0), before.pixel(1, 0));
        assert_eq!(img.pixel(1, 3), before.pixel(1, 3));
    }

    #[test]
    fn test_bilevel_rejected() {
        let mut img = uniform(3, 3, ImageKind::BiLevel, 1);
        let before = img.clone();
        let err = apply_effect(&mut img, Effect::Blur).unwrap_err();
        assert_eq!(
            err,
            EditError::WrongImageKind {
                operation: "convolution",
                kind: ImageKind::BiLevel
            }
        );
        assert_eq!(img, before);
    }

    #[test]
    fn test_tiny_images_unchanged() {
        // Every pixel of a 1xN or 2x2 image is a border pixel
        for (rows, columns) in [(1, 5), (5, 1), (2, 2)] {
            let mut img = pattern(rows, columns);
            let before = img.clone();
            apply_effect(&mut img, Effect::Sharpen).unwrap();
            assert_eq!(img, before);
        }
    }

    #[test]
    fn test_effect_names_round_trip() {
        for effect in Effect::ALL {
            assert_eq!(effect.name().parse::<Effect>(), Ok(effect));
            assert_eq!(effect.to_string(), effect.name());
        }
        assert_eq!(
            "blur".parse::<Effect>(),
            Err(UnknownEffect("blur".to_string()))
        );
    }

    #[test]
    fn test_effect_serde_uses_command_names() {
        let json = serde_json::to_string(&Effect::GaussianBlur).unwrap();
        assert_eq!(json, r#""GAUSSIAN_BLUR""#);
        let effect: Effect = serde_json::from_str(r#""EDGE""#).unwrap();
        assert_eq!(effect, Effect::Edge);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
