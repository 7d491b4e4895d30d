//! Image layout normalization.
//!
//! Computes a uniform display height for the heterogeneous images attached
//! to one note: every image is scaled to a fixed display width, the tallest
//! scaled image sets the note's footprint, and shorter images receive a
//! vertical centering offset inside that footprint.
//!
//! This is a pure function of the image dimension data: identical input
//! produces identical output regardless of call order or concurrency. The
//! computation is per-note; heights are never compared across notes.

use serde::Serialize;

use crate::defaults::IMAGE_DISPLAY_WIDTH;
use crate::models::NoteImage;

/// Per-image layout result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ImageLayout {
    /// Display height after scaling to [`IMAGE_DISPLAY_WIDTH`].
    /// Zero when the intrinsic dimensions are unknown.
    pub scaled_height: u32,
    /// Vertical offset centering this image within the tallest image's
    /// footprint. Zero for the tallest image and for dimension-less images.
    pub half_diff: u32,
}

/// Layout for one note's full image set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteLayout {
    /// Tallest scaled height across the note's valid images (0 if none).
    pub max_height: u32,
    /// Per-image layouts, in the same order as the input slice.
    pub images: Vec<ImageLayout>,
}

/// Scale an image's intrinsic height to the fixed display width.
///
/// Returns 0 when either dimension is absent or non-positive.
pub fn scaled_height(width: Option<i32>, height: Option<i32>) -> u32 {
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => {
            (h as f64 / w as f64 * IMAGE_DISPLAY_WIDTH as f64).round() as u32
        }
        _ => 0,
    }
}

/// Compute the display layout for one note's images.
pub fn normalize(images: &[NoteImage]) -> NoteLayout {
    let heights: Vec<u32> = images
        .iter()
        .map(|img| scaled_height(img.width, img.height))
        .collect();
    let max_height = heights.iter().copied().max().unwrap_or(0);

    let images = heights
        .iter()
        .map(|&h| {
            if h == 0 {
                ImageLayout::default()
            } else {
                ImageLayout {
                    scaled_height: h,
                    half_diff: ((max_height - h) as f64 / 2.0).round() as u32,
                }
            }
        })
        .collect();

    NoteLayout { max_height, images }
}
