//! Crop transform computation.
//!
//! Margins are pixels measured against the resolved output frame. The result
//! is the render target size plus the scale/offset pair that maps normalized
//! texture coordinates of the full frame into the cropped sub-rectangle:
//!
//! ```text
//! uv_source = uv_target * scale + offset
//! ```
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner

use super::types::{CropMargins, CropTransformResult, Vec2};

/// Compute the cropped dimensions and UV mapping for one tick.
///
/// # Arguments
///
/// * `output` - resolved frame size `(width, height)` in pixels
/// * `margins` - pixel margins to trim from each edge
///
/// # Behavior
///
/// - A margin pair larger than its axis clamps that axis to zero; this is not
///   an error.
/// - An axis with zero extent (in or out) gets zero scale and offset, so no
///   sampling happens on it.
///
/// # Example
///
/// ```
/// use consolecrop_core::geometry::{compute_crop, CropMargins};
///
/// let result = compute_crop((1920, 1080), &CropMargins::new(100, 100, 0, 0));
/// assert_eq!(result.crop_width, 1720);
/// assert_eq!(result.crop_height, 1080);
/// ```
pub fn compute_crop(output: (u32, u32), margins: &CropMargins) -> CropTransformResult {
    let (width, height) = output;

    let crop_width = clamp_axis(width, margins.left, margins.right);
    let crop_height = clamp_axis(height, margins.top, margins.bottom);

    let (scale_x, offset_x) = axis_mapping(width, crop_width, margins.left);
    let (scale_y, offset_y) = axis_mapping(height, crop_height, margins.top);

    CropTransformResult {
        crop_width,
        crop_height,
        scale: Vec2::new(scale_x, scale_y),
        offset: Vec2::new(offset_x, offset_y),
    }
}

/// Remaining extent after trimming both margins, clamped at zero.
#[inline]
fn clamp_axis(extent: u32, near: u32, far: u32) -> u32 {
    // Summed in u64 so two large margins cannot wrap.
    let total = near as u64 + far as u64;
    if total > extent as u64 {
        0
    } else {
        extent - total as u32
    }
}

#[inline]
fn axis_mapping(extent: u32, cropped: u32, near: u32) -> (f32, f32) {
    if extent > 0 && cropped > 0 {
        (cropped as f32 / extent as f32, near as f32 / extent as f32)
    } else {
        (0.0, 0.0)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
