//! Core value types for frame geometry.

use serde::{Deserialize, Serialize};

/// A two-component float vector, laid out the way shader uniforms expect it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Snapshot of the upstream producer's dimensions for the current tick.
///
/// Both dimensions are zero when the producer is not ready yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFrame {
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
}

impl SourceFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A source with no pixels on either axis cannot be rendered this tick.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Source aspect ratio (width / height). Only meaningful when not degenerate.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Pixel margins trimmed from each edge of the resolved frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropMargins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl CropMargins {
    pub fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Check if nothing is cropped on any edge
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Upper bounds of the margin sliders, in pixels.
///
/// Left/right margins range over `max_width`, top/bottom over `max_height`.
/// Presets store margins as fractions of this range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub max_width: u32,
    pub max_height: u32,
}

impl SliderRange {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Whether either axis is unknown (producer not ready).
    pub fn is_empty(&self) -> bool {
        self.max_width == 0 || self.max_height == 0
    }

    /// Clamp each margin into its slider range.
    pub fn clamp(&self, margins: &CropMargins) -> CropMargins {
        CropMargins {
            left: margins.left.min(self.max_width),
            right: margins.right.min(self.max_width),
            top: margins.top.min(self.max_height),
            bottom: margins.bottom.min(self.max_height),
        }
    }
}

impl From<SourceFrame> for SliderRange {
    fn from(frame: SourceFrame) -> Self {
        Self::new(frame.width, frame.height)
    }
}

/// Output of the aspect resolver for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    /// Corrected output width in pixels.
    pub output_width: u32,
    /// Corrected output height in pixels.
    pub output_height: u32,
    /// Target aspect divided by source aspect.
    pub undistort_factor: f32,
    /// False when the undistort pass must not run this tick.
    pub valid: bool,
}

impl ResolvedGeometry {
    /// The zeroed record used for every non-corrected outcome.
    pub const INVALID: ResolvedGeometry = ResolvedGeometry {
        output_width: 0,
        output_height: 0,
        undistort_factor: 0.0,
        valid: false,
    };

    pub fn dimensions(&self) -> (u32, u32) {
        (self.output_width, self.output_height)
    }
}

/// Cropped render size and the UV mapping into the cropped sub-rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropTransformResult {
    /// Render target width; zero means nothing is visible.
    pub crop_width: u32,
    /// Render target height; zero means nothing is visible.
    pub crop_height: u32,
    /// Multiplier applied to normalized texture coordinates.
    pub scale: Vec2,
    /// Offset added after scaling.
    pub offset: Vec2,
}

impl CropTransformResult {
    /// True when the crop removes the whole frame on at least one axis.
    pub fn is_empty(&self) -> bool {
        self.crop_width == 0 || self.crop_height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_frame_degenerate() {
        assert!(SourceFrame::default().is_degenerate());
        assert!(SourceFrame::new(1920, 0).is_degenerate());
        assert!(SourceFrame::new(0, 1080).is_degenerate());
        assert!(!SourceFrame::new(1920, 1080).is_degenerate());
    }

    #[test]
    fn test_source_frame_aspect() {
        let frame = SourceFrame::new(1920, 1080);
        assert!((frame.aspect() - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_margins_zero() {
        assert!(CropMargins::default().is_zero());
        assert!(!CropMargins::new(0, 0, 1, 0).is_zero());
    }

    #[test]
    fn test_slider_range_clamp() {
        let range = SliderRange::new(640, 480);
        let clamped = range.clamp(&CropMargins::new(700, 10, 500, 0));
        assert_eq!(clamped, CropMargins::new(640, 10, 480, 0));
        assert!(!range.is_empty());
        assert!(SliderRange::from(SourceFrame::default()).is_empty());
    }

    #[test]
    fn test_invalid_geometry_is_zeroed() {
        let geom = ResolvedGeometry::INVALID;
        assert!(!geom.valid);
        assert_eq!(geom.dimensions(), (0, 0));
    }

    #[test]
    fn test_crop_result_empty() {
        let mut result = CropTransformResult {
            crop_width: 10,
            crop_height: 10,
            ..Default::default()
        };
        assert!(!result.is_empty());
        result.crop_height = 0;
        assert!(result.is_empty());
    }
}
