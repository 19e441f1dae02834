//! Pixel-space bounding box from the detector.

use serde::{Deserialize, Serialize};

/// A detector bounding box in pixel coordinates.
///
/// Format is `(x0, y0, x1, y1)`, top-left to bottom-right, in the same pixel
/// space as the configured [`ReferenceZone`](crate::ReferenceZone).
/// Serializes as a 4-element array `[x0, y0, x1, y1]`.
///
/// A box arriving from the detector is not trusted: callers screen with
/// [`is_valid`](Self::is_valid) before geometric evaluation.
///
/// # Example
///
/// ```
/// use inspect_types::BoundingBox;
///
/// let bbox = BoundingBox::new(230.0, 550.0, 480.0, 575.0);
/// assert!((bbox.width() - 250.0).abs() < 1e-6);
/// assert!((bbox.height() - 25.0).abs() < 1e-6);
/// assert!(bbox.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    /// Left edge in pixels.
    pub x0: f32,
    /// Top edge in pixels.
    pub y0: f32,
    /// Right edge in pixels.
    pub x1: f32,
    /// Bottom edge in pixels.
    pub y1: f32,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[must_use]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Returns the box as an array `[x0, y0, x1, y1]`.
    #[must_use]
    pub const fn as_array(&self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }

    /// Returns the box width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Returns the box height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Checks whether the box is well-formed.
    ///
    /// Well-formed means all coordinates are finite, `x1 > x0`, and
    /// `y1 > y0`. Boxes failing this are discarded at the frame boundary and
    /// never reach the tolerance evaluator.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x0.is_finite()
            && self.y0.is_finite()
            && self.x1.is_finite()
            && self.y1.is_finite()
            && self.x1 > self.x0
            && self.y1 > self.y0
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(coords: [f32; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.as_array()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn bbox_dimensions() {
        let bbox = BoundingBox::new(100.0, 200.0, 350.0, 260.0);
        assert_eq!(bbox.width(), 250.0);
        assert_eq!(bbox.height(), 60.0);
    }

    #[test]
    fn bbox_validity() {
        assert!(BoundingBox::new(10.0, 10.0, 20.0, 20.0).is_valid());

        // Degenerate on the producing side.
        assert!(!BoundingBox::new(20.0, 10.0, 20.0, 20.0).is_valid());
        assert!(!BoundingBox::new(30.0, 10.0, 20.0, 20.0).is_valid());
        assert!(!BoundingBox::new(10.0, 20.0, 20.0, 20.0).is_valid());

        assert!(!BoundingBox::new(f32::NAN, 10.0, 20.0, 20.0).is_valid());
        assert!(!BoundingBox::new(10.0, 10.0, f32::INFINITY, 20.0).is_valid());
    }

    #[test]
    fn bbox_array_round_trip() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(BoundingBox::from(bbox.as_array()), bbox);
    }

    #[test]
    fn bbox_serializes_as_array() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");

        let parsed: BoundingBox = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(parsed, bbox);
    }
}
