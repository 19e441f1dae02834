//! Labeled detector output for a single frame.

use serde::{Deserialize, Serialize};

use crate::BoundingBox;

/// One labeled bounding box produced by the detector for the current frame.
///
/// Detections are ephemeral: they exist for the duration of one frame cycle
/// and are never persisted. The label must match an entry in the configured
/// threshold table to qualify; anything else is dropped by the filter.
///
/// # Example
///
/// ```
/// use inspect_types::{BoundingBox, Detection};
///
/// let det = Detection {
///     label: "screen".to_string(),
///     confidence: 0.97,
///     bbox: BoundingBox::new(10.0, 10.0, 200.0, 120.0),
/// };
/// assert_eq!(det.label, "screen");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class label as reported by the detector.
    pub label: String,
    /// Detection confidence in `[0, 1]`.
    pub confidence: f32,
    /// Bounding box in pixel coordinates.
    pub bbox: BoundingBox,
}

impl Detection {
    /// Creates a new detection.
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }
}
