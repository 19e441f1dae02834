//! Per-label confidence filtering.

use std::collections::HashMap;

use inspect_types::Detection;

/// Per-label minimum confidence table.
///
/// A detection qualifies when its confidence **strictly exceeds** the
/// threshold registered for its label. Labels with no registered threshold
/// are dropped entirely — the system only tracks the classes it was
/// configured for.
///
/// # Example
///
/// ```
/// use inspect_core::ThresholdTable;
/// use inspect_types::{BoundingBox, Detection};
///
/// let mut table = ThresholdTable::new();
/// table.register("stirrup", 0.85);
///
/// let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let kept = table.filter(&[
///     Detection::new("stirrup", 0.90, bbox),
///     Detection::new("stirrup", 0.85, bbox), // not strictly above
///     Detection::new("person", 0.99, bbox),  // unregistered label
/// ]);
/// assert_eq!(kept.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdTable {
    thresholds: HashMap<String, f32>,
}

impl ThresholdTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the minimum confidence for a label.
    pub fn register(&mut self, label: impl Into<String>, min_confidence: f32) {
        self.thresholds.insert(label.into(), min_confidence);
    }

    /// The registered threshold for a label, if any.
    #[must_use]
    pub fn min_confidence(&self, label: &str) -> Option<f32> {
        self.thresholds.get(label).copied()
    }

    /// Checks whether a single detection qualifies.
    #[must_use]
    pub fn passes(&self, detection: &Detection) -> bool {
        self.min_confidence(&detection.label)
            .is_some_and(|min| detection.confidence > min)
    }

    /// Keeps qualifying detections, preserving input order.
    #[must_use]
    pub fn filter(&self, detections: &[Detection]) -> Vec<Detection> {
        detections
            .iter()
            .filter(|d| self.passes(d))
            .cloned()
            .collect()
    }
}
