//! Per-frame counters of qualifying detections.

use serde::{Deserialize, Serialize};

/// Counts of qualifying detections per tracked class, reset every cycle.
///
/// # Example
///
/// ```
/// use inspect_types::FrameCounters;
///
/// let mut counters = FrameCounters::default();
/// counters.stirrups += 1;
/// counters.screens += 2;
/// counters.reset();
/// assert_eq!(counters, FrameCounters::default());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCounters {
    /// Qualifying target-object (stirrup) detections this frame.
    pub stirrups: u32,
    /// Qualifying reference-object (screen) detections this frame.
    pub screens: u32,
}

impl FrameCounters {
    /// Resets both counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
