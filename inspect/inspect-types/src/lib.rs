//! Foundational data types for the stirrup inspection core.
//!
//! This crate provides the plain data types shared across the workspace:
//!
//! # Detection Types
//!
//! - [`BoundingBox`] - Pixel-space box from the detector
//! - [`Detection`] - One labeled box with a confidence score
//!
//! # Inspection Types
//!
//! - [`ReferenceZone`] - Expected bounding region of a conforming part
//! - [`ToleranceConfig`] - Position and aspect-ratio margins
//! - [`DefectTag`] / [`AnomalyReport`] - Tolerance evaluation output
//! - [`FrameCounters`] - Per-frame qualifying detection counts
//!
//! # Time
//!
//! - [`Timestamp`] / [`Duration`] - Nanosecond-precision monotonic time,
//!   injectable so dwell comparisons are deterministic under test
//!
//! # Layer 0 Crate
//!
//! No I/O, no logging, no hardware. It can be used in:
//! - The inspection core
//! - The relay controller
//! - Offline analysis tools over recorded detection streams
//!
//! # Design Philosophy
//!
//! These are **plain values**. A [`Detection`] lives for exactly one frame
//! cycle and is never persisted. Invariant-carrying types ([`ReferenceZone`],
//! [`ToleranceConfig`]) validate on construction and cannot be built in a
//! degenerate state.
//!
//! # Example
//!
//! ```
//! use inspect_types::{BoundingBox, Detection, ReferenceZone};
//!
//! let zone = ReferenceZone::new(220.0, 540.0, 500.0, 580.0).unwrap();
//! assert!((zone.expected_aspect_ratio() - 7.0).abs() < 1e-6);
//!
//! let det = Detection {
//!     label: "stirrup".to_string(),
//!     confidence: 0.93,
//!     bbox: BoundingBox::new(230.0, 550.0, 480.0, 575.0),
//! };
//! assert!(det.bbox.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bbox;
mod counters;
mod detection;
mod error;
mod report;
mod time;
mod tolerance;
mod zone;

pub use bbox::BoundingBox;
pub use counters::FrameCounters;
pub use detection::Detection;
pub use error::InspectTypesError;
pub use report::{AnomalyReport, DefectTag};
pub use time::{Duration, Timestamp};
pub use tolerance::ToleranceConfig;
pub use zone::ReferenceZone;
