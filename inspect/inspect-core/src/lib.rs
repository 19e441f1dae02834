//! Inspection logic for the stirrup watch.
//!
//! This crate turns a frame's raw detections into a relay decision:
//!
//! - [`evaluate`] - Pure geometric tolerance check against the reference zone
//! - [`ThresholdTable`] - Per-label confidence filter
//! - [`Inspector`] - The frame cycle orchestrator: filter, evaluate, count,
//!   drive the relay, enforce the dwell auto-clear
//! - [`WatchConfig`] - Startup configuration, loaded once and validated
//! - [`FrameSource`] / [`JsonlSource`] - The detector input boundary
//!
//! # Frame Cycle
//!
//! Data flows one way per cycle: raw detections → filter → evaluator →
//! aggregated anomaly signal → relay controller. The cycle is single-threaded
//! and synchronous; `now` is captured once per cycle and threaded through so
//! dwell comparisons stay consistent within the cycle.
//!
//! # Example
//!
//! ```
//! use inspect_core::{Inspector, WatchConfig};
//! use inspect_types::{BoundingBox, Detection, Timestamp};
//! use relay_link::RecordingSink;
//!
//! let config = WatchConfig::default();
//! let mut inspector = Inspector::from_config(&config, RecordingSink::new()).unwrap();
//!
//! let frame = vec![Detection::new(
//!     "stirrup",
//!     0.93,
//!     BoundingBox::new(230.0, 550.0, 510.0, 590.0),
//! )];
//! let report = inspector.run_cycle(&frame, Timestamp::from_secs(1));
//!
//! assert_eq!(report.counters.stirrups, 1);
//! assert!(report.anomalies.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod cycle;
mod error;
mod evaluator;
mod filter;
mod input;

pub use config::{ClassConfig, WatchConfig};
pub use cycle::{Anomaly, CycleReport, Inspector, MultiplicityViolation, MAX_INSTANCES_PER_FRAME};
pub use error::{ConfigError, InputError};
pub use evaluator::{evaluate, ASPECT_EPSILON};
pub use filter::ThresholdTable;
pub use input::{FrameRecord, FrameSource, JsonlSource};
