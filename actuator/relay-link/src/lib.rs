//! Relay command protocol and the alarm state machine.
//!
//! This crate owns everything between "the inspection decided to alarm" and
//! "bytes left for the relay board":
//!
//! - [`RelayCommand`] - The two fixed 4-byte command frames
//! - [`CommandSink`] - Capability trait over the byte-command channel
//! - [`WriterSink`] / [`RecordingSink`] - Sinks for hardware and for tests
//! - [`RelayController`] - Debounced assert/clear state machine with
//!   dwell-time auto-clear
//!
//! # Design Philosophy
//!
//! The relay board is write-only: it holds no readable state, so the
//! controller's in-memory [`RelayState`] is the single source of truth and
//! every transition is guarded against redundant re-emission (the command
//! channel is a narrow serial link). A failed write leaves the logical state
//! untouched — the transition simply did not happen.
//!
//! # Example
//!
//! ```
//! use inspect_types::{Duration, Timestamp};
//! use relay_link::{RecordingSink, RelayCommand, RelayController};
//!
//! let mut relay = RelayController::new(RecordingSink::new(), Duration::from_secs(3));
//! relay.assert_alarm(Timestamp::from_secs(1)).unwrap();
//! relay.assert_alarm(Timestamp::from_secs(2)).unwrap(); // debounced, no frame
//! relay.tick(Timestamp::from_secs(5)).unwrap(); // dwell expired
//!
//! assert_eq!(
//!     relay.sink().commands(),
//!     &[RelayCommand::Assert, RelayCommand::Clear]
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod controller;
mod error;
mod protocol;
mod sink;

pub use controller::{RelayController, RelayState, DEFAULT_DWELL};
pub use error::RelayError;
pub use protocol::RelayCommand;
pub use sink::{CommandSink, RecordingSink, WriterSink};
