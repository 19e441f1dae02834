//! Monotonic time types for the frame loop.
//!
//! The dwell-time comparison in the relay controller must be deterministic
//! under test, so `now` is an explicit value captured once per cycle and
//! threaded through, never re-read from a clock inside the core.

use serde::{Deserialize, Serialize};

/// A point on the frame loop's monotonic clock, nanosecond precision.
///
/// The zero point is the loop epoch (process start), not the Unix epoch.
///
/// # Example
///
/// ```
/// use inspect_types::{Duration, Timestamp};
///
/// let earlier = Timestamp::from_millis(1_000);
/// let later = Timestamp::from_millis(4_500);
/// assert_eq!(later.duration_since(earlier), Duration::from_millis(3_500));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    /// Creates a timestamp from nanoseconds since the loop epoch.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a timestamp from milliseconds since the loop epoch.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Creates a timestamp from whole seconds since the loop epoch.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            nanos: secs * 1_000_000_000,
        }
    }

    /// Creates a timestamp from the standard-library elapsed duration
    /// measured against the loop epoch.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_elapsed(elapsed: std::time::Duration) -> Self {
        Self {
            nanos: elapsed.as_nanos() as u64,
        }
    }

    /// Nanoseconds since the loop epoch.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.nanos
    }

    /// Time elapsed since `earlier`, saturating to zero if `earlier` is in
    /// the future.
    #[must_use]
    pub const fn duration_since(self, earlier: Self) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}

/// A nanosecond-precision time interval.
///
/// # Example
///
/// ```
/// use inspect_types::Duration;
///
/// let dwell = Duration::from_secs(3);
/// assert_eq!(dwell.as_millis(), 3_000);
/// assert!(Duration::from_millis(3_001) > dwell);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration {
    nanos: u64,
}

impl Duration {
    /// Creates a duration from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a duration from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Creates a duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            nanos: secs * 1_000_000_000,
        }
    }

    /// Creates a duration from seconds as a float, clamping negatives to
    /// zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs_f64(secs: f64) -> Self {
        Self {
            nanos: (secs * 1e9).max(0.0) as u64,
        }
    }

    /// The duration in nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.nanos
    }

    /// The duration in whole milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.nanos / 1_000_000
    }

    /// The duration in seconds as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.nanos as f64 / 1e9
    }

    /// The zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self { nanos: 0 }
    }

    /// Checks whether the duration is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }
}

impl From<std::time::Duration> for Duration {
    #[allow(clippy::cast_possible_truncation)]
    fn from(d: std::time::Duration) -> Self {
        Self {
            nanos: d.as_nanos() as u64,
        }
    }
}
