//! The alarm state machine.

use inspect_types::{Duration, Timestamp};
use tracing::{debug, info};

use crate::{CommandSink, RelayCommand, RelayError};

/// Default dwell time before an asserted alarm auto-clears.
pub const DEFAULT_DWELL: Duration = Duration::from_secs(3);

/// Logical relay state as tracked by the controller.
///
/// The board itself holds no readable state, so this is the single source
/// of truth on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// Relay de-energized, siren off.
    Cleared,
    /// Relay energized, siren on.
    Asserted {
        /// When the relay entered the asserted state.
        since: Timestamp,
    },
}

impl RelayState {
    /// Returns `true` if the relay is asserted.
    #[must_use]
    pub const fn is_asserted(&self) -> bool {
        matches!(self, Self::Asserted { .. })
    }
}

/// Debounced assert/clear state machine over a [`CommandSink`].
///
/// Transitions emit exactly one command frame; same-state calls are no-ops
/// and emit nothing. An asserted alarm auto-clears once [`tick`] observes
/// that more than the dwell time has passed since assertion.
///
/// If the sink write fails, the logical state is not updated — the
/// transition did not happen — and the error is returned for the caller to
/// report. There is no internal retry; the per-cycle [`tick`] naturally
/// retries an overdue auto-clear on the next cycle.
///
/// [`tick`]: Self::tick
///
/// # Example
///
/// ```
/// use inspect_types::{Duration, Timestamp};
/// use relay_link::{RecordingSink, RelayCommand, RelayController};
///
/// let mut relay = RelayController::new(RecordingSink::new(), Duration::from_secs(3));
///
/// relay.assert_alarm(Timestamp::from_secs(10)).unwrap();
/// assert!(relay.is_asserted());
///
/// // Within dwell: still asserted, nothing emitted.
/// relay.tick(Timestamp::from_secs(12)).unwrap();
/// assert!(relay.is_asserted());
///
/// // Strictly past dwell: auto-clear.
/// relay.tick(Timestamp::from_millis(13_001)).unwrap();
/// assert!(!relay.is_asserted());
/// ```
#[derive(Debug)]
pub struct RelayController<S> {
    sink: S,
    state: RelayState,
    dwell: Duration,
}

impl<S: CommandSink> RelayController<S> {
    /// Creates a controller in the `Cleared` state.
    ///
    /// No command is emitted here; call [`startup_clear`](Self::startup_clear)
    /// once before the frame loop to force the board into a known state.
    pub const fn new(sink: S, dwell: Duration) -> Self {
        Self {
            sink,
            state: RelayState::Cleared,
            dwell,
        }
    }

    /// Creates a controller with the default 3-second dwell.
    pub const fn with_default_dwell(sink: S) -> Self {
        Self::new(sink, DEFAULT_DWELL)
    }

    /// Sends one unconditional `Clear`, regardless of the logical state.
    ///
    /// The board's physical state is unknown at process start; this forces
    /// consistency before the first cycle.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the write fails. Treated as fatal at
    /// startup by callers.
    pub fn startup_clear(&mut self) -> Result<(), RelayError> {
        self.sink.send(RelayCommand::Clear)?;
        self.state = RelayState::Cleared;
        info!("relay forced clear at startup");
        Ok(())
    }

    /// Asserts the alarm.
    ///
    /// From `Cleared`: emits one `Assert` frame and records the assertion
    /// time. Already `Asserted`: no-op — the frame is not re-emitted and the
    /// dwell clock keeps its original start.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the write fails; the state stays
    /// `Cleared`.
    pub fn assert_alarm(&mut self, now: Timestamp) -> Result<(), RelayError> {
        if self.state.is_asserted() {
            debug!("relay already asserted, command suppressed");
            return Ok(());
        }
        self.sink.send(RelayCommand::Assert)?;
        self.state = RelayState::Asserted { since: now };
        info!(at = now.as_nanos(), "relay asserted, siren on");
        Ok(())
    }

    /// Clears the alarm.
    ///
    /// From `Asserted`: emits one `Clear` frame. Already `Cleared`: no-op.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the write fails; the state stays
    /// `Asserted`.
    pub fn clear_alarm(&mut self) -> Result<(), RelayError> {
        if !self.state.is_asserted() {
            debug!("relay already cleared, command suppressed");
            return Ok(());
        }
        self.sink.send(RelayCommand::Clear)?;
        self.state = RelayState::Cleared;
        info!("relay cleared, siren off");
        Ok(())
    }

    /// Auto-clears the alarm once strictly more than the dwell time has
    /// passed since assertion. Called unconditionally every cycle.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the clear write fails; the state stays
    /// `Asserted` and the next tick retries.
    pub fn tick(&mut self, now: Timestamp) -> Result<(), RelayError> {
        if let RelayState::Asserted { since } = self.state {
            if now.duration_since(since) > self.dwell {
                debug!(
                    held_ms = now.duration_since(since).as_millis(),
                    "dwell expired"
                );
                return self.clear_alarm();
            }
        }
        Ok(())
    }

    /// The current logical state.
    #[must_use]
    pub const fn state(&self) -> RelayState {
        self.state
    }

    /// Returns `true` if the relay is asserted.
    #[must_use]
    pub const fn is_asserted(&self) -> bool {
        self.state.is_asserted()
    }

    /// The configured dwell time.
    #[must_use]
    pub const fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Borrows the underlying sink (e.g. to read a recording after a run).
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}
