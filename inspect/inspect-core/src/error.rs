//! Error types for configuration and frame input.

use thiserror::Error;

use inspect_types::InspectTypesError;

/// Errors raised while loading or validating the startup configuration.
///
/// All of these are fatal: the loop must not start on a bad configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file: {0}")]
    Io(String),

    /// The config file is not valid JSON for [`WatchConfig`](crate::WatchConfig).
    #[error("cannot parse config file: {0}")]
    Parse(String),

    /// The zone or margins are geometrically invalid.
    #[error("invalid inspection geometry: {0}")]
    Geometry(#[from] InspectTypesError),

    /// A per-class confidence threshold is outside `[0, 1]`.
    #[error("confidence threshold for '{label}' out of range [0, 1]: {value}")]
    ThresholdOutOfRange {
        /// The offending class label.
        label: String,
        /// The rejected threshold.
        value: f32,
    },

    /// Class labels are empty or not distinct.
    #[error("target and reference labels must be non-empty and distinct")]
    BadLabels,

    /// The dwell time is non-positive or non-finite.
    #[error("dwell_secs must be positive and finite: {0}")]
    InvalidDwell(f64),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors raised at the frame acquisition boundary.
///
/// Either kind ends the loop gracefully (with the shutdown clear); neither
/// is a crash.
#[derive(Debug, Error)]
pub enum InputError {
    /// The underlying reader failed.
    #[error("frame acquisition failed: {0}")]
    Io(String),

    /// A frame record could not be parsed.
    #[error("malformed frame record at line {line}: {reason}")]
    Parse {
        /// 1-based line number in the input stream.
        line: u64,
        /// Parser diagnostic.
        reason: String,
    },
}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::ThresholdOutOfRange {
            label: "screen".to_string(),
            value: 1.2,
        };
        let msg = err.to_string();
        assert!(msg.contains("screen"));
        assert!(msg.contains("1.2"));

        assert!(ConfigError::BadLabels.to_string().contains("distinct"));
        assert!(ConfigError::InvalidDwell(0.0).to_string().contains('0'));
    }

    #[test]
    fn config_error_from_types_error() {
        let types_err = InspectTypesError::DegenerateZone([1.0, 1.0, 0.0, 0.0]);
        let err: ConfigError = types_err.into();
        assert!(err.to_string().contains("invalid inspection geometry"));
    }

    #[test]
    fn input_error_display() {
        let err = InputError::Parse {
            line: 7,
            reason: "expected value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("expected value"));
    }
}
