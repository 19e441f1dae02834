//! Startup configuration: loaded once, validated, immutable thereafter.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use inspect_types::{Duration, ReferenceZone, ToleranceConfig};

use crate::{ConfigError, ThresholdTable};

/// One tracked detector class: its label string and confidence cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    /// Class label as reported by the detector.
    pub label: String,
    /// Minimum confidence; detections must strictly exceed it to qualify.
    pub min_confidence: f32,
}

/// The complete startup configuration.
///
/// Loaded from a JSON file once at startup and never mutated afterwards.
/// Field defaults mirror the production-line deployment values, so a partial
/// (or absent) config file yields a runnable system.
///
/// ```json
/// {
///   "zone": [220.0, 540.0, 500.0, 580.0],
///   "position_margin": 75.0,
///   "aspect_ratio_margin": 0.75,
///   "target": { "label": "stirrup", "min_confidence": 0.85 },
///   "reference": { "label": "screen", "min_confidence": 0.90 },
///   "dwell_secs": 3.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Reference zone coordinates `[x0, y0, x1, y1]`, raw until validated.
    pub zone: [f32; 4],
    /// Position margin in pixels.
    pub position_margin: f32,
    /// Aspect-ratio margin (unitless).
    pub aspect_ratio_margin: f32,
    /// The target object class (the stirrup under inspection).
    pub target: ClassConfig,
    /// The reference object class (the screen; multiplicity checks only).
    pub reference: ClassConfig,
    /// Dwell time in seconds before an asserted alarm auto-clears.
    pub dwell_secs: f64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            zone: [220.0, 540.0, 500.0, 580.0],
            position_margin: 75.0,
            aspect_ratio_margin: 0.75,
            target: ClassConfig {
                label: "stirrup".to_string(),
                min_confidence: 0.85,
            },
            reference: ClassConfig {
                label: "screen".to_string(),
                min_confidence: 0.90,
            },
            dwell_secs: 3.0,
        }
    }
}

impl WatchConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// any value fails [`validate`](Self::validate). All are fatal at
    /// startup.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Validates every field.
    ///
    /// # Errors
    ///
    /// - degenerate or non-finite zone
    /// - negative or non-finite margins
    /// - confidences outside `[0, 1]`
    /// - empty or identical class labels
    /// - non-positive or non-finite dwell
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reference_zone()?;
        self.tolerance()?;

        for class in [&self.target, &self.reference] {
            if !(0.0..=1.0).contains(&class.min_confidence) {
                return Err(ConfigError::ThresholdOutOfRange {
                    label: class.label.clone(),
                    value: class.min_confidence,
                });
            }
        }
        if self.target.label.is_empty()
            || self.reference.label.is_empty()
            || self.target.label == self.reference.label
        {
            return Err(ConfigError::BadLabels);
        }
        if !self.dwell_secs.is_finite() || self.dwell_secs <= 0.0 {
            return Err(ConfigError::InvalidDwell(self.dwell_secs));
        }
        Ok(())
    }

    /// Builds the validated reference zone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] for a degenerate zone.
    pub fn reference_zone(&self) -> Result<ReferenceZone, ConfigError> {
        let [x0, y0, x1, y1] = self.zone;
        Ok(ReferenceZone::new(x0, y0, x1, y1)?)
    }

    /// Builds the validated tolerance margins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] for invalid margins.
    pub fn tolerance(&self) -> Result<ToleranceConfig, ConfigError> {
        Ok(ToleranceConfig::new(
            self.position_margin,
            self.aspect_ratio_margin,
        )?)
    }

    /// Builds the per-label threshold table for the two tracked classes.
    #[must_use]
    pub fn threshold_table(&self) -> ThresholdTable {
        let mut table = ThresholdTable::new();
        table.register(self.target.label.clone(), self.target.min_confidence);
        table.register(self.reference.label.clone(), self.reference.min_confidence);
        table
    }

    /// The dwell time as a [`Duration`].
    #[must_use]
    pub fn dwell(&self) -> Duration {
        Duration::from_secs_f64(self.dwell_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_config_is_valid() {
        let config = WatchConfig::default();
        config.validate().unwrap();
        assert_eq!(config.dwell(), Duration::from_secs(3));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: WatchConfig =
            serde_json::from_str(r#"{"position_margin": 50.0}"#).unwrap();
        assert_relative_eq!(config.position_margin, 50.0);
        assert_eq!(config.target.label, "stirrup");
        assert_relative_eq!(config.dwell_secs, 3.0);
    }

    #[test]
    fn rejects_degenerate_zone() {
        let config = WatchConfig {
            zone: [500.0, 540.0, 220.0, 580.0],
            ..WatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Geometry(_))));
    }

    #[test]
    fn rejects_bad_threshold() {
        let mut config = WatchConfig::default();
        config.reference.min_confidence = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_identical_labels() {
        let mut config = WatchConfig::default();
        config.reference.label = config.target.label.clone();
        assert!(matches!(config.validate(), Err(ConfigError::BadLabels)));
    }

    #[test]
    fn rejects_bad_dwell() {
        let config = WatchConfig {
            dwell_secs: 0.0,
            ..WatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDwell(_))));

        let config = WatchConfig {
            dwell_secs: f64::NAN,
            ..WatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDwell(_))));
    }

    #[test]
    fn threshold_table_has_both_classes() {
        let table = WatchConfig::default().threshold_table();
        assert_eq!(table.min_confidence("stirrup"), Some(0.85));
        assert_eq!(table.min_confidence("screen"), Some(0.90));
        assert_eq!(table.min_confidence("person"), None);
    }
}
