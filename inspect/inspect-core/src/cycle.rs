//! The frame cycle orchestrator.

use tracing::{error, warn};

use inspect_types::{
    AnomalyReport, Detection, FrameCounters, ReferenceZone, Timestamp, ToleranceConfig,
};
use relay_link::{CommandSink, RelayController, RelayError};

use crate::{evaluate, ConfigError, ThresholdTable, WatchConfig};

/// Maximum qualifying instances of a tracked class per frame before the
/// multiplicity check fires.
pub const MAX_INSTANCES_PER_FRAME: u32 = 1;

/// A non-conforming target detection found during one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// Index of the offending detection in the cycle's input slice.
    pub detection_index: usize,
    /// The ordered defect tags.
    pub report: AnomalyReport,
}

/// Too many qualifying instances of one class in a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplicityViolation {
    /// The offending class label.
    pub label: String,
    /// How many qualifying instances were seen.
    pub count: u32,
}

/// Everything observable that happened in one frame cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Qualifying detection counts for this frame.
    pub counters: FrameCounters,
    /// Non-conforming target detections, in input order.
    pub anomalies: Vec<Anomaly>,
    /// Multiplicity violations, reference class first.
    pub multiplicity: Vec<MultiplicityViolation>,
    /// Input indices of malformed detections that were discarded.
    pub discarded: Vec<usize>,
    /// Relay commands that failed to deliver this cycle.
    pub relay_failures: Vec<RelayError>,
}

impl CycleReport {
    /// Returns `true` when the frame was entirely unremarkable.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.anomalies.is_empty()
            && self.multiplicity.is_empty()
            && self.discarded.is_empty()
            && self.relay_failures.is_empty()
    }
}

/// Ties filter, evaluator, counters, and the relay controller together, once
/// per frame.
///
/// Owns the only mutable state in the core (the relay controller and the
/// per-frame counters); the loop is single-threaded, so no locking applies.
pub struct Inspector<S> {
    zone: ReferenceZone,
    tolerance: ToleranceConfig,
    thresholds: ThresholdTable,
    target_label: String,
    reference_label: String,
    relay: RelayController<S>,
    counters: FrameCounters,
}

impl<S: CommandSink> Inspector<S> {
    /// Builds an inspector from a validated configuration and a command
    /// sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    pub fn from_config(config: &WatchConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            zone: config.reference_zone()?,
            tolerance: config.tolerance()?,
            thresholds: config.threshold_table(),
            target_label: config.target.label.clone(),
            reference_label: config.reference.label.clone(),
            relay: RelayController::new(sink, config.dwell()),
            counters: FrameCounters::default(),
        })
    }

    /// Forces the relay into a known cleared state before the first cycle.
    ///
    /// # Errors
    ///
    /// Returns the transport error; fatal at startup.
    pub fn startup_clear(&mut self) -> Result<(), RelayError> {
        self.relay.startup_clear()
    }

    /// Processes one frame's detections.
    ///
    /// Order per cycle: reset counters; discard malformed boxes; filter and
    /// count by class; evaluate every qualifying target and drive the relay
    /// per detection; apply the multiplicity check (which deliberately
    /// overrides a same-frame conforming clear); tick the dwell clock.
    ///
    /// Relay transport failures never abort the cycle — they are reported in
    /// the returned [`CycleReport`] and the controller keeps its prior
    /// state, so the next cycle retries naturally.
    pub fn run_cycle(&mut self, detections: &[Detection], now: Timestamp) -> CycleReport {
        self.counters.reset();
        let mut report = CycleReport::default();

        for (index, detection) in detections.iter().enumerate() {
            if !detection.bbox.is_valid() {
                warn!(
                    index,
                    label = %detection.label,
                    bbox = ?detection.bbox.as_array(),
                    "malformed detection discarded"
                );
                report.discarded.push(index);
                continue;
            }
            if !self.thresholds.passes(detection) {
                continue;
            }

            if detection.label == self.reference_label {
                self.counters.screens += 1;
            } else if detection.label == self.target_label {
                self.counters.stirrups += 1;
                self.inspect_target(index, detection, now, &mut report);
            }
        }

        self.check_multiplicity(now, &mut report);

        if let Err(err) = self.relay.tick(now) {
            error!(%err, "dwell auto-clear failed");
            report.relay_failures.push(err);
        }

        report.counters = self.counters;
        report
    }

    /// Clears the relay on the way out; every termination path calls this so
    /// the siren is never left on after shutdown.
    ///
    /// # Errors
    ///
    /// Returns the transport error; callers report it loudly but cannot do
    /// more.
    pub fn shutdown(&mut self) -> Result<(), RelayError> {
        self.relay.clear_alarm()
    }

    /// Borrows the relay controller (e.g. to read a recording sink after a
    /// dry run).
    #[must_use]
    pub const fn relay(&self) -> &RelayController<S> {
        &self.relay
    }

    fn inspect_target(
        &mut self,
        index: usize,
        detection: &Detection,
        now: Timestamp,
        report: &mut CycleReport,
    ) {
        let anomaly = evaluate(&detection.bbox, &self.zone, &self.tolerance);
        if anomaly.is_conforming() {
            if let Err(err) = self.relay.clear_alarm() {
                error!(%err, "relay clear failed");
                report.relay_failures.push(err);
            }
            return;
        }

        warn!(
            index,
            label = %detection.label,
            defects = %anomaly,
            "anomalous part detected"
        );
        if let Err(err) = self.relay.assert_alarm(now) {
            error!(%err, "relay assert failed");
            report.relay_failures.push(err);
        }
        report.anomalies.push(Anomaly {
            detection_index: index,
            report: anomaly,
        });
    }

    fn check_multiplicity(&mut self, now: Timestamp, report: &mut CycleReport) {
        let observed = [
            (self.reference_label.clone(), self.counters.screens),
            (self.target_label.clone(), self.counters.stirrups),
        ];
        for (label, count) in observed {
            if count <= MAX_INSTANCES_PER_FRAME {
                continue;
            }
            warn!(%label, count, "unexpected multiplicity");
            if let Err(err) = self.relay.assert_alarm(now) {
                error!(%err, "relay assert failed");
                report.relay_failures.push(err);
            }
            report.multiplicity.push(MultiplicityViolation { label, count });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_types::BoundingBox;
    use relay_link::{RecordingSink, RelayCommand};

    fn inspector() -> Inspector<RecordingSink> {
        Inspector::from_config(&WatchConfig::default(), RecordingSink::new()).unwrap()
    }

    fn conforming_stirrup() -> Detection {
        Detection::new("stirrup", 0.95, BoundingBox::new(230.0, 550.0, 510.0, 590.0))
    }

    fn anomalous_stirrup() -> Detection {
        // x0 = 100 is outside [145, 295].
        Detection::new("stirrup", 0.95, BoundingBox::new(100.0, 550.0, 380.0, 590.0))
    }

    fn screen(confidence: f32) -> Detection {
        Detection::new("screen", confidence, BoundingBox::new(10.0, 10.0, 200.0, 130.0))
    }

    #[test]
    fn quiet_frame_emits_nothing() {
        let mut inspector = inspector();
        let report = inspector.run_cycle(&[conforming_stirrup()], Timestamp::from_secs(1));
        assert!(report.is_quiet());
        assert_eq!(report.counters.stirrups, 1);
        assert!(inspector.relay().sink().commands().is_empty());
    }

    #[test]
    fn anomalous_stirrup_asserts() {
        let mut inspector = inspector();
        let report = inspector.run_cycle(&[anomalous_stirrup()], Timestamp::from_secs(1));
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].detection_index, 0);
        assert!(inspector.relay().is_asserted());
        assert_eq!(
            inspector.relay().sink().commands(),
            &[RelayCommand::Assert]
        );
    }

    #[test]
    fn conforming_stirrup_clears_prior_alarm() {
        let mut inspector = inspector();
        inspector.run_cycle(&[anomalous_stirrup()], Timestamp::from_secs(1));
        let report = inspector.run_cycle(&[conforming_stirrup()], Timestamp::from_secs(2));
        assert!(report.anomalies.is_empty());
        assert!(!inspector.relay().is_asserted());
        assert_eq!(
            inspector.relay().sink().commands(),
            &[RelayCommand::Assert, RelayCommand::Clear]
        );
    }

    #[test]
    fn duplicate_screens_trigger_multiplicity() {
        let mut inspector = inspector();
        let report = inspector.run_cycle(
            &[screen(0.95), screen(0.93)],
            Timestamp::from_secs(1),
        );
        assert_eq!(report.counters.screens, 2);
        assert_eq!(
            report.multiplicity,
            vec![MultiplicityViolation {
                label: "screen".to_string(),
                count: 2,
            }]
        );
        assert!(inspector.relay().is_asserted());
    }

    #[test]
    fn low_confidence_screens_do_not_count() {
        let mut inspector = inspector();
        // 0.90 is not strictly above the screen cutoff.
        let report = inspector.run_cycle(
            &[screen(0.90), screen(0.90)],
            Timestamp::from_secs(1),
        );
        assert_eq!(report.counters.screens, 0);
        assert!(report.multiplicity.is_empty());
    }

    #[test]
    fn multiplicity_overrides_conforming_clear() {
        // One conforming stirrup (step 4 clears) plus two screens (step 5
        // asserts): the later multiplicity check wins the frame.
        let mut inspector = inspector();
        let report = inspector.run_cycle(
            &[conforming_stirrup(), screen(0.95), screen(0.93)],
            Timestamp::from_secs(1),
        );
        assert!(report.anomalies.is_empty());
        assert_eq!(report.multiplicity.len(), 1);
        assert!(inspector.relay().is_asserted());
    }

    #[test]
    fn duplicate_stirrups_trigger_multiplicity_even_when_conforming() {
        let mut inspector = inspector();
        let report = inspector.run_cycle(
            &[conforming_stirrup(), conforming_stirrup()],
            Timestamp::from_secs(1),
        );
        assert_eq!(report.counters.stirrups, 2);
        assert_eq!(report.multiplicity.len(), 1);
        assert_eq!(report.multiplicity[0].label, "stirrup");
        assert!(inspector.relay().is_asserted());
    }

    #[test]
    fn malformed_detection_discarded_frame_continues() {
        let mut inspector = inspector();
        let malformed = Detection::new(
            "stirrup",
            0.99,
            BoundingBox::new(300.0, 550.0, 100.0, 590.0),
        );
        let report = inspector.run_cycle(
            &[malformed, anomalous_stirrup()],
            Timestamp::from_secs(1),
        );
        assert_eq!(report.discarded, vec![0]);
        // The rest of the frame still processed.
        assert_eq!(report.counters.stirrups, 1);
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].detection_index, 1);
    }

    #[test]
    fn dwell_auto_clear_via_cycles() {
        let mut inspector = inspector();
        inspector.run_cycle(&[anomalous_stirrup()], Timestamp::from_secs(1));
        assert!(inspector.relay().is_asserted());

        // Empty frames; dwell (3 s) not yet strictly exceeded.
        inspector.run_cycle(&[], Timestamp::from_secs(4));
        assert!(inspector.relay().is_asserted());

        inspector.run_cycle(&[], Timestamp::from_millis(4_001));
        assert!(!inspector.relay().is_asserted());
        assert_eq!(
            inspector.relay().sink().commands(),
            &[RelayCommand::Assert, RelayCommand::Clear]
        );
    }

    #[test]
    fn shutdown_clears_asserted_relay() {
        let mut inspector = inspector();
        inspector.run_cycle(&[anomalous_stirrup()], Timestamp::from_secs(1));
        inspector.shutdown().unwrap();
        assert!(!inspector.relay().is_asserted());
        assert_eq!(
            inspector.relay().sink().commands().last(),
            Some(&RelayCommand::Clear)
        );
    }

    #[test]
    fn counters_reset_between_cycles() {
        let mut inspector = inspector();
        inspector.run_cycle(&[screen(0.95), screen(0.93)], Timestamp::from_secs(1));
        let report = inspector.run_cycle(&[], Timestamp::from_secs(2));
        assert_eq!(report.counters, FrameCounters::default());
        assert!(report.multiplicity.is_empty());
    }
}
