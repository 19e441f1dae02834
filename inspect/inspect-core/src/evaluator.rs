//! Geometric tolerance evaluation.

use inspect_types::{AnomalyReport, BoundingBox, DefectTag, ReferenceZone, ToleranceConfig};

/// Guard added to the observed height before the aspect-ratio division, so a
/// degenerate zero-height observation cannot divide by zero. A numeric
/// safety net, not a business rule.
pub const ASPECT_EPSILON: f32 = 0.01;

fn within_margin(value: f32, expected: f32, margin: f32) -> bool {
    (expected - margin) <= value && value <= (expected + margin)
}

/// Evaluates one bounding box against the reference zone and tolerances.
///
/// Checks run in a fixed order — x position, y position, aspect ratio — so
/// the report's tag ordering is deterministic and reproducible for identical
/// input. Pure: no state, no I/O, no error path.
///
/// The caller must not pass a malformed box (`x1 <= x0` or `y1 <= y0`);
/// those are screened out at the frame boundary.
///
/// # Example
///
/// ```
/// use inspect_core::evaluate;
/// use inspect_types::{BoundingBox, DefectTag, ReferenceZone, ToleranceConfig};
///
/// let zone = ReferenceZone::new(220.0, 540.0, 500.0, 580.0).unwrap();
/// let tol = ToleranceConfig::new(75.0, 0.75).unwrap();
///
/// let ok = evaluate(&BoundingBox::new(230.0, 550.0, 510.0, 590.0), &zone, &tol);
/// assert!(ok.is_conforming());
///
/// // x0 = 100 lies outside [145, 295].
/// let shifted = evaluate(&BoundingBox::new(100.0, 550.0, 380.0, 590.0), &zone, &tol);
/// assert_eq!(shifted.tags(), &[DefectTag::PositionXOutOfRange]);
/// ```
#[must_use]
pub fn evaluate(
    bbox: &BoundingBox,
    zone: &ReferenceZone,
    tol: &ToleranceConfig,
) -> AnomalyReport {
    let width = bbox.width();
    let height = bbox.height() + ASPECT_EPSILON;
    let observed_aspect_ratio = width / height;

    let mut report = AnomalyReport::new();

    if !within_margin(bbox.x0, zone.x0(), tol.position_margin()) {
        report.push(DefectTag::PositionXOutOfRange);
    }
    if !within_margin(bbox.y0, zone.y0(), tol.position_margin()) {
        report.push(DefectTag::PositionYOutOfRange);
    }
    if (observed_aspect_ratio - zone.expected_aspect_ratio()).abs() > tol.aspect_ratio_margin() {
        report.push(DefectTag::SuspiciousAngle);
    }

    report
}
