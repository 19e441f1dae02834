//! Tolerance evaluation output.

use serde::{Deserialize, Serialize};

/// A specific defect found by the tolerance evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectTag {
    /// The observed `x0` is outside the zone's x-position margin.
    PositionXOutOfRange,
    /// The observed `y0` is outside the zone's y-position margin.
    PositionYOutOfRange,
    /// The observed aspect ratio deviates beyond the configured margin,
    /// indicating a tilted part.
    SuspiciousAngle,
}

impl std::fmt::Display for DefectTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::PositionXOutOfRange => "position X out of range",
            Self::PositionYOutOfRange => "position Y out of range",
            Self::SuspiciousAngle => "suspicious angle (stirrup tilted)",
        };
        write!(f, "{text}")
    }
}

/// Ordered set of defects for one detection; empty means conforming.
///
/// Tags appear in the evaluator's fixed check order (x, then y, then aspect
/// ratio), so identical input always produces an identical report.
///
/// # Example
///
/// ```
/// use inspect_types::{AnomalyReport, DefectTag};
///
/// let mut report = AnomalyReport::new();
/// assert!(report.is_conforming());
///
/// report.push(DefectTag::PositionXOutOfRange);
/// assert_eq!(report.tags(), &[DefectTag::PositionXOutOfRange]);
/// assert_eq!(report.to_string(), "position X out of range");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyReport {
    tags: Vec<DefectTag>,
}

impl AnomalyReport {
    /// Creates an empty (conforming) report.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Appends a defect tag, preserving insertion order.
    pub fn push(&mut self, tag: DefectTag) {
        self.tags.push(tag);
    }

    /// Returns `true` when no defects were found.
    #[must_use]
    pub fn is_conforming(&self) -> bool {
        self.tags.is_empty()
    }

    /// The defect tags in evaluation order.
    #[must_use]
    pub fn tags(&self) -> &[DefectTag] {
        &self.tags
    }
}

impl std::fmt::Display for AnomalyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.tags.is_empty() {
            return write!(f, "conforming");
        }
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_empty_is_conforming() {
        let report = AnomalyReport::new();
        assert!(report.is_conforming());
        assert_eq!(report.to_string(), "conforming");
    }

    #[test]
    fn report_preserves_order() {
        let mut report = AnomalyReport::new();
        report.push(DefectTag::PositionXOutOfRange);
        report.push(DefectTag::SuspiciousAngle);
        assert_eq!(
            report.tags(),
            &[DefectTag::PositionXOutOfRange, DefectTag::SuspiciousAngle]
        );
        assert_eq!(
            report.to_string(),
            "position X out of range, suspicious angle (stirrup tilted)"
        );
    }

    #[test]
    fn report_serialization() {
        let mut report = AnomalyReport::new();
        report.push(DefectTag::PositionYOutOfRange);
        let json = serde_json::to_string(&report).unwrap();
        let parsed: AnomalyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
