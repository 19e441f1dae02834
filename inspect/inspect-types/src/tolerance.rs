//! Tolerance margins for the conformance check.

use crate::InspectTypesError;

/// Immutable tolerance margins applied by the evaluator.
///
/// `position_margin` is in pixels and applies independently to the observed
/// box's `x0` and `y0`. `aspect_ratio_margin` is unitless and bounds the
/// absolute difference between the observed and expected aspect ratio.
///
/// # Example
///
/// ```
/// use inspect_types::ToleranceConfig;
///
/// let tol = ToleranceConfig::new(75.0, 0.75).unwrap();
/// assert!((tol.position_margin() - 75.0).abs() < 1e-6);
///
/// assert!(ToleranceConfig::new(-1.0, 0.75).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceConfig {
    position_margin: f32,
    aspect_ratio_margin: f32,
}

impl ToleranceConfig {
    /// Creates validated tolerance margins.
    ///
    /// # Errors
    ///
    /// Returns [`InspectTypesError::InvalidMargin`] if either margin is
    /// negative, NaN, or infinite.
    pub fn new(position_margin: f32, aspect_ratio_margin: f32) -> Result<Self, InspectTypesError> {
        if !position_margin.is_finite() || position_margin < 0.0 {
            return Err(InspectTypesError::invalid_margin(
                "position_margin",
                position_margin,
            ));
        }
        if !aspect_ratio_margin.is_finite() || aspect_ratio_margin < 0.0 {
            return Err(InspectTypesError::invalid_margin(
                "aspect_ratio_margin",
                aspect_ratio_margin,
            ));
        }
        Ok(Self {
            position_margin,
            aspect_ratio_margin,
        })
    }

    /// Position margin in pixels.
    #[must_use]
    pub const fn position_margin(&self) -> f32 {
        self.position_margin
    }

    /// Aspect-ratio margin (unitless).
    #[must_use]
    pub const fn aspect_ratio_margin(&self) -> f32 {
        self.aspect_ratio_margin
    }
}
