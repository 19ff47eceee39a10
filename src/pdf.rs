//! Proper probability densities built from a shape and an observable range.
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::integrate::IntegrationConfig;
use crate::model::ShapeModel;
use crate::range::ObservableRange;

/// All the ways normalizing a shape can fail
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PdfError {
    #[error("The shape integrates to {integral} over [{min}, {max}], it cannot be normalized")]
    ZeroNormalization { integral: f64, min: f64, max: f64 },
}

/// A [`ShapeModel`] divided by its integral over an [`ObservableRange`].
///
/// The normalization is computed once on construction. The shape's parameters are
/// fixed for the lifetime of the value, so a minimizer builds a new one per parameter
/// vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizedPdf<S> {
    pub shape: S,
    pub range: ObservableRange,
    normalization: f64,
}

impl<S: ShapeModel> NormalizedPdf<S> {
    pub fn new(shape: S, range: ObservableRange) -> Result<Self, PdfError> {
        Self::new_with(shape, range, IntegrationConfig::default())
    }

    pub fn new_with(
        shape: S,
        range: ObservableRange,
        config: IntegrationConfig,
    ) -> Result<Self, PdfError> {
        let normalization = shape.integral_with(&range, config);
        if !(normalization > 0.0) || !normalization.is_finite() {
            log::debug!(
                "Rejecting normalization {normalization} over [{}, {}]",
                range.min,
                range.max
            );
            return Err(PdfError::ZeroNormalization {
                integral: normalization,
                min: range.min,
                max: range.max,
            });
        }
        log::debug!(
            "Normalization over [{}, {}] = {normalization}",
            range.min,
            range.max
        );
        Ok(Self {
            shape,
            range,
            normalization,
        })
    }

    /// The integral of the underlying shape over the range
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// The normalized density, zero outside of the range
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        if !self.range.contains(x) {
            return 0.0;
        }
        self.shape.density(x) / self.normalization
    }

    /// The natural logarithm of [`NormalizedPdf::density`]
    #[inline]
    pub fn log_density(&self, x: f64) -> f64 {
        self.density(x).ln()
    }

    /// The probability mass over `[a, b]`, clipped to the range
    pub fn probability(&self, a: f64, b: f64) -> f64 {
        match self.range.clip(a, b) {
            Some((lo, hi)) => {
                let sub = ObservableRange { min: lo, max: hi };
                self.shape.integral(&sub) / self.normalization
            }
            None => 0.0,
        }
    }
}

impl<S: ShapeModel> ShapeModel for NormalizedPdf<S> {
    fn density(&self, x: f64) -> f64 {
        self.density(x)
    }

    fn integral_with(&self, range: &ObservableRange, config: IntegrationConfig) -> f64 {
        match self.range.clip(range.min, range.max) {
            Some((lo, hi)) => {
                let sub = ObservableRange { min: lo, max: hi };
                self.shape.integral_with(&sub, config) / self.normalization
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::arrayops::{gridspace, trapz};
    use crate::shapes::{DoubleSidedVoigtianShape, GaussianShape};

    #[test_log::test]
    fn test_normalized_voigtian() {
        let range = ObservableRange::new(0.0, 25.0).unwrap();
        let shape = DoubleSidedVoigtianShape::new(8.0, 0.8, 1.6, 0.5, 1.0, range.max);
        let pdf = shape.normalized(range).unwrap();
        // both sides peak at one
        assert!(pdf.normalization() > 1.0);

        let total = pdf.integral(&range);
        assert!((total - 1.0).abs() < 1e-8, "{total}");
        assert!((pdf.probability(-10.0, 40.0) - 1.0).abs() < 1e-8);

        let left = pdf.probability(0.0, 8.0);
        let right = pdf.probability(8.0, 25.0);
        assert!((left + right - 1.0).abs() < 1e-8);
        // the right side is wider
        assert!(pdf.density(12.0) > pdf.density(4.0));

        assert_eq!(pdf.density(-1.0), 0.0);
        assert_eq!(pdf.density(26.0), 0.0);
        assert!((pdf.density(8.5) - shape.density(8.5) / pdf.normalization()).abs() < 1e-15);

        // a fine trapezoid sum agrees with the adaptive normalization
        let xs = gridspace(range.min, range.max + 1.5e-3, 1e-3);
        let trapezoid = trapz(&xs, &shape.predict(&xs));
        assert!(
            (trapezoid - pdf.normalization()).abs() < 1e-5 * pdf.normalization(),
            "{trapezoid} vs {}",
            pdf.normalization()
        );
    }

    #[test]
    fn test_zero_normalization() {
        let range = ObservableRange::new(0.0, 10.0).unwrap();
        let shape = DoubleSidedVoigtianShape::new(5.0, 1.0, 1.0, 0.1, 0.1, -1.0);
        let err = NormalizedPdf::new(shape, range).unwrap_err();
        assert!(matches!(err, PdfError::ZeroNormalization { .. }));

        let degenerate = GaussianShape::new(5.0, 0.0);
        assert!(degenerate.normalized(range).is_err());
    }

    #[test]
    fn test_log_density() {
        let range = ObservableRange::new(-5.0, 5.0).unwrap();
        let pdf = GaussianShape::new(0.0, 1.0).normalized(range).unwrap();
        assert!((pdf.log_density(1.0) - pdf.density(1.0).ln()).abs() < 1e-15);
        assert_eq!(pdf.log_density(6.0), f64::NEG_INFINITY);
    }
}
