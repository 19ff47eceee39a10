use thiserror::Error;

use crate::integrate::{adaptive_simpson, IntegrationConfig};
use crate::pdf::{NormalizedPdf, PdfError};
use crate::range::ObservableRange;

/// All the ways a shape's parameters can be rejected at construction time.
///
/// Evaluation itself never fails, see [`ShapeModel::density`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeParameterError {
    #[error("The parameter {name} must be finite, received {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("The resolution width {name} must be positive, received {value}")]
    NonPositiveSigma { name: &'static str, value: f64 },
    #[error("The Breit-Wigner width {name} must not be negative, received {value}")]
    NegativeWidth { name: &'static str, value: f64 },
    #[error("The Breit-Wigner width {name} must be positive, received {value}")]
    NonPositiveWidth { name: &'static str, value: f64 },
}

impl ShapeParameterError {
    pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NotFinite { name, value })
        }
    }

    pub(crate) fn check_sigma(name: &'static str, value: f64) -> Result<f64, Self> {
        let value = Self::check_finite(name, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(Self::NonPositiveSigma { name, value })
        }
    }

    pub(crate) fn check_width(name: &'static str, value: f64) -> Result<f64, Self> {
        let value = Self::check_finite(name, value)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(Self::NegativeWidth { name, value })
        }
    }
}

/// A probability density over a single observable whose parameters are fixed for the
/// lifetime of the value.
///
/// Implementors guarantee that [`ShapeModel::density`] is pure, finite and non-negative
/// for every input, so a minimizer can call it freely while exploring parameter space.
pub trait ShapeModel {
    /// Compute the density at a specified coordinate
    ///
    /// # See also
    /// [`ShapeModel::predict`]
    /// [`ShapeModel::predict_iter`]
    fn density(&self, x: f64) -> f64;

    /// Given a coordinate sequence, produce the complementary sequence of densities
    ///
    /// # See also
    /// [`ShapeModel::density`]
    /// [`ShapeModel::predict_iter`]
    fn predict(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.density(*x)).collect()
    }

    /// Given a coordinate iterator, produce the complementary iterator of densities
    ///
    /// # See also
    /// [`ShapeModel::density`]
    /// [`ShapeModel::predict`]
    fn predict_iter<I: IntoIterator<Item = f64>>(&self, xs: I) -> impl Iterator<Item = f64> {
        xs.into_iter().map(|x| self.density(x))
    }

    /// Integrate the density over `range` using the default [`IntegrationConfig`]
    fn integral(&self, range: &ObservableRange) -> f64 {
        self.integral_with(range, IntegrationConfig::default())
    }

    /// Integrate the density over `range`.
    ///
    /// The default implementation is numerical. Shapes with a closed-form
    /// antiderivative override it.
    fn integral_with(&self, range: &ObservableRange, config: IntegrationConfig) -> f64 {
        adaptive_simpson(|x| self.density(x), range.min, range.max, config).value
    }

    /// Normalize this shape over `range`, producing a proper probability density
    fn normalized(self, range: ObservableRange) -> Result<NormalizedPdf<Self>, PdfError>
    where
        Self: Sized,
    {
        NormalizedPdf::new(self, range)
    }
}

impl<T: ShapeModel> ShapeModel for &T {
    fn density(&self, x: f64) -> f64 {
        (*self).density(x)
    }

    fn integral_with(&self, range: &ObservableRange, config: IntegrationConfig) -> f64 {
        (*self).integral_with(range, config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::arrayops::gridspace;
    use crate::shapes::DoubleSidedVoigtianShape;

    fn lazy_total<S: ShapeModel>(shape: S, xs: &[f64]) -> f64 {
        shape.predict_iter(xs.iter().copied()).sum()
    }

    #[test]
    fn test_predict_iter() {
        let shape = DoubleSidedVoigtianShape::new(3.0, 0.4, 0.9, 0.1, 0.3, 8.0);
        let xs = gridspace(0.0, 10.0, 0.1);
        let eager = shape.predict(&xs);
        let lazy: Vec<f64> = shape.predict_iter(xs.iter().copied()).collect();
        assert_eq!(lazy.len(), xs.len());
        assert_eq!(eager, lazy);

        for (x, y) in xs.iter().zip(lazy.iter()) {
            if *x > 8.0 {
                assert_eq!(*y, 0.0, "{x}");
            } else {
                assert!(*y > 0.0, "{x}");
            }
        }

        // through the blanket impl for references
        assert_eq!(lazy_total(&shape, &xs), eager.iter().sum::<f64>());
    }
}
