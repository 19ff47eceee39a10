use std::f64::consts::{FRAC_1_SQRT_2, PI};

use libm::erfc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{ShapeModel, ShapeParameterError};
use crate::range::ObservableRange;
use crate::integrate::IntegrationConfig;

const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// The normalized Gaussian density at offset `d` from the mean.
///
/// Returns zero for a non-positive or non-finite `sigma` and for a NaN offset. A peak
/// too tall for an `f64`, from a subnormal `sigma`, saturates at [`f64::MAX`].
#[inline]
pub fn gaussian_density(d: f64, sigma: f64) -> f64 {
    if !(sigma > 0.0) || !sigma.is_finite() || d.is_nan() {
        return 0.0;
    }
    let z = d / sigma;
    // the kernel divides first so an underflowed tail stays zero instead of 0 * inf
    ((-0.5 * z * z).exp() / sigma * FRAC_1_SQRT_2PI).min(f64::MAX)
}

/// The Gaussian cumulative distribution at offset `d` from the mean.
///
/// `erfc` keeps the lower tail accurate where `1 + erf` would cancel.
#[inline]
pub(crate) fn gaussian_cdf(d: f64, sigma: f64) -> f64 {
    0.5 * erfc(-d * FRAC_1_SQRT_2 / sigma)
}

/// Gaussian shape model
///
/// ```math
/// f(x) = \frac{1}{\sigma\sqrt{2\pi}}\exp\left({\frac{-(x - \mu)^2}{2\sigma^2}}\right)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussianShape {
    pub mean: f64,
    pub sigma: f64,
}

impl GaussianShape {
    pub fn new(mean: f64, sigma: f64) -> Self {
        Self { mean, sigma }
    }

    pub fn try_new(mean: f64, sigma: f64) -> Result<Self, ShapeParameterError> {
        Ok(Self::new(
            ShapeParameterError::check_finite("mean", mean)?,
            ShapeParameterError::check_sigma("sigma", sigma)?,
        ))
    }

    /// Compute the density at a specified coordinate
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        gaussian_density(x - self.mean, self.sigma)
    }

    /// The closed-form integral over `[a, b]`
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        if !(self.sigma > 0.0) || !self.sigma.is_finite() {
            return 0.0;
        }
        gaussian_cdf(b - self.mean, self.sigma) - gaussian_cdf(a - self.mean, self.sigma)
    }

    pub fn full_width_at_half_max(&self) -> f64 {
        2.0 * (2.0 * 2.0_f64.ln()).sqrt() * self.sigma
    }
}

impl ShapeModel for GaussianShape {
    fn density(&self, x: f64) -> f64 {
        self.density(x)
    }

    fn integral_with(&self, range: &ObservableRange, _config: IntegrationConfig) -> f64 {
        self.integrate(range.min, range.max)
    }
}
