#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::integrate::IntegrationConfig;
use crate::model::{ShapeModel, ShapeParameterError};
use crate::range::ObservableRange;

use super::gaussian::gaussian_cdf;

/// The mass of a unit-peak Gaussian, $`\sigma\sqrt{2\pi}`$
#[inline]
fn unit_peak_mass(sigma: f64) -> f64 {
    sigma * (2.0 * std::f64::consts::PI).sqrt()
}

/// Double-sided Gaussian shape model
///
/// ```math
/// f(x) = \begin{cases}
///     \exp\left({\frac{-(x - \mu)^2}{2\sigma_l^2}}\right) & x \lt \mu \\
///     \exp\left({\frac{-(x - \mu)^2}{2\sigma_r^2}}\right) & \mu \le x \le y_{max} \\
///     0 & x \gt y_{max}
/// \end{cases}
/// ```
///
/// Both sides peak at one, so the density is continuous at the mean. Without the `y_max`
/// cap a side holds $`\sigma\sqrt{\pi / 2}`$.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleSidedGaussianShape {
    pub mean: f64,
    pub sigma_left: f64,
    pub sigma_right: f64,
    pub y_max: f64,
}

impl DoubleSidedGaussianShape {
    pub fn new(mean: f64, sigma_left: f64, sigma_right: f64, y_max: f64) -> Self {
        Self {
            mean,
            sigma_left,
            sigma_right,
            y_max,
        }
    }

    pub fn try_new(
        mean: f64,
        sigma_left: f64,
        sigma_right: f64,
        y_max: f64,
    ) -> Result<Self, ShapeParameterError> {
        if y_max.is_nan() {
            return Err(ShapeParameterError::NotFinite {
                name: "yMax",
                value: y_max,
            });
        }
        Ok(Self::new(
            ShapeParameterError::check_finite("mean", mean)?,
            ShapeParameterError::check_sigma("sigma1", sigma_left)?,
            ShapeParameterError::check_sigma("sigma2", sigma_right)?,
            y_max,
        ))
    }

    /// Compute the density at a specified coordinate
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        if x > self.y_max {
            return 0.0;
        }
        let d = x - self.mean;
        let sigma = if x < self.mean {
            self.sigma_left
        } else {
            self.sigma_right
        };
        if !(sigma > 0.0) || !sigma.is_finite() || d.is_nan() {
            return 0.0;
        }
        let z = d / sigma;
        (-0.5 * z * z).exp()
    }

    /// The closed-form integral over `[a, b]`, honoring the `y_max` cap
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        if a > b {
            return -self.integrate(b, a);
        }
        let b = b.min(self.y_max);
        let valid = |sigma: f64| sigma > 0.0 && sigma.is_finite();
        let mut total = 0.0;
        let left_end = b.min(self.mean);
        if a < left_end && valid(self.sigma_left) {
            total += unit_peak_mass(self.sigma_left)
                * (gaussian_cdf(left_end - self.mean, self.sigma_left)
                    - gaussian_cdf(a - self.mean, self.sigma_left));
        }
        let right_start = a.max(self.mean);
        if right_start < b && valid(self.sigma_right) {
            total += unit_peak_mass(self.sigma_right)
                * (gaussian_cdf(b - self.mean, self.sigma_right)
                    - gaussian_cdf(right_start - self.mean, self.sigma_right));
        }
        total
    }
}

impl ShapeModel for DoubleSidedGaussianShape {
    fn density(&self, x: f64) -> f64 {
        self.density(x)
    }

    fn integral_with(&self, range: &ObservableRange, _config: IntegrationConfig) -> f64 {
        self.integrate(range.min, range.max)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::integrate::adaptive_simpson;

    #[test]
    fn test_sides() {
        let model = DoubleSidedGaussianShape::new(5.0, 0.5, 2.0, f64::INFINITY);
        assert!(model.density(4.0) < model.density(6.0));
        assert_eq!(model.density(4.0), (-2.0f64).exp());
        assert_eq!(model.density(5.0), 1.0);
        assert!((model.density(5.0 - 1e-12) - 1.0).abs() < 1e-15);

        // each side depends on its own sigma only
        let widened = DoubleSidedGaussianShape {
            sigma_right: 3.0,
            ..model
        };
        assert_eq!(widened.density(4.0), model.density(4.0));
        assert!(widened.density(6.0) > model.density(6.0));
        assert_eq!(DoubleSidedGaussianShape::new(5.0, 0.5, -1.0, 9.0).density(6.0), 0.0);
    }

    #[test]
    fn test_integral_matches_numeric() {
        let model = DoubleSidedGaussianShape::new(5.0, 0.5, 2.0, 9.0);
        let range = ObservableRange::new(0.0, 12.0).unwrap();
        let analytic = model.integral(&range);
        let numeric = adaptive_simpson(
            |x| model.density(x),
            0.0,
            12.0,
            IntegrationConfig::default(),
        )
        .value;
        assert!((analytic - numeric).abs() < 1e-6, "{analytic} vs {numeric}");
        assert_eq!(model.density(9.5), 0.0);
    }

    #[test]
    fn test_side_masses() {
        let model = DoubleSidedGaussianShape::new(0.0, 1.0, 3.0, f64::INFINITY);
        let left = 0.5 * (2.0 * std::f64::consts::PI).sqrt();
        assert!((model.integrate(-100.0, 0.0) - left).abs() < 1e-14);
        assert!((model.integrate(-100.0, 100.0) - 4.0 * left).abs() < 1e-13);
    }

    #[test]
    fn test_try_new() {
        assert!(DoubleSidedGaussianShape::try_new(0.0, 1.0, 0.0, 10.0).is_err());
        assert!(DoubleSidedGaussianShape::try_new(0.0, 1.0, 1.0, f64::NAN).is_err());
        assert!(DoubleSidedGaussianShape::try_new(0.0, 1.0, 1.0, f64::INFINITY).is_ok());
    }
}
