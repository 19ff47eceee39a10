#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::integrate::{adaptive_simpson_with_breaks, IntegrationConfig};
use crate::model::{ShapeModel, ShapeParameterError};
use crate::range::ObservableRange;

use super::{peak_scaled_voigt, WidthConvention};

/// Evaluate the double-sided Voigtian density with every parameter passed by value.
///
/// Points left of `mean` follow a Voigt profile with (`sig1`, `wid1`), points at or right of
/// it one with (`sig2`, `wid2`), `wid` taken as the Lorentzian half width. Each side is
/// scaled to one at its own peak (see [`peak_scaled_voigt`]), so the density is continuous
/// at the mean, where a kink in its curvature appears when the sides differ, and each pair
/// of parameters shapes only its own side. The value is unnormalized: [`NormalizedPdf`]
/// supplies the normalization over an observable range. `y_max` is the upper edge of that
/// range: the density is zero for `x > y_max`, and a NaN `y_max` disables the cap.
///
/// This is the entry point an external minimizer calls once per parameter vector and data
/// point. It is pure, never allocates, and returns a finite value in `[0, 1]` for every
/// input, including the degenerate ones.
///
/// [`NormalizedPdf`]: crate::pdf::NormalizedPdf
///
/// # Example
/// ```
/// use voigtian::shapes::evaluate;
///
/// assert_eq!(evaluate(0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0), 1.0);
/// let tail = evaluate(-2.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0);
/// assert!((tail - (-2.0f64).exp()).abs() < 1e-15);
/// ```
#[inline]
pub fn evaluate(x: f64, mean: f64, sig1: f64, sig2: f64, wid1: f64, wid2: f64, y_max: f64) -> f64 {
    evaluate_with(
        x,
        mean,
        sig1,
        sig2,
        wid1,
        wid2,
        y_max,
        WidthConvention::HalfWidth,
    )
}

/// [`evaluate`] with an explicit [`WidthConvention`] for the Breit-Wigner widths
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn evaluate_with(
    x: f64,
    mean: f64,
    sig1: f64,
    sig2: f64,
    wid1: f64,
    wid2: f64,
    y_max: f64,
    convention: WidthConvention,
) -> f64 {
    if x > y_max {
        return 0.0;
    }
    let (sigma, width) = if x < mean { (sig1, wid1) } else { (sig2, wid2) };
    peak_scaled_voigt(x - mean, sigma, convention.half_width(width))
}

/// Double-sided Voigtian shape model
///
/// A Voigt profile whose Gaussian resolution and Breit-Wigner width differ on either side
/// of the mean, each side scaled to one at the mean, truncated above `y_max`:
///
/// ```math
/// f(x) = \begin{cases}
///     V(x - \mu; \sigma_1, \gamma_1) / V(0; \sigma_1, \gamma_1) & x \lt \mu \\
///     V(x - \mu; \sigma_2, \gamma_2) / V(0; \sigma_2, \gamma_2) & \mu \le x \le y_{max} \\
///     0 & x \gt y_{max}
/// \end{cases}
/// ```
///
/// Without the cap the side masses are $`1 / (2 V(0; \sigma_i, \gamma_i))`$.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleSidedVoigtianShape {
    pub mean: f64,
    /// `sig1`, the Gaussian resolution left of the mean
    pub sigma_left: f64,
    /// `sig2`, the Gaussian resolution at or right of the mean
    pub sigma_right: f64,
    /// `wid1`, the Breit-Wigner width left of the mean
    pub width_left: f64,
    /// `wid2`, the Breit-Wigner width at or right of the mean
    pub width_right: f64,
    /// The upper edge of the observable range
    pub y_max: f64,
    pub convention: WidthConvention,
}

impl DoubleSidedVoigtianShape {
    /// Build a shape from parameters in the `(mean, sig1, sig2, wid1, wid2, yMax)` order
    /// without validating them.
    pub fn new(
        mean: f64,
        sigma_left: f64,
        sigma_right: f64,
        width_left: f64,
        width_right: f64,
        y_max: f64,
    ) -> Self {
        Self {
            mean,
            sigma_left,
            sigma_right,
            width_left,
            width_right,
            y_max,
            convention: WidthConvention::default(),
        }
    }

    /// Like [`DoubleSidedVoigtianShape::new`], rejecting non-positive sigmas, negative widths
    /// and non-finite values. `y_max` may be `+inf` to disable the cap.
    pub fn try_new(
        mean: f64,
        sigma_left: f64,
        sigma_right: f64,
        width_left: f64,
        width_right: f64,
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
            ShapeParameterError::check_width("width1", width_left)?,
            ShapeParameterError::check_width("width2", width_right)?,
            y_max,
        ))
    }

    pub fn with_convention(mut self, convention: WidthConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Whether both sides share their parameters, making the shape a plain Voigtian
    /// below `y_max`
    pub fn is_symmetric(&self) -> bool {
        self.sigma_left == self.sigma_right && self.width_left == self.width_right
    }

    /// Compute the density at a specified coordinate
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        evaluate_with(
            x,
            self.mean,
            self.sigma_left,
            self.sigma_right,
            self.width_left,
            self.width_right,
            self.y_max,
            self.convention,
        )
    }

    /// Integrate over `[a, b]`, cutting at the mean and clipping at `y_max`
    pub fn integrate_with(&self, a: f64, b: f64, config: IntegrationConfig) -> f64 {
        if a > b {
            return -self.integrate_with(b, a, config);
        }
        let b = b.min(self.y_max);
        if !(a < b) {
            return 0.0;
        }
        adaptive_simpson_with_breaks(|x| self.density(x), a, b, &[self.mean], config).value
    }
}

impl ShapeModel for DoubleSidedVoigtianShape {
    fn density(&self, x: f64) -> f64 {
        self.density(x)
    }

    fn integral_with(&self, range: &ObservableRange, config: IntegrationConfig) -> f64 {
        self.integrate_with(range.min, range.max, config)
    }
}
