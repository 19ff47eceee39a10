use std::f64::consts::FRAC_1_SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::faddeeva::voigt_kernel;
use crate::integrate::{adaptive_simpson_with_breaks, IntegrationConfig};
use crate::model::{ShapeModel, ShapeParameterError};
use crate::range::ObservableRange;

use super::{gaussian_density, lorentzian_density, WidthConvention};

const FRAC_1_SQRT_PI: f64 = 0.564_189_583_547_756_3;

/// Past this scaled distance the Faddeeva function equals its Lorentzian asymptote
/// to well beyond double precision.
const LORENTZIAN_REGIME: f64 = 1e15;

/// The normalized Voigt profile at offset `d` from the mean for a Gaussian of width
/// `sigma` convolved with a Lorentzian of half width `gamma`.
///
/// ```math
/// V(d; \sigma, \gamma) = \frac{\operatorname{Re} w(z)}{\sigma\sqrt{2\pi}},
/// \quad z = \frac{d + i\gamma}{\sigma\sqrt{2}}
/// ```
///
/// The limits are computed in closed form: `gamma == 0` is the Gaussian and
/// `sigma == 0` the Lorentzian. Everything else that cannot produce a
/// density, a negative or NaN width, a NaN offset, or both widths zero, is `0`.
/// The result is always finite and non-negative: a peak too tall for an `f64`,
/// which only subnormal widths produce, saturates at [`f64::MAX`].
///
/// # Example
/// ```
/// use voigtian::shapes::voigt_profile;
///
/// let peak = voigt_profile(0.0, 1.0, 0.0);
/// assert!((peak - 1.0 / (2.0 * std::f64::consts::PI).sqrt()).abs() < 1e-15);
/// ```
#[inline]
pub fn voigt_profile(d: f64, sigma: f64, gamma: f64) -> f64 {
    if d.is_nan() || !(sigma >= 0.0) || !(gamma >= 0.0) {
        return 0.0;
    }
    if gamma == 0.0 {
        return gaussian_density(d, sigma);
    }
    if sigma == 0.0 {
        return lorentzian_density(d, gamma);
    }
    if !sigma.is_finite() || !gamma.is_finite() || !d.is_finite() {
        return 0.0;
    }

    let c = FRAC_1_SQRT_2 / sigma;
    let u = c * d;
    let a = c * gamma;
    if !(u.abs() < LORENTZIAN_REGIME && a < LORENTZIAN_REGIME) {
        return lorentzian_density(d, gamma);
    }

    let v = voigt_kernel(u, a) * c * FRAC_1_SQRT_PI;
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// The Voigt profile at offset `d` scaled so its peak at `d == 0` is one,
/// $`V(d; \sigma, \gamma) / V(0; \sigma, \gamma)`$.
///
/// The ratio is formed from the Faddeeva function directly, without the
/// normalization constants, so it stays accurate for widths whose normalized peak
/// would overflow. The limits and degenerate inputs follow [`voigt_profile`], and
/// the result always lies in `[0, 1]`.
///
/// # Example
/// ```
/// use voigtian::shapes::peak_scaled_voigt;
///
/// assert_eq!(peak_scaled_voigt(0.0, 1.0, 0.5), 1.0);
/// assert!((peak_scaled_voigt(1.0, 1.0, 0.0) - (-0.5f64).exp()).abs() < 1e-15);
/// ```
#[inline]
pub fn peak_scaled_voigt(d: f64, sigma: f64, gamma: f64) -> f64 {
    if d.is_nan() || !(sigma >= 0.0) || !(gamma >= 0.0) {
        return 0.0;
    }
    if gamma == 0.0 {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return 0.0;
        }
        let z = d / sigma;
        return (-0.5 * z * z).exp();
    }
    if sigma == 0.0 {
        return lorentzian_ratio(d, gamma);
    }
    if !sigma.is_finite() || !gamma.is_finite() || !d.is_finite() {
        return 0.0;
    }

    let c = FRAC_1_SQRT_2 / sigma;
    let u = c * d;
    let a = c * gamma;
    if !(a < LORENTZIAN_REGIME) {
        return lorentzian_ratio(d, gamma);
    }
    let peak = voigt_kernel(0.0, a);
    let value = if u.abs() < LORENTZIAN_REGIME {
        voigt_kernel(u, a)
    } else {
        FRAC_1_SQRT_PI * a / (u * u + a * a)
    };
    let ratio = value / peak;
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(1.0)
    } else {
        0.0
    }
}

#[inline]
fn lorentzian_ratio(d: f64, gamma: f64) -> f64 {
    if !gamma.is_finite() {
        return 0.0;
    }
    let t = d / gamma;
    1.0 / (1.0 + t * t)
}

/// Voigt shape model, the convolution of a Gaussian and a Breit-Wigner
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoigtianShape {
    pub mean: f64,
    pub sigma: f64,
    pub width: f64,
    pub convention: WidthConvention,
}

impl VoigtianShape {
    pub fn new(mean: f64, sigma: f64, width: f64) -> Self {
        Self {
            mean,
            sigma,
            width,
            convention: WidthConvention::default(),
        }
    }

    pub fn try_new(mean: f64, sigma: f64, width: f64) -> Result<Self, ShapeParameterError> {
        Ok(Self::new(
            ShapeParameterError::check_finite("mean", mean)?,
            ShapeParameterError::check_sigma("sigma", sigma)?,
            ShapeParameterError::check_width("width", width)?,
        ))
    }

    pub fn with_convention(mut self, convention: WidthConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Compute the density at a specified coordinate
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        voigt_profile(
            x - self.mean,
            self.sigma,
            self.convention.half_width(self.width),
        )
    }
}

impl ShapeModel for VoigtianShape {
    fn density(&self, x: f64) -> f64 {
        self.density(x)
    }

    fn integral_with(&self, range: &ObservableRange, config: IntegrationConfig) -> f64 {
        adaptive_simpson_with_breaks(
            |x| self.density(x),
            range.min,
            range.max,
            &[self.mean],
            config,
        )
        .value
    }
}
