use std::f64::consts::{FRAC_1_PI, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::integrate::IntegrationConfig;
use crate::model::{ShapeModel, ShapeParameterError};
use crate::range::ObservableRange;

/// How a Breit-Wigner `width` parameter maps onto the Lorentzian half width
/// at half maximum $`\gamma`$.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidthConvention {
    /// The width is $`\gamma`$ itself
    #[default]
    HalfWidth,
    /// The width is the full width at half maximum, $`\gamma = \Gamma / 2`$
    FullWidth,
}

impl WidthConvention {
    #[inline]
    pub fn half_width(&self, width: f64) -> f64 {
        match self {
            Self::HalfWidth => width,
            Self::FullWidth => 0.5 * width,
        }
    }
}

/// The normalized Lorentzian density with half width `gamma` at offset `d`.
///
/// Returns zero for a non-positive or non-finite `gamma` and for a NaN offset. The
/// ratio of `d` and `gamma` is formed before squaring so neither tiny nor huge widths
/// overflow; a peak too tall for an `f64` saturates at [`f64::MAX`].
#[inline]
pub fn lorentzian_density(d: f64, gamma: f64) -> f64 {
    if !(gamma > 0.0) || !gamma.is_finite() || d.is_nan() {
        return 0.0;
    }
    let density = if d.abs() <= gamma {
        let t = d / gamma;
        FRAC_1_PI / gamma / (1.0 + t * t)
    } else {
        let r = gamma / d;
        FRAC_1_PI * r / d / (1.0 + r * r)
    };
    density.min(f64::MAX)
}

#[inline]
pub(crate) fn lorentzian_cdf(d: f64, gamma: f64) -> f64 {
    0.5 + (d / gamma).atan() / PI
}

/// Breit-Wigner (Cauchy) shape model
///
/// ```math
/// f(x) = \frac{\gamma}{\pi\left((x - \mu)^2 + \gamma^2\right)}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BreitWignerShape {
    pub mean: f64,
    pub width: f64,
    pub convention: WidthConvention,
}

impl BreitWignerShape {
    pub fn new(mean: f64, width: f64) -> Self {
        Self {
            mean,
            width,
            convention: WidthConvention::default(),
        }
    }

    pub fn try_new(mean: f64, width: f64) -> Result<Self, ShapeParameterError> {
        let width = ShapeParameterError::check_width("width", width)?;
        if width == 0.0 {
            return Err(ShapeParameterError::NonPositiveWidth {
                name: "width",
                value: width,
            });
        }
        Ok(Self::new(
            ShapeParameterError::check_finite("mean", mean)?,
            width,
        ))
    }

    pub fn with_convention(mut self, convention: WidthConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn gamma(&self) -> f64 {
        self.convention.half_width(self.width)
    }

    /// Compute the density at a specified coordinate
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        lorentzian_density(x - self.mean, self.gamma())
    }

    /// The closed-form integral over `[a, b]`
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        let gamma = self.gamma();
        if !(gamma > 0.0) || !gamma.is_finite() {
            return 0.0;
        }
        lorentzian_cdf(b - self.mean, gamma) - lorentzian_cdf(a - self.mean, gamma)
    }
}

impl ShapeModel for BreitWignerShape {
    fn density(&self, x: f64) -> f64 {
        self.density(x)
    }

    fn integral_with(&self, range: &ObservableRange, _config: IntegrationConfig) -> f64 {
        self.integrate(range.min, range.max)
    }
}
