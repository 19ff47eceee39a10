//! Line shape densities.
//!
//! The supported shapes:
//! - [`GaussianShape`]
//! - [`BreitWignerShape`]
//! - [`VoigtianShape`]
//! - [`DoubleSidedGaussianShape`]
//! - [`DoubleSidedVoigtianShape`]
//!
//! and the [`Shape`] type that can be used when the kind of shape is only known at run time.
//!
//! Every shape is a normalized density (up to the `y_max` truncation of the double-sided
//! shapes) and every evaluation is finite and non-negative, whatever the parameters.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::integrate::IntegrationConfig;
use crate::model::ShapeModel;
use crate::range::ObservableRange;

mod breit_wigner;
mod double_sided_gaussian;
mod double_sided_voigtian;
mod gaussian;
mod voigtian;

pub use breit_wigner::{lorentzian_density, BreitWignerShape, WidthConvention};
pub use double_sided_gaussian::DoubleSidedGaussianShape;
pub use double_sided_voigtian::{evaluate, evaluate_with, DoubleSidedVoigtianShape};
pub use gaussian::{gaussian_density, GaussianShape};
pub use voigtian::{peak_scaled_voigt, voigt_profile, VoigtianShape};

/// A dispatching shape model that can represent any of the supported shapes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    Gaussian(GaussianShape),
    BreitWigner(BreitWignerShape),
    Voigtian(VoigtianShape),
    DoubleSidedGaussian(DoubleSidedGaussianShape),
    DoubleSidedVoigtian(DoubleSidedVoigtianShape),
}

macro_rules! dispatch_shape {
    ($d:ident, $r:ident, $e:expr) => {
        match $d {
            Shape::Gaussian($r) => $e,
            Shape::BreitWigner($r) => $e,
            Shape::Voigtian($r) => $e,
            Shape::DoubleSidedGaussian($r) => $e,
            Shape::DoubleSidedVoigtian($r) => $e,
        }
    };
}

impl From<GaussianShape> for Shape {
    fn from(value: GaussianShape) -> Self {
        Self::Gaussian(value)
    }
}

impl From<BreitWignerShape> for Shape {
    fn from(value: BreitWignerShape) -> Self {
        Self::BreitWigner(value)
    }
}

impl From<VoigtianShape> for Shape {
    fn from(value: VoigtianShape) -> Self {
        Self::Voigtian(value)
    }
}

impl From<DoubleSidedGaussianShape> for Shape {
    fn from(value: DoubleSidedGaussianShape) -> Self {
        Self::DoubleSidedGaussian(value)
    }
}

impl From<DoubleSidedVoigtianShape> for Shape {
    fn from(value: DoubleSidedVoigtianShape) -> Self {
        Self::DoubleSidedVoigtian(value)
    }
}

impl Shape {
    /// The location parameter shared by every shape
    pub fn mean(&self) -> f64 {
        dispatch_shape!(self, p, p.mean)
    }

    /// Compute the density at a specified coordinate
    pub fn density(&self, x: f64) -> f64 {
        dispatch_shape!(self, p, p.density(x))
    }

    /// A short name for the shape kind
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Gaussian(_) => "Gaussian",
            Shape::BreitWigner(_) => "BreitWigner",
            Shape::Voigtian(_) => "Voigtian",
            Shape::DoubleSidedGaussian(_) => "DoubleSidedGaussian",
            Shape::DoubleSidedVoigtian(_) => "DoubleSidedVoigtian",
        }
    }
}

impl ShapeModel for Shape {
    fn density(&self, x: f64) -> f64 {
        self.density(x)
    }

    fn integral_with(&self, range: &ObservableRange, config: IntegrationConfig) -> f64 {
        dispatch_shape!(self, p, p.integral_with(range, config))
    }
}
