//! `voigtian` is a library for evaluating line shape densities, centered on the
//! double-sided Voigtian: a Voigt profile whose Gaussian resolution and Breit-Wigner
//! width are configured independently on either side of the mean.
//!
//! The density is meant to be handed to an external likelihood minimizer, which calls it
//! once per parameter vector and data point. [`shapes::evaluate`] is that entry point: a
//! pure function of seven numbers that never allocates and always returns a finite,
//! non-negative value. The [`shapes::DoubleSidedVoigtianShape`] type carries the same
//! parameters as a value, and implements [`ShapeModel`] alongside the Gaussian,
//! Breit-Wigner, single-sided Voigtian and double-sided Gaussian shapes.
//!
//! A shape normalized over an observable range becomes a [`NormalizedPdf`], and the
//! [`likelihood`] module computes the negative log-likelihood of a sample under it.
//!
//! # Usage
//! ```
//! use voigtian::prelude::*;
//! use voigtian::{DoubleSidedVoigtianShape, ObservableRange};
//!
//! let range = ObservableRange::new(0.0, 25.0).unwrap();
//! let shape = DoubleSidedVoigtianShape::new(8.0, 0.8, 1.6, 0.1, 0.3, range.max);
//! assert!(shape.density(12.0) > shape.density(4.0));
//!
//! let pdf = shape.normalized(range).unwrap();
//! let nll = voigtian::likelihood::negative_log_likelihood(&pdf, &[7.5, 8.2, 9.9]).unwrap();
//! assert!(nll.is_finite());
//! ```
//!
//! ## Features
//! - `parallelism` (default) sums likelihood terms with `rayon`.
//! - `serde` derives `Serialize` and `Deserialize` for shapes and configuration.
pub mod faddeeva;
pub mod integrate;
pub mod likelihood;
pub mod model;
pub mod params;
pub mod pdf;
pub mod prelude;
pub mod range;
pub mod shapes;
pub mod text;

mod arrayops;

pub use crate::arrayops::{gridspace, trapz};
pub use crate::model::{ShapeModel, ShapeParameterError};
pub use crate::params::{DoubleSidedVoigtianConfig, ParameterRange, ParameterRangeError};
pub use crate::pdf::{NormalizedPdf, PdfError};
pub use crate::range::{ObservableRange, RangeError};
pub use crate::shapes::{
    evaluate, BreitWignerShape, DoubleSidedGaussianShape, DoubleSidedVoigtianShape,
    GaussianShape, Shape, VoigtianShape, WidthConvention,
};
