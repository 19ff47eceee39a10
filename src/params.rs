//! Parameter ranges and the configuration a double-sided Voigtian is built from.
//!
//! A model description gives each free parameter as `[value, min, max]`: a starting
//! value and the box an external minimizer may move it in. [`DoubleSidedVoigtianConfig`]
//! groups the five free parameters of the shape with its fixed `y_max`, and turns a
//! minimizer's proposed values into a [`DoubleSidedVoigtianShape`].
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::ShapeParameterError;
use crate::shapes::{DoubleSidedVoigtianShape, WidthConvention};

/// All the ways a [`ParameterRange`] can be malformed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterRangeError {
    #[error("The range of {name} must be finite, received [{value}, {min}, {max}]")]
    NotFinite {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("The range of {name} is empty, {min} > {max}")]
    Empty { name: &'static str, min: f64, max: f64 },
    #[error("The starting value {value} of {name} lies outside of [{min}, {max}]")]
    ValueOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error(transparent)]
    Shape(#[from] ShapeParameterError),
}

/// A free parameter's starting value and the bounds it may move within
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParameterRange"))]
pub struct ParameterRange {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    pub fn new(value: f64, min: f64, max: f64) -> Result<Self, ParameterRangeError> {
        let range = Self { value, min, max };
        range.validate("parameter")?;
        Ok(range)
    }

    /// A parameter that cannot move
    pub fn fixed(value: f64) -> Self {
        Self {
            value,
            min: value,
            max: value,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Pull `value` into `[min, max]`. NaN maps onto the starting value.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.value;
        }
        value.max(self.min).min(self.max)
    }

    pub(crate) fn validate(&self, name: &'static str) -> Result<(), ParameterRangeError> {
        if !self.value.is_finite() || !self.min.is_finite() || !self.max.is_finite() {
            return Err(ParameterRangeError::NotFinite {
                name,
                value: self.value,
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(ParameterRangeError::Empty {
                name,
                min: self.min,
                max: self.max,
            });
        }
        if !self.contains(self.value) {
            return Err(ParameterRangeError::ValueOutOfRange {
                name,
                value: self.value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl From<[f64; 3]> for ParameterRange {
    fn from(value: [f64; 3]) -> Self {
        Self {
            value: value[0],
            min: value[1],
            max: value[2],
        }
    }
}

/// The unchecked serialized form of a [`ParameterRange`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawParameterRange {
    value: f64,
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParameterRange> for ParameterRange {
    type Error = ParameterRangeError;

    fn try_from(raw: RawParameterRange) -> Result<Self, Self::Error> {
        Self::new(raw.value, raw.min, raw.max)
    }
}

/// Describes the free parameters of a [`DoubleSidedVoigtianShape`] and its fixed
/// observable cap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleSidedVoigtianConfig {
    pub mean: ParameterRange,
    pub sigma1: ParameterRange,
    pub sigma2: ParameterRange,
    pub width1: ParameterRange,
    pub width2: ParameterRange,
    pub y_max: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub convention: WidthConvention,
}

impl Default for DoubleSidedVoigtianConfig {
    fn default() -> Self {
        Self::for_resonance(1.0, f64::INFINITY)
    }
}

impl DoubleSidedVoigtianConfig {
    /// The starting ranges used for a resonance of mass `mass` observed up to `y_max`.
    ///
    /// The resolutions scale with the mass, the Breit-Wigner widths do not.
    pub fn for_resonance(mass: f64, y_max: f64) -> Self {
        Self {
            mean: [mass, 0.0, 1.25 * mass].into(),
            sigma1: [0.1 * mass, 0.01, 0.5 * mass].into(),
            sigma2: [0.2 * mass, 0.01, 0.5 * mass].into(),
            width1: [1.0, 0.01, 10.0].into(),
            width2: [2.0, 0.01, 10.0].into(),
            y_max,
            convention: WidthConvention::default(),
        }
    }

    pub fn y_max(mut self, y_max: f64) -> Self {
        self.y_max = y_max;
        self
    }

    pub fn convention(mut self, convention: WidthConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Check every range and that the starting point describes a valid shape
    pub fn validate(&self) -> Result<(), ParameterRangeError> {
        self.mean.validate("mean")?;
        self.sigma1.validate("sigma1")?;
        self.sigma2.validate("sigma2")?;
        self.width1.validate("width1")?;
        self.width2.validate("width2")?;
        self.initial_shape()?;
        Ok(())
    }

    /// The shape at the starting values
    pub fn initial_shape(&self) -> Result<DoubleSidedVoigtianShape, ShapeParameterError> {
        DoubleSidedVoigtianShape::try_new(
            self.mean.value,
            self.sigma1.value,
            self.sigma2.value,
            self.width1.value,
            self.width2.value,
            self.y_max,
        )
        .map(|shape| shape.with_convention(self.convention))
    }

    /// The starting values in `(mean, sigma1, sigma2, width1, width2)` order
    pub fn initial_values(&self) -> [f64; 5] {
        [
            self.mean.value,
            self.sigma1.value,
            self.sigma2.value,
            self.width1.value,
            self.width2.value,
        ]
    }

    /// Build the shape for a minimizer's proposed `(mean, sigma1, sigma2, width1, width2)`,
    /// clamping each value into its range first.
    pub fn shape_at(&self, values: [f64; 5]) -> DoubleSidedVoigtianShape {
        let ranges = [
            &self.mean,
            &self.sigma1,
            &self.sigma2,
            &self.width1,
            &self.width2,
        ];
        let mut clamped = [0.0; 5];
        for (i, (range, value)) in ranges.iter().zip(values).enumerate() {
            clamped[i] = range.clamp(value);
            if clamped[i] != value {
                log::warn!("Clamped parameter {i} from {value} to {}", clamped[i]);
            }
        }
        DoubleSidedVoigtianShape::new(
            clamped[0], clamped[1], clamped[2], clamped[3], clamped[4], self.y_max,
        )
        .with_convention(self.convention)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parameter_range() {
        let range = ParameterRange::new(1.0, 0.0, 2.0).unwrap();
        assert_eq!(range.clamp(5.0), 2.0);
        assert_eq!(range.clamp(-5.0), 0.0);
        assert_eq!(range.clamp(f64::NAN), 1.0);
        assert!(!range.is_fixed());
        assert!(ParameterRange::fixed(3.0).is_fixed());

        assert!(matches!(
            ParameterRange::new(3.0, 0.0, 2.0),
            Err(ParameterRangeError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            ParameterRange::new(1.0, 2.0, 0.0),
            Err(ParameterRangeError::Empty { .. })
        ));
        assert!(matches!(
            ParameterRange::new(f64::NAN, 0.0, 2.0),
            Err(ParameterRangeError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_for_resonance() {
        let config = DoubleSidedVoigtianConfig::for_resonance(10.0, 25.0);
        config.validate().unwrap();
        let shape = config.initial_shape().unwrap();
        assert_eq!(shape.mean, 10.0);
        assert_eq!(shape.sigma_left, 1.0);
        assert_eq!(shape.sigma_right, 2.0);
        assert_eq!(shape.width_left, 1.0);
        assert_eq!(shape.width_right, 2.0);
        assert_eq!(shape.y_max, 25.0);
        assert_eq!(config.initial_values(), [10.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test_log::test]
    fn test_shape_at_clamps() {
        let config = DoubleSidedVoigtianConfig::for_resonance(10.0, 25.0);
        let shape = config.shape_at([20.0, -1.0, 2.0, 0.5, 100.0]);
        assert_eq!(shape.mean, 12.5);
        assert_eq!(shape.sigma_left, 0.01);
        assert_eq!(shape.sigma_right, 2.0);
        assert_eq!(shape.width_left, 0.5);
        assert_eq!(shape.width_right, 10.0);
        assert!(shape.density(11.0) > 0.0);
    }

    #[test]
    fn test_invalid_start() {
        let mut config = DoubleSidedVoigtianConfig::for_resonance(10.0, 25.0);
        config.sigma1 = ParameterRange::fixed(0.0);
        assert!(matches!(
            config.validate(),
            Err(ParameterRangeError::Shape(
                ShapeParameterError::NonPositiveSigma { name: "sigma1", .. }
            ))
        ));

        config.sigma1 = [1.0, 2.0, 3.0].into();
        assert!(matches!(
            config.validate(),
            Err(ParameterRangeError::ValueOutOfRange { name: "sigma1", .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let text = r#"{
            "mean": {"value": 3.5, "min": 0.0, "max": 30.0},
            "sigma1": {"value": 0.35, "min": 0.175, "max": 1.4},
            "sigma2": {"value": 1.05, "min": 0.175, "max": 1.4},
            "width1": {"value": 0.1, "min": 0.01, "max": 5.0},
            "width2": {"value": 0.3, "min": 0.01, "max": 5.0},
            "y_max": 25.0
        }"#;
        let config: DoubleSidedVoigtianConfig = serde_json::from_str(text).unwrap();
        config.validate().unwrap();
        assert_eq!(config.convention, WidthConvention::HalfWidth);
        let dumped = serde_json::to_string(&config).unwrap();
        let reloaded: DoubleSidedVoigtianConfig = serde_json::from_str(&dumped).unwrap();
        assert_eq!(config, reloaded);

        let inverted = text.replace(
            r#""sigma2": {"value": 1.05, "min": 0.175, "max": 1.4}"#,
            r#""sigma2": {"value": 1.05, "min": 1.4, "max": 0.175}"#,
        );
        assert_ne!(inverted, text);
        let err = serde_json::from_str::<DoubleSidedVoigtianConfig>(&inverted).unwrap_err();
        assert!(err.to_string().contains("is empty"), "{err}");
    }
}
