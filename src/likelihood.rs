//! Negative log-likelihood of a sample under a [`NormalizedPdf`].
//!
//! This is the scalar an external minimizer drives towards its minimum. Rather than
//! letting a point with zero density turn the sum into `+inf`, which silently corrupts
//! the minimizer's view of the likelihood surface, offending points are reported as
//! errors carrying their index.
use thiserror::Error;

#[cfg(feature = "parallelism")]
use rayon::prelude::*;

use crate::model::ShapeModel;
use crate::pdf::NormalizedPdf;

/// All the ways a likelihood evaluation can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LikelihoodError {
    #[error("The observation {value} at index {index} is outside of the range [{min}, {max}]")]
    OutOfRange {
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("The observation {value} at index {index} has zero density")]
    ZeroDensity { index: usize, value: f64 },
    #[error("The weight {weight} at index {index} is negative or not finite")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("The sample is empty")]
    Empty,
}

#[inline]
fn point_term<S: ShapeModel>(
    pdf: &NormalizedPdf<S>,
    index: usize,
    value: f64,
) -> Result<f64, LikelihoodError> {
    if !pdf.range.contains(value) {
        return Err(LikelihoodError::OutOfRange {
            index,
            value,
            min: pdf.range.min,
            max: pdf.range.max,
        });
    }
    let density = pdf.density(value);
    if density > 0.0 {
        Ok(-density.ln())
    } else {
        Err(LikelihoodError::ZeroDensity { index, value })
    }
}

#[inline]
fn weighted_point_term<S: ShapeModel>(
    pdf: &NormalizedPdf<S>,
    index: usize,
    value: f64,
    weight: f64,
) -> Result<f64, LikelihoodError> {
    if !(weight >= 0.0) || !weight.is_finite() {
        return Err(LikelihoodError::InvalidWeight { index, weight });
    }
    if weight == 0.0 {
        return Ok(0.0);
    }
    Ok(weight * point_term(pdf, index, value)?)
}

// Can't inline cfg-if
cfg_if::cfg_if! {
    if #[cfg(feature = "parallelism")] {
        fn sum_terms<S: ShapeModel + Sync>(
            pdf: &NormalizedPdf<S>,
            data: &[f64],
        ) -> Result<f64, LikelihoodError> {
            data.par_iter()
                .enumerate()
                .map(|(i, x)| point_term(pdf, i, *x))
                .sum()
        }

        fn sum_weighted_terms<S: ShapeModel + Sync>(
            pdf: &NormalizedPdf<S>,
            data: &[(f64, f64)],
        ) -> Result<f64, LikelihoodError> {
            data.par_iter()
                .enumerate()
                .map(|(i, (x, w))| weighted_point_term(pdf, i, *x, *w))
                .sum()
        }
    } else {
        fn sum_terms<S: ShapeModel + Sync>(
            pdf: &NormalizedPdf<S>,
            data: &[f64],
        ) -> Result<f64, LikelihoodError> {
            data.iter()
                .enumerate()
                .map(|(i, x)| point_term(pdf, i, *x))
                .sum()
        }

        fn sum_weighted_terms<S: ShapeModel + Sync>(
            pdf: &NormalizedPdf<S>,
            data: &[(f64, f64)],
        ) -> Result<f64, LikelihoodError> {
            data.iter()
                .enumerate()
                .map(|(i, (x, w))| weighted_point_term(pdf, i, *x, *w))
                .sum()
        }
    }
}

/// Compute $`-\sum_i \ln f(x_i)`$ over an unbinned sample.
///
/// When the `parallelism` feature is enabled the sum is computed with `rayon`, so the
/// result may differ from the sequential sum in the last few bits.
pub fn negative_log_likelihood<S: ShapeModel + Sync>(
    pdf: &NormalizedPdf<S>,
    data: &[f64],
) -> Result<f64, LikelihoodError> {
    if data.is_empty() {
        return Err(LikelihoodError::Empty);
    }
    let nll = sum_terms(pdf, data)?;
    log::trace!("NLL over {} points = {nll}", data.len());
    Ok(nll)
}

/// Compute $`-\sum_i w_i \ln f(x_i)`$ over `(x, weight)` pairs, e.g. bin centers and
/// bin contents of a histogram. Points with zero weight are skipped, even if they fall
/// outside the range.
pub fn weighted_negative_log_likelihood<S: ShapeModel + Sync>(
    pdf: &NormalizedPdf<S>,
    data: &[(f64, f64)],
) -> Result<f64, LikelihoodError> {
    if data.is_empty() {
        return Err(LikelihoodError::Empty);
    }
    let nll = sum_weighted_terms(pdf, data)?;
    log::trace!("Weighted NLL over {} points = {nll}", data.len());
    Ok(nll)
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::arrayops::gridspace;
    use crate::range::ObservableRange;
    use crate::shapes::{DoubleSidedVoigtianShape, GaussianShape};

    fn voigtian_pdf(sigma_right: f64) -> NormalizedPdf<DoubleSidedVoigtianShape> {
        let range = ObservableRange::new(0.0, 20.0).unwrap();
        DoubleSidedVoigtianShape::new(10.0, 1.0, sigma_right, 0.2, 0.2, range.max)
            .normalized(range)
            .unwrap()
    }

    #[test_log::test]
    fn test_matches_sequential_sum() {
        let pdf = voigtian_pdf(2.0);
        let data = gridspace(0.5, 19.5, 0.25);
        let expected: f64 = data.iter().map(|x| -pdf.density(*x).ln()).sum();
        let observed = negative_log_likelihood(&pdf, &data).unwrap();
        assert!((observed - expected).abs() < 1e-9 * expected.abs(), "{observed} vs {expected}");
    }

    #[test]
    fn test_prefers_generating_parameters() {
        // a sample that is wider on the right
        let range = ObservableRange::new(-10.0, 10.0).unwrap();
        let truth = GaussianShape::new(0.0, 1.0);
        let mut data = Vec::new();
        for x in gridspace(-3.0, 3.0, 0.05) {
            let copies = (truth.density(x) * 40.0).round() as usize;
            let x = if x > 0.0 { 2.0 * x } else { x };
            data.extend(std::iter::repeat_n(x, copies));
        }
        let nll = |sigma_right: f64| {
            let pdf = DoubleSidedVoigtianShape::new(0.0, 1.0, sigma_right, 0.0, 0.0, range.max)
                .normalized(range)
                .unwrap();
            negative_log_likelihood(&pdf, &data).unwrap()
        };
        assert!(nll(2.0) < nll(1.0));
        assert!(nll(2.0) < nll(3.0));
    }

    #[test]
    fn test_out_of_range() {
        let pdf = voigtian_pdf(1.0);
        let err = negative_log_likelihood(&pdf, &[1.0, 25.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            LikelihoodError::OutOfRange {
                index: 1,
                value: 25.0,
                min: 0.0,
                max: 20.0
            }
        );
        assert_eq!(
            negative_log_likelihood(&pdf, &[]),
            Err(LikelihoodError::Empty)
        );
    }

    #[test]
    fn test_zero_density() {
        let range = ObservableRange::new(0.0, 20.0).unwrap();
        // capped below the range maximum
        let pdf = DoubleSidedVoigtianShape::new(5.0, 1.0, 1.0, 0.1, 0.1, 12.0)
            .normalized(range)
            .unwrap();
        let err = negative_log_likelihood(&pdf, &[4.0, 15.0]).unwrap_err();
        assert_eq!(err, LikelihoodError::ZeroDensity { index: 1, value: 15.0 });
    }

    #[test]
    fn test_weighted() {
        let pdf = voigtian_pdf(1.5);
        let unweighted = negative_log_likelihood(&pdf, &[9.0, 9.0, 11.0]).unwrap();
        let weighted =
            weighted_negative_log_likelihood(&pdf, &[(9.0, 2.0), (11.0, 1.0), (50.0, 0.0)])
                .unwrap();
        assert!((unweighted - weighted).abs() < 1e-12);

        let err = weighted_negative_log_likelihood(&pdf, &[(9.0, -1.0)]).unwrap_err();
        assert!(matches!(err, LikelihoodError::InvalidWeight { index: 0, .. }));
    }
}
