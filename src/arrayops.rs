use std::iter::Sum;

use num_traits::{AsPrimitive, Float, ToPrimitive};

/// Produce an evenly spaced grid from `start` up to, but not including, `end`
/// in increments of `step`.
///
/// An empty grid is returned when the step count is not representable, e.g.
/// for a non-positive `step` or reversed bounds.
pub fn gridspace<T: Float + ToPrimitive>(start: T, end: T, step: T) -> Vec<T> {
    let distance = end - start;
    let steps = match (distance / step).to_usize() {
        Some(steps) => steps,
        None => return Vec::new(),
    };
    let mut result = Vec::with_capacity(steps);
    for i in 0..steps {
        match T::from(i) {
            Some(i) => result.push(start + i * step),
            None => break,
        }
    }
    result
}

/// Integrate the sampled curve `y` over `x` with the trapezoid rule.
pub fn trapz<
    A: Float + Clone + AsPrimitive<B> + 'static,
    B: Float + Clone + AsPrimitive<A> + 'static + Sum,
>(
    x: &[A],
    y: &[B],
) -> B {
    let n = x.len().min(y.len());
    if n < 2 {
        return B::zero();
    }
    let half = B::one() / (B::one() + B::one());
    (0..n - 1)
        .map(|i| {
            let delta = x[i + 1] - x[i];
            delta.as_() * half * (y[i + 1] + y[i])
        })
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gridspace() {
        let grid = gridspace(0.0, 1.0, 0.25);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75]);
        assert!(gridspace(1.0, 0.0, 0.25).is_empty());
    }

    #[test]
    fn test_trapz_linear() {
        let x = gridspace(0.0, 2.01, 0.01);
        let y: Vec<f64> = x.iter().map(|x| 3.0 * x).collect();
        let area = trapz(&x, &y);
        let last = *x.last().unwrap();
        assert!((area - 1.5 * last * last).abs() < 1e-9, "{area}");
    }

    #[test]
    fn test_trapz_degenerate() {
        let x: [f64; 1] = [1.0];
        let y: [f64; 1] = [2.0];
        assert_eq!(trapz(&x, &y), 0.0);
    }
}
