//! Numerical integration used to normalize shapes without a closed-form integral.
//!
//! The integrator is an adaptive Simpson rule. The interval is first cut into a
//! fixed number of panels so narrow peaks in a wide range are not stepped over,
//! then each panel is bisected until the local error estimate drops below its
//! share of the tolerance.

/// Hyperparameters for [`adaptive_simpson`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig {
    /// The absolute error tolerance over the whole interval
    pub tolerance: f64,
    /// The maximum bisection depth of any one panel
    pub max_depth: usize,
    /// The number of equal panels to cut the interval into before adapting
    pub initial_intervals: usize,
}

impl IntegrationConfig {
    /// The absolute error tolerance over the whole interval
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The maximum bisection depth of any one panel
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn initial_intervals(mut self, initial_intervals: usize) -> Self {
        self.initial_intervals = initial_intervals.max(1);
        self
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_depth: 48,
            initial_intervals: 16,
        }
    }
}

/// Describe the outcome of a quadrature
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Quadrature {
    /// The estimated integral
    pub value: f64,
    /// The accumulated absolute error estimate
    pub error: f64,
    /// Whether every panel met its tolerance before hitting the depth limit
    pub converged: bool,
    /// The number of function evaluations
    pub evaluations: usize,
}

struct SimpsonState {
    error: f64,
    converged: bool,
    evaluations: usize,
}

#[allow(clippy::too_many_arguments)]
fn simpson_step<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    fa: f64,
    b: f64,
    fb: f64,
    m: f64,
    fm: f64,
    whole: f64,
    tolerance: f64,
    depth: usize,
    state: &mut SimpsonState,
) -> f64 {
    let left_mid = 0.5 * (a + m);
    let right_mid = 0.5 * (m + b);
    let f_left_mid = f(left_mid);
    let f_right_mid = f(right_mid);
    state.evaluations += 2;

    let left = (m - a) / 6.0 * (fa + 4.0 * f_left_mid + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * f_right_mid + fb);
    let delta = left + right - whole;

    if delta.abs() <= 15.0 * tolerance || !delta.is_finite() {
        state.error += delta.abs() / 15.0;
        return left + right + delta / 15.0;
    }
    if depth == 0 || m <= a || b <= m {
        log::trace!("Panel [{a}, {b}] hit the depth limit, residual {delta}");
        state.converged = false;
        state.error += delta.abs() / 15.0;
        return left + right + delta / 15.0;
    }

    simpson_step(
        f,
        a,
        fa,
        m,
        fm,
        left_mid,
        f_left_mid,
        left,
        tolerance / 2.0,
        depth - 1,
        state,
    ) + simpson_step(
        f,
        m,
        fm,
        b,
        fb,
        right_mid,
        f_right_mid,
        right,
        tolerance / 2.0,
        depth - 1,
        state,
    )
}

/// Integrate `f` over `[a, b]` with an adaptive Simpson rule.
///
/// `a == b` integrates to zero and `a > b` to the negated integral over `[b, a]`.
/// Failing to reach the tolerance is not an error: the best estimate is returned
/// with [`Quadrature::converged`] cleared.
///
/// # Example
/// ```
/// use voigtian::integrate::{adaptive_simpson, IntegrationConfig};
///
/// let q = adaptive_simpson(|x| x * x, 0.0, 3.0, IntegrationConfig::default());
/// assert!((q.value - 9.0).abs() < 1e-9);
/// assert!(q.converged);
/// ```
pub fn adaptive_simpson<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    config: IntegrationConfig,
) -> Quadrature {
    if a == b {
        return Quadrature {
            value: 0.0,
            error: 0.0,
            converged: true,
            evaluations: 0,
        };
    }
    if a > b {
        let mut q = adaptive_simpson(f, b, a, config);
        q.value = -q.value;
        return q;
    }

    let panels = config.initial_intervals.max(1);
    let step = (b - a) / panels as f64;
    let panel_tolerance = config.tolerance / panels as f64;

    let mut state = SimpsonState {
        error: 0.0,
        converged: true,
        evaluations: 0,
    };

    let mut value = 0.0;
    let mut lo = a;
    let mut f_lo = f(lo);
    state.evaluations += 1;
    for i in 0..panels {
        let hi = if i + 1 == panels {
            b
        } else {
            a + (i + 1) as f64 * step
        };
        let mid = 0.5 * (lo + hi);
        let f_hi = f(hi);
        let f_mid = f(mid);
        state.evaluations += 2;
        let whole = (hi - lo) / 6.0 * (f_lo + 4.0 * f_mid + f_hi);
        value += simpson_step(
            &f,
            lo,
            f_lo,
            hi,
            f_hi,
            mid,
            f_mid,
            whole,
            panel_tolerance,
            config.max_depth,
            &mut state,
        );
        lo = hi;
        f_lo = f_hi;
    }

    if !state.converged {
        log::debug!(
            "Quadrature over [{a}, {b}] did not converge: value {value}, error estimate {}",
            state.error
        );
    }

    Quadrature {
        value,
        error: state.error,
        converged: state.converged,
        evaluations: state.evaluations,
    }
}

/// Integrate `f` over `[a, b]`, cutting the interval at every `breakpoints` entry
/// that falls strictly inside it.
///
/// Used for piecewise densities whose kink should sit on a panel edge.
pub fn adaptive_simpson_with_breaks<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    breakpoints: &[f64],
    config: IntegrationConfig,
) -> Quadrature {
    let (lo, hi, sign) = if a <= b { (a, b, 1.0) } else { (b, a, -1.0) };
    let mut total = Quadrature {
        value: 0.0,
        error: 0.0,
        converged: true,
        evaluations: 0,
    };
    let mut start = lo;
    let mut cuts = breakpoints
        .iter()
        .copied()
        .filter(|p| *p > lo && *p < hi);
    loop {
        let end = cuts.next().unwrap_or(hi);
        let part = adaptive_simpson(&f, start, end, config);
        total.value += part.value;
        total.error += part.error;
        total.converged &= part.converged;
        total.evaluations += part.evaluations;
        if end >= hi {
            break;
        }
        start = end;
    }
    total.value *= sign;
    total
}

#[cfg(test)]
mod test {
    use super::*;

    use std::f64::consts::PI;

    #[test]
    fn test_polynomial() {
        let q = adaptive_simpson(|x| x.powi(3) - x, -1.0, 2.0, IntegrationConfig::default());
        assert!((q.value - 2.25).abs() < 1e-10, "{q:?}");
        assert!(q.converged);
    }

    #[test]
    fn test_reversed_and_empty() {
        let config = IntegrationConfig::default();
        let forward = adaptive_simpson(|x| x.sin(), 0.0, PI, config);
        let backward = adaptive_simpson(|x| x.sin(), PI, 0.0, config);
        assert!((forward.value - 2.0).abs() < 1e-9);
        assert_eq!(forward.value, -backward.value);
        assert_eq!(adaptive_simpson(|x| x.sin(), 1.0, 1.0, config).value, 0.0);
    }

    #[test]
    fn test_narrow_peak() {
        // A Lorentzian of half width 1e-3 inside a wide interval
        let gamma = 1e-3;
        let f = |x: f64| gamma / (PI * (x * x + gamma * gamma));
        let q = adaptive_simpson_with_breaks(f, -50.0, 50.0, &[0.0], IntegrationConfig::default());
        let expected = 2.0 * (50.0_f64 / gamma).atan() / PI;
        assert!((q.value - expected).abs() < 1e-8, "{q:?} vs {expected}");
    }

    #[test_log::test]
    fn test_depth_limit() {
        let q = adaptive_simpson(
            |x| if x < 0.3 { 0.0 } else { 1.0 },
            0.0,
            1.0,
            IntegrationConfig::default()
                .tolerance(1e-300)
                .max_depth(4)
                .initial_intervals(1),
        );
        assert!(!q.converged);
        assert!((q.value - 0.7).abs() < 0.1, "{q:?}");
    }
}
