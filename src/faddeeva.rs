//! The Faddeeva function $`w(z) = e^{-z^2}\operatorname{erfc}(-iz)`$.
//!
//! Every Voigt profile evaluation reduces to the real part of $`w(z)`$ at a point
//! in the upper half plane, so this is the hot loop of the whole crate. The evaluation
//! follows the classic Poppe & Wijers scheme: a truncated power series close to the
//! origin and a continued fraction (optionally combined with a Laplace-type series)
//! everywhere else. Relative accuracy is close to 14 significant digits.
//!
//! Nothing here allocates.
use std::f64::consts::FRAC_2_SQRT_PI;

use num_complex::Complex64;

/// Inputs beyond this magnitude would overflow intermediate squares.
const MAX_MAGNITUDE: f64 = 0.5e154;

/// Compute the Faddeeva function $`w(z)`$ for any complex `z`.
///
/// In the lower half plane the reflection $`w(z) = 2e^{-z^2} - w(-z)`$ is used,
/// which grows like $`e^{y^2 - x^2}`$ and may overflow to infinity. The upper half
/// plane, the only one a Voigt profile touches, never overflows.
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use voigtian::faddeeva::faddeeva;
///
/// let w = faddeeva(Complex64::new(0.0, 0.0));
/// assert_eq!(w.re, 1.0);
/// assert_eq!(w.im, 0.0);
/// ```
pub fn faddeeva(z: Complex64) -> Complex64 {
    let xi = z.re;
    let yi = z.im;
    if xi.is_nan() || yi.is_nan() {
        return Complex64::new(f64::NAN, f64::NAN);
    }

    let x_abs = xi.abs();
    let y_abs = yi.abs();

    if x_abs > MAX_MAGNITUDE || y_abs > MAX_MAGNITUDE {
        // Far from the origin w(z) ~ i / (sqrt(pi) z), which underflows to zero
        // in the upper half plane.
        if yi >= 0.0 {
            return Complex64::new(0.0, 0.0);
        }
        return Complex64::new(f64::INFINITY, f64::INFINITY);
    }

    let x = x_abs / 6.3;
    let y = y_abs / 4.4;

    let mut qrho = x * x + y * y;
    let x_quad = x_abs * x_abs - y_abs * y_abs;
    let y_quad = 2.0 * x_abs * y_abs;

    let near_origin = qrho < 0.085264;

    let mut u;
    let mut v;
    // exp(-z^2) for |z| in the first quadrant, reused by the reflection below
    let mut u2 = 0.0;
    let mut v2 = 0.0;

    if near_origin {
        // Power series of erf(z) about the origin
        qrho = (1.0 - 0.85 * y) * qrho.sqrt();
        let n = (6.0 + 72.0 * qrho).round() as usize;
        let mut j = 2 * n + 1;
        let mut x_sum = 1.0 / j as f64;
        let mut y_sum = 0.0;
        for i in (1..=n).rev() {
            j -= 2;
            let i = i as f64;
            let x_aux = (x_sum * x_quad - y_sum * y_quad) / i;
            y_sum = (x_sum * y_quad + y_sum * x_quad) / i;
            x_sum = x_aux + 1.0 / j as f64;
        }

        let u1 = -FRAC_2_SQRT_PI * (x_sum * y_abs + y_sum * x_abs) + 1.0;
        let v1 = FRAC_2_SQRT_PI * (x_sum * x_abs - y_sum * y_abs);

        let d_aux = (-x_quad).exp();
        u2 = d_aux * y_quad.cos();
        v2 = -d_aux * y_quad.sin();

        u = u1 * u2 - v1 * v2;
        v = u1 * v2 + v1 * u2;
    } else {
        let h;
        let h2;
        let kapn;
        let nu;
        if qrho > 1.0 {
            // Pure continued fraction
            h = 0.0;
            h2 = 0.0;
            kapn = 0;
            qrho = qrho.sqrt();
            nu = (3.0 + 1442.0 / (26.0 * qrho + 77.0)) as usize;
        } else {
            // Continued fraction combined with a truncated Taylor series
            qrho = (1.0 - y) * (1.0 - qrho).sqrt();
            h = 1.88 * qrho;
            h2 = 2.0 * h;
            kapn = (7.0 + 34.0 * qrho).round() as usize;
            nu = (16.0 + 26.0 * qrho).round() as usize;
        }

        let mut q_lambda = if h > 0.0 { h2.powi(kapn as i32) } else { 0.0 };

        let mut rx = 0.0;
        let mut ry = 0.0;
        let mut sx = 0.0;
        let mut sy = 0.0;

        for n in (0..=nu).rev() {
            let np1 = (n + 1) as f64;
            let tx = y_abs + h + np1 * rx;
            let ty = x_abs - np1 * ry;
            let c = 0.5 / (tx * tx + ty * ty);
            rx = c * tx;
            ry = c * ty;
            if h > 0.0 && n <= kapn {
                let tx = q_lambda + sx;
                sx = rx * tx - ry * sy;
                sy = ry * tx + rx * sy;
                q_lambda /= h2;
            }
        }

        if h == 0.0 {
            u = FRAC_2_SQRT_PI * rx;
            v = FRAC_2_SQRT_PI * ry;
        } else {
            u = FRAC_2_SQRT_PI * sx;
            v = FRAC_2_SQRT_PI * sy;
        }

        if y_abs == 0.0 {
            u = (-x_abs * x_abs).exp();
        }
    }

    if yi < 0.0 {
        if near_origin {
            u2 *= 2.0;
            v2 *= 2.0;
        } else {
            let w1 = 2.0 * (-x_quad).exp();
            u2 = w1 * y_quad.cos();
            v2 = -w1 * y_quad.sin();
        }
        u = u2 - u;
        v = v2 - v;
        if xi > 0.0 {
            v = -v;
        }
    } else if xi < 0.0 {
        v = -v;
    }

    Complex64::new(u, v)
}

/// The real part of $`w(x + iy)`$ for $`y \ge 0`$, the Voigt function $`K(x, y)`$.
#[inline]
pub fn voigt_kernel(x: f64, y: f64) -> f64 {
    faddeeva(Complex64::new(x, y)).re
}
