//! Fixed-step explicit midpoint (second-order Runge-Kutta) integrator.

use tracing::trace;

use crate::machine::ThermoFloat;

/// Integrate the scalar ODE `dy/dx = f(x, y)` from `x0` to `x1`.
///
/// The span `x1 - x0` is split into `N = ceil(|x1 - x0| / step)` equal
/// sub-steps when it exceeds `step`, otherwise it is taken in one step.
/// Each sub-step of size `h` applies the midpoint rule:
///
/// ```text
/// k1 = h * f(x, y)
/// y  = y + h * f(x + h/2, y + k1/2)
/// x  = x + h
/// ```
///
/// Integration runs in either direction; a decreasing span yields negative
/// sub-steps. NaN produced by `f` propagates into the result. If the
/// sub-step count cannot be represented (a negative `step`, a zero `step`
/// with a nonzero span, or an infinite span) the result is NaN.
///
/// # Example
///
/// ```
/// use parcel_thermo::algo::rk2::rk2;
///
/// // dy/dx = 2x, y(0) = 0 → y(3) = 9; the midpoint rule is exact for linear f.
/// let y = rk2(|x: f64, _y| 2.0 * x, 0.0, 3.0, 0.0, 0.5);
/// assert!((y - 9.0).abs() < 1e-12);
/// ```
#[inline]
pub fn rk2<T, F>(f: F, x0: T, x1: T, y: T, step: T) -> T
where
    T: ThermoFloat,
    F: Fn(T, T) -> T,
{
    let half = T::from_f64(0.5);

    let mut delta = x1 - x0;
    let abs_delta = delta.abs();
    let mut n = 1usize;
    if abs_delta > step {
        n = match (abs_delta / step).ceil().to_usize() {
            Some(n) if n > 0 => n,
            _ => return T::nan(),
        };
        delta = delta / T::from_f64(n as f64);
    }
    trace!(steps = n, "rk2");

    let mut x = x0;
    let mut y = y;
    for _ in 0..n {
        let k1 = delta * f(x, y);
        y = y + delta * f(x + delta * half, y + k1 * half);
        x = x + delta;
    }
    y
}
