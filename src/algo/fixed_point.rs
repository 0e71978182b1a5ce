//! Fixed-point iteration with Steffensen (Aitken Δ²) acceleration.

use tracing::{debug, trace};

use crate::machine::ThermoFloat;

/// Find `p` such that `f(p) ≈ p`, starting from `x0`.
///
/// Each iteration takes two plain steps `p1 = f(p0)`, `p2 = f(p1)` and, when
/// the second difference `p2 - 2·p1 + p0` is nonzero, replaces `p2` with the
/// Aitken extrapolation `p0 - (p1 - p0)² / (p2 - 2·p1 + p0)`. Acceleration is
/// applied on every iteration, including the first.
///
/// Convergence is tested on the accelerated value only: relative error
/// `|(p2 - p0) / p0|`, or the absolute value `|p2|` when `p0` is exactly zero.
/// The first iterate whose error is below `eps` is returned.
///
/// Returns NaN if `max_iters` iterations pass without convergence. A
/// `max_iters` of zero therefore always yields NaN.
///
/// Any extra arguments of the map are captured by the closure.
///
/// # Example
///
/// ```
/// use parcel_thermo::algo::fixed_point::fixed_point;
///
/// let p = fixed_point(|p: f64| p.cos(), 1.0, 1e-10, 50);
/// assert!((p - p.cos()).abs() < 1e-9);
/// ```
pub fn fixed_point<T, F>(mut f: F, x0: T, eps: T, max_iters: usize) -> T
where
    T: ThermoFloat,
    F: FnMut(T) -> T,
{
    let zero = T::zero();
    let two = T::from_f64(2.0);

    let mut p0 = x0;
    for i in 0..max_iters {
        let p1 = f(p0);
        let mut p2 = f(p1);

        let delta = p2 - two * p1 + p0;
        if delta != zero {
            let d = p1 - p0;
            p2 = p0 - d * d / delta;
        }

        let err = if p0 == zero {
            p2.abs()
        } else {
            ((p2 - p0) / p0).abs()
        };

        if err < eps {
            trace!(iterations = i + 1, "fixed point converged");
            return p2;
        }

        p0 = p2;
    }

    debug!(max_iters, "fixed point did not converge");
    T::nan()
}
