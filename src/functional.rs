//! Small numeric helpers for working on one sounding.
//!
//! Sounding coordinates are usually pressure, which decreases with height, so
//! the search helpers take the comparison as a predicate instead of assuming
//! ascending order.

use crate::machine::ThermoFloat;
use crate::types::Direction;

/// Heaviside step: 0 for `x < 0`, `h0` at `x == 0`, 1 for `x > 0`, NaN for NaN.
#[inline]
pub fn heaviside<T: ThermoFloat>(x: T, h0: T) -> T {
    if x.is_nan() {
        T::nan()
    } else if x == T::zero() {
        h0
    } else if x < T::zero() {
        T::zero()
    } else {
        T::one()
    }
}

/// Whether `x` is (non-strictly) monotonic in the given direction.
///
/// Empty and single-element slices are monotonic in both directions.
// Negated comparisons: a NaN pair never breaks monotonicity.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn is_monotonic<T: ThermoFloat>(x: &[T], direction: Direction) -> bool {
    match direction {
        Direction::Increasing => x.windows(2).all(|w| !(w[1] < w[0])),
        Direction::Decreasing => x.windows(2).all(|w| !(w[1] > w[0])),
    }
}

/// Position of `x` within `[x0, x1]`, 0 at `x0` and 1 at `x1`.
#[inline]
pub fn normalize<T: ThermoFloat>(x: T, x0: T, x1: T) -> T {
    (x - x0) / (x1 - x0)
}

/// Linear interpolation of `y` at `x` through `(x0, y0)` and `(x1, y1)`.
#[inline]
pub fn linear_interpolate<T: ThermoFloat>(x: T, x0: T, x1: T, y0: T, y1: T) -> T {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Fixed-trip bisection: number of leading elements of `array` for which
/// `pred(element)` holds, capped at `len - 1`.
///
/// `array` must be partitioned by `pred` (all `true` before all `false`).
/// Returns 0 for an empty slice.
pub fn lower_bound<T, P>(array: &[T], pred: P) -> usize
where
    T: Copy,
    P: Fn(T) -> bool,
{
    let mut len = array.len();
    let mut idx = 0;
    while len > 1 {
        let half = len / 2;
        if pred(array[idx + half - 1]) {
            idx += half;
        }
        len -= half;
    }
    idx
}

/// Complement of [`lower_bound`]: counts leading elements for which
/// `pred(element)` is false, capped at `len - 1`.
pub fn upper_bound<T, P>(array: &[T], pred: P) -> usize
where
    T: Copy,
    P: Fn(T) -> bool,
{
    lower_bound(array, |v| !pred(v))
}

/// Insertion index of `value` in a sorted slice.
///
/// For ascending `x` this is the number of elements strictly below `value`;
/// with `inverted` (descending `x`, e.g. pressure) it is the number of
/// elements at or above `value`. Both are capped at `len - 1`.
pub fn search_sorted<T: ThermoFloat>(x: &[T], value: T, inverted: bool) -> usize {
    if inverted {
        lower_bound(x, |v| v >= value)
    } else {
        upper_bound(x, |v| value <= v)
    }
}

/// Interpolate `fp` at `x` on a descending coordinate `xp`.
///
/// Returns `fp[0]` when `x` lies at or above `xp[0]`, otherwise interpolates
/// linearly between the bracketing levels; beyond the last level the final
/// segment is extrapolated. NaN if the slices are empty or differ in length.
pub fn interpolate_z<T: ThermoFloat>(x: T, xp: &[T], fp: &[T]) -> T {
    if xp.is_empty() || xp.len() != fp.len() {
        return T::nan();
    }
    let i = lower_bound(xp, |v| v >= x);
    if i == 0 {
        return fp[0];
    }
    linear_interpolate(x, xp[i - 1], xp[i], fp[i - 1], fp[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heaviside_values() {
        assert_eq!(heaviside(-2.0_f64, 0.5), 0.0);
        assert_eq!(heaviside(0.0_f64, 0.5), 0.5);
        assert_eq!(heaviside(3.0_f64, 0.5), 1.0);
        assert!(heaviside(f64::NAN, 0.5).is_nan());
    }

    #[test]
    fn monotonic_checks() {
        let p = [100000.0_f64, 92500.0, 85000.0, 85000.0, 70000.0];
        assert!(is_monotonic(&p, Direction::Decreasing));
        assert!(!is_monotonic(&p, Direction::Increasing));
        assert!(is_monotonic::<f64>(&[], Direction::Increasing));
        assert!(is_monotonic(&[1.0_f32], Direction::Decreasing));
    }

    #[test]
    fn normalize_and_interpolate() {
        assert_eq!(normalize(5.0_f64, 0.0, 10.0), 0.5);
        assert_eq!(linear_interpolate(5.0_f64, 0.0, 10.0, 100.0, 200.0), 150.0);
    }

    #[test]
    fn lower_bound_counts_leading_matches() {
        let x = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(lower_bound(&x, |v| v < 3.5), 3);
        assert_eq!(lower_bound(&x, |v| v < 0.0), 0);
        // capped at len - 1
        assert_eq!(lower_bound(&x, |v| v < 10.0), 4);
        assert_eq!(lower_bound::<f64, _>(&[], |_| true), 0);
    }

    #[test]
    fn search_sorted_both_orders() {
        let ascending = [1.0_f64, 2.0, 3.0, 4.0];
        assert_eq!(search_sorted(&ascending, 2.5, false), 2);
        assert_eq!(search_sorted(&ascending, 2.0, false), 1);
        let pressure = [100000.0_f64, 90000.0, 80000.0, 70000.0];
        assert_eq!(search_sorted(&pressure, 85000.0, true), 2);
        assert_eq!(search_sorted(&pressure, 90000.0, true), 2);
    }

    #[test]
    fn interpolate_z_on_pressure() {
        let p = [100000.0_f64, 90000.0, 80000.0];
        let t = [300.0_f64, 290.0, 280.0];
        assert_eq!(interpolate_z(95000.0, &p, &t), 295.0);
        assert_eq!(interpolate_z(101000.0, &p, &t), 300.0);
        assert_eq!(interpolate_z(80000.0, &p, &t), 280.0);
    }

    #[test]
    fn interpolate_z_bad_slices_give_nan() {
        assert!(interpolate_z::<f64>(95000.0, &[], &[]).is_nan());
        let p = [100000.0_f64, 90000.0, 80000.0];
        assert!(interpolate_z(85000.0, &p, &[300.0, 290.0]).is_nan());
        assert!(interpolate_z(85000.0, &p[..2], &[300.0, 290.0, 280.0]).is_nan());
    }
}
