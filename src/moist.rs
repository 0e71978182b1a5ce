//! Moist-process models built on the solvers.
//!
//! - [`moist_lapse`] integrates temperature along a saturated (pseudo-)adiabat
//!   with [`rk2`].
//! - [`lcl_pressure`] / [`lcl`] solve for the lifted condensation level with
//!   [`fixed_point`].
//! - [`wet_bulb_temperature`] chains both: solve the LCL, then descend the
//!   moist adiabat back to the starting pressure.
//!
//! Solver parameters are always explicit here. See
//! [`SolverConfig`](crate::SolverConfig) for defaulted, `Result`-returning
//! wrappers.

use crate::algo::constants::{CPD, EPSILON, KAPPA, LV, RD};
use crate::algo::fixed_point::fixed_point;
use crate::algo::rk2::rk2;
use crate::machine::ThermoFloat;
use crate::thermo::{
    dewpoint_from_mixing_ratio, mixing_ratio, saturation_mixing_ratio, saturation_vapor_pressure,
};

/// Moist adiabatic lapse rate `dT/dp` (K/Pa) of a saturated parcel.
///
/// ```text
/// dT/dp = (Rd·T + Lv·rs) / (Cpd + Lv²·rs·ε / (Rd·T²)) / p
/// ```
///
/// with `rs` the saturation mixing ratio at `(p, T)`.
#[inline]
pub fn moist_lapse_rate<T: ThermoFloat>(pressure: T, temperature: T) -> T {
    let rd = T::from_f64(RD);
    let lv = T::from_f64(LV);
    let r = saturation_mixing_ratio(pressure, temperature);
    let latent = lv * lv * r * T::from_f64(EPSILON) / (rd * temperature * temperature);
    (rd * temperature + lv * r) / (T::from_f64(CPD) + latent) / pressure
}

/// Temperature at `next_pressure` of a saturated parcel that has
/// `temperature` at `pressure`, following the moist adiabat.
///
/// `step` bounds the RK2 sub-step size in Pa.
#[inline]
pub fn moist_lapse<T: ThermoFloat>(pressure: T, next_pressure: T, temperature: T, step: T) -> T {
    rk2(moist_lapse_rate, pressure, next_pressure, temperature, step)
}

/// One step of the LCL fixed-point map.
///
/// Takes the dewpoint `td` of mixing ratio `mixing_ratio` at the current
/// estimate `pressure`, then returns the pressure at which dry-adiabatic
/// ascent from `(reference_pressure, temperature)` cools the parcel to `td`:
///
/// ```text
/// p' = p_ref · (td / T)^(Cpd/Rd)
/// ```
///
/// If `p'` is NaN the current estimate is returned unchanged, so a single bad
/// evaluation cannot poison the iterate sequence.
#[inline]
pub fn lcl_iterate<T: ThermoFloat>(
    pressure: T,
    reference_pressure: T,
    temperature: T,
    mixing_ratio: T,
) -> T {
    let td = dewpoint_from_mixing_ratio(pressure, mixing_ratio);
    let p = reference_pressure * (td / temperature).powf(T::from_f64(1.0 / KAPPA));
    if p.is_nan() {
        pressure
    } else {
        p
    }
}

/// Pressure of the lifted condensation level (Pa).
///
/// The parcel's mixing ratio is taken from its dewpoint and held constant
/// while [`lcl_iterate`] is driven to a fixed point from the starting
/// `pressure`. Returns NaN if the solver does not converge within
/// `max_iters`.
pub fn lcl_pressure<T: ThermoFloat>(
    pressure: T,
    temperature: T,
    dewpoint: T,
    eps: T,
    max_iters: usize,
) -> T {
    let r = mixing_ratio(saturation_vapor_pressure(dewpoint), pressure);
    solve_lcl(pressure, temperature, r, eps, max_iters)
}

/// Lifted condensation level as `(pressure, temperature)`.
///
/// The LCL temperature is the dewpoint of the conserved mixing ratio at the
/// LCL pressure. Both values are NaN when the solver does not converge.
pub fn lcl<T: ThermoFloat>(
    pressure: T,
    temperature: T,
    dewpoint: T,
    eps: T,
    max_iters: usize,
) -> (T, T) {
    let r = mixing_ratio(saturation_vapor_pressure(dewpoint), pressure);
    let lcl_p = solve_lcl(pressure, temperature, r, eps, max_iters);
    let lcl_t = dewpoint_from_mixing_ratio(lcl_p, r);
    (lcl_p, lcl_t)
}

/// Wet-bulb temperature (K).
///
/// Lifts the parcel to its LCL, then brings it back down to `pressure` along
/// the moist adiabat through the LCL. NaN if the LCL solve does not converge.
///
/// The result lies in `[dewpoint, temperature]` while the saturation vapor
/// pressure stays below half of `pressure`. Beyond that, near saturation, it
/// can fall up to about 0.01 K below the dewpoint for any `step`.
pub fn wet_bulb_temperature<T: ThermoFloat>(
    pressure: T,
    temperature: T,
    dewpoint: T,
    eps: T,
    step: T,
    max_iters: usize,
) -> T {
    let (lcl_p, lcl_t) = lcl(pressure, temperature, dewpoint, eps, max_iters);
    moist_lapse(lcl_p, pressure, lcl_t, step)
}

#[inline]
fn solve_lcl<T: ThermoFloat>(
    pressure: T,
    temperature: T,
    mixing_ratio: T,
    eps: T,
    max_iters: usize,
) -> T {
    fixed_point(
        |p| lcl_iterate(p, pressure, temperature, mixing_ratio),
        pressure,
        eps,
        max_iters,
    )
}
