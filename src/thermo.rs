//! Closed-form thermodynamic relations.
//!
//! Temperatures are in Kelvin, pressures in Pascal, mixing ratios in kg/kg.
//! None of these functions checks its domain: invalid inputs (non-positive
//! vapor pressure, `p == e`, …) propagate IEEE NaN or ±∞.

// Empirical fit coefficients are transcribed verbatim.
#![allow(clippy::excessive_precision)]

use crate::algo::constants::{E0, EPSILON, KAPPA, P0, SVP_A, SVP_B, SVP_C, T0, THETA_W_MIN};
use crate::machine::ThermoFloat;

/// Saturation vapor pressure over liquid water (Bolton 1980).
///
/// `es(T) = E0 · exp(17.67 · (T - T0) / (T - 29.65))`
#[inline]
pub fn saturation_vapor_pressure<T: ThermoFloat>(temperature: T) -> T {
    let e0 = T::from_f64(E0);
    let t0 = T::from_f64(T0);
    e0 * (T::from_f64(SVP_A) * (temperature - t0) / (temperature - T::from_f64(SVP_B))).exp()
}

/// Mixing ratio from a partial (vapor) pressure and the total pressure.
///
/// `r = ε · e / (p - e)`; diverges as `p → e`.
#[inline]
pub fn mixing_ratio<T: ThermoFloat>(partial_pressure: T, total_pressure: T) -> T {
    T::from_f64(EPSILON) * partial_pressure / (total_pressure - partial_pressure)
}

/// Mixing ratio of a parcel with the given dewpoint.
#[inline]
pub fn mixing_ratio_from_dewpoint<T: ThermoFloat>(pressure: T, dewpoint: T) -> T {
    mixing_ratio(saturation_vapor_pressure(dewpoint), pressure)
}

/// Saturation mixing ratio at `(pressure, temperature)`.
#[inline]
pub fn saturation_mixing_ratio<T: ThermoFloat>(pressure: T, temperature: T) -> T {
    mixing_ratio(saturation_vapor_pressure(temperature), pressure)
}

/// Vapor pressure from total pressure and mixing ratio; inverse of
/// [`mixing_ratio`] in its first argument.
///
/// `e = p · r / (ε + r)`
#[inline]
pub fn vapor_pressure<T: ThermoFloat>(pressure: T, mixing_ratio: T) -> T {
    pressure * mixing_ratio / (T::from_f64(EPSILON) + mixing_ratio)
}

/// Virtual temperature.
///
/// `Tv = T · (r + ε) / (ε · (1 + r))`
#[inline]
pub fn virtual_temperature<T: ThermoFloat>(temperature: T, mixing_ratio: T) -> T {
    let eps = T::from_f64(EPSILON);
    temperature * ((mixing_ratio + eps) / (eps * (T::one() + mixing_ratio)))
}

/// Dewpoint from vapor pressure; inverse of [`saturation_vapor_pressure`].
///
/// `Td = T0 + 243.5 · ln(e/E0) / (17.67 - ln(e/E0))`
#[inline]
pub fn dewpoint<T: ThermoFloat>(vapor_pressure: T) -> T {
    let ln = (vapor_pressure / T::from_f64(E0)).ln();
    T::from_f64(T0) + T::from_f64(SVP_C) * ln / (T::from_f64(SVP_A) - ln)
}

/// Dewpoint from total pressure and mixing ratio.
#[inline]
pub fn dewpoint_from_mixing_ratio<T: ThermoFloat>(pressure: T, mixing_ratio: T) -> T {
    dewpoint(vapor_pressure(pressure, mixing_ratio))
}

/// Exner function relative to the standard reference pressure `P0`.
#[inline]
pub fn exner_function<T: ThermoFloat>(pressure: T) -> T {
    exner_function_with_reference(pressure, T::from_f64(P0))
}

/// Exner function `(p / p_ref)^(Rd/Cpd)`.
#[inline]
pub fn exner_function_with_reference<T: ThermoFloat>(pressure: T, reference_pressure: T) -> T {
    (pressure / reference_pressure).powf(T::from_f64(KAPPA))
}

/// Potential temperature θ = T / Π(p).
#[inline]
pub fn potential_temperature<T: ThermoFloat>(pressure: T, temperature: T) -> T {
    temperature / exner_function(pressure)
}

/// Temperature of a parcel lifted dry-adiabatically from `reference_pressure`
/// (where it has `temperature`) to `pressure`.
#[inline]
pub fn dry_lapse<T: ThermoFloat>(pressure: T, reference_pressure: T, temperature: T) -> T {
    temperature * exner_function_with_reference(pressure, reference_pressure)
}

/// Equivalent potential temperature θe (Bolton 1980, eq. 39).
///
/// Uses the saturation mixing ratio at the dewpoint, the LCL temperature
/// approximation `T_L = 56 + 1 / (1/(Td - 56) + ln(T/Td)/800)` and the dry
/// potential temperature evaluated at the dry-air partial pressure `p - e`.
pub fn equivalent_potential_temperature<T: ThermoFloat>(
    pressure: T,
    temperature: T,
    dewpoint: T,
) -> T {
    let one = T::one();
    let c56 = T::from_f64(56.0);

    let r = saturation_mixing_ratio(pressure, dewpoint);
    let e = saturation_vapor_pressure(dewpoint);
    let t_l = c56
        + one / (one / (dewpoint - c56) + (temperature / dewpoint).ln() / T::from_f64(800.0));
    let th_l = potential_temperature(pressure - e, temperature)
        * (temperature / t_l).powf(T::from_f64(0.28) * r);
    let moist =
        r * (one + T::from_f64(0.448) * r) * (T::from_f64(3036.0) / t_l - T::from_f64(1.78));
    th_l * moist.exp()
}

/// Wet-bulb potential temperature θw from the parcel state.
///
/// See [`wet_bulb_potential_temperature_from_theta_e`].
#[inline]
pub fn wet_bulb_potential_temperature<T: ThermoFloat>(
    pressure: T,
    temperature: T,
    dewpoint: T,
) -> T {
    wet_bulb_potential_temperature_from_theta_e(equivalent_potential_temperature(
        pressure,
        temperature,
        dewpoint,
    ))
}

/// Wet-bulb potential temperature θw from θe (Davies-Jones 2008, eq. 3.8).
///
/// The rational fit is only valid above 173.15 K; at or below that bound θe
/// is returned unchanged.
pub fn wet_bulb_potential_temperature_from_theta_e<T: ThermoFloat>(theta_e: T) -> T {
    if theta_e <= T::from_f64(THETA_W_MIN) {
        return theta_e;
    }
    let c = T::from_f64;
    let x = theta_e / c(T0);
    let x2 = x * x;
    let x3 = x2 * x;
    let x4 = x2 * x2;
    let a = c(7.101574) - c(20.68208) * x + c(16.11182) * x2 + c(2.574631) * x3 - c(5.205688) * x4;
    let b = T::one() - c(3.552497) * x + c(3.781782) * x2 - c(0.6899655) * x3 - c(0.5929340) * x4;
    theta_e - (a / b).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn svp_at_freezing_point_is_e0() {
        assert_eq!(saturation_vapor_pressure(273.15_f64), 611.21);
    }

    #[test]
    fn svp_increases_with_temperature() {
        let mut prev = saturation_vapor_pressure(200.0_f64);
        for k in 1..=130 {
            let e = saturation_vapor_pressure(200.0 + k as f64);
            assert!(e > prev);
            prev = e;
        }
    }

    #[test]
    fn mixing_ratio_vapor_pressure_roundtrip() {
        let p = 85000.0_f64;
        for e in [10.0, 611.21, 2500.0, 7000.0] {
            let r = mixing_ratio(e, p);
            assert_relative_eq!(vapor_pressure(p, r), e, max_relative = 1e-12);
        }
    }

    #[test]
    fn mixing_ratio_at_total_pressure_is_infinite() {
        assert!(mixing_ratio(1000.0_f64, 1000.0).is_infinite());
    }

    #[test]
    fn dewpoint_inverts_svp() {
        for t in [230.0_f64, 273.15, 290.0, 310.0] {
            assert_relative_eq!(dewpoint(saturation_vapor_pressure(t)), t, max_relative = 1e-12);
        }
    }

    #[test]
    fn dewpoint_of_zero_vapor_pressure_is_not_finite() {
        assert!(!dewpoint(0.0_f64).is_finite());
        assert!(dewpoint(-1.0_f64).is_nan());
    }

    #[test]
    fn saturated_dewpoint_roundtrip() {
        let p = 100000.0_f64;
        let r = saturation_mixing_ratio(p, 290.0);
        assert_relative_eq!(dewpoint_from_mixing_ratio(p, r), 290.0, max_relative = 1e-10);
    }

    #[test]
    fn mixing_ratio_from_dewpoint_matches_saturation() {
        let r1 = mixing_ratio_from_dewpoint(90000.0_f64, 280.0);
        let r2 = saturation_mixing_ratio(90000.0_f64, 280.0);
        assert_eq!(r1, r2);
    }

    #[test]
    fn virtual_temperature_dry_air() {
        assert_eq!(virtual_temperature(300.0_f64, 0.0), 300.0);
        assert!(virtual_temperature(300.0_f64, 0.01) > 300.0);
    }

    #[test]
    fn exner_at_reference_is_one() {
        assert_eq!(exner_function(100000.0_f64), 1.0);
        assert_eq!(exner_function_with_reference(85000.0_f64, 85000.0), 1.0);
    }

    #[test]
    fn potential_temperature_known_value() {
        assert_relative_eq!(
            potential_temperature(85000.0_f64, 293.15),
            307.0831025391967,
            max_relative = 1e-12
        );
    }

    #[test]
    fn dry_lapse_matches_potential_temperature() {
        let theta = potential_temperature(70000.0_f64, 280.0);
        assert_relative_eq!(dry_lapse(100000.0, 70000.0, 280.0), theta, max_relative = 1e-12);
    }

    #[test]
    fn theta_e_and_theta_w_golden() {
        let te = equivalent_potential_temperature(100000.0_f64, 293.15, 283.15);
        assert_relative_eq!(te, 315.54462238954835, max_relative = 1e-12);
        let tw = wet_bulb_potential_temperature(100000.0_f64, 293.15, 283.15);
        assert_relative_eq!(tw, 287.2045191995416, max_relative = 1e-12);
    }

    #[test]
    fn theta_w_guard_returns_theta_e() {
        for te in [100.0_f64, 150.0, 173.15] {
            assert_eq!(wet_bulb_potential_temperature_from_theta_e(te), te);
        }
        assert!(wet_bulb_potential_temperature_from_theta_e(315.0_f64) < 315.0);
    }

    #[test]
    fn relations_f32() {
        let e = saturation_vapor_pressure(293.15_f32);
        assert!((dewpoint(e) - 293.15).abs() < 1e-3);
        let te = equivalent_potential_temperature(100000.0_f32, 293.15, 283.15);
        assert!((te - 315.544_62).abs() < 0.05);
    }
}
