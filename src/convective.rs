//! Convective diagnostics over one sounding.
//!
//! Soundings are parallel slices ordered from the surface upward (decreasing
//! pressure). A level where any input is NaN is skipped. Crossings between a
//! parcel and its environment are found by linear interpolation of their
//! difference in `ln p`, and energies are trapezoidal integrals over `ln p`.
//!
//! The surface parcel's LCL is always solved from the first level, with the
//! tolerances in [`SolverConfig`].

use tracing::trace;

#[cfg(feature = "alloc")]
use crate::profile::parcel_profile_with_lcl;

use crate::algo::constants::RD;
use crate::functional::{heaviside, normalize};
use crate::machine::ThermoFloat;
use crate::thermo::{
    dewpoint_from_mixing_ratio, dry_lapse, equivalent_potential_temperature,
    mixing_ratio_from_dewpoint, saturation_mixing_ratio, virtual_temperature,
};
use crate::types::{Direction, Error, Level, Parcel, Pick, SolverConfig};

/// Default depth (Pa) searched by [`most_unstable_parcel`].
pub const DEFAULT_MOST_UNSTABLE_DEPTH: f64 = 30000.0;

/// Default depth (Pa) averaged by [`mixed_layer`].
pub const DEFAULT_MIXED_LAYER_DEPTH: f64 = 10000.0;

/// Layer (Pa) searched for the downdraft source in [`downdraft_cape`].
const DOWNDRAFT_LAYER_BOTTOM: f64 = 70000.0;
const DOWNDRAFT_LAYER_TOP: f64 = 50000.0;

/// Pressure and temperature of the level where the parcel profile and the
/// environment cross, or `None`.
type Crossing<T> = Option<Level<T>>;

/// Equilibrium level: where a buoyant parcel becomes cooler than the
/// environment again.
///
/// `parcel` is the parcel temperature at each level, e.g. from
/// [`parcel_profile`](crate::profile::parcel_profile). Only crossings above
/// the LCL count, and there is no EL when the parcel is still warmer than the
/// environment at the top of the sounding.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the slices are empty or differ in length.
/// - [`Error::ConvergenceFailure`] if the LCL solve does not converge.
pub fn el<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    parcel: &[T],
    which: Pick,
    config: &SolverConfig<T>,
) -> Result<Crossing<T>, Error> {
    el_lfc(pressure, temperature, dewpoint, parcel, which, Pick::Bottom, config).map(|(el, _)| el)
}

/// Level of free convection: where the parcel first becomes warmer than the
/// environment above its LCL.
///
/// With no such crossing, the LFC is the LCL itself if the parcel is at least
/// as warm as the environment anywhere at or above the LCL.
///
/// # Errors
///
/// As for [`el`].
pub fn lfc<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    parcel: &[T],
    which: Pick,
    config: &SolverConfig<T>,
) -> Result<Crossing<T>, Error> {
    el_lfc(pressure, temperature, dewpoint, parcel, Pick::Top, which, config).map(|(_, lfc)| lfc)
}

/// [`el`] and [`lfc`] from one LCL solve, returned as `(el, lfc)`.
pub fn el_lfc<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    parcel: &[T],
    which_el: Pick,
    which_lfc: Pick,
    config: &SolverConfig<T>,
) -> Result<(Crossing<T>, Crossing<T>), Error> {
    check_lengths(pressure, &[temperature, dewpoint, parcel])?;
    let lcl = config.lcl(pressure[0], temperature[0], dewpoint[0])?;
    let aloft = levels(&pressure[1..], &parcel[1..], &temperature[1..]);
    Ok(find_el_lfc(aloft, lcl, which_el, which_lfc))
}

/// Convective available potential energy and convective inhibition (J/kg).
///
/// Both are computed from virtual temperatures. Below the LCL the parcel
/// keeps the surface mixing ratio; above it the parcel is saturated. The
/// environment uses the saturation mixing ratio at its dewpoint.
///
/// CAPE integrates the buoyancy between the LFC and the EL (the top of the
/// sounding if there is no EL) and is clamped at zero from below. CIN
/// integrates below the LFC and is clamped at zero from above. Without an LFC
/// both are zero.
///
/// # Errors
///
/// As for [`el`].
pub fn cape_cin<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    parcel: &[T],
    which_el: Pick,
    which_lfc: Pick,
    config: &SolverConfig<T>,
) -> Result<(T, T), Error> {
    check_lengths(pressure, &[temperature, dewpoint, parcel])?;
    let lcl = config.lcl(pressure[0], temperature[0], dewpoint[0])?;
    let surface_r = mixing_ratio_from_dewpoint(pressure[0], dewpoint[0]);

    let virtual_levels = pressure
        .iter()
        .zip(temperature)
        .zip(dewpoint)
        .zip(parcel)
        .map(move |(((&p, &t), &td), &tp)| {
            let r = if p > lcl.pressure {
                surface_r
            } else {
                saturation_mixing_ratio(p, tp)
            };
            let env = virtual_temperature(t, saturation_mixing_ratio(p, td));
            (p, virtual_temperature(tp, r), env)
        });

    let aloft = virtual_levels.clone().skip(1).filter(is_valid);
    let (el, lfc) = find_el_lfc(aloft, lcl, which_el, which_lfc);
    let Some(lfc) = lfc else {
        trace!("no LFC, CAPE and CIN are zero");
        return Ok((T::zero(), T::zero()));
    };
    let el_pressure = match el {
        Some(el) => el.pressure,
        None => virtual_levels
            .clone()
            .filter(is_valid)
            .last()
            .map_or(lfc.pressure, |(p, _, _)| p),
    };

    let half = T::from_f64(0.5);
    let in_cape = |p: T| le_close(p, lfc.pressure) && ge_close(p, el_pressure);
    let below_lfc = |p: T| ge_close(p, lfc.pressure);

    let mut cape = T::zero();
    let mut cin = T::zero();
    let mut lower: Option<(T, T)> = None;
    for (p, b) in buoyancy_points(virtual_levels.filter(is_valid)) {
        if let Some((pl, bl)) = lower {
            let area = (pl.ln() - p.ln()) * (bl + b) * half;
            if in_cape(pl) && in_cape(p) {
                cape = cape + area;
            }
            if below_lfc(pl) && below_lfc(p) {
                cin = cin + area;
            }
        }
        lower = Some((p, b));
    }

    let rd = T::from_f64(RD);
    Ok(((rd * cape).max(T::zero()), (rd * cin).min(T::zero())))
}

/// [`cape_cin`] of the [`most_unstable_parcel`] within `depth` of the surface.
///
/// The sounding is cut at the most unstable level and its parcel is lifted
/// with [`parcel_profile_with_lcl`].
#[cfg(feature = "alloc")]
pub fn most_unstable_cape_cin<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    depth: T,
    config: &SolverConfig<T>,
) -> Result<(T, T), Error> {
    let (i, _) = most_unstable_parcel(pressure, temperature, dewpoint, depth)?;
    let prof =
        parcel_profile_with_lcl(&pressure[i..], &temperature[i..], &dewpoint[i..], config)?;
    cape_cin(
        &prof.pressure,
        &prof.temperature,
        &prof.dewpoint,
        &prof.parcel,
        Pick::Top,
        Pick::Bottom,
        config,
    )
}

/// Downdraft CAPE (J/kg).
///
/// The downdraft starts at the level of minimum θe between 700 and 500 hPa.
/// It is lowered from that level's wet-bulb temperature to the surface along
/// the moist adiabat, and its negative buoyancy (in virtual temperature) is
/// integrated over `ln p`. The result is positive when the descending parcel
/// is colder than the environment.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the slices are empty, differ in length, or
///   have no valid level between 700 and 500 hPa.
/// - [`Error::ConvergenceFailure`] if the wet-bulb LCL solve does not
///   converge.
pub fn downdraft_cape<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    config: &SolverConfig<T>,
) -> Result<T, Error> {
    check_lengths(pressure, &[temperature, dewpoint])?;
    let k = theta_e_extreme(
        pressure,
        temperature,
        dewpoint,
        T::from_f64(DOWNDRAFT_LAYER_BOTTOM),
        T::from_f64(DOWNDRAFT_LAYER_TOP),
        |candidate, best| candidate < best,
    )
    .ok_or(Error::InvalidInput)?;

    let p_top = pressure[k];
    let wet_bulb = config.wet_bulb_temperature(p_top, temperature[k], dewpoint[k])?;
    trace!(?p_top, ?wet_bulb, "downdraft source");

    let half = T::from_f64(0.5);
    let mut p_prev = p_top;
    let mut t_prev = wet_bulb;
    let mut upper: Option<(T, T)> = None;
    let mut total = T::zero();
    let descent = pressure.iter().zip(temperature).zip(dewpoint).rev();
    for ((&p, &t), &td) in descent {
        if !is_valid(&(p, t, td)) || !ge_close(p, p_top) {
            continue;
        }
        t_prev = config.moist_lapse(p_prev, p, t_prev);
        p_prev = p;

        let parcel_vt = virtual_temperature(t_prev, saturation_mixing_ratio(p, t_prev));
        let env_vt = virtual_temperature(t, saturation_mixing_ratio(p, td));
        let b = parcel_vt - env_vt;
        let x = p.ln();
        if let Some((xu, bu)) = upper {
            total = total + (xu - x) * (b + bu) * half;
        }
        upper = Some((x, b));
    }
    Ok(T::from_f64(RD) * total)
}

/// The level of maximum θe within `depth` Pa above the surface.
///
/// Returns its index and state. Ties go to the lowest level.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the slices are empty or differ in length, if
/// `depth` is not finite and positive, or if no level in the layer is valid.
pub fn most_unstable_parcel<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    depth: T,
) -> Result<(usize, Parcel<T>), Error> {
    check_lengths(pressure, &[temperature, dewpoint])?;
    check_depth(depth)?;
    let bottom = pressure[0];
    let i = theta_e_extreme(
        pressure,
        temperature,
        dewpoint,
        bottom,
        bottom - depth,
        |candidate, best| candidate > best,
    )
    .ok_or(Error::InvalidInput)?;
    Ok((
        i,
        Parcel {
            pressure: pressure[i],
            temperature: temperature[i],
            dewpoint: dewpoint[i],
        },
    ))
}

/// Pressure-weighted mean temperature and dewpoint of the lowest `depth` Pa.
///
/// Only sounding levels inside the layer are used; the layer edges are not
/// interpolated.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the slices are empty or differ in length, if
/// `depth` is not finite and positive, or if fewer than two distinct levels
/// lie in the layer.
pub fn mixed_layer<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    depth: T,
) -> Result<(T, T), Error> {
    check_lengths(pressure, &[temperature, dewpoint])?;
    check_depth(depth)?;
    let bottom = pressure[0];
    let top = bottom - depth;

    let mut layer =
        levels(pressure, temperature, dewpoint).filter(|&(p, _, _)| p <= bottom && p >= top);
    let Some(mut lower) = layer.next() else {
        return Err(Error::InvalidInput);
    };

    let half = T::from_f64(0.5);
    let (mut p_max, mut p_min) = (lower.0, lower.0);
    let (mut t_sum, mut td_sum) = (T::zero(), T::zero());
    for upper in layer {
        let dp = lower.0 - upper.0;
        t_sum = t_sum + dp * (lower.1 + upper.1) * half;
        td_sum = td_sum + dp * (lower.2 + upper.2) * half;
        p_max = p_max.max(upper.0);
        p_min = p_min.min(upper.0);
        lower = upper;
    }

    let thickness = p_max - p_min;
    if thickness <= T::zero() {
        return Err(Error::InvalidInput);
    }
    Ok((t_sum / thickness, td_sum / thickness))
}

/// Convective condensation level.
///
/// The CCL is where the mixing-ratio line through the surface dewpoint meets
/// the environmental temperature. Returns the level and the convective
/// temperature, the surface temperature whose dry adiabat reaches the CCL.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the slices are empty or differ in length.
pub fn ccl<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    which: Pick,
) -> Result<Option<(Level<T>, T)>, Error> {
    check_lengths(pressure, &[temperature, dewpoint])?;
    let p0 = pressure[0];
    let r = mixing_ratio_from_dewpoint(p0, dewpoint[0]);

    let line = pressure
        .iter()
        .zip(temperature)
        .map(move |(&p, &t)| (p, dewpoint_from_mixing_ratio(p, r), t))
        .filter(is_valid);
    let level = pick(crossings(line, Direction::Increasing), which);
    Ok(level.map(|l| (l, dry_lapse(p0, l.pressure, l.temperature))))
}

fn check_lengths<T>(pressure: &[T], columns: &[&[T]]) -> Result<(), Error> {
    if pressure.is_empty() || columns.iter().any(|c| c.len() != pressure.len()) {
        return Err(Error::InvalidInput);
    }
    Ok(())
}

fn check_depth<T: ThermoFloat>(depth: T) -> Result<(), Error> {
    if depth.is_finite() && depth > T::zero() {
        Ok(())
    } else {
        Err(Error::InvalidInput)
    }
}

// `|a - b| <= 1e-8 + 1e-5·|b|`
fn is_close<T: ThermoFloat>(a: T, b: T) -> bool {
    (a - b).abs() <= T::from_f64(1e-8) + T::from_f64(1e-5) * b.abs()
}

fn ge_close<T: ThermoFloat>(a: T, b: T) -> bool {
    a >= b || is_close(a, b)
}

fn le_close<T: ThermoFloat>(a: T, b: T) -> bool {
    a <= b || is_close(a, b)
}

fn is_valid<T: ThermoFloat>(&(p, a, b): &(T, T, T)) -> bool {
    !(p.is_nan() || a.is_nan() || b.is_nan())
}

/// `(p, a, b)` triples with NaN levels removed.
fn levels<'a, T: ThermoFloat>(
    pressure: &'a [T],
    a: &'a [T],
    b: &'a [T],
) -> impl Iterator<Item = (T, T, T)> + Clone + 'a {
    pressure
        .iter()
        .zip(a)
        .zip(b)
        .map(|((&p, &x), &y)| (p, x, y))
        .filter(is_valid)
}

/// Point on the segment where `a - b` is zero, with `b` interpolated there.
fn split<T: ThermoFloat>(lower: (T, T, T), upper: (T, T, T)) -> Level<T> {
    let (pl, al, bl) = lower;
    let (pu, au, bu) = upper;
    let f = normalize(T::zero(), al - bl, au - bu);
    let (xl, xu) = (pl.ln(), pu.ln());
    Level {
        pressure: (xl + f * (xu - xl)).exp(),
        temperature: bl + f * (bu - bl),
    }
}

/// Crossings of `a` over `b`, bottom to top.
///
/// `Increasing` yields segments where `a - b` goes from `<= 0` to `> 0`,
/// `Decreasing` the reverse.
fn crossings<T, I>(levels: I, direction: Direction) -> impl Iterator<Item = Level<T>>
where
    T: ThermoFloat,
    I: Iterator<Item = (T, T, T)>,
{
    let zero = T::zero();
    let one = T::one();
    let mut prev: Option<(T, T, T)> = None;
    levels.filter_map(move |upper| {
        let lower = prev.replace(upper)?;
        let below = heaviside(lower.1 - lower.2, zero);
        let above = heaviside(upper.1 - upper.2, zero);
        let crosses = match direction {
            Direction::Increasing => below == zero && above == one,
            Direction::Decreasing => below == one && above == zero,
        };
        crosses.then(|| split(lower, upper))
    })
}

/// `(p, a - b)` at every level, with a zero-buoyancy point inserted wherever
/// the sign changes between levels.
fn buoyancy_points<T, I>(levels: I) -> impl Iterator<Item = (T, T)>
where
    T: ThermoFloat,
    I: Iterator<Item = (T, T, T)>,
{
    let zero = T::zero();
    let mut prev: Option<(T, T, T)> = None;
    levels.flat_map(move |upper| {
        let crossing = prev.replace(upper).and_then(|lower| {
            let flips = heaviside(lower.1 - lower.2, zero) != heaviside(upper.1 - upper.2, zero);
            flips.then(|| (split(lower, upper).pressure, zero))
        });
        crossing
            .into_iter()
            .chain(core::iter::once((upper.0, upper.1 - upper.2)))
    })
}

fn pick<T, I: Iterator<Item = Level<T>>>(mut crossings: I, which: Pick) -> Crossing<T> {
    match which {
        Pick::Bottom => crossings.next(),
        Pick::Top => crossings.last(),
    }
}

/// `(el, lfc)` from `(p, parcel, environment)` levels above the surface.
fn find_el_lfc<T, I>(
    aloft: I,
    lcl: Level<T>,
    which_el: Pick,
    which_lfc: Pick,
) -> (Crossing<T>, Crossing<T>)
where
    T: ThermoFloat,
    I: Iterator<Item = (T, T, T)> + Clone,
{
    let above_lcl = move |l: &Level<T>| l.pressure < lcl.pressure;

    let el = match aloft.clone().last() {
        Some((_, parcel, env)) if parcel <= env => pick(
            crossings(aloft.clone(), Direction::Decreasing).filter(above_lcl),
            which_el,
        ),
        _ => None,
    };

    let lfc = pick(
        crossings(aloft.clone(), Direction::Increasing).filter(above_lcl),
        which_lfc,
    )
    .or_else(|| {
        aloft
            .filter(|&(p, _, _)| le_close(p, lcl.pressure))
            .any(|(_, parcel, env)| ge_close(parcel, env))
            .then_some(lcl)
    });

    (el, lfc)
}

/// Index of the first level with `top <= p <= bottom` whose θe beats every
/// earlier one under `better`.
fn theta_e_extreme<T, F>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    bottom: T,
    top: T,
    better: F,
) -> Option<usize>
where
    T: ThermoFloat,
    F: Fn(T, T) -> bool,
{
    let mut best: Option<(usize, T)> = None;
    let layer = levels(pressure, temperature, dewpoint)
        .enumerate()
        .filter(|&(_, (p, _, _))| p <= bottom && p >= top);
    for (i, (p, t, td)) in layer {
        let theta_e = equivalent_potential_temperature(p, t, td);
        if theta_e.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if !better(theta_e, b) => {}
            _ => best = Some((i, theta_e)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PRES: [f64; 6] = [100000.0, 90000.0, 80000.0, 70000.0, 60000.0, 50000.0];
    const ENV: [f64; 6] = [300.0, 295.0, 290.0, 285.0, 280.0, 275.0];
    const DEW: [f64; 6] = [300.0, 280.0, 270.0, 260.0, 250.0, 240.0];

    fn config() -> SolverConfig<f64> {
        SolverConfig::new(1e-6, 50, 1000.0).unwrap()
    }

    fn parcel_with(offsets: [f64; 6]) -> [f64; 6] {
        let mut out = ENV;
        for (o, d) in out.iter_mut().zip(offsets) {
            *o += d;
        }
        out
    }

    fn crossing(pa: f64, pb: f64, t: f64) -> Level<f64> {
        Level {
            pressure: (pa * pb).sqrt(),
            temperature: t,
        }
    }

    fn assert_level(got: Crossing<f64>, want: Level<f64>) {
        let got = got.unwrap();
        assert_relative_eq!(got.pressure, want.pressure, max_relative = 1e-12);
        assert_relative_eq!(got.temperature, want.temperature, max_relative = 1e-12);
    }

    #[test]
    fn el_lfc_pick_bottom_and_top() {
        let parcel = parcel_with([0.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
        let c = config();

        let (el, lfc) =
            el_lfc(&PRES, &ENV, &DEW, &parcel, Pick::Top, Pick::Bottom, &c).unwrap();
        assert_level(el, crossing(60000.0, 50000.0, 277.5));
        assert_level(lfc, crossing(90000.0, 80000.0, 292.5));

        let (el, lfc) =
            el_lfc(&PRES, &ENV, &DEW, &parcel, Pick::Bottom, Pick::Top, &c).unwrap();
        assert_level(el, crossing(80000.0, 70000.0, 287.5));
        assert_level(lfc, crossing(70000.0, 60000.0, 282.5));

        assert_eq!(
            super::el(&PRES, &ENV, &DEW, &parcel, Pick::Top, &c).unwrap(),
            el_lfc(&PRES, &ENV, &DEW, &parcel, Pick::Top, Pick::Top, &c).unwrap().0
        );
        assert_eq!(
            super::lfc(&PRES, &ENV, &DEW, &parcel, Pick::Bottom, &c).unwrap(),
            el_lfc(&PRES, &ENV, &DEW, &parcel, Pick::Top, Pick::Bottom, &c).unwrap().1
        );
    }

    #[test]
    fn lfc_falls_back_to_lcl() {
        // Buoyant from the surface: no increasing crossing above the LCL
        let parcel = parcel_with([0.0, 1.0, 2.0, 1.0, -1.0, -2.0]);
        let c = config();
        let lcl = c.lcl(PRES[0], ENV[0], DEW[0]).unwrap();
        assert_eq!(lfc(&PRES, &ENV, &DEW, &parcel, Pick::Bottom, &c).unwrap(), Some(lcl));
        assert_level(
            el(&PRES, &ENV, &DEW, &parcel, Pick::Top, &c).unwrap(),
            crossing(70000.0, 60000.0, 282.5),
        );
    }

    #[test]
    fn no_el_when_parcel_warm_at_top() {
        let parcel = parcel_with([0.0, -1.0, 1.0, 2.0, 3.0, 4.0]);
        let c = config();
        let (el, lfc) =
            el_lfc(&PRES, &ENV, &DEW, &parcel, Pick::Top, Pick::Bottom, &c).unwrap();
        assert_eq!(el, None);
        assert_level(lfc, crossing(90000.0, 80000.0, 292.5));

        // CAPE then runs to the top of the sounding
        let (cape, cin) =
            cape_cin(&PRES, &ENV, &DEW, &parcel, Pick::Top, Pick::Bottom, &c).unwrap();
        assert!(cape > 0.0);
        assert!(cin <= 0.0);
    }

    #[test]
    fn stable_parcel_has_no_cape() {
        let parcel = parcel_with([0.0, -5.0, -10.0, -15.0, -20.0, -25.0]);
        let mut dew = ENV.map(|t| t - 1.0);
        dew[0] = ENV[0];
        let c = config();
        assert_eq!(lfc(&PRES, &ENV, &dew, &parcel, Pick::Bottom, &c).unwrap(), None);
        assert_eq!(
            cape_cin(&PRES, &ENV, &dew, &parcel, Pick::Top, Pick::Bottom, &c),
            Ok((0.0, 0.0))
        );
    }

    #[test]
    fn nan_levels_are_skipped() {
        let parcel = parcel_with([0.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
        let mut pres = [0.0; 7];
        let mut env = [0.0; 7];
        let mut dew = [0.0; 7];
        let mut par = [0.0; 7];
        for (i, j) in [0, 1, 3, 4, 5, 6].into_iter().enumerate() {
            pres[j] = PRES[i];
            env[j] = ENV[i];
            dew[j] = DEW[i];
            par[j] = parcel[i];
        }
        pres[2] = f64::NAN;
        env[2] = 1.0;
        dew[2] = 1.0;
        par[2] = 1.0;

        let c = config();
        assert_eq!(
            el_lfc(&pres, &env, &dew, &par, Pick::Top, Pick::Bottom, &c),
            el_lfc(&PRES, &ENV, &DEW, &parcel, Pick::Top, Pick::Bottom, &c)
        );
    }

    #[test]
    fn mismatched_slices_are_rejected() {
        let c = config();
        let short = &ENV[..5];
        assert_eq!(
            el_lfc(&PRES, short, &DEW, &ENV, Pick::Top, Pick::Bottom, &c),
            Err(Error::InvalidInput)
        );
        assert_eq!(
            cape_cin::<f64>(&[], &[], &[], &[], Pick::Top, Pick::Bottom, &c),
            Err(Error::InvalidInput)
        );
        assert_eq!(downdraft_cape(&PRES, &ENV, short, &c), Err(Error::InvalidInput));
        assert_eq!(mixed_layer(&PRES, short, &DEW, 10000.0), Err(Error::InvalidInput));
        assert_eq!(ccl(&PRES, &ENV, short, Pick::Bottom), Err(Error::InvalidInput));
    }

    #[test]
    fn lcl_failure_propagates() {
        let c = SolverConfig::new(1e-12, 1, 1000.0).unwrap();
        let dew = ENV.map(|t| t - 10.0);
        assert_eq!(
            el_lfc(&PRES, &ENV, &dew, &ENV, Pick::Top, Pick::Bottom, &c),
            Err(Error::ConvergenceFailure)
        );
    }

    #[test]
    fn mixed_layer_of_linear_profile() {
        // 1000-800 hPa: T is linear so its mean is the midpoint
        let (t, td) = mixed_layer(&PRES, &ENV, &DEW, 20000.0).unwrap();
        assert_relative_eq!(t, 295.0, max_relative = 1e-12);
        assert_relative_eq!(td, 282.5, max_relative = 1e-12);
        assert_eq!(mixed_layer(&PRES, &ENV, &DEW, 5000.0), Err(Error::InvalidInput));
        assert_eq!(mixed_layer(&PRES, &ENV, &DEW, -1.0), Err(Error::InvalidInput));
    }

    #[test]
    fn most_unstable_prefers_highest_theta_e() {
        let (i, parcel) = most_unstable_parcel(&PRES, &ENV, &DEW, 30000.0).unwrap();
        assert_eq!(i, 0);
        assert_eq!(
            parcel,
            Parcel {
                pressure: 100000.0,
                temperature: 300.0,
                dewpoint: 300.0
            }
        );
        // Drying the surface moves the source aloft
        let mut dew = DEW;
        dew[0] = 250.0;
        dew[1] = 294.0;
        let (i, _) = most_unstable_parcel(&PRES, &ENV, &dew, 30000.0).unwrap();
        assert_eq!(i, 1);
        assert_eq!(
            most_unstable_parcel(&PRES, &ENV, &DEW, f64::NAN),
            Err(Error::InvalidInput)
        );
    }

    #[test]
    fn downdraft_cape_needs_source_layer() {
        let pres = [100000.0, 90000.0, 80000.0];
        let env = [300.0, 295.0, 290.0];
        assert_eq!(
            downdraft_cape(&pres, &env, &env, &config()),
            Err(Error::InvalidInput)
        );
    }

    #[test]
    fn ccl_meets_mixing_ratio_line() {
        let mut dew = DEW;
        dew[0] = 290.0;
        let (level, tc) = ccl(&PRES, &ENV, &dew, Pick::Bottom).unwrap().unwrap();
        // Between 700 and 600 hPa, where the line overtakes the environment
        assert!(level.pressure < 70000.0 && level.pressure > 60000.0);
        let r = mixing_ratio_from_dewpoint(PRES[0], dew[0]);
        let line = dewpoint_from_mixing_ratio(level.pressure, r);
        assert!((line - level.temperature).abs() < 0.01);
        assert_eq!(tc, dry_lapse(PRES[0], level.pressure, level.temperature));
        assert!(tc > ENV[0]);
    }
}
