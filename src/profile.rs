//! Parcel and moist-adiabat profiles over one sounding.
//!
//! Pressure levels are expected in ascent order (decreasing pressure). NaN
//! pressure levels are treated as missing: their output is NaN and they do not
//! reset the integration state.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use crate::functional::{interpolate_z, search_sorted};
use crate::machine::ThermoFloat;
use crate::moist::moist_lapse;
use crate::thermo::dry_lapse;
use crate::types::{Error, Lcl, SolverConfig};

/// Temperature along the moist adiabat through `(reference_pressure,
/// temperature)`, evaluated at each level of `pressure` into `out`.
///
/// Integration proceeds level by level, so each segment starts from the
/// previous valid level's result.
///
/// Returns [`Error::InvalidInput`] if `out.len() != pressure.len()`.
pub fn moist_lapse_profile<T: ThermoFloat>(
    pressure: &[T],
    reference_pressure: T,
    temperature: T,
    step: T,
    out: &mut [T],
) -> Result<(), Error> {
    if out.len() != pressure.len() {
        return Err(Error::InvalidInput);
    }

    let mut p_prev = reference_pressure;
    let mut t_prev = temperature;
    for (&p, o) in pressure.iter().zip(out.iter_mut()) {
        if p.is_nan() {
            *o = T::nan();
            continue;
        }
        t_prev = moist_lapse(p_prev, p, t_prev, step);
        p_prev = p;
        *o = t_prev;
    }
    Ok(())
}

/// Temperature of a surface parcel lifted through `pressure`, written to `out`.
///
/// The parcel starts at `(pressure[0], temperature, dewpoint)`. Levels at or
/// below its LCL (`p >= lcl.pressure`) follow the dry adiabat; levels above
/// follow the moist adiabat from the LCL. Returns the LCL.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `pressure` is empty or `out` has a different
///   length.
/// - [`Error::ConvergenceFailure`] if the LCL solve does not converge.
pub fn parcel_profile<T: ThermoFloat>(
    pressure: &[T],
    temperature: T,
    dewpoint: T,
    config: &SolverConfig<T>,
    out: &mut [T],
) -> Result<Lcl<T>, Error> {
    if pressure.is_empty() || out.len() != pressure.len() {
        return Err(Error::InvalidInput);
    }

    let p0 = pressure[0];
    let lcl = config.lcl(p0, temperature, dewpoint)?;

    let mut p_prev = lcl.pressure;
    let mut t_prev = lcl.temperature;
    for (&p, o) in pressure.iter().zip(out.iter_mut()) {
        *o = if p.is_nan() {
            T::nan()
        } else if p >= lcl.pressure {
            dry_lapse(p, p0, temperature)
        } else {
            t_prev = config.moist_lapse(p_prev, p, t_prev);
            p_prev = p;
            t_prev
        };
    }
    Ok(lcl)
}

/// Allocating variant of [`parcel_profile`].
#[cfg(feature = "alloc")]
pub fn parcel_profile_vec<T: ThermoFloat>(
    pressure: &[T],
    temperature: T,
    dewpoint: T,
    config: &SolverConfig<T>,
) -> Result<(Vec<T>, Lcl<T>), Error> {
    let mut out = alloc::vec![T::zero(); pressure.len()];
    let lcl = parcel_profile(pressure, temperature, dewpoint, config, &mut out)?;
    Ok((out, lcl))
}

/// A sounding with its parcel profile and the LCL inserted as an extra level.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelProfile<T> {
    /// Pressure levels (Pa), including the LCL.
    pub pressure: Vec<T>,
    /// Environment temperature (K); interpolated at the LCL.
    pub temperature: Vec<T>,
    /// Environment dewpoint (K); interpolated at the LCL.
    pub dewpoint: Vec<T>,
    /// Parcel temperature (K).
    pub parcel: Vec<T>,
    /// Index of the inserted LCL level.
    pub lcl_index: usize,
    /// The LCL of the surface parcel.
    pub lcl: Lcl<T>,
}

/// [`parcel_profile`] with the LCL inserted into every output column.
///
/// The LCL is placed after all levels at or below it (`p >= lcl.pressure`),
/// never before the surface level. Environment temperature and dewpoint at
/// the LCL are interpolated linearly in pressure; the parcel temperature there
/// is the LCL temperature.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the slices are empty or differ in length.
/// - [`Error::ConvergenceFailure`] if the LCL solve does not converge.
#[cfg(feature = "alloc")]
pub fn parcel_profile_with_lcl<T: ThermoFloat>(
    pressure: &[T],
    temperature: &[T],
    dewpoint: &[T],
    config: &SolverConfig<T>,
) -> Result<ParcelProfile<T>, Error> {
    if pressure.is_empty()
        || temperature.len() != pressure.len()
        || dewpoint.len() != pressure.len()
    {
        return Err(Error::InvalidInput);
    }
    let (mut parcel, lcl) = parcel_profile_vec(pressure, temperature[0], dewpoint[0], config)?;

    let mut k = search_sorted(pressure, lcl.pressure, true);
    if pressure[k] >= lcl.pressure {
        k += 1;
    }
    let k = k.max(1);

    let mut p = pressure.to_vec();
    let mut t = temperature.to_vec();
    let mut td = dewpoint.to_vec();
    p.insert(k, lcl.pressure);
    t.insert(k, interpolate_z(lcl.pressure, pressure, temperature));
    td.insert(k, interpolate_z(lcl.pressure, pressure, dewpoint));
    parcel.insert(k, lcl.temperature);

    Ok(ParcelProfile {
        pressure: p,
        temperature: t,
        dewpoint: td,
        parcel,
        lcl_index: k,
        lcl,
    })
}
