//! Physical constants shared by the thermodynamic relations and solvers.
//!
//! Values are stored at full f64 precision and narrowed with
//! [`ThermoFloat::from_f64`](crate::ThermoFloat::from_f64) at the point of use.

#![allow(clippy::excessive_precision)]

/// Freezing point of water (K).
pub const T0: f64 = 273.15;

/// Saturation vapor pressure over water at [`T0`] (Pa).
pub const E0: f64 = 611.21;

/// Specific heat of dry air at constant pressure (J/(kg·K)).
pub const CPD: f64 = 1004.6662184201462;

/// Gas constant for dry air (J/(kg·K)).
pub const RD: f64 = 287.04749097718457;

/// Gas constant for water vapor (J/(kg·K)).
pub const RV: f64 = 461.52311572606084;

/// Latent heat of vaporization (J/kg).
pub const LV: f64 = 2501000.0;

/// Ratio of gas constants, Rd/Rv (dimensionless).
pub const EPSILON: f64 = RD / RV;

/// Reference pressure for potential temperature (Pa).
pub const P0: f64 = 100000.0;

/// Poisson constant κ = Rd/Cpd.
pub(crate) const KAPPA: f64 = RD / CPD;

/// Bolton (1980) saturation vapor pressure coefficient (dimensionless).
pub(crate) const SVP_A: f64 = 17.67;

/// Bolton (1980) offset in Kelvin, `T0 - 243.5`.
pub(crate) const SVP_B: f64 = 29.65;

/// Bolton (1980) offset in Celsius, used by the dewpoint inverse.
pub(crate) const SVP_C: f64 = 243.5;

/// Lower domain bound of the Davies-Jones (2008) θw polynomial (K).
pub(crate) const THETA_W_MIN: f64 = 173.15;
