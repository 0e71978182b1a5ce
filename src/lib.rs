//! Pure Rust atmospheric parcel thermodynamics.
//!
//! This crate provides closed-form moist thermodynamic relations (saturation
//! vapor pressure, mixing ratio, dewpoint, potential, equivalent-potential and
//! wet-bulb-potential temperature) together with the iterative quantities that
//! have no closed form: the moist adiabat, the lifted condensation level (LCL)
//! and the wet-bulb temperature. On top of these, [`convective`] derives
//! sounding diagnostics: LFC, EL, CAPE/CIN, downdraft CAPE, the most unstable
//! parcel, the mixed layer and the convective condensation level.
//!
//! The core functions are scalar and pure. Everything is generic over `f32` and `f64` through
//! [`ThermoFloat`]. Units are Pascal and Kelvin throughout.
//!
//! # Solvers
//!
//! - [`algo::rk2::rk2`]: fixed-step explicit midpoint integrator.
//! - [`algo::fixed_point::fixed_point`]: Steffensen/Aitken-accelerated
//!   fixed-point iteration.
//!
//! # Failure reporting
//!
//! The scalar API never panics or returns `Result` for bad physical input.
//! Domain violations propagate NaN/∞ and non-convergence returns NaN, so bulk
//! callers can process every sample and mask failures afterwards. The
//! [`SolverConfig`] methods and the [`profile`] and [`convective`] helpers
//! report the same conditions as [`Error`].
//!
//! # Example
//!
//! ```
//! use parcel_thermo::{lcl, wet_bulb_temperature, SolverConfig};
//!
//! let (p, t) = lcl(100000.0_f64, 293.15, 283.15, 1e-6, 50);
//! assert!((p - 86172.5).abs() < 1.0);
//! assert!((t - 280.95).abs() < 0.01);
//!
//! let tw = wet_bulb_temperature(100000.0_f64, 293.15, 283.15, 1e-6, 1000.0, 50);
//! assert!(tw > 283.15 && tw < 293.15);
//!
//! // Precision-scaled defaults, errors instead of NaN
//! let config = SolverConfig::<f32>::default();
//! let lcl = config.lcl(100000.0, 293.15, 283.15).unwrap();
//! assert!((lcl.pressure - 86172.5).abs() < 20.0);
//! ```
//!
//! # Features
//!
//! - `std` (default): links the standard library math; implies `alloc`.
//! - `libm`: pure-Rust math for `no_std` targets (required without `std`).
//! - `alloc`: [`profile::parcel_profile_vec`],
//!   [`profile::parcel_profile_with_lcl`] and
//!   [`convective::most_unstable_cape_cin`].
//! - `serde`: `Serialize`/`Deserialize` for [`SolverConfig`], [`Level`],
//!   [`Parcel`] and [`Pick`].

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod algo;
pub mod convective;
pub mod functional;
pub mod machine;
pub mod moist;
pub mod profile;
pub mod thermo;
pub mod types;

pub use algo::constants;
pub use algo::fixed_point::fixed_point;
pub use algo::rk2::rk2;
pub use machine::ThermoFloat;
pub use moist::{
    lcl, lcl_iterate, lcl_pressure, moist_lapse, moist_lapse_rate, wet_bulb_temperature,
};
pub use thermo::{
    dewpoint, dewpoint_from_mixing_ratio, dry_lapse, equivalent_potential_temperature,
    exner_function, exner_function_with_reference, mixing_ratio, mixing_ratio_from_dewpoint,
    potential_temperature, saturation_mixing_ratio, saturation_vapor_pressure, vapor_pressure,
    virtual_temperature, wet_bulb_potential_temperature,
    wet_bulb_potential_temperature_from_theta_e,
};
pub use types::{
    Direction, Error, Lcl, Level, Parcel, Pick, SolverConfig, DEFAULT_MAX_ITERS, DEFAULT_STEP,
};
