//! Core types: solver configuration, LCL result, and the error enum.

use core::fmt;

use tracing::debug;

use crate::machine::ThermoFloat;
use crate::moist;

/// Default fixed-point iteration budget.
pub const DEFAULT_MAX_ITERS: usize = 50;

/// Default maximum RK2 sub-step along a moist adiabat (Pa).
pub const DEFAULT_STEP: f64 = 1000.0;

/// A point of a sounding: pressure and temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level<T> {
    /// Pressure (Pa).
    pub pressure: T,
    /// Temperature (K).
    pub temperature: T,
}

/// Lifted condensation level of a parcel.
///
/// `temperature` is the parcel dewpoint at the LCL.
pub type Lcl<T> = Level<T>;

/// Thermodynamic state of an air parcel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parcel<T> {
    /// Pressure (Pa).
    pub pressure: T,
    /// Temperature (K).
    pub temperature: T,
    /// Dewpoint (K).
    pub dewpoint: T,
}

/// Which crossing to report when a profile crosses more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pick {
    /// The lowest crossing (highest pressure).
    Bottom,
    /// The highest crossing (lowest pressure).
    Top,
}

/// Ordering used by [`is_monotonic`](crate::functional::is_monotonic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Each element is ≥ the previous one.
    Increasing,
    /// Each element is ≤ the previous one.
    Decreasing,
}

/// Solver parameters shared by the LCL, moist-lapse, and wet-bulb routines.
///
/// The free functions in [`moist`](crate::moist) take these values explicitly;
/// this type bundles them, validates them once, and supplies
/// precision-scaled defaults:
///
/// | field       | `f64`                  | `f32`         |
/// |-------------|------------------------|---------------|
/// | `eps`       | 1.4901161193847656e-8  | 3.4526698e-4  |
/// | `max_iters` | 50                     | 50            |
/// | `step`      | 1000 Pa                | 1000 Pa       |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T> {
    /// Relative convergence tolerance of the fixed-point solver.
    pub eps: T,
    /// Fixed-point iteration budget.
    pub max_iters: usize,
    /// Maximum RK2 sub-step (Pa).
    pub step: T,
}

impl<T: ThermoFloat> Default for SolverConfig<T> {
    fn default() -> Self {
        Self {
            eps: T::default_eps(),
            max_iters: DEFAULT_MAX_ITERS,
            step: T::from_f64(DEFAULT_STEP),
        }
    }
}

impl<T: ThermoFloat> SolverConfig<T> {
    /// Create a validated configuration.
    ///
    /// Returns [`Error::InvalidInput`] unless `eps` and `step` are finite and
    /// positive and `max_iters ≥ 1`.
    pub fn new(eps: T, max_iters: usize, step: T) -> Result<Self, Error> {
        let config = Self {
            eps,
            max_iters,
            step,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants enforced by [`SolverConfig::new`].
    ///
    /// Useful for configurations built with struct syntax or deserialized.
    pub fn validate(&self) -> Result<(), Error> {
        let zero = T::zero();
        if !(self.eps.is_finite() && self.eps > zero) {
            return Err(Error::InvalidInput);
        }
        if !(self.step.is_finite() && self.step > zero) {
            return Err(Error::InvalidInput);
        }
        if self.max_iters == 0 {
            return Err(Error::InvalidInput);
        }
        Ok(())
    }

    /// LCL pressure with this configuration; NaN on non-convergence.
    #[inline]
    pub fn lcl_pressure(&self, pressure: T, temperature: T, dewpoint: T) -> T {
        moist::lcl_pressure(pressure, temperature, dewpoint, self.eps, self.max_iters)
    }

    /// Lifted condensation level.
    ///
    /// Returns [`Error::ConvergenceFailure`] when the fixed-point solver
    /// exhausts `max_iters`.
    pub fn lcl(&self, pressure: T, temperature: T, dewpoint: T) -> Result<Lcl<T>, Error> {
        let (p, t) = moist::lcl(pressure, temperature, dewpoint, self.eps, self.max_iters);
        if p.is_nan() {
            debug!(?pressure, ?temperature, ?dewpoint, "lcl did not converge");
            return Err(Error::ConvergenceFailure);
        }
        Ok(Lcl {
            pressure: p,
            temperature: t,
        })
    }

    /// Temperature at `next_pressure` along the moist adiabat through
    /// `(pressure, temperature)`.
    #[inline]
    pub fn moist_lapse(&self, pressure: T, next_pressure: T, temperature: T) -> T {
        moist::moist_lapse(pressure, next_pressure, temperature, self.step)
    }

    /// Wet-bulb temperature.
    ///
    /// Returns [`Error::ConvergenceFailure`] when the LCL solve does not
    /// converge.
    pub fn wet_bulb_temperature(
        &self,
        pressure: T,
        temperature: T,
        dewpoint: T,
    ) -> Result<T, Error> {
        let lcl = self.lcl(pressure, temperature, dewpoint)?;
        Ok(self.moist_lapse(lcl.pressure, pressure, lcl.temperature))
    }
}

/// Error type for the configured and profile APIs.
///
/// The scalar core never returns this; it reports failure as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Invalid input (non-positive tolerance or step, zero iteration budget,
    /// empty or mismatched profile slices, a layer with no usable levels).
    InvalidInput,
    /// The fixed-point solver did not meet its tolerance within `max_iters`.
    ConvergenceFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput => {
                write!(f, "invalid input: check solver parameters and slice lengths")
            }
            Error::ConvergenceFailure => {
                write!(
                    f,
                    "convergence failure: fixed-point iteration exhausted its budget"
                )
            }
        }
    }
}

impl core::error::Error for Error {}
