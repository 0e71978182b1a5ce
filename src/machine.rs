//! Machine constants and the `ThermoFloat` trait.
//!
//! Physical constants live in [`crate::algo::constants`] as `f64` and are
//! narrowed to the working precision through [`ThermoFloat::from_f64`].

use num_traits::Float;

/// Floating-point trait for thermodynamic computation.
///
/// Implemented for `f64` and `f32`. Every formula in the crate is written once
/// against this trait, so both precisions share identical expressions.
pub trait ThermoFloat: Float + core::fmt::Debug + Send + Sync + 'static {
    /// Machine epsilon.
    const MACH_EPSILON: Self;

    /// Infallible conversion from f64.
    ///
    /// For f64 this is the identity; for f32 it rounds via `as f32`.
    fn from_f64(x: f64) -> Self;

    /// Default fixed-point tolerance: √MACH_EPSILON.
    fn default_eps() -> Self;
}

impl ThermoFloat for f64 {
    const MACH_EPSILON: f64 = 2.220446049250313e-16;

    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }
    #[inline]
    fn default_eps() -> f64 {
        1.4901161193847656e-8
    } // sqrt(2^-52)
}

// Derived constants are written at full f64 precision; the compiler rounds to
// f32 at compile time.
#[allow(clippy::excessive_precision)]
impl ThermoFloat for f32 {
    const MACH_EPSILON: f32 = 1.1920929e-7;

    #[inline]
    fn from_f64(x: f64) -> f32 {
        x as f32
    }
    #[inline]
    fn default_eps() -> f32 {
        3.4526698300124390e-4
    } // sqrt(2^-23)
}
