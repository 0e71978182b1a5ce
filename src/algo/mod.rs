//! Numerical building blocks: the constant table and the two solvers.
//!
//! Both solvers are generic over [`ThermoFloat`](crate::ThermoFloat) and take
//! the problem as a closure; neither knows anything about thermodynamics.
//!
//! # Failure convention
//!
//! Neither solver returns `Result`. Failure is reported in-band as NaN:
//! - [`rk2::rk2`] propagates whatever NaN the right-hand side produces, and
//!   returns NaN when the sub-step count is not representable.
//! - [`fixed_point::fixed_point`] returns NaN when `max_iters` iterations pass
//!   without meeting the tolerance.
//!
//! Batch callers can then keep going over the remaining samples and mask
//! NaN entries afterwards.

pub mod constants;

pub mod fixed_point;
pub mod rk2;
