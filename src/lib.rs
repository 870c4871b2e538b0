//! Local return-map engine for creep and friction updates at material points
//!
//! The crate performs the implicit (backward Euler) stress update of viscous and viscoplastic
//! creep models (Maxwell, Kelvin, Burger, Lubby2, Lemaitre, Munson-Dawson and their combinations)
//! and the slip update of frictional interfaces. The scalar type is generic, thus the same code
//! runs with `f64` and with dual numbers (forward-mode derivatives).

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
pub mod prelude;
