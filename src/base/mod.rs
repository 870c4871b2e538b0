//! Implements the base structures: scalar type, tensors, configuration, parameters and errors

mod config;
mod constants;
mod elasticity;
mod parameters;
mod real;
mod sample_params;
mod sym_tensor;
mod update_error;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::elasticity::*;
pub use crate::base::parameters::*;
pub use crate::base::real::*;
pub use crate::base::sample_params::*;
pub use crate::base::sym_tensor::*;
pub use crate::base::update_error::*;
