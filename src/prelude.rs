//! Makes available common structures needed to run a material update
//!
//! You may write `use visco::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Config, Elasticity, ParamCreep, ParamFriction, Real, SampleParams, Staging, SymTensor};
pub use crate::base::{Solver, UpdateError, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::material::{CreepUpdate, FrictionState, FrictionUpdate, InterfaceStiffness, LocalState};
pub use crate::material::{CreepStage, Loading, PointDriver, PointOutput, PointProgram, PointResults};
