//! Implements the creep and friction return maps at a material point

mod creep_law;
mod creep_update;
mod flow_rule;
mod friction;
mod law_kelvin;
mod law_lemaitre;
mod law_maxwell;
mod law_munson_dawson;
mod local_convergence;
mod local_solution;
mod local_state;
mod outputs;
mod point_driver;
mod reference_rate;
mod return_map_dev_vol;
mod return_map_one;
mod return_map_two;
mod testing;
mod trial_state;
mod volumetric_law;
pub use crate::material::creep_law::*;
pub use crate::material::creep_update::*;
pub use crate::material::flow_rule::*;
pub use crate::material::friction::*;
pub use crate::material::law_kelvin::*;
pub use crate::material::law_lemaitre::*;
pub use crate::material::law_maxwell::*;
pub use crate::material::law_munson_dawson::*;
pub use crate::material::local_convergence::*;
pub use crate::material::local_solution::*;
pub use crate::material::local_state::*;
pub use crate::material::outputs::*;
pub use crate::material::point_driver::*;
pub use crate::material::reference_rate::*;
pub use crate::material::return_map_dev_vol::*;
pub use crate::material::return_map_one::*;
pub use crate::material::return_map_two::*;
pub use crate::material::trial_state::*;
pub use crate::material::volumetric_law::*;

#[allow(unused_imports)]
pub(crate) use crate::material::testing::*;
