use crate::StrError;
use russell_lab::{vec_copy, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the history (internal) values at a single integration point
///
/// The internal values are the accumulated equivalent creep strains, one per mechanism,
/// followed by the accumulated volumetric creep strain when the volumetric channel is active.
/// They are read as "old" values during the return map and written once after convergence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalState {
    /// Holds the internal values Z
    pub internal_values: Vector,

    /// Holds the number of Newton iterations of the last update
    pub n_iterations: usize,

    /// Indicates that the last update produced inelastic flow
    pub inelastic: bool,
}

impl LocalState {
    /// Allocates a new instance
    pub fn new(n_internal_values: usize) -> Self {
        LocalState {
            internal_values: Vector::new(n_internal_values),
            n_iterations: 0,
            inelastic: false,
        }
    }

    /// Allocates a new instance with given initial internal values
    pub fn from_values(values: &[f64]) -> Self {
        LocalState {
            internal_values: Vector::from(&values),
            n_iterations: 0,
            inelastic: false,
        }
    }

    /// Copies all data from another state into this state
    pub fn copy_from(&mut self, other: &LocalState) -> Result<(), StrError> {
        vec_copy(&mut self.internal_values, &other.internal_values)?;
        self.n_iterations = other.n_iterations;
        self.inelastic = other.inelastic;
        Ok(())
    }
}

impl fmt::Display for LocalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal_values = {:?}\n", self.internal_values.as_data())?;
        write!(f, "n_iterations = {}\n", self.n_iterations)?;
        write!(f, "inelastic = {}\n", self.inelastic)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
