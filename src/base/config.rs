use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines how the volumetric channel is solved together with the deviatoric mechanisms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Staging {
    /// Solves the deviatoric 2×2 system to convergence, then the scalar volumetric equation
    Sequential,

    /// Iterates the deviatoric and volumetric unknowns jointly (3×3 block-triangular system)
    Simultaneous,
}

/// Holds configuration data for the local return-map solvers
///
/// The configuration is consumed at construction time; the solvers never modify it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Absolute tolerance on the (norm of the) residual
    pub abs_tol: f64,

    /// Relative tolerance on the (norm of the) residual with respect to the initial residual
    pub rel_tol: f64,

    /// Maximum number of Newton iterations
    pub n_max_iterations: usize,

    /// Staging policy for the deviatoric-volumetric solver
    pub staging: Staging,

    /// Prefix for the names of the internal values
    ///
    /// Allows several instances of the same model to coexist at one integration point.
    pub base_name: String,

    /// Prints the Newton iterations
    pub verbose_iterations: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            abs_tol: 1e-10,
            rel_tol: 1e-10,
            n_max_iterations: 200,
            staging: Staging::Sequential,
            base_name: String::new(),
            verbose_iterations: false,
        }
    }

    /// Sets the absolute tolerance
    pub fn set_abs_tol(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("abs_tol must be > 0.0");
        }
        self.abs_tol = value;
        Ok(self)
    }

    /// Sets the relative tolerance
    pub fn set_rel_tol(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("rel_tol must be > 0.0");
        }
        self.rel_tol = value;
        Ok(self)
    }

    /// Sets the maximum number of iterations
    pub fn set_n_max_iterations(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("n_max_iterations must be ≥ 1");
        }
        self.n_max_iterations = value;
        Ok(self)
    }

    /// Sets the staging policy of the deviatoric-volumetric solver
    pub fn set_staging(&mut self, staging: Staging) -> Result<&mut Self, StrError> {
        self.staging = staging;
        Ok(self)
    }

    /// Sets the prefix for the names of the internal values
    pub fn set_base_name(&mut self, name: &str) -> Result<&mut Self, StrError> {
        if name.contains(char::is_whitespace) {
            return Err("base_name must not contain whitespace");
        }
        self.base_name = name.to_string();
        Ok(self)
    }

    /// Enables the printing of iterations
    pub fn set_verbose_iterations(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.verbose_iterations = flag;
        Ok(self)
    }

    /// Checks all values (e.g., after deserialization)
    pub fn validate(&self) -> Result<(), StrError> {
        if self.abs_tol <= 0.0 {
            return Err("abs_tol must be > 0.0");
        }
        if self.rel_tol <= 0.0 {
            return Err("rel_tol must be > 0.0");
        }
        if self.n_max_iterations < 1 {
            return Err("n_max_iterations must be ≥ 1");
        }
        if self.base_name.contains(char::is_whitespace) {
            return Err("base_name must not contain whitespace");
        }
        Ok(())
    }

    /// Returns the name of an internal value with the prefix
    pub fn prefixed(&self, name: &str) -> String {
        if self.base_name.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", self.base_name, name)
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "abs_tol = {:?}\n", self.abs_tol)?;
        write!(f, "rel_tol = {:?}\n", self.rel_tol)?;
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations)?;
        write!(f, "staging = {:?}\n", self.staging)?;
        write!(f, "base_name = {:?}\n", self.base_name)?;
        write!(f, "verbose_iterations = {:?}\n", self.verbose_iterations)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
