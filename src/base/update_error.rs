use crate::StrError;
use std::fmt;

/// Identifies the solver that raised an [UpdateError]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solver {
    /// Single-variable creep return map
    Creep,

    /// Two-variable (2×2) creep return map
    TwoCreep,

    /// Scalar volumetric return map (sequential staging)
    Volumetric,

    /// Extended deviatoric-volumetric return map (simultaneous staging)
    DeviatoricVolumetric,

    /// Friction (slip-rate) return map
    Friction,
}

/// Holds the failure kinds of a local update
///
/// All kinds are fatal for the local solve; the caller is expected to treat them as a failed
/// nonlinear step (e.g., cut the time step and retry).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateError {
    /// The Newton iterations did not reach either tolerance within the maximum number of iterations
    MaxIterationsExceeded(Solver),

    /// The Jacobian matrix (or scalar derivative) is exactly singular
    SingularMatrix(Solver),

    /// A flow rule was asked for a mechanism index outside its set
    UnknownCreepModel,
}

impl Solver {
    /// Returns a short name
    pub fn name(&self) -> &'static str {
        match self {
            Solver::Creep => "creep",
            Solver::TwoCreep => "two-creep",
            Solver::Volumetric => "volumetric",
            Solver::DeviatoricVolumetric => "deviatoric-volumetric",
            Solver::Friction => "friction",
        }
    }
}

impl UpdateError {
    /// Returns the error message
    pub fn message(&self) -> StrError {
        match self {
            UpdateError::MaxIterationsExceeded(solver) => match solver {
                Solver::Creep => "maximum iterations exceeded in creep return map",
                Solver::TwoCreep => "maximum iterations exceeded in two-creep return map",
                Solver::Volumetric => "maximum iterations exceeded in volumetric return map",
                Solver::DeviatoricVolumetric => "maximum iterations exceeded in deviatoric-volumetric return map",
                Solver::Friction => "maximum iterations exceeded in friction return map",
            },
            UpdateError::SingularMatrix(solver) => match solver {
                Solver::Creep => "matrix is singular in creep return map",
                Solver::TwoCreep => "matrix is singular in two-creep return map",
                Solver::Volumetric => "matrix is singular in volumetric return map",
                Solver::DeviatoricVolumetric => "matrix is singular in deviatoric-volumetric return map",
                Solver::Friction => "matrix is singular in friction return map",
            },
            UpdateError::UnknownCreepModel => "unknown creep model",
        }
    }

    /// Indicates a numerical failure (as opposed to a programming or configuration error)
    pub fn is_numerical(&self) -> bool {
        !matches!(self, UpdateError::UnknownCreepModel)
    }
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UpdateError {}

impl From<UpdateError> for StrError {
    fn from(error: UpdateError) -> Self {
        error.message()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
