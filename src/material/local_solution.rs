use crate::base::Real;

/// Holds the converged unknowns of a return map
#[derive(Clone, Debug)]
pub struct LocalSolution<T: Real> {
    /// Equivalent creep strain increments of the deviatoric mechanisms
    pub x: Vec<T>,

    /// Volumetric creep strain increment (positive in compaction), if the channel is active
    pub x_vol: Option<T>,

    /// Number of Newton updates (all stages)
    pub n_iterations: usize,
}
