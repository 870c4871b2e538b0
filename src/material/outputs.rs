use crate::base::{Real, SymTensor};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Returns the von Mises stress `√(3/2) ‖dev(σ)‖`
pub fn von_mises_stress<T: Real>(stress: &SymTensor<T>) -> f64 {
    stress.invariant_sigma_d().value()
}

/// Returns the pressure (mean stress, positive in compression) `-tr(σ)/3`
pub fn pressure<T: Real>(stress: &SymTensor<T>) -> f64 {
    -stress.invariant_sigma_m().value()
}

/// Returns the updated equivalent strain `ε_eq_old + √(2/3) ‖dev(Δε)‖`
pub fn eqv_strain<T: Real>(eqv_strain_old: f64, delta_strain: &SymTensor<T>) -> f64 {
    eqv_strain_old + f64::sqrt(2.0 / 3.0) * delta_strain.deviator().norm().value()
}

/// Returns the equivalent strain rate `√(2/3) ‖dev(Δε)‖ / Δt`
pub fn eqv_strain_rate<T: Real>(delta_strain: &SymTensor<T>, dt: f64) -> Result<f64, StrError> {
    if dt <= 0.0 {
        return Err("dt must be > 0.0");
    }
    Ok(f64::sqrt(2.0 / 3.0) * delta_strain.deviator().norm().value() / dt)
}

/// Returns the updated volumetric strain `ε_v_old + tr(Δε)`
pub fn vol_strain<T: Real>(vol_strain_old: f64, delta_strain: &SymTensor<T>) -> f64 {
    vol_strain_old + delta_strain.trace().value()
}

/// Returns the volumetric strain rate `tr(Δε) / Δt`
pub fn vol_strain_rate<T: Real>(delta_strain: &SymTensor<T>, dt: f64) -> Result<f64, StrError> {
    if dt <= 0.0 {
        return Err("dt must be > 0.0");
    }
    Ok(delta_strain.trace().value() / dt)
}

/// Returns the magnitude of the shear traction `‖(τ₁, τ₂)‖` of a local interface traction
pub fn shear_traction<T: Real>(traction: &[T; 3]) -> f64 {
    let (t1, t2) = (traction[1].value(), traction[2].value());
    f64::sqrt(t1 * t1 + t2 * t2)
}

/// Holds the scalar outputs of a material point at the end of a time step
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointOutput {
    /// Time at the end of the step
    pub time: f64,

    /// von Mises stress
    pub von_mises_stress: f64,

    /// Pressure (positive in compression)
    pub pressure: f64,

    /// Accumulated equivalent (total) strain
    pub eqv_strain: f64,

    /// Equivalent (total) strain rate
    pub eqv_strain_rate: f64,

    /// Accumulated volumetric (total) strain
    pub vol_strain: f64,

    /// Volumetric (total) strain rate
    pub vol_strain_rate: f64,

    /// Accumulated equivalent creep strain (sum over all mechanisms)
    pub eqv_creep_strain: f64,

    /// Number of Newton iterations of the step
    pub n_iterations: usize,
}

impl PointOutput {
    /// Computes the outputs at the end of a time step
    ///
    /// `previous` holds the outputs of the previous step (accumulated values are read from it).
    pub fn new<T: Real>(
        previous: &PointOutput,
        stress: &SymTensor<T>,
        delta_strain: &SymTensor<T>,
        eqv_creep_strain: f64,
        n_iterations: usize,
        dt: f64,
    ) -> Result<Self, StrError> {
        Ok(PointOutput {
            time: previous.time + dt,
            von_mises_stress: von_mises_stress(stress),
            pressure: pressure(stress),
            eqv_strain: eqv_strain(previous.eqv_strain, delta_strain),
            eqv_strain_rate: eqv_strain_rate(delta_strain, dt)?,
            vol_strain: vol_strain(previous.vol_strain, delta_strain),
            vol_strain_rate: vol_strain_rate(delta_strain, dt)?,
            eqv_creep_strain,
            n_iterations,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
