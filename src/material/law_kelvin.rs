use super::CreepLaw;
use crate::base::Real;

/// Implements the (optionally stress-dependent) Kelvin-Voigt element
///
/// The spring back-stress is evaluated with the current accumulated strain `γ = γ_old + x`,
/// i.e., the internal spring strain is updated implicitly within the residual.
///
/// ```text
/// η(q)  = η₀ exp(-m_η q / σ₀)
/// G(q)  = G₀ exp(-m_G q / σ₀)
/// rate  = (q/3 - G(q) γ) / η(q)
/// ```
pub struct KelvinLaw {
    /// Reference viscosity η₀
    viscosity: f64,

    /// Reference shear modulus of the spring G₀
    shear_modulus: f64,

    /// m_η / σ₀
    m_eta: f64,

    /// m_G / σ₀
    m_g: f64,
}

impl KelvinLaw {
    /// Allocates a new instance of the linear law
    pub fn new(viscosity: f64, shear_modulus: f64) -> Self {
        KelvinLaw {
            viscosity,
            shear_modulus,
            m_eta: 0.0,
            m_g: 0.0,
        }
    }

    /// Allocates a new instance with stress-dependent viscosity and modulus (Lubby2)
    pub fn new_stress_dependent(viscosity: f64, shear_modulus: f64, m_eta: f64, m_g: f64, sigma_0: f64) -> Self {
        KelvinLaw {
            viscosity,
            shear_modulus,
            m_eta: m_eta / sigma_0,
            m_g: m_g / sigma_0,
        }
    }

    /// Returns 1/η(q)
    fn fluidity<T: Real>(&self, q: T) -> T {
        (T::real(self.m_eta) * q).exp() / T::real(self.viscosity)
    }

    /// Returns G(q)
    fn spring<T: Real>(&self, q: T) -> T {
        T::real(self.shear_modulus) * (-T::real(self.m_g) * q).exp()
    }
}

impl<T: Real> CreepLaw<T> for KelvinLaw {
    fn name(&self) -> &'static str {
        "eqv_creep_strain_kelvin"
    }

    fn rate(&self, q: T, gamma: T) -> T {
        (q / T::real(3.0) - self.spring(q) * gamma) * self.fluidity(q)
    }

    fn rate_dq(&self, q: T, gamma: T) -> T {
        let gg = self.spring(q);
        let dgg_dq = -T::real(self.m_g) * gg;
        let stress = q / T::real(3.0) - gg * gamma;
        let dstress_dq = T::real(1.0 / 3.0) - dgg_dq * gamma;
        (dstress_dq + stress * T::real(self.m_eta)) * self.fluidity(q)
    }

    fn rate_dgamma(&self, q: T, _gamma: T) -> T {
        -self.spring(q) * self.fluidity(q)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
