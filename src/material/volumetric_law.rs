use super::MICRO;
use crate::base::Real;

/// Implements the volumetric (compaction) rate of the Blanco-Martin/RTL2020 model
///
/// ```text
/// γ_vp   = 10⁶ γ_d                                    (γ_d = γ_L + γ_R, current values)
/// N      = ⟨p/N_z⟩^n_z - γ_vp
/// D      = ⟨p/m_z⟩^n_z + γ_vp                          (first term active only if p/M_z > 0)
/// k      = z N / D
/// rate_v = k w                                        (w = x_L + x_R)
/// ```
///
/// The rate is zero if the net pressure is zero or the denominator vanishes.
pub struct VolumetricLaw {
    /// Proportionality coefficient z
    z: f64,

    /// Reference pressure of the numerator N_z
    nn_z: f64,

    /// Pressure exponent n_z
    n_z: f64,

    /// Activation pressure of the denominator M_z
    mm_z: f64,

    /// Reference pressure of the denominator m_z
    m_z: f64,
}

/// Holds k and its derivatives
struct Ratio<T: Real> {
    /// k
    k: T,

    /// ∂k/∂p
    dk_dp: T,

    /// ∂k/∂γ_d
    dk_dgamma: T,
}

impl VolumetricLaw {
    /// Allocates a new instance
    pub fn new(z: f64, nn_z: f64, n_z: f64, mm_z: f64, m_z: f64) -> Self {
        VolumetricLaw {
            z,
            nn_z,
            n_z,
            mm_z,
            m_z,
        }
    }

    /// Returns ⟨p/a⟩^n and its derivative with respect to p
    fn bracket<T: Real>(&self, p: T, a: f64, active: bool) -> (T, T) {
        if !active {
            return (T::zero(), T::zero());
        }
        let s = p / T::real(a);
        let f = s.powf(self.n_z);
        let df = T::real(self.n_z / a) * s.powf(self.n_z - 1.0);
        (f, df)
    }

    /// Computes k and its derivatives (None if k is undefined)
    fn ratio<T: Real>(&self, p: T, gamma_d: T) -> Option<Ratio<T>> {
        if p.value() == 0.0 {
            return None;
        }
        let gamma_vp = T::real(MICRO) * gamma_d;
        let (a, da) = self.bracket(p, self.nn_z, p.value() / self.nn_z > 0.0);
        let (b, db) = self.bracket(p, self.m_z, p.value() / self.mm_z > 0.0);
        let numer = a - gamma_vp;
        let denom = b + gamma_vp;
        if denom.value() == 0.0 {
            return None;
        }
        let z = T::real(self.z);
        let dd = denom * denom;
        Some(Ratio {
            k: z * numer / denom,
            dk_dp: z * (da * denom - numer * db) / dd,
            // ∂N/∂γ_vp = -1 and ∂D/∂γ_vp = 1
            dk_dgamma: -T::real(self.z * MICRO) * (denom + numer) / dd,
        })
    }

    /// Returns the volumetric creep rate
    pub fn rate<T: Real>(&self, p: T, gamma_d: T, w: T) -> T {
        match self.ratio(p, gamma_d) {
            Some(r) => r.k * w,
            None => T::zero(),
        }
    }

    /// Returns the derivative of the rate with respect to the net pressure
    pub fn rate_dp<T: Real>(&self, p: T, gamma_d: T, w: T) -> T {
        match self.ratio(p, gamma_d) {
            Some(r) => r.dk_dp * w,
            None => T::zero(),
        }
    }

    /// Returns the derivative of the rate with respect to the deviatoric unknowns
    ///
    /// Each deviatoric unknown enters both `w` and `γ_d` with unit coefficient.
    pub fn rate_dx<T: Real>(&self, p: T, gamma_d: T, w: T) -> T {
        match self.ratio(p, gamma_d) {
            Some(r) => r.k + r.dk_dgamma * w,
            None => T::zero(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
