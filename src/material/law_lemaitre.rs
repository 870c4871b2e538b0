use super::{CreepLaw, ReferenceRate};
use crate::base::Real;

/// Implements the strain-hardening Lemaitre mechanism
///
/// ```text
/// rate = α R(q) (s γ)^(1 - 1/α)    if γ > 0
/// rate = α R(q)                    if γ ≤ 0
/// ```
///
/// where `s` is the strain scale (1 or 10⁶ for micro-strain laws) and `R` is the reference rate.
pub struct LemaitreLaw {
    /// Hardening exponent α
    alpha: f64,

    /// Reference rate R(q)
    reference: ReferenceRate,

    /// Strain scale s
    scale: f64,
}

impl LemaitreLaw {
    /// Allocates a new instance
    pub fn new(alpha: f64, reference: ReferenceRate, scale: f64) -> Self {
        LemaitreLaw {
            alpha,
            reference,
            scale,
        }
    }

    /// Returns the hardening function (s γ)^(1 - 1/α) or one if γ ≤ 0
    fn hardening<T: Real>(&self, gamma: T) -> T {
        if gamma.value() <= 0.0 {
            T::one()
        } else {
            (T::real(self.scale) * gamma).powf(1.0 - 1.0 / self.alpha)
        }
    }
}

impl<T: Real> CreepLaw<T> for LemaitreLaw {
    fn name(&self) -> &'static str {
        "eqv_creep_strain_L"
    }

    fn rate(&self, q: T, gamma: T) -> T {
        T::real(self.alpha) * self.reference.rate(q) * self.hardening(gamma)
    }

    fn rate_dq(&self, q: T, gamma: T) -> T {
        T::real(self.alpha) * self.reference.rate_dq(q) * self.hardening(gamma)
    }

    fn rate_dgamma(&self, q: T, gamma: T) -> T {
        if gamma.value() <= 0.0 {
            return T::zero();
        }
        // d/dγ (sγ)^(1-1/α) = s (1 - 1/α) (sγ)^(-1/α)
        let sg = T::real(self.scale) * gamma;
        let dh = T::real(self.scale * (1.0 - 1.0 / self.alpha)) * sg.powf(-1.0 / self.alpha);
        T::real(self.alpha) * self.reference.rate(q) * dh
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
