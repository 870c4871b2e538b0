use super::{CreepLaw, ReferenceRate};
use crate::base::Real;

/// Implements the Munson-Dawson transient (hardening/recovery) mechanism
///
/// ```text
/// γ̄ = (|q|/A₁)^n₁                     saturation strain
/// r = s γ / γ̄
/// F =  A (1 - r)^n    if s γ < γ̄       hardening
/// F = -B (r - 1)^m    otherwise        recovery
/// rate = F R(q)
/// ```
///
/// where `s` is the strain scale (1 or 10⁶ for micro-strain laws) and `R` is the reference rate.
/// The rate is zero when the net stress is zero.
pub struct MunsonDawsonLaw {
    /// Reference rate R(q)
    reference: ReferenceRate,

    /// Strain scale s
    scale: f64,

    /// Saturation reference stress A₁
    aa1: f64,

    /// Saturation exponent n₁
    n1: f64,

    /// Hardening coefficient A
    aa: f64,

    /// Recovery coefficient B
    bb: f64,

    /// Recovery exponent m
    m: f64,

    /// Hardening exponent n
    n: f64,
}

/// Holds the branch-dependent factor F and its derivatives
struct Transient<T: Real> {
    /// F
    f: T,

    /// ∂F/∂q (through the saturation strain)
    df_dq: T,

    /// ∂F/∂γ
    df_dgamma: T,
}

impl MunsonDawsonLaw {
    /// Allocates a new instance
    pub fn new(reference: ReferenceRate, scale: f64, aa1: f64, n1: f64, aa: f64, bb: f64, m: f64, n: f64) -> Self {
        MunsonDawsonLaw {
            reference,
            scale,
            aa1,
            n1,
            aa,
            bb,
            m,
            n,
        }
    }

    /// Returns the saturation strain γ̄ (in scaled units)
    pub fn saturation_strain<T: Real>(&self, q: T) -> T {
        (q.abs() / T::real(self.aa1)).powf(self.n1)
    }

    /// Indicates whether the (scaled) accumulated strain is below the saturation strain
    pub fn hardening<T: Real>(&self, q: T, gamma: T) -> bool {
        self.scale * gamma.value() < self.saturation_strain(q).value()
    }

    /// Computes F and its derivatives (requires q ≠ 0)
    fn transient<T: Real>(&self, q: T, gamma: T) -> Transient<T> {
        let sat = self.saturation_strain(q);
        let r = T::real(self.scale) * gamma / sat;
        // ∂r/∂q = -r n₁ / q  and  ∂r/∂γ = s / γ̄
        let dr_dq = -r * T::real(self.n1) / q;
        let dr_dgamma = T::real(self.scale) / sat;
        if self.hardening(q, gamma) {
            let one_minus_r = T::one() - r;
            let f = T::real(self.aa) * one_minus_r.powf(self.n);
            let df_dr = -T::real(self.aa * self.n) * one_minus_r.powf(self.n - 1.0);
            Transient {
                f,
                df_dq: df_dr * dr_dq,
                df_dgamma: df_dr * dr_dgamma,
            }
        } else {
            let r_minus_one = r - T::one();
            let f = -T::real(self.bb) * r_minus_one.powf(self.m);
            let df_dr = -T::real(self.bb * self.m) * r_minus_one.powf(self.m - 1.0);
            Transient {
                f,
                df_dq: df_dr * dr_dq,
                df_dgamma: df_dr * dr_dgamma,
            }
        }
    }
}

impl<T: Real> CreepLaw<T> for MunsonDawsonLaw {
    fn name(&self) -> &'static str {
        "eqv_creep_strain_R"
    }

    fn rate(&self, q: T, gamma: T) -> T {
        if q.value() == 0.0 {
            return T::zero();
        }
        self.transient(q, gamma).f * self.reference.rate(q)
    }

    fn rate_dq(&self, q: T, gamma: T) -> T {
        if q.value() == 0.0 {
            return T::zero();
        }
        let tr = self.transient(q, gamma);
        tr.df_dq * self.reference.rate(q) + tr.f * self.reference.rate_dq(q)
    }

    fn rate_dgamma(&self, q: T, gamma: T) -> T {
        if q.value() == 0.0 {
            return T::zero();
        }
        self.transient(q, gamma).df_dgamma * self.reference.rate(q)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
