use crate::base::Real;

/// Conversion factor from strain to micro-strain
pub const MICRO: f64 = 1.0e6;

/// Defines the stress-only (reference) rate shared by the nonlinear creep laws
///
/// All powers of the net stress are signed, i.e., `(q/A)^n` means `sign(q) |q/A|^n`,
/// so that a negative net stress (after a Newton overshoot) yields a reverse rate.
#[derive(Clone, Copy, Debug)]
pub enum ReferenceRate {
    /// Power law
    ///
    /// ```text
    /// R(q) = c (q/A₂)^n₂
    /// ```
    Power {
        /// Multiplier c (1 or 10⁻⁶ for micro-strain laws)
        factor: f64,

        /// Reference stress A₂
        aa2: f64,

        /// Exponent n₂
        n2: f64,
    },

    /// Sum of two power laws raised to 1/α (Lemaitre)
    ///
    /// ```text
    /// R(q) = 10⁻⁶ ((q/kr₁)^β₁ + (q/kr₂)^β₂)^(1/α)
    /// ```
    Lemaitre {
        /// Hardening exponent α
        alpha: f64,

        /// First reference stress kr₁
        kr1: f64,

        /// Second reference stress kr₂
        kr2: f64,

        /// First exponent β₁
        beta1: f64,

        /// Second exponent β₂
        beta2: f64,
    },
}

/// Returns d/dx [sign(x)|x|ⁿ] = n |x|ⁿ⁻¹ (with the limit at x = 0)
fn signed_pow_deriv<T: Real>(x: T, n: f64) -> T {
    if x.value() == 0.0 {
        if n == 1.0 {
            T::one()
        } else {
            T::zero()
        }
    } else {
        T::real(n) * x.abs().powf(n - 1.0)
    }
}

impl ReferenceRate {
    /// Evaluates R(q)
    pub fn rate<T: Real>(&self, q: T) -> T {
        if q.value() == 0.0 {
            return T::zero();
        }
        match *self {
            ReferenceRate::Power { factor, aa2, n2 } => T::real(factor) * (q / T::real(aa2)).signed_powf(n2),
            ReferenceRate::Lemaitre {
                alpha,
                kr1,
                kr2,
                beta1,
                beta2,
            } => {
                let s = (q / T::real(kr1)).signed_powf(beta1) + (q / T::real(kr2)).signed_powf(beta2);
                T::real(1.0 / MICRO) * s.signed_powf(1.0 / alpha)
            }
        }
    }

    /// Evaluates dR/dq
    pub fn rate_dq<T: Real>(&self, q: T) -> T {
        if q.value() == 0.0 {
            return T::zero();
        }
        match *self {
            ReferenceRate::Power { factor, aa2, n2 } => {
                T::real(factor / aa2) * signed_pow_deriv(q / T::real(aa2), n2)
            }
            ReferenceRate::Lemaitre {
                alpha,
                kr1,
                kr2,
                beta1,
                beta2,
            } => {
                let s = (q / T::real(kr1)).signed_powf(beta1) + (q / T::real(kr2)).signed_powf(beta2);
                let ds_dq = T::real(1.0 / kr1) * signed_pow_deriv(q / T::real(kr1), beta1)
                    + T::real(1.0 / kr2) * signed_pow_deriv(q / T::real(kr2), beta2);
                T::real(1.0 / MICRO) * signed_pow_deriv(s, 1.0 / alpha) * ds_dq
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
