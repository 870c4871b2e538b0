use num_dual::{Dual64, DualNum};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Defines the scalar capability required by the return-map solvers
///
/// The solvers are written once against this trait and instantiated either with a plain `f64`
/// or with a forward-mode dual number ([Dual64]). With a dual number, every quantity from the
/// trial stress to the updated stress carries its derivative, so the caller obtains the exact
/// derivative of the converged stress with respect to whatever seeded the trial stress.
///
/// Comparisons (branches, guards) are made on [Real::value], i.e., on the real part only.
pub trait Real:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lifts a constant into the scalar type (zero derivative)
    fn real(value: f64) -> Self;

    /// Returns the real part
    fn value(&self) -> f64;

    /// Returns the square root
    fn sqrt(self) -> Self;

    /// Returns the exponential
    fn exp(self) -> Self;

    /// Returns the natural logarithm
    fn ln(self) -> Self;

    /// Returns the absolute value
    fn abs(self) -> Self;

    /// Returns self raised to a constant power
    fn powf(self, n: f64) -> Self;

    /// Returns the zero scalar
    #[inline]
    fn zero() -> Self {
        Self::real(0.0)
    }

    /// Returns the unit scalar
    #[inline]
    fn one() -> Self {
        Self::real(1.0)
    }

    /// Returns the signed power sign(x)·|x|ⁿ (zero if x is zero)
    #[inline]
    fn signed_powf(self, n: f64) -> Self {
        let v = self.value();
        if v > 0.0 {
            self.powf(n)
        } else if v < 0.0 {
            -((-self).powf(n))
        } else {
            Self::zero()
        }
    }
}

impl Real for f64 {
    #[inline]
    fn real(value: f64) -> Self {
        value
    }
    #[inline]
    fn value(&self) -> f64 {
        *self
    }
    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }
    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }
    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }
    #[inline]
    fn powf(self, n: f64) -> Self {
        f64::powf(self, n)
    }
}

impl Real for Dual64 {
    #[inline]
    fn real(value: f64) -> Self {
        Dual64::new(value, 0.0)
    }
    #[inline]
    fn value(&self) -> f64 {
        self.re
    }
    #[inline]
    fn sqrt(self) -> Self {
        DualNum::sqrt(&self)
    }
    #[inline]
    fn exp(self) -> Self {
        DualNum::exp(&self)
    }
    #[inline]
    fn ln(self) -> Self {
        DualNum::ln(&self)
    }
    #[inline]
    fn abs(self) -> Self {
        if self.re < 0.0 {
            -self
        } else {
            self
        }
    }
    #[inline]
    fn powf(self, n: f64) -> Self {
        DualNum::powf(&self, n)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
