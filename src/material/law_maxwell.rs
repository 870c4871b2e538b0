use super::CreepLaw;
use crate::base::Real;

/// Implements the (optionally stress-dependent) Maxwell dashpot
///
/// ```text
/// η(q) = η₀ exp(-m q / σ₀)
/// rate = q / (3 η(q))
/// ```
///
/// With `m = 0` the law is linear.
pub struct MaxwellLaw {
    /// Reference viscosity η₀
    viscosity: f64,

    /// Stress-dependence coefficient m divided by the reference stress σ₀
    m_by_sigma_0: f64,
}

impl MaxwellLaw {
    /// Allocates a new instance of the linear law
    pub fn new(viscosity: f64) -> Self {
        MaxwellLaw {
            viscosity,
            m_by_sigma_0: 0.0,
        }
    }

    /// Allocates a new instance with stress-dependent viscosity (Lubby2)
    pub fn new_stress_dependent(viscosity: f64, m: f64, sigma_0: f64) -> Self {
        MaxwellLaw {
            viscosity,
            m_by_sigma_0: m / sigma_0,
        }
    }

    /// Returns 1/(3 η(q))
    fn fluidity<T: Real>(&self, q: T) -> T {
        if self.m_by_sigma_0 == 0.0 {
            T::real(1.0 / (3.0 * self.viscosity))
        } else {
            (T::real(self.m_by_sigma_0) * q).exp() / T::real(3.0 * self.viscosity)
        }
    }
}

impl<T: Real> CreepLaw<T> for MaxwellLaw {
    fn name(&self) -> &'static str {
        "eqv_creep_strain_maxwell"
    }

    fn rate(&self, q: T, _gamma: T) -> T {
        q * self.fluidity(q)
    }

    fn rate_dq(&self, q: T, _gamma: T) -> T {
        // d/dq [q f(q)] = f (1 + q m/σ₀)
        self.fluidity(q) * (T::one() + T::real(self.m_by_sigma_0) * q)
    }

    fn rate_dgamma(&self, _q: T, _gamma: T) -> T {
        T::zero()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::MaxwellLaw;
    use crate::material::testing::check_law_derivatives;
    use crate::material::CreepLaw;
    use russell_lab::approx_eq;

    #[test]
    fn linear_law_works() {
        let law = MaxwellLaw::new(1e18);
        approx_eq(CreepLaw::<f64>::rate(&law, 3e7, 0.0), 1e-11, 1e-25);
        approx_eq(CreepLaw::<f64>::rate_dq(&law, 3e7, 0.0), 1.0 / 3e18, 1e-30);
        assert_eq!(CreepLaw::<f64>::rate_dgamma(&law, 3e7, 0.5), 0.0);
        assert_eq!(CreepLaw::<f64>::rate(&law, 0.0, 0.0), 0.0);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let law = MaxwellLaw::new_stress_dependent(1e3, 0.3, 2.0);
        let points: Vec<(f64, f64)> = (0..20).map(|i| (-5.0 + 0.55 * (i as f64), 0.01 * (i as f64))).collect();
        check_law_derivatives(&law, &points, 1e-6);
    }
}
