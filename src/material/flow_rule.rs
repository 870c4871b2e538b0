use super::{CreepLaw, TrialState};
use crate::base::{Real, UpdateError};
use russell_lab::Vector;

/// Specifies the interface of flow rules used by the creep return maps
///
/// The unknowns `x` are the equivalent creep strain increments of each mechanism over the
/// current time step; `gamma_old` holds the accumulated equivalent creep strains of the
/// previous step (read-only during the iterations).
pub trait FlowRule<T: Real>: Send + Sync {
    /// Returns the number of mechanisms (1 or 2)
    fn n_mechanisms(&self) -> usize;

    /// Returns the name of the accumulated strain of each mechanism
    fn names(&self) -> Vec<&'static str>;

    /// Returns the creep rate of mechanism `i`
    fn rate(&self, trial: &TrialState<T>, gamma_old: &[f64], x: &[T], i: usize) -> Result<T, UpdateError>;

    /// Returns the derivative of the creep rate of mechanism `i` with respect to the unknown `j`
    fn rate_derivative(
        &self,
        trial: &TrialState<T>,
        gamma_old: &[f64],
        x: &[T],
        i: usize,
        j: usize,
    ) -> Result<T, UpdateError>;

    /// Performs calculations before the return map (e.g., checks the history)
    fn pre_solve(&self, gamma_old: &[f64]) -> Result<(), UpdateError> {
        if gamma_old.len() < self.n_mechanisms() {
            return Err(UpdateError::UnknownCreepModel);
        }
        Ok(())
    }

    /// Writes the accumulated strains after a converged return map
    ///
    /// ```text
    /// γᵢ = γᵢ_old + xᵢ
    /// ```
    fn post_solve(&self, x: &[T], internal_values: &mut Vector) {
        for i in 0..self.n_mechanisms() {
            internal_values[i] += x[i].value();
        }
    }
}

/// Implements a flow rule whose mechanisms share the same net equivalent stress
///
/// ```text
/// q = q_trial - 3G Σⱼ xⱼ
/// rateᵢ = rateᵢ(q, γᵢ_old + xᵢ)
/// ∂rateᵢ/∂xⱼ = -3G ∂rateᵢ/∂q + δᵢⱼ ∂rateᵢ/∂γᵢ
/// ```
///
/// Each mechanism is thus coupled to the current unknowns of all other mechanisms.
pub struct SharedStressFlowRule<T: Real> {
    /// Holds the mechanisms
    laws: Vec<Box<dyn CreepLaw<T>>>,
}

impl<T: Real> SharedStressFlowRule<T> {
    /// Allocates a new instance
    pub fn new(laws: Vec<Box<dyn CreepLaw<T>>>) -> Self {
        SharedStressFlowRule { laws }
    }

    /// Returns the mechanism or an error if the index is out of range
    fn law(&self, i: usize) -> Result<&dyn CreepLaw<T>, UpdateError> {
        match self.laws.get(i) {
            Some(law) => Ok(law.as_ref()),
            None => Err(UpdateError::UnknownCreepModel),
        }
    }

    /// Returns the net stress and the accumulated strain of mechanism `i`
    fn arguments(&self, trial: &TrialState<T>, gamma_old: &[f64], x: &[T], i: usize) -> (T, T) {
        let mut x_sum = T::zero();
        for xj in x.iter().take(self.laws.len()) {
            x_sum = x_sum + *xj;
        }
        (trial.net_q(x_sum), T::real(gamma_old[i]) + x[i])
    }
}

impl<T: Real> FlowRule<T> for SharedStressFlowRule<T> {
    fn n_mechanisms(&self) -> usize {
        self.laws.len()
    }

    fn names(&self) -> Vec<&'static str> {
        self.laws.iter().map(|law| law.name()).collect()
    }

    fn rate(&self, trial: &TrialState<T>, gamma_old: &[f64], x: &[T], i: usize) -> Result<T, UpdateError> {
        let law = self.law(i)?;
        let (q, gamma) = self.arguments(trial, gamma_old, x, i);
        Ok(law.rate(q, gamma))
    }

    fn rate_derivative(
        &self,
        trial: &TrialState<T>,
        gamma_old: &[f64],
        x: &[T],
        i: usize,
        j: usize,
    ) -> Result<T, UpdateError> {
        let law = self.law(i)?;
        if j >= self.laws.len() {
            return Err(UpdateError::UnknownCreepModel);
        }
        let (q, gamma) = self.arguments(trial, gamma_old, x, i);
        let mut d = -T::real(3.0 * trial.shear) * law.rate_dq(q, gamma);
        if i == j {
            d = d + law.rate_dgamma(q, gamma);
        }
        Ok(d)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{FlowRule, SharedStressFlowRule};
    use crate::base::{Elasticity, SymTensor, UpdateError};
    use crate::material::testing::{assert_derivative, central_difference};
    use crate::material::{CreepLaw, KelvinLaw, MaxwellLaw, MunsonDawsonLaw, ReferenceRate, TrialState, MICRO};
    use russell_lab::Vector;

    fn trial(q: f64) -> TrialState<f64> {
        // uniaxial compression with σd = q
        let sigma = SymTensor::from_components(-q, 0.0, 0.0, 0.0, 0.0, 0.0);
        TrialState::new(&sigma, &Elasticity::new(2000.0, 1000.0).unwrap(), 1.0)
    }

    fn burger() -> SharedStressFlowRule<f64> {
        let laws: Vec<Box<dyn CreepLaw<f64>>> =
            vec![Box::new(MaxwellLaw::new(1e4)), Box::new(KelvinLaw::new(1e3, 500.0))];
        SharedStressFlowRule::new(laws)
    }

    #[test]
    fn dispatch_captures_errors() {
        let rule = burger();
        let tr = trial(30.0);
        let x = [0.0, 0.0];
        assert_eq!(rule.n_mechanisms(), 2);
        assert_eq!(rule.names(), &["eqv_creep_strain_maxwell", "eqv_creep_strain_kelvin"]);
        assert_eq!(rule.rate(&tr, &[0.0, 0.0], &x, 2).err(), Some(UpdateError::UnknownCreepModel));
        assert_eq!(
            rule.rate_derivative(&tr, &[0.0, 0.0], &x, 0, 2).err(),
            Some(UpdateError::UnknownCreepModel)
        );
        assert_eq!(rule.pre_solve(&[0.0]).err(), Some(UpdateError::UnknownCreepModel));
        assert_eq!(rule.pre_solve(&[0.0, 0.0]), Ok(()));
    }

    #[test]
    fn post_solve_accumulates() {
        let rule = burger();
        let mut values = Vector::from(&[0.1, 0.2]);
        rule.post_solve(&[0.01, 0.02], &mut values);
        assert_eq!(values.as_data(), &[0.11, 0.22]);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let reference = ReferenceRate::Power {
            factor: 1.0 / MICRO,
            aa2: 0.5,
            n2: 4.0,
        };
        let laws: Vec<Box<dyn CreepLaw<f64>>> = vec![
            Box::new(MaxwellLaw::new(1e4)),
            Box::new(MunsonDawsonLaw::new(reference, MICRO, 0.3, 3.0, 0.5, 0.05, 5.0, 5.0)),
        ];
        let rule = SharedStressFlowRule::new(laws);
        let tr = trial(10.0);
        let gamma_sat = f64::powf(10.0 / 0.3, 3.0) / MICRO;
        for k in 0..20 {
            let gamma_old = [0.0, gamma_sat * (0.1 + 0.1 * (k as f64))];
            let x = [1e-5 * (k as f64 + 1.0), 1e-6 * (k as f64 + 1.0)];
            for i in 0..2 {
                let f = rule.rate(&tr, &gamma_old, &x, i).unwrap();
                for j in 0..2 {
                    let ana = rule.rate_derivative(&tr, &gamma_old, &x, i, j).unwrap();
                    let num = central_difference(
                        |v| {
                            let mut xx = x;
                            xx[j] = v;
                            rule.rate(&tr, &gamma_old, &xx, i).unwrap()
                        },
                        x[j],
                    );
                    assert_derivative(&format!("drate{}/dx{} (k={})", i, j, k), ana, num, f, x[j], 1e-5);
                }
            }
        }
    }
}
