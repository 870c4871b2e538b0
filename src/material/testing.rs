use super::{CreepLaw, FlowRule, TrialState};
use crate::base::UpdateError;
use num_dual::Dual64;

/// Returns the central finite difference of a scalar function
#[allow(dead_code)]
pub(crate) fn central_difference<F: Fn(f64) -> f64>(f: F, at: f64) -> f64 {
    let h = if at == 0.0 { 1e-9 } else { 1e-7 * f64::abs(at) };
    (f(at + h) - f(at - h)) / (2.0 * h)
}

/// Panics if an analytical derivative differs from the numerical one (relative comparison)
///
/// The reference scale is the largest of |ana|, |num| and |f|/max(|x|,1).
#[allow(dead_code)]
pub(crate) fn assert_derivative(label: &str, ana: f64, num: f64, f: f64, x: f64, tol: f64) {
    let scale = f64::max(f64::max(f64::abs(ana), f64::abs(num)), f64::abs(f) / f64::max(f64::abs(x), 1.0));
    if scale == 0.0 {
        return;
    }
    let diff = f64::abs(ana - num);
    if diff > tol * scale {
        panic!(
            "{}: analytical derivative {:?} and numerical derivative {:?} differ by {:?} (relative {:?})",
            label,
            ana,
            num,
            diff,
            diff / scale
        );
    }
}

/// Checks the analytical derivatives of a creep law at a set of (q, γ) points
///
/// The derivative with respect to q is compared with both a central finite difference
/// and the dual-number (forward-mode) derivative.
#[allow(dead_code)]
pub(crate) fn check_law_derivatives<L>(law: &L, points: &[(f64, f64)], tol: f64)
where
    L: CreepLaw<f64> + CreepLaw<Dual64>,
{
    for (q, gamma) in points {
        let (q, gamma) = (*q, *gamma);
        let f = CreepLaw::<f64>::rate(law, q, gamma);

        let ana = CreepLaw::<f64>::rate_dq(law, q, gamma);
        let num = central_difference(|x| CreepLaw::<f64>::rate(law, x, gamma), q);
        assert_derivative(&format!("drate/dq at q={}, γ={}", q, gamma), ana, num, f, q, tol);

        let dual = CreepLaw::<Dual64>::rate(law, Dual64::new(q, 1.0), Dual64::new(gamma, 0.0));
        assert_derivative(&format!("drate/dq (dual) at q={}, γ={}", q, gamma), ana, dual.eps, f, q, 1e-10);

        let ana = CreepLaw::<f64>::rate_dgamma(law, q, gamma);
        let num = central_difference(|x| CreepLaw::<f64>::rate(law, q, x), gamma);
        assert_derivative(&format!("drate/dγ at q={}, γ={}", q, gamma), ana, num, f, gamma, tol);
    }
}

/// Implements a flow rule reporting a wrong (zero) derivative
///
/// ```text
/// rateᵢ = 2 (γᵢ_old + xᵢ) + 1
/// ```
///
/// With Δt = 1 and the reported Jacobian equal to -I, the Newton update becomes x ← 2x + 1.
#[allow(dead_code)]
pub(crate) struct WrongDerivativeRule {
    pub(crate) n_mechanisms: usize,
}

impl FlowRule<f64> for WrongDerivativeRule {
    fn n_mechanisms(&self) -> usize {
        self.n_mechanisms
    }
    fn names(&self) -> Vec<&'static str> {
        vec!["wrong"; self.n_mechanisms]
    }
    fn rate(&self, _: &TrialState<f64>, gamma_old: &[f64], x: &[f64], i: usize) -> Result<f64, UpdateError> {
        Ok(2.0 * (gamma_old[i] + x[i]) + 1.0)
    }
    fn rate_derivative(
        &self,
        _: &TrialState<f64>,
        _: &[f64],
        _: &[f64],
        _: usize,
        _: usize,
    ) -> Result<f64, UpdateError> {
        Ok(0.0)
    }
}

/// Implements a flow rule whose Jacobian vanishes when Δt = 1
///
/// ```text
/// rateᵢ = γᵢ_old + xᵢ + 1
/// ```
#[allow(dead_code)]
pub(crate) struct SingularRule {
    pub(crate) n_mechanisms: usize,
}

impl FlowRule<f64> for SingularRule {
    fn n_mechanisms(&self) -> usize {
        self.n_mechanisms
    }
    fn names(&self) -> Vec<&'static str> {
        vec!["singular"; self.n_mechanisms]
    }
    fn rate(&self, _: &TrialState<f64>, gamma_old: &[f64], x: &[f64], i: usize) -> Result<f64, UpdateError> {
        Ok(gamma_old[i] + x[i] + 1.0)
    }
    fn rate_derivative(
        &self,
        _: &TrialState<f64>,
        _: &[f64],
        _: &[f64],
        i: usize,
        j: usize,
    ) -> Result<f64, UpdateError> {
        Ok(if i == j { 1.0 } else { 0.0 })
    }
}
