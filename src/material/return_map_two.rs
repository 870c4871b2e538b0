use super::{FlowRule, LocalConvergence, LocalSolution, TrialState};
use crate::base::{Config, Real, Solver, UpdateError};

/// Holds the residual vector and the Jacobian matrix of the two-variable return map
pub(crate) struct System2<T: Real> {
    /// Residual Rᵢ = rateᵢ Δt - xᵢ
    pub(crate) r: [T; 2],

    /// Jacobian Jᵢⱼ = ∂rateᵢ/∂xⱼ Δt - δᵢⱼ
    pub(crate) jj: [[T; 2]; 2],
}

impl<T: Real> System2<T> {
    /// Evaluates the residual and the Jacobian
    pub(crate) fn new(
        rule: &dyn FlowRule<T>,
        trial: &TrialState<T>,
        gamma_old: &[f64],
        x: &[T; 2],
    ) -> Result<Self, UpdateError> {
        let dt = T::real(trial.dt);
        let mut r = [T::zero(); 2];
        let mut jj = [[T::zero(); 2]; 2];
        for i in 0..2 {
            r[i] = rule.rate(trial, gamma_old, x, i)? * dt - x[i];
            for j in 0..2 {
                jj[i][j] = rule.rate_derivative(trial, gamma_old, x, i, j)? * dt;
            }
            jj[i][i] = jj[i][i] - T::one();
        }
        Ok(System2 { r, jj })
    }

    /// Returns the Euclidean norm of the residual (real part)
    pub(crate) fn norm(&self) -> f64 {
        let (a, b) = (self.r[0].value(), self.r[1].value());
        f64::sqrt(a * a + b * b)
    }

    /// Solves J Δx = R by Cramer's rule
    ///
    /// Returns None if the determinant is exactly zero.
    pub(crate) fn step(&self) -> Option<[T; 2]> {
        let jj = &self.jj;
        let det = jj[0][0] * jj[1][1] - jj[0][1] * jj[1][0];
        if det.value() == 0.0 {
            return None;
        }
        Some([
            (jj[1][1] * self.r[0] - jj[0][1] * self.r[1]) / det,
            (jj[0][0] * self.r[1] - jj[1][0] * self.r[0]) / det,
        ])
    }
}

/// Implements the two-variable creep return map
///
/// Solves for the equivalent creep strain increments of two mechanisms sharing the same net
/// equivalent stress:
///
/// ```text
/// Rᵢ(x) = rateᵢ(x) Δt - xᵢ = 0
/// x ← x - J⁻¹ R        (2×2 Cramer's rule, starting at x = 0)
/// ```
///
/// Convergence is checked on the Euclidean norm of the residual vector.
pub struct ReturnMapTwo<'a> {
    config: &'a Config,
}

impl<'a> ReturnMapTwo<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Self {
        ReturnMapTwo { config }
    }

    /// Solves the return map
    pub fn solve<T: Real>(
        &self,
        rule: &dyn FlowRule<T>,
        trial: &TrialState<T>,
        gamma_old: &[f64],
    ) -> Result<LocalSolution<T>, UpdateError> {
        if rule.n_mechanisms() != 2 {
            return Err(UpdateError::UnknownCreepModel);
        }
        let mut control = LocalConvergence::new(self.config, Solver::TwoCreep);
        let mut x = [T::zero(); 2];
        let mut system = System2::new(rule, trial, gamma_old, &x)?;
        control.initialize(&[system.norm()]);
        for iteration in 1..=self.config.n_max_iterations {
            let dx = system.step().ok_or(UpdateError::SingularMatrix(Solver::TwoCreep))?;
            x[0] = x[0] - dx[0];
            x[1] = x[1] - dx[1];
            system = System2::new(rule, trial, gamma_old, &x)?;
            if control.analyze(iteration, &[system.norm()])? {
                control.print_footer();
                return Ok(LocalSolution {
                    x: x.to_vec(),
                    x_vol: None,
                    n_iterations: iteration,
                });
            }
        }
        Err(control.exhausted())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
