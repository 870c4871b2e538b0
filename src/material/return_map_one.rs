use super::{FlowRule, LocalConvergence, LocalSolution, TrialState};
use crate::base::{Config, Real, Solver, UpdateError};

/// Implements the single-variable creep return map
///
/// Solves for the equivalent creep strain increment `x` over the time step:
///
/// ```text
/// R(x) = rate(x) Δt - x = 0
/// J(x) = rate'(x) Δt - 1
/// x ← x - R/J        (starting at x = 0)
/// ```
///
/// At least one Newton update is always performed.
pub struct ReturnMapOne<'a> {
    config: &'a Config,
}

impl<'a> ReturnMapOne<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Self {
        ReturnMapOne { config }
    }

    /// Computes the residual and its derivative
    fn residual<T: Real>(
        rule: &dyn FlowRule<T>,
        trial: &TrialState<T>,
        gamma_old: &[f64],
        x: T,
    ) -> Result<(T, T), UpdateError> {
        let dt = T::real(trial.dt);
        let xx = [x];
        let r = rule.rate(trial, gamma_old, &xx, 0)? * dt - x;
        let j = rule.rate_derivative(trial, gamma_old, &xx, 0, 0)? * dt - T::one();
        Ok((r, j))
    }

    /// Solves the return map
    pub fn solve<T: Real>(
        &self,
        rule: &dyn FlowRule<T>,
        trial: &TrialState<T>,
        gamma_old: &[f64],
    ) -> Result<LocalSolution<T>, UpdateError> {
        if rule.n_mechanisms() != 1 {
            return Err(UpdateError::UnknownCreepModel);
        }
        let mut control = LocalConvergence::new(self.config, Solver::Creep);
        let mut x = T::zero();
        let (mut r, mut j) = ReturnMapOne::residual(rule, trial, gamma_old, x)?;
        control.initialize(&[r.value().abs()]);
        for iteration in 1..=self.config.n_max_iterations {
            if j.value() == 0.0 {
                return Err(UpdateError::SingularMatrix(Solver::Creep));
            }
            x = x - r / j;
            (r, j) = ReturnMapOne::residual(rule, trial, gamma_old, x)?;
            if control.analyze(iteration, &[r.value().abs()])? {
                control.print_footer();
                return Ok(LocalSolution {
                    x: vec![x],
                    x_vol: None,
                    n_iterations: iteration,
                });
            }
        }
        Err(control.exhausted())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
