use super::{FlowRule, LocalConvergence, LocalSolution, ReturnMapTwo, System2, TrialState, VolumetricLaw};
use crate::base::{Config, Real, Solver, Staging, UpdateError};

/// Holds the volumetric residual and its derivatives
struct SystemVol<T: Real> {
    /// R_v = rate_v Δt - x_v
    r: T,

    /// ∂R_v/∂xᵢ (same for both deviatoric unknowns)
    j_dev: T,

    /// ∂R_v/∂x_v
    j_vol: T,
}

impl<T: Real> SystemVol<T> {
    /// Evaluates the volumetric residual and its derivatives
    fn new(law: &VolumetricLaw, trial: &TrialState<T>, gamma_old: &[f64], x: &[T; 2], x_vol: T) -> Self {
        let dt = T::real(trial.dt);
        let w = x[0] + x[1];
        let gamma_d = T::real(gamma_old[0] + gamma_old[1]) + w;
        let p = trial.net_p(x_vol);
        SystemVol {
            r: law.rate(p, gamma_d, w) * dt - x_vol,
            j_dev: law.rate_dx(p, gamma_d, w) * dt,
            // ∂p/∂x_v = -K
            j_vol: -law.rate_dp(p, gamma_d, w) * T::real(trial.bulk) * dt - T::one(),
        }
    }

    /// Returns the absolute value of the residual (real part)
    fn norm(&self) -> f64 {
        f64::abs(self.r.value())
    }
}

/// Implements the deviatoric-volumetric creep return map
///
/// The two deviatoric unknowns are those of [ReturnMapTwo]. The volumetric unknown `x_v` is the
/// volumetric creep strain increment (positive in compaction) with net pressure `p = p_trial - K x_v`:
///
/// ```text
/// R_v = rate_v(x₀, x₁, x_v) Δt - x_v = 0
/// ```
///
/// With [Staging::Sequential], the deviatoric problem is converged first and then `x_v` is
/// solved with the deviatoric unknowns frozen. With [Staging::Simultaneous], all three unknowns
/// are updated together using the block lower-triangular Jacobian (the deviatoric residuals do
/// not depend on `x_v`):
///
/// ```text
/// Δx_d = J_dd⁻¹ R_d
/// Δx_v = (R_v - J_v0 Δx₀ - J_v1 Δx₁) / J_vv
/// ```
///
/// and both the deviatoric and the volumetric residuals must satisfy the tolerances.
pub struct ReturnMapDevVol<'a> {
    config: &'a Config,
}

impl<'a> ReturnMapDevVol<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Self {
        ReturnMapDevVol { config }
    }

    /// Solves the return map
    ///
    /// Without a volumetric law, the result is exactly that of [ReturnMapTwo].
    pub fn solve<T: Real>(
        &self,
        rule: &dyn FlowRule<T>,
        volumetric: Option<&VolumetricLaw>,
        trial: &TrialState<T>,
        gamma_old: &[f64],
    ) -> Result<LocalSolution<T>, UpdateError> {
        let law = match volumetric {
            Some(law) => law,
            None => return ReturnMapTwo::new(self.config).solve(rule, trial, gamma_old),
        };
        if rule.n_mechanisms() != 2 {
            return Err(UpdateError::UnknownCreepModel);
        }
        match self.config.staging {
            Staging::Sequential => self.solve_sequential(rule, law, trial, gamma_old),
            Staging::Simultaneous => self.solve_simultaneous(rule, law, trial, gamma_old),
        }
    }

    /// Converges the deviatoric unknowns and then the volumetric unknown
    fn solve_sequential<T: Real>(
        &self,
        rule: &dyn FlowRule<T>,
        law: &VolumetricLaw,
        trial: &TrialState<T>,
        gamma_old: &[f64],
    ) -> Result<LocalSolution<T>, UpdateError> {
        let deviatoric = ReturnMapTwo::new(self.config).solve(rule, trial, gamma_old)?;
        let x = [deviatoric.x[0], deviatoric.x[1]];
        let mut control = LocalConvergence::new(self.config, Solver::Volumetric);
        let mut x_vol = T::zero();
        let mut system = SystemVol::new(law, trial, gamma_old, &x, x_vol);
        control.initialize(&[system.norm()]);
        for iteration in 1..=self.config.n_max_iterations {
            if system.j_vol.value() == 0.0 {
                return Err(UpdateError::SingularMatrix(Solver::Volumetric));
            }
            x_vol = x_vol - system.r / system.j_vol;
            system = SystemVol::new(law, trial, gamma_old, &x, x_vol);
            if control.analyze(iteration, &[system.norm()])? {
                control.print_footer();
                return Ok(LocalSolution {
                    x: deviatoric.x,
                    x_vol: Some(x_vol),
                    n_iterations: deviatoric.n_iterations + iteration,
                });
            }
        }
        Err(control.exhausted())
    }

    /// Iterates on the three unknowns together
    fn solve_simultaneous<T: Real>(
        &self,
        rule: &dyn FlowRule<T>,
        law: &VolumetricLaw,
        trial: &TrialState<T>,
        gamma_old: &[f64],
    ) -> Result<LocalSolution<T>, UpdateError> {
        let singular = UpdateError::SingularMatrix(Solver::DeviatoricVolumetric);
        let mut control = LocalConvergence::new(self.config, Solver::DeviatoricVolumetric);
        let mut x = [T::zero(); 2];
        let mut x_vol = T::zero();
        let mut dev = System2::new(rule, trial, gamma_old, &x)?;
        let mut vol = SystemVol::new(law, trial, gamma_old, &x, x_vol);
        control.initialize(&[dev.norm(), vol.norm()]);
        for iteration in 1..=self.config.n_max_iterations {
            let dx = dev.step().ok_or(singular)?;
            if vol.j_vol.value() == 0.0 {
                return Err(singular);
            }
            let dx_vol = (vol.r - vol.j_dev * (dx[0] + dx[1])) / vol.j_vol;
            x[0] = x[0] - dx[0];
            x[1] = x[1] - dx[1];
            x_vol = x_vol - dx_vol;
            dev = System2::new(rule, trial, gamma_old, &x)?;
            vol = SystemVol::new(law, trial, gamma_old, &x, x_vol);
            if control.analyze(iteration, &[dev.norm(), vol.norm()])? {
                control.print_footer();
                return Ok(LocalSolution {
                    x: x.to_vec(),
                    x_vol: Some(x_vol),
                    n_iterations: iteration,
                });
            }
        }
        Err(control.exhausted())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ReturnMapDevVol, SystemVol};
    use crate::base::{Config, Elasticity, SampleParams, Staging, SymTensor};
    use crate::material::{CreepUpdate, ReturnMapTwo, TrialState};
    use russell_lab::approx_eq;

    // MPa and days
    fn trial(q: f64, p: f64) -> TrialState<f64> {
        // axisymmetric compression: σ₁ = -(p + 2q/3), σ₂ = σ₃ = -(p - q/3)
        let sigma = SymTensor::from_components(-(p + 2.0 * q / 3.0), -(p - q / 3.0), -(p - q / 3.0), 0.0, 0.0, 0.0);
        TrialState::new(&sigma, &Elasticity::new(20_000.0, 10_000.0).unwrap(), 0.01)
    }

    #[test]
    fn without_volumetric_law_equals_two_variable_solver() {
        let config = Config::new();
        let param = SampleParams::param_blanco_martin_rtl2020(false);
        let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
        assert!(update.volumetric.is_none());
        let tr = trial(10.0, 15.0);
        let gamma_old = [1e-4, 5e-5];
        let a = ReturnMapDevVol::new(&config)
            .solve(update.actual.as_ref(), None, &tr, &gamma_old)
            .unwrap();
        let b = ReturnMapTwo::new(&config)
            .solve(update.actual.as_ref(), &tr, &gamma_old)
            .unwrap();
        assert_eq!(a.x, b.x);
        assert_eq!(a.x_vol, None);
        assert_eq!(a.n_iterations, b.n_iterations);
    }

    #[test]
    fn zero_pressure_gives_zero_volumetric_increment() {
        let config = Config::new();
        let param = SampleParams::param_blanco_martin_rtl2020(true);
        let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
        let tr = trial(10.0, 0.0);
        assert_eq!(tr.p, 0.0);
        let sol = ReturnMapDevVol::new(&config)
            .solve(update.actual.as_ref(), update.volumetric.as_ref(), &tr, &[1e-4, 5e-5])
            .unwrap();
        assert_eq!(sol.x_vol, Some(0.0));
        assert!(sol.x[0] > 0.0);
    }

    #[test]
    fn sequential_and_simultaneous_agree() {
        let mut config = Config::new();
        config.set_abs_tol(1e-15).unwrap().set_rel_tol(1e-12).unwrap();
        let param = SampleParams::param_blanco_martin_rtl2020(true);
        let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
        let law = update.volumetric.as_ref();
        let tr = trial(10.0, 15.0);
        let gamma_old = [1e-4, 5e-5];

        config.set_staging(Staging::Sequential).unwrap();
        let seq = ReturnMapDevVol::new(&config)
            .solve(update.actual.as_ref(), law, &tr, &gamma_old)
            .unwrap();

        config.set_staging(Staging::Simultaneous).unwrap();
        let sim = ReturnMapDevVol::new(&config)
            .solve(update.actual.as_ref(), law, &tr, &gamma_old)
            .unwrap();

        let (xv_seq, xv_sim) = (seq.x_vol.unwrap(), sim.x_vol.unwrap());
        assert!(xv_seq != 0.0);
        approx_eq(seq.x[0], sim.x[0], 1e-12);
        approx_eq(seq.x[1], sim.x[1], 1e-12);
        approx_eq(xv_seq, xv_sim, 1e-12);

        // the volumetric residual vanishes at the solution
        let x = [sim.x[0], sim.x[1]];
        let system = SystemVol::new(update.volumetric.as_ref().unwrap(), &tr, &gamma_old, &x, xv_sim);
        assert!(system.norm() < 1e-14);
    }
}
