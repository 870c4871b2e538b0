use super::{
    CreepLaw, FlowRule, KelvinLaw, LemaitreLaw, LocalSolution, LocalState, MaxwellLaw, MunsonDawsonLaw, ReferenceRate,
    ReturnMapDevVol, ReturnMapOne, SharedStressFlowRule, TrialState, VolumetricLaw, MICRO,
};
use crate::base::{Config, Elasticity, ParamCreep, Real, SymTensor, UpdateError};
use crate::StrError;

/// Name of the accumulated volumetric creep strain
pub const VOLUMETRIC_CREEP_STRAIN: &str = "vol_creep_strain";

/// Performs the creep (viscous) stress update at an integration point
///
/// The model is selected once from [ParamCreep]; afterwards, the same instance may be shared by
/// any number of integration points because all per-point data is held by [LocalState].
pub struct CreepUpdate<T: Real> {
    /// Holds the configuration (tolerances, staging, names)
    config: Config,

    /// Holds the actual flow rule
    pub actual: Box<dyn FlowRule<T>>,

    /// Holds the volumetric (compaction) law, if active
    pub volumetric: Option<VolumetricLaw>,
}

impl<T: Real> CreepUpdate<T> {
    /// Allocates a new instance
    pub fn new(param: &ParamCreep, config: &Config) -> Result<Self, StrError> {
        param.validate()?;
        config.validate()?;
        let mut volumetric = None;
        let laws: Vec<Box<dyn CreepLaw<T>>> = match *param {
            // Linear viscous model
            ParamCreep::Maxwell { viscosity } => vec![Box::new(MaxwellLaw::new(viscosity))],

            // Linear viscoelastic model
            ParamCreep::Kelvin {
                viscosity,
                shear_modulus,
            } => vec![Box::new(KelvinLaw::new(viscosity, shear_modulus))],

            // Maxwell and Kelvin in series
            ParamCreep::Burger {
                viscosity_maxwell,
                viscosity_kelvin,
                shear_modulus_kelvin,
            } => vec![
                Box::new(MaxwellLaw::new(viscosity_maxwell)),
                Box::new(KelvinLaw::new(viscosity_kelvin, shear_modulus_kelvin)),
            ],

            // Burger with stress-dependent constants
            ParamCreep::Lubby2 {
                viscosity_maxwell,
                viscosity_kelvin,
                shear_modulus_kelvin,
                sigma_0,
                m_1,
                m_2,
                m_g,
            } => vec![
                Box::new(MaxwellLaw::new_stress_dependent(viscosity_maxwell, m_1, sigma_0)),
                Box::new(KelvinLaw::new_stress_dependent(
                    viscosity_kelvin,
                    shear_modulus_kelvin,
                    m_2,
                    m_g,
                    sigma_0,
                )),
            ],

            // Lemaitre with strains in micro-units
            ParamCreep::ModifiedLemaitre {
                alpha,
                kr1,
                kr2,
                beta1,
                beta2,
            } => {
                let reference = ReferenceRate::Lemaitre {
                    alpha,
                    kr1,
                    kr2,
                    beta1,
                    beta2,
                };
                vec![Box::new(LemaitreLaw::new(alpha, reference, MICRO))]
            }

            // Transient creep with strains in micro-units and rates in micro-units per time
            ParamCreep::MunsonDawson {
                aa1,
                n1,
                aa2,
                n2,
                aa,
                bb,
                m,
                n,
            } => {
                let reference = ReferenceRate::Power {
                    factor: 1.0 / MICRO,
                    aa2,
                    n2,
                };
                vec![Box::new(MunsonDawsonLaw::new(reference, MICRO, aa1, n1, aa, bb, m, n))]
            }

            // Power-law Lemaitre and Munson-Dawson (plain strain units)
            ParamCreep::Rtl2020 {
                alpha,
                aa2,
                n2,
                aa1,
                n1,
                aa,
                bb,
                m,
                n,
            } => {
                let reference = ReferenceRate::Power { factor: 1.0, aa2, n2 };
                vec![
                    Box::new(LemaitreLaw::new(alpha, reference, 1.0)),
                    Box::new(MunsonDawsonLaw::new(reference, 1.0, aa1, n1, aa, bb, m, n)),
                ]
            }

            // Modified Lemaitre and Munson-Dawson (micro-units)
            ParamCreep::BlancoMartin {
                alpha,
                kr1,
                kr2,
                beta1,
                beta2,
                aa1,
                n1,
                aa,
                bb,
                m,
                n,
            } => {
                let reference = ReferenceRate::Lemaitre {
                    alpha,
                    kr1,
                    kr2,
                    beta1,
                    beta2,
                };
                vec![
                    Box::new(LemaitreLaw::new(alpha, reference, MICRO)),
                    Box::new(MunsonDawsonLaw::new(reference, MICRO, aa1, n1, aa, bb, m, n)),
                ]
            }

            // Blanco-Martin with the compaction channel
            ParamCreep::BlancoMartinRtl2020 {
                alpha,
                kr1,
                kr2,
                beta1,
                beta2,
                aa1,
                n1,
                aa,
                bb,
                m,
                n,
                volumetric: with_volumetric,
                z,
                nn_z,
                n_z,
                mm_z,
                m_z,
            } => {
                let reference = ReferenceRate::Lemaitre {
                    alpha,
                    kr1,
                    kr2,
                    beta1,
                    beta2,
                };
                if with_volumetric {
                    volumetric = Some(VolumetricLaw::new(z, nn_z, n_z, mm_z, m_z));
                }
                vec![
                    Box::new(LemaitreLaw::new(alpha, reference, MICRO)),
                    Box::new(MunsonDawsonLaw::new(reference, MICRO, aa1, n1, aa, bb, m, n)),
                ]
            }
        };
        Ok(CreepUpdate {
            config: config.clone(),
            actual: Box::new(SharedStressFlowRule::new(laws)),
            volumetric,
        })
    }

    /// Returns the number of internal values
    pub fn n_internal_values(&self) -> usize {
        self.actual.n_mechanisms() + if self.volumetric.is_some() { 1 } else { 0 }
    }

    /// Returns the names of the internal values (prefixed with the base name, if any)
    pub fn internal_value_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.actual.names().iter().map(|n| self.config.prefixed(n)).collect();
        if self.volumetric.is_some() {
            names.push(self.config.prefixed(VOLUMETRIC_CREEP_STRAIN));
        }
        names
    }

    /// Allocates a local state with zero internal values
    pub fn new_local_state(&self) -> LocalState {
        LocalState::new(self.n_internal_values())
    }

    /// Updates the stress tensor
    ///
    /// On input, `stress` is the trial (elastically predicted) stress; on output, it is the
    /// updated stress. Returns the inelastic (creep) strain increment.
    ///
    /// The internal values of `state` are modified only if the return map converges.
    pub fn update_stress(
        &self,
        state: &mut LocalState,
        stress: &mut SymTensor<T>,
        elasticity: &Elasticity,
        dt: f64,
    ) -> Result<SymTensor<T>, UpdateError> {
        let n_mechanism = self.actual.n_mechanisms();
        if state.internal_values.dim() != self.n_internal_values() {
            return Err(UpdateError::UnknownCreepModel);
        }
        let trial = TrialState::new(stress, elasticity, dt);
        let gamma_old = state.internal_values.as_data();
        self.actual.pre_solve(gamma_old)?;
        let solution: LocalSolution<T> = match n_mechanism {
            1 => ReturnMapOne::new(&self.config).solve(self.actual.as_ref(), &trial, gamma_old)?,
            2 => ReturnMapDevVol::new(&self.config).solve(
                self.actual.as_ref(),
                self.volumetric.as_ref(),
                &trial,
                gamma_old,
            )?,
            _ => return Err(UpdateError::UnknownCreepModel),
        };

        // update stress
        let inelastic_strain = trial.inelastic_strain(&solution.x, solution.x_vol);
        *stress = trial.corrected_stress(&inelastic_strain);

        // update history
        self.actual.post_solve(&solution.x, &mut state.internal_values);
        if let Some(x_vol) = solution.x_vol {
            state.internal_values[n_mechanism] += x_vol.value();
        }
        state.n_iterations = solution.n_iterations;
        state.inelastic = solution.x.iter().any(|x| x.value() != 0.0);
        Ok(inelastic_strain)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::CreepUpdate;
    use crate::base::{Config, Elasticity, ParamCreep, SampleParams, SymTensor, UpdateError};
    use crate::material::LocalState;
    use russell_lab::approx_eq;

    fn elasticity() -> Elasticity {
        Elasticity::new(20_000.0, 10_000.0).unwrap()
    }

    // axisymmetric compression
    fn stress(q: f64, p: f64) -> SymTensor<f64> {
        SymTensor::from_components(-(p + 2.0 * q / 3.0), -(p - q / 3.0), -(p - q / 3.0), 0.0, 0.0, 0.0)
    }

    #[test]
    fn new_captures_errors() {
        let config = Config::new();
        let param = ParamCreep::Maxwell { viscosity: 0.0 };
        assert_eq!(
            CreepUpdate::<f64>::new(&param, &config).err(),
            Some("viscosity must be > 0.0")
        );
        let mut config = Config::new();
        config.n_max_iterations = 0;
        let param = SampleParams::param_maxwell();
        assert_eq!(
            CreepUpdate::<f64>::new(&param, &config).err(),
            Some("n_max_iterations must be ≥ 1")
        );
    }

    #[test]
    fn internal_values_are_named() {
        let mut config = Config::new();
        let update = CreepUpdate::<f64>::new(&SampleParams::param_burger(), &config).unwrap();
        assert_eq!(update.n_internal_values(), 2);
        assert_eq!(
            update.internal_value_names(),
            &["eqv_creep_strain_maxwell", "eqv_creep_strain_kelvin"]
        );

        config.set_base_name("salt").unwrap();
        let param = SampleParams::param_blanco_martin_rtl2020(true);
        let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
        assert_eq!(update.n_internal_values(), 3);
        assert_eq!(
            update.internal_value_names(),
            &["salt_eqv_creep_strain_L", "salt_eqv_creep_strain_R", "salt_vol_creep_strain"]
        );
        assert_eq!(update.new_local_state().internal_values.dim(), 3);
    }

    #[test]
    fn all_models_allocate_and_update() {
        let config = Config::new();
        for param in SampleParams::param_creep_all() {
            let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
            let mut state = update.new_local_state();
            let mut sigma = stress(10.0, 15.0);
            update.update_stress(&mut state, &mut sigma, &elasticity(), 0.01).unwrap();
            assert!(sigma.invariant_sigma_d() < 10.0, "{}", param.name());
            assert!(state.inelastic, "{}", param.name());
        }
    }

    #[test]
    fn zero_stress_gives_no_flow() {
        let config = Config::new();
        for param in SampleParams::param_creep_all() {
            let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
            let mut state = update.new_local_state();
            let mut sigma = SymTensor::new();
            let deps = update.update_stress(&mut state, &mut sigma, &elasticity(), 0.01).unwrap();
            assert_eq!(deps.comps, [0.0; 6], "{}", param.name());
            assert_eq!(sigma.comps, [0.0; 6], "{}", param.name());
            assert!(!state.inelastic);
        }
    }

    #[test]
    fn update_is_idempotent() {
        let config = Config::new();
        let param = SampleParams::param_blanco_martin_rtl2020(true);
        let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
        let state_0 = LocalState::from_values(&[1e-4, 5e-5, 0.0]);

        let mut state_a = state_0.clone();
        let mut sigma_a = stress(10.0, 15.0);
        update.update_stress(&mut state_a, &mut sigma_a, &elasticity(), 0.01).unwrap();

        let mut state_b = state_0.clone();
        let mut sigma_b = stress(10.0, 15.0);
        update.update_stress(&mut state_b, &mut sigma_b, &elasticity(), 0.01).unwrap();

        assert_eq!(sigma_a, sigma_b);
        assert_eq!(state_a.internal_values.as_data(), state_b.internal_values.as_data());
    }

    #[test]
    fn history_is_written_after_convergence() {
        let config = Config::new();
        let update = CreepUpdate::<f64>::new(&SampleParams::param_maxwell(), &config).unwrap();
        let mut state = update.new_local_state();
        let mut sigma = stress(10.0, 15.0);
        let deps = update.update_stress(&mut state, &mut sigma, &elasticity(), 0.01).unwrap();
        // γ = x = √(2/3) ‖Δε‖
        approx_eq(state.internal_values[0], f64::sqrt(2.0 / 3.0) * deps.norm(), 1e-15);
        // the net equivalent stress is q_trial - 3 G x
        approx_eq(sigma.invariant_sigma_d(), 10.0 - 3.0 * 10_000.0 * state.internal_values[0], 1e-10);
        // the pressure is unchanged
        approx_eq(-sigma.invariant_sigma_m(), 15.0, 1e-12);
    }

    #[test]
    fn update_captures_errors() {
        let config = Config::new();
        let update = CreepUpdate::<f64>::new(&SampleParams::param_burger(), &config).unwrap();
        let mut state = LocalState::new(1);
        let mut sigma = stress(10.0, 15.0);
        let original = sigma;
        assert_eq!(
            update.update_stress(&mut state, &mut sigma, &elasticity(), 0.01).err(),
            Some(UpdateError::UnknownCreepModel)
        );
        assert_eq!(sigma, original);

        let mut config = Config::new();
        config.set_n_max_iterations(1).unwrap().set_abs_tol(1e-30).unwrap();
        config.set_rel_tol(1e-30).unwrap();
        let param = SampleParams::param_modified_lemaitre();
        let update = CreepUpdate::<f64>::new(&param, &config).unwrap();
        let mut state = update.new_local_state();
        let mut sigma = stress(10.0, 15.0);
        let original = sigma;
        assert!(update
            .update_stress(&mut state, &mut sigma, &elasticity(), 0.01)
            .err()
            .unwrap()
            .is_numerical());
        assert_eq!(sigma, original);
        assert_eq!(state.internal_values.as_data(), &[0.0]);
    }
}
