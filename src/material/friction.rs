use super::LocalConvergence;
use crate::base::{Config, ParamFriction, Real, Solver, UpdateError};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Specifies the frictional strength of an interface
pub trait FrictionRule<T: Real>: Send + Sync {
    /// Returns the frictional strength given the trial normal stress and the slip rate
    ///
    /// The normal stress is negative in compression.
    fn strength(&self, sigma_n: T, slip_rate: T) -> T;

    /// Returns the derivative of the strength with respect to the slip rate
    fn strength_derivative(&self, sigma_n: T, slip_rate: T) -> T;
}

/// Implements a constant Mohr-Coulomb friction
///
/// ```text
/// strength = f ⟨-σn⟩
/// ```
///
/// where ⟨·⟩ is the Macaulay bracket, so that an interface in tension has no strength.
pub struct ConstantFriction {
    /// Friction coefficient f
    friction: f64,
}

impl ConstantFriction {
    /// Allocates a new instance
    pub fn new(friction: f64) -> Self {
        ConstantFriction { friction }
    }
}

impl<T: Real> FrictionRule<T> for ConstantFriction {
    fn strength(&self, sigma_n: T, _slip_rate: T) -> T {
        if sigma_n.value() < 0.0 {
            -T::real(self.friction) * sigma_n
        } else {
            T::zero()
        }
    }

    fn strength_derivative(&self, _sigma_n: T, _slip_rate: T) -> T {
        T::zero()
    }
}

/// Holds the elastic stiffness of an interface (local frame: normal, shear 1, shear 2)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceStiffness {
    /// Normal stiffness k_n
    pub normal: f64,

    /// Shear stiffness k_s
    pub shear: f64,
}

impl InterfaceStiffness {
    /// Allocates a new instance
    pub fn new(normal: f64, shear: f64) -> Result<Self, StrError> {
        if normal <= 0.0 {
            return Err("normal stiffness must be > 0.0");
        }
        if shear <= 0.0 {
            return Err("shear stiffness must be > 0.0");
        }
        Ok(InterfaceStiffness { normal, shear })
    }
}

/// Holds the slip history at an interface point
///
/// Only `slip` is history: a stick step leaves it untouched. The other fields describe the
/// last update and are overwritten by every call, including stick steps (zero rate, no
/// iterations).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FrictionState {
    /// Accumulated slip vector (normal component always zero)
    pub slip: [f64; 3],

    /// Slip rate of the last update (not accumulated)
    pub slip_rate: f64,

    /// Indicates that the last update slipped (not accumulated)
    pub slipping: bool,

    /// Number of Newton iterations of the last update (not accumulated)
    pub n_iterations: usize,
}

impl FrictionState {
    /// Allocates a new instance
    pub fn new() -> Self {
        FrictionState::default()
    }
}

impl fmt::Display for FrictionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slip = {:?}\n", self.slip)?;
        write!(f, "slip_rate = {:?}\n", self.slip_rate)?;
        write!(f, "slipping = {}\n", self.slipping)?;
        Ok(())
    }
}

/// Performs the friction (slip) update at an interface point
///
/// With the trial traction `t = (σn, τ₁, τ₂)` and `τ_trial = ‖(τ₁, τ₂)‖`, the slip rate `δ̇`
/// solves
///
/// ```text
/// R(δ̇) = τ_trial - k_s δ̇ Δt - strength(δ̇) = 0
/// ```
///
/// unless `τ_trial ≤ strength(0)` (no slip). The slip increment is `δ̇ Δt (0, τ₁, τ₂)/τ_trial`.
pub struct FrictionUpdate<T: Real> {
    /// Holds the configuration (tolerances)
    config: Config,

    /// Holds the actual friction rule
    pub actual: Box<dyn FrictionRule<T>>,
}

impl<T: Real> FrictionUpdate<T> {
    /// Allocates a new instance
    pub fn new(param: &ParamFriction, config: &Config) -> Result<Self, StrError> {
        param.validate()?;
        config.validate()?;
        let actual: Box<dyn FrictionRule<T>> = match *param {
            ParamFriction::Constant { friction } => Box::new(ConstantFriction::new(friction)),
        };
        Ok(FrictionUpdate {
            config: config.clone(),
            actual,
        })
    }

    /// Updates the traction vector
    ///
    /// On input, `traction` is the trial traction; on output, it is the updated traction.
    /// Returns the slip increment. The state is modified only if the update succeeds.
    pub fn update_traction(
        &self,
        state: &mut FrictionState,
        traction: &mut [T; 3],
        stiffness: &InterfaceStiffness,
        dt: f64,
    ) -> Result<[T; 3], UpdateError> {
        let sigma_n = traction[0];
        let tau_trial = (traction[1] * traction[1] + traction[2] * traction[2]).sqrt();

        // no slip
        if (tau_trial - self.actual.strength(sigma_n, T::zero())).value() <= 0.0 {
            state.slip_rate = 0.0;
            state.slipping = false;
            state.n_iterations = 0;
            return Ok([T::zero(); 3]);
        }

        // return map
        let ks_dt = T::real(stiffness.shear * dt);
        let residual = |rate: T| -> (T, T) {
            let r = tau_trial - ks_dt * rate - self.actual.strength(sigma_n, rate);
            let j = -ks_dt - self.actual.strength_derivative(sigma_n, rate);
            (r, j)
        };
        let mut control = LocalConvergence::new(&self.config, Solver::Friction);
        let mut rate = T::zero();
        let (mut r, mut j) = residual(rate);
        control.initialize(&[r.value().abs()]);
        for iteration in 1..=self.config.n_max_iterations {
            if j.value() == 0.0 {
                return Err(UpdateError::SingularMatrix(Solver::Friction));
            }
            rate = rate - r / j;
            (r, j) = residual(rate);
            if control.analyze(iteration, &[r.value().abs()])? {
                control.print_footer();
                let factor = rate * T::real(dt) / tau_trial;
                let slip = [T::zero(), factor * traction[1], factor * traction[2]];
                traction[1] = traction[1] - T::real(stiffness.shear) * slip[1];
                traction[2] = traction[2] - T::real(stiffness.shear) * slip[2];
                for k in 1..3 {
                    state.slip[k] += slip[k].value();
                }
                state.slip_rate = rate.value();
                state.slipping = true;
                state.n_iterations = iteration;
                return Ok(slip);
            }
        }
        Err(control.exhausted())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{FrictionState, FrictionUpdate, InterfaceStiffness};
    use crate::base::{Config, ParamFriction, SampleParams, Solver, UpdateError};
    use num_dual::Dual64;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        let config = Config::new();
        let param = ParamFriction::Constant { friction: -0.1 };
        assert_eq!(
            FrictionUpdate::<f64>::new(&param, &config).err(),
            Some("friction must be > 0.0")
        );
        assert_eq!(
            InterfaceStiffness::new(0.0, 1.0).err(),
            Some("normal stiffness must be > 0.0")
        );
        assert_eq!(
            InterfaceStiffness::new(1.0, 0.0).err(),
            Some("shear stiffness must be > 0.0")
        );
    }

    #[test]
    fn strength_works() {
        let config = Config::new();
        let update = FrictionUpdate::<f64>::new(&SampleParams::param_friction(), &config).unwrap();
        assert_eq!(update.actual.strength(-10.0, 0.0), 6.0);
        assert_eq!(update.actual.strength(10.0, 0.0), 0.0);
        assert_eq!(update.actual.strength_derivative(-10.0, 1.0), 0.0);
    }

    #[test]
    fn no_slip_leaves_traction_unchanged() {
        let config = Config::new();
        let update = FrictionUpdate::<f64>::new(&SampleParams::param_friction(), &config).unwrap();
        let stiffness = InterfaceStiffness::new(1000.0, 500.0).unwrap();
        let mut state = FrictionState::new();
        let mut traction = [-10.0, 3.0, 4.0];
        let slip = update.update_traction(&mut state, &mut traction, &stiffness, 1.0).unwrap();
        assert_eq!(slip, [0.0; 3]);
        assert_eq!(traction, [-10.0, 3.0, 4.0]);
        assert!(!state.slipping);
        assert_eq!(state.n_iterations, 0);

        // exactly at the strength
        let mut traction = [-10.0, 6.0, 0.0];
        update.update_traction(&mut state, &mut traction, &stiffness, 1.0).unwrap();
        assert_eq!(traction, [-10.0, 6.0, 0.0]);
    }

    #[test]
    fn slip_returns_to_the_strength() {
        let config = Config::new();
        let update = FrictionUpdate::<f64>::new(&SampleParams::param_friction(), &config).unwrap();
        let stiffness = InterfaceStiffness::new(1000.0, 500.0).unwrap();
        let mut state = FrictionState::new();
        let mut traction = [-10.0, 6.0, 8.0];
        let dt = 0.1;
        let slip = update.update_traction(&mut state, &mut traction, &stiffness, dt).unwrap();
        // τ_trial = 10 and strength = 6  ⇒  δ̇ = 4/(k_s Δt)
        approx_eq(state.slip_rate, 4.0 / (500.0 * dt), 1e-14);
        assert_eq!(state.n_iterations, 1);
        assert!(state.slipping);
        approx_eq(traction[0], -10.0, 1e-15);
        approx_eq(traction[1], 6.0 * 0.6, 1e-13);
        approx_eq(traction[2], 6.0 * 0.8, 1e-13);
        approx_eq(slip[1], 4.0 / 500.0 * 0.6, 1e-15);
        approx_eq(slip[2], 4.0 / 500.0 * 0.8, 1e-15);
        assert_eq!(state.slip[0], 0.0);
        approx_eq(state.slip[1], slip[1], 1e-15);

        // the slip accumulates
        let mut traction = [-10.0, 6.0, 8.0];
        update.update_traction(&mut state, &mut traction, &stiffness, dt).unwrap();
        approx_eq(state.slip[2], 2.0 * slip[2], 1e-15);
    }

    #[test]
    fn stick_step_keeps_slip_and_resets_last_step_fields() {
        let config = Config::new();
        let update = FrictionUpdate::<f64>::new(&SampleParams::param_friction(), &config).unwrap();
        let stiffness = InterfaceStiffness::new(1000.0, 500.0).unwrap();
        let mut state = FrictionState::new();
        let mut traction = [-10.0, 6.0, 8.0];
        update.update_traction(&mut state, &mut traction, &stiffness, 0.1).unwrap();
        assert!(state.slipping);
        assert!(state.slip_rate > 0.0);
        assert!(state.n_iterations > 0);
        let slip = state.slip;

        // unloading below the strength
        let mut traction = [-10.0, 1.0, 1.0];
        update.update_traction(&mut state, &mut traction, &stiffness, 0.1).unwrap();
        assert_eq!(state.slip, slip);
        assert!(!state.slipping);
        assert_eq!(state.slip_rate, 0.0);
        assert_eq!(state.n_iterations, 0);
    }

    #[test]
    fn tension_releases_the_shear_traction() {
        let config = Config::new();
        let update = FrictionUpdate::<f64>::new(&SampleParams::param_friction(), &config).unwrap();
        let stiffness = InterfaceStiffness::new(1000.0, 500.0).unwrap();
        let mut state = FrictionState::new();
        let mut traction = [2.0, 0.0, -5.0];
        update.update_traction(&mut state, &mut traction, &stiffness, 1.0).unwrap();
        assert_eq!(traction[0], 2.0);
        approx_eq(traction[1], 0.0, 1e-15);
        approx_eq(traction[2], 0.0, 1e-13);
    }

    #[test]
    fn zero_time_step_is_singular() {
        let config = Config::new();
        let update = FrictionUpdate::<f64>::new(&SampleParams::param_friction(), &config).unwrap();
        let stiffness = InterfaceStiffness::new(1000.0, 500.0).unwrap();
        let mut state = FrictionState::new();
        let mut traction = [-10.0, 6.0, 8.0];
        assert_eq!(
            update.update_traction(&mut state, &mut traction, &stiffness, 0.0).err(),
            Some(UpdateError::SingularMatrix(Solver::Friction))
        );
        assert_eq!(traction, [-10.0, 6.0, 8.0]);
        assert!(!state.slipping);
    }

    #[test]
    fn dual_traction_carries_derivative() {
        // d(τ_new)/d(τ₁_trial) with σn fixed: τ_new = strength ⇒ direction-only dependence
        let config = Config::new();
        let update = FrictionUpdate::<Dual64>::new(&SampleParams::param_friction(), &config).unwrap();
        let stiffness = InterfaceStiffness::new(1000.0, 500.0).unwrap();
        let mut state = FrictionState::new();
        let mut traction = [Dual64::new(-10.0, 0.0), Dual64::new(10.0, 1.0), Dual64::new(0.0, 0.0)];
        update.update_traction(&mut state, &mut traction, &stiffness, 1.0).unwrap();
        approx_eq(traction[1].re, 6.0, 1e-13);
        approx_eq(traction[1].eps, 0.0, 1e-13);
        // ∂τ_new/∂σn = -f
        let mut traction = [Dual64::new(-10.0, 1.0), Dual64::new(10.0, 0.0), Dual64::new(0.0, 0.0)];
        update.update_traction(&mut state, &mut traction, &stiffness, 1.0).unwrap();
        approx_eq(traction[1].eps, -0.6, 1e-13);
    }
}
