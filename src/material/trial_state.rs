use crate::base::{Elasticity, Real, SymTensor};

/// Holds the trial (elastically predicted) state of one local update
///
/// The trial state is computed once at the beginning of the update and is immutable
/// during the Newton iterations.
pub struct TrialState<T: Real> {
    /// Trial stress tensor σ_trial
    pub stress: SymTensor<T>,

    /// Trial equivalent (von Mises) stress q_trial = √(3/2) ‖dev(σ_trial)‖
    pub q: T,

    /// Trial pressure p_trial = -tr(σ_trial)/3 (positive in compression)
    pub p: T,

    /// Flow direction n = dev(σ_trial) / q_trial (zero tensor if q_trial = 0)
    pub direction: SymTensor<T>,

    /// Shear modulus G
    pub shear: f64,

    /// Bulk modulus K
    pub bulk: f64,

    /// Time increment Δt
    pub dt: f64,
}

impl<T: Real> TrialState<T> {
    /// Allocates a new instance
    pub fn new(stress: &SymTensor<T>, elasticity: &Elasticity, dt: f64) -> Self {
        let dev = stress.deviator();
        let q = stress.invariant_sigma_d();
        let direction = if q.value() == 0.0 {
            SymTensor::new()
        } else {
            dev.scaled(T::one() / q)
        };
        TrialState {
            stress: *stress,
            q,
            p: -stress.invariant_sigma_m(),
            direction,
            shear: elasticity.shear,
            bulk: elasticity.bulk,
            dt,
        }
    }

    /// Returns the net equivalent stress q = q_trial - 3 G Σ xᵢ
    pub fn net_q(&self, x_sum: T) -> T {
        self.q - T::real(3.0 * self.shear) * x_sum
    }

    /// Returns the net pressure p = p_trial - K x_v
    pub fn net_p(&self, x_vol: T) -> T {
        self.p - T::real(self.bulk) * x_vol
    }

    /// Computes the inelastic strain increment
    ///
    /// ```text
    /// Δε = Σ (3/2) xᵢ n - (x_v/3) I
    /// ```
    pub fn inelastic_strain(&self, x_dev: &[T], x_vol: Option<T>) -> SymTensor<T> {
        let mut x_sum = T::zero();
        for x in x_dev {
            x_sum = x_sum + *x;
        }
        let mut res = self.direction.scaled(T::real(1.5) * x_sum);
        if let Some(xv) = x_vol {
            res.add_isotropic(-xv / T::real(3.0));
        }
        res
    }

    /// Computes the updated stress from the inelastic strain increment
    ///
    /// ```text
    /// σ = σ_trial - 2G dev(Δε) - K tr(Δε) I
    /// ```
    pub fn corrected_stress(&self, inelastic_strain: &SymTensor<T>) -> SymTensor<T> {
        let mut sigma = self.stress;
        sigma.update(T::real(-2.0 * self.shear), &inelastic_strain.deviator());
        sigma.add_isotropic(-T::real(self.bulk) * inelastic_strain.trace());
        sigma
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
