use super::{Real, SymTensor};
use crate::StrError;
use russell_tensor::{LinElasticity, Tensor4};
use serde::{Deserialize, Serialize};

/// Holds the isotropic elastic moduli used by the return maps
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Elasticity {
    /// Bulk modulus K
    pub bulk: f64,

    /// Shear modulus G
    pub shear: f64,
}

impl Elasticity {
    /// Allocates a new instance from the bulk and shear moduli
    pub fn new(bulk: f64, shear: f64) -> Result<Self, StrError> {
        if bulk <= 0.0 {
            return Err("bulk modulus must be > 0.0");
        }
        if shear <= 0.0 {
            return Err("shear modulus must be > 0.0");
        }
        Ok(Elasticity { bulk, shear })
    }

    /// Allocates a new instance from Young's modulus and Poisson's coefficient
    pub fn from_young_poisson(young: f64, poisson: f64) -> Result<Self, StrError> {
        if young <= 0.0 {
            return Err("Young's modulus must be > 0.0");
        }
        if poisson <= -1.0 || poisson >= 0.5 {
            return Err("Poisson's coefficient must be in (-1.0, 0.5)");
        }
        let model = LinElasticity::new(young, poisson, false, false);
        let (bulk, shear) = model.get_bulk_shear();
        Ok(Elasticity { bulk, shear })
    }

    /// Extracts the moduli from an isotropic elasticity tensor
    ///
    /// ```text
    /// G = D₀₁₀₁
    /// K = D₀₀₀₀ - 4G/3
    /// ```
    pub fn from_modulus(dd: &Tensor4) -> Result<Self, StrError> {
        let shear = dd.get(0, 1, 0, 1);
        let bulk = dd.get(0, 0, 0, 0) - 4.0 * shear / 3.0;
        Elasticity::new(bulk, shear).map_err(|_| "elasticity tensor must be isotropic and positive definite")
    }

    /// Returns the first Lamé parameter λ = K - 2G/3
    pub fn lame_lambda(&self) -> f64 {
        self.bulk - 2.0 * self.shear / 3.0
    }

    /// Computes the trial (elastic predictor) stress
    ///
    /// ```text
    /// σ_trial = σ_old + λ tr(Δε) I + 2G Δε
    /// ```
    pub fn trial_stress<T: Real>(&self, stress_old: &SymTensor<T>, delta_strain: &SymTensor<T>) -> SymTensor<T> {
        let mut sigma = *stress_old;
        sigma.update(T::real(2.0 * self.shear), delta_strain);
        sigma.add_isotropic(T::real(self.lame_lambda()) * delta_strain.trace());
        sigma
    }

    /// Computes the elastic strain increment corresponding to a stress increment
    ///
    /// ```text
    /// Δε = dev(Δσ)/(2G) + tr(Δσ)/(9K) I
    /// ```
    pub fn strain_increment<T: Real>(&self, delta_stress: &SymTensor<T>) -> SymTensor<T> {
        let mut eps = delta_stress.deviator().scaled(T::real(1.0 / (2.0 * self.shear)));
        eps.add_isotropic(delta_stress.trace() / T::real(9.0 * self.bulk));
        eps
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Elasticity;
    use crate::base::SymTensor;
    use russell_lab::approx_eq;
    use russell_tensor::LinElasticity;

    #[test]
    fn new_captures_errors() {
        assert_eq!(Elasticity::new(0.0, 1.0).err(), Some("bulk modulus must be > 0.0"));
        assert_eq!(Elasticity::new(1.0, -1.0).err(), Some("shear modulus must be > 0.0"));
        assert_eq!(
            Elasticity::from_young_poisson(-1.0, 0.2).err(),
            Some("Young's modulus must be > 0.0")
        );
        assert_eq!(
            Elasticity::from_young_poisson(1.0, 0.5).err(),
            Some("Poisson's coefficient must be in (-1.0, 0.5)")
        );
    }

    #[test]
    fn moduli_are_consistent() {
        let (young, poisson) = (3000.0, 0.25);
        let elast = Elasticity::from_young_poisson(young, poisson).unwrap();
        approx_eq(elast.bulk, young / (3.0 * (1.0 - 2.0 * poisson)), 1e-12);
        approx_eq(elast.shear, young / (2.0 * (1.0 + poisson)), 1e-12);

        let model = LinElasticity::new(young, poisson, false, false);
        let from_dd = Elasticity::from_modulus(model.get_modulus()).unwrap();
        approx_eq(from_dd.bulk, elast.bulk, 1e-10);
        approx_eq(from_dd.shear, elast.shear, 1e-10);
        approx_eq(elast.lame_lambda(), young * poisson / ((1.0 + poisson) * (1.0 - 2.0 * poisson)), 1e-10);
    }

    #[test]
    fn trial_stress_works() {
        let elast = Elasticity::new(10.0, 3.0).unwrap();
        let stress_old = SymTensor::isotropic(-1.0);
        let delta_strain = SymTensor::from_components(0.01, 0.0, 0.0, 0.02, 0.0, 0.0);
        let sigma = elast.trial_stress(&stress_old, &delta_strain);
        let lambda = 10.0 - 2.0;
        approx_eq(sigma.get(0, 0), -1.0 + lambda * 0.01 + 6.0 * 0.01, 1e-14);
        approx_eq(sigma.get(1, 1), -1.0 + lambda * 0.01, 1e-14);
        approx_eq(sigma.get(0, 1), 6.0 * 0.02, 1e-15);
        // mean stress changes by K tr(Δε)
        approx_eq(sigma.invariant_sigma_m() - stress_old.invariant_sigma_m(), 10.0 * 0.01, 1e-14);

        // the compliance inverts the predictor
        let delta_stress = sigma - stress_old;
        let eps = elast.strain_increment(&delta_stress);
        assert!(eps.max_abs_diff(&delta_strain) < 1e-15);
    }
}
