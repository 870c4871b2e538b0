use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds parameters for creep (rate-dependent inelastic) models
///
/// Stresses are in the units of the elastic moduli; times are in the units of the time increment.
/// Uppercase symbols are written with doubled letters, e.g., `aa1` means A₁.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamCreep {
    /// Linear viscous (Maxwell) model
    ///
    /// ```text
    /// rate = q / (3 η)
    /// ```
    Maxwell {
        /// Viscosity η
        viscosity: f64,
    },

    /// Linear viscoelastic (Kelvin-Voigt) model
    ///
    /// ```text
    /// rate = (q/3 - G_K γ) / η_K
    /// ```
    Kelvin {
        /// Viscosity η_K
        viscosity: f64,

        /// Shear modulus of the Kelvin spring G_K
        shear_modulus: f64,
    },

    /// Four-element (Burger) model: Maxwell and Kelvin elements in series
    Burger {
        /// Viscosity of the Maxwell dashpot η_M
        viscosity_maxwell: f64,

        /// Viscosity of the Kelvin dashpot η_K
        viscosity_kelvin: f64,

        /// Shear modulus of the Kelvin spring G_K
        shear_modulus_kelvin: f64,
    },

    /// Lubby2 model: Burger model with stress-dependent viscosities and Kelvin modulus
    ///
    /// ```text
    /// η_M = η_M0 exp(-m₁ q / σ₀)
    /// η_K = η_K0 exp(-m₂ q / σ₀)
    /// G_K = G_K0 exp(-m_G q / σ₀)
    /// ```
    Lubby2 {
        /// Reference viscosity of the Maxwell dashpot η_M0
        viscosity_maxwell: f64,

        /// Reference viscosity of the Kelvin dashpot η_K0
        viscosity_kelvin: f64,

        /// Reference shear modulus of the Kelvin spring G_K0
        shear_modulus_kelvin: f64,

        /// Reference stress σ₀
        sigma_0: f64,

        /// Stress-dependence of the Maxwell viscosity m₁
        m_1: f64,

        /// Stress-dependence of the Kelvin viscosity m₂
        m_2: f64,

        /// Stress-dependence of the Kelvin modulus m_G
        m_g: f64,
    },

    /// Modified Lemaitre model (strain hardening)
    ///
    /// ```text
    /// R(q) = 10⁻⁶ ((q/kr₁)^β₁ + (q/kr₂)^β₂)^(1/α)
    /// rate = α R(q) (10⁶ γ)^(1 - 1/α)
    /// ```
    ModifiedLemaitre {
        /// Hardening exponent α (0 < α < 1)
        alpha: f64,

        /// First reference stress kr₁
        kr1: f64,

        /// Second reference stress kr₂
        kr2: f64,

        /// First stress exponent β₁
        beta1: f64,

        /// Second stress exponent β₂
        beta2: f64,
    },

    /// Munson-Dawson transient creep model (power-law reference rate)
    ///
    /// ```text
    /// γ̄ = (q/A₁)^n₁
    /// rate =  A (1 - γ/γ̄)^n (q/A₂)^n₂   if γ < γ̄   (hardening)
    /// rate = -B (γ/γ̄ - 1)^m (q/A₂)^n₂   otherwise  (recovery)
    /// ```
    MunsonDawson {
        /// Saturation reference stress A₁
        aa1: f64,

        /// Saturation exponent n₁
        n1: f64,

        /// Reference stress of the steady rate A₂
        aa2: f64,

        /// Exponent of the steady rate n₂
        n2: f64,

        /// Hardening coefficient A
        aa: f64,

        /// Recovery coefficient B
        bb: f64,

        /// Recovery exponent m
        m: f64,

        /// Hardening exponent n
        n: f64,
    },

    /// RTL2020 model: power-law Lemaitre and Munson-Dawson mechanisms sharing the net stress
    ///
    /// ```text
    /// rate_L = α (q/A₂)^n₂ γ_L^(1 - 1/α)
    /// rate_R = Munson-Dawson with the reference rate (q/A₂)^n₂
    /// ```
    Rtl2020 {
        /// Hardening exponent α (0 < α < 1)
        alpha: f64,

        /// Reference stress A₂
        aa2: f64,

        /// Stress exponent n₂
        n2: f64,

        /// Saturation reference stress A₁
        aa1: f64,

        /// Saturation exponent n₁
        n1: f64,

        /// Hardening coefficient A
        aa: f64,

        /// Recovery coefficient B
        bb: f64,

        /// Recovery exponent m
        m: f64,

        /// Hardening exponent n
        n: f64,
    },

    /// Blanco-Martin model: Modified Lemaitre and Munson-Dawson mechanisms sharing the net stress
    ///
    /// Both mechanisms use the Lemaitre reference rate R(q) and strains in micro-units (10⁶ γ).
    BlancoMartin {
        /// Hardening exponent α (0 < α < 1)
        alpha: f64,

        /// First reference stress kr₁
        kr1: f64,

        /// Second reference stress kr₂
        kr2: f64,

        /// First stress exponent β₁
        beta1: f64,

        /// Second stress exponent β₂
        beta2: f64,

        /// Saturation reference stress A₁
        aa1: f64,

        /// Saturation exponent n₁
        n1: f64,

        /// Hardening coefficient A
        aa: f64,

        /// Recovery coefficient B
        bb: f64,

        /// Recovery exponent m
        m: f64,

        /// Hardening exponent n
        n: f64,
    },

    /// Blanco-Martin model with the RTL2020 volumetric (compaction) channel
    ///
    /// ```text
    /// p      = p_trial - K x_v
    /// γ_vp   = 10⁶ (γ_L + γ_R)
    /// k      = z (⟨p/N_z⟩^n_z - γ_vp) / ((p/m_z)^n_z + γ_vp)
    /// rate_v = k (x_L + x_R)
    /// ```
    BlancoMartinRtl2020 {
        /// Hardening exponent α (0 < α < 1)
        alpha: f64,

        /// First reference stress kr₁
        kr1: f64,

        /// Second reference stress kr₂
        kr2: f64,

        /// First stress exponent β₁
        beta1: f64,

        /// Second stress exponent β₂
        beta2: f64,

        /// Saturation reference stress A₁
        aa1: f64,

        /// Saturation exponent n₁
        n1: f64,

        /// Hardening coefficient A
        aa: f64,

        /// Recovery coefficient B
        bb: f64,

        /// Recovery exponent m
        m: f64,

        /// Hardening exponent n
        n: f64,

        /// Activates the volumetric channel
        volumetric: bool,

        /// Volumetric proportionality coefficient z
        z: f64,

        /// Reference pressure of the numerator N_z
        nn_z: f64,

        /// Pressure exponent n_z
        n_z: f64,

        /// Reference pressure of the denominator activation M_z
        mm_z: f64,

        /// Reference pressure of the denominator m_z
        m_z: f64,
    },
}

/// Holds parameters for friction models at interfaces
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamFriction {
    /// Constant Mohr-Coulomb friction
    ///
    /// ```text
    /// strength = f ⟨-σn⟩
    /// ```
    Constant {
        /// Friction coefficient f
        friction: f64,
    },
}

/// Checks the parameters of the hardening and recovery (Munson-Dawson) branch
fn validate_munson_dawson(aa1: f64, n1: f64, aa: f64, bb: f64, m: f64, n: f64) -> Result<(), StrError> {
    if aa1 <= 0.0 {
        return Err("aa1 must be > 0.0");
    }
    if n1 <= 0.0 {
        return Err("n1 must be > 0.0");
    }
    if aa < 0.0 {
        return Err("aa must be ≥ 0.0");
    }
    if bb < 0.0 {
        return Err("bb must be ≥ 0.0");
    }
    if m <= 1.0 {
        return Err("m must be > 1.0");
    }
    if n <= 1.0 {
        return Err("n must be > 1.0");
    }
    Ok(())
}

/// Checks the parameters of the Lemaitre reference rate
fn validate_lemaitre(alpha: f64, kr1: f64, kr2: f64, beta1: f64, beta2: f64) -> Result<(), StrError> {
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err("alpha must be in (0.0, 1.0)");
    }
    if kr1 <= 0.0 {
        return Err("kr1 must be > 0.0");
    }
    if kr2 <= 0.0 {
        return Err("kr2 must be > 0.0");
    }
    if beta1 <= 0.0 {
        return Err("beta1 must be > 0.0");
    }
    if beta2 <= 0.0 {
        return Err("beta2 must be > 0.0");
    }
    Ok(())
}

impl ParamCreep {
    /// Returns the name of the model
    pub fn name(&self) -> &'static str {
        match self {
            ParamCreep::Maxwell { .. } => "Maxwell",
            ParamCreep::Kelvin { .. } => "Kelvin",
            ParamCreep::Burger { .. } => "Burger",
            ParamCreep::Lubby2 { .. } => "Lubby2",
            ParamCreep::ModifiedLemaitre { .. } => "ModifiedLemaitre",
            ParamCreep::MunsonDawson { .. } => "MunsonDawson",
            ParamCreep::Rtl2020 { .. } => "RTL2020",
            ParamCreep::BlancoMartin { .. } => "BlancoMartin",
            ParamCreep::BlancoMartinRtl2020 { .. } => "BlancoMartinRTL2020",
        }
    }

    /// Checks that all constants are within their physically valid ranges
    pub fn validate(&self) -> Result<(), StrError> {
        match *self {
            ParamCreep::Maxwell { viscosity } => {
                if viscosity <= 0.0 {
                    return Err("viscosity must be > 0.0");
                }
            }
            ParamCreep::Kelvin {
                viscosity,
                shear_modulus,
            } => {
                if viscosity <= 0.0 {
                    return Err("viscosity must be > 0.0");
                }
                if shear_modulus <= 0.0 {
                    return Err("shear_modulus must be > 0.0");
                }
            }
            ParamCreep::Burger {
                viscosity_maxwell,
                viscosity_kelvin,
                shear_modulus_kelvin,
            } => {
                if viscosity_maxwell <= 0.0 {
                    return Err("viscosity_maxwell must be > 0.0");
                }
                if viscosity_kelvin <= 0.0 {
                    return Err("viscosity_kelvin must be > 0.0");
                }
                if shear_modulus_kelvin <= 0.0 {
                    return Err("shear_modulus_kelvin must be > 0.0");
                }
            }
            ParamCreep::Lubby2 {
                viscosity_maxwell,
                viscosity_kelvin,
                shear_modulus_kelvin,
                sigma_0,
                m_1,
                m_2,
                m_g,
            } => {
                if viscosity_maxwell <= 0.0 {
                    return Err("viscosity_maxwell must be > 0.0");
                }
                if viscosity_kelvin <= 0.0 {
                    return Err("viscosity_kelvin must be > 0.0");
                }
                if shear_modulus_kelvin <= 0.0 {
                    return Err("shear_modulus_kelvin must be > 0.0");
                }
                if sigma_0 <= 0.0 {
                    return Err("sigma_0 must be > 0.0");
                }
                if m_1 < 0.0 || m_2 < 0.0 || m_g < 0.0 {
                    return Err("m_1, m_2, and m_g must be ≥ 0.0");
                }
            }
            ParamCreep::ModifiedLemaitre {
                alpha,
                kr1,
                kr2,
                beta1,
                beta2,
            } => validate_lemaitre(alpha, kr1, kr2, beta1, beta2)?,
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
                if aa2 <= 0.0 {
                    return Err("aa2 must be > 0.0");
                }
                if n2 <= 0.0 {
                    return Err("n2 must be > 0.0");
                }
                validate_munson_dawson(aa1, n1, aa, bb, m, n)?;
            }
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
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err("alpha must be in (0.0, 1.0)");
                }
                if aa2 <= 0.0 {
                    return Err("aa2 must be > 0.0");
                }
                if n2 <= 0.0 {
                    return Err("n2 must be > 0.0");
                }
                validate_munson_dawson(aa1, n1, aa, bb, m, n)?;
            }
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
                validate_lemaitre(alpha, kr1, kr2, beta1, beta2)?;
                validate_munson_dawson(aa1, n1, aa, bb, m, n)?;
            }
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
                volumetric,
                z,
                nn_z,
                n_z,
                mm_z,
                m_z,
            } => {
                validate_lemaitre(alpha, kr1, kr2, beta1, beta2)?;
                validate_munson_dawson(aa1, n1, aa, bb, m, n)?;
                if volumetric {
                    if z < 0.0 {
                        return Err("z must be ≥ 0.0");
                    }
                    if nn_z <= 0.0 || mm_z <= 0.0 || m_z <= 0.0 {
                        return Err("nn_z, mm_z, and m_z must be > 0.0");
                    }
                    if n_z <= 0.0 {
                        return Err("n_z must be > 0.0");
                    }
                }
            }
        }
        Ok(())
    }
}

impl ParamFriction {
    /// Checks that all constants are within their physically valid ranges
    pub fn validate(&self) -> Result<(), StrError> {
        match *self {
            ParamFriction::Constant { friction } => {
                if friction <= 0.0 {
                    return Err("friction must be > 0.0");
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
