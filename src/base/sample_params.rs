use super::{ParamCreep, ParamFriction};

/// Holds samples of creep and friction parameters
///
/// Unless noted otherwise, stresses are in MPa and times are in days.
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for the Maxwell model
    pub fn param_maxwell() -> ParamCreep {
        ParamCreep::Maxwell {
            viscosity: 5_000.0, // MPa·day
        }
    }

    /// Returns sample parameters for the Kelvin model
    pub fn param_kelvin() -> ParamCreep {
        ParamCreep::Kelvin {
            viscosity: 2_000.0,     // MPa·day
            shear_modulus: 1_000.0, // MPa
        }
    }

    /// Returns sample parameters for the Burger model
    pub fn param_burger() -> ParamCreep {
        ParamCreep::Burger {
            viscosity_maxwell: 5_000.0,    // MPa·day
            viscosity_kelvin: 2_000.0,     // MPa·day
            shear_modulus_kelvin: 1_000.0, // MPa
        }
    }

    /// Returns sample parameters for the Lubby2 model
    pub fn param_lubby2() -> ParamCreep {
        ParamCreep::Lubby2 {
            viscosity_maxwell: 5_000.0,    // MPa·day
            viscosity_kelvin: 2_000.0,     // MPa·day
            shear_modulus_kelvin: 1_000.0, // MPa
            sigma_0: 1.0,                  // MPa
            m_1: 0.1,
            m_2: 0.1,
            m_g: 0.05,
        }
    }

    /// Returns sample parameters for the modified Lemaitre model
    pub fn param_modified_lemaitre() -> ParamCreep {
        ParamCreep::ModifiedLemaitre {
            alpha: 0.7,
            kr1: 1.0, // MPa
            kr2: 2.0, // MPa
            beta1: 1.0,
            beta2: 2.0,
        }
    }

    /// Returns sample parameters for the Munson-Dawson model (micro-strains)
    pub fn param_munson_dawson() -> ParamCreep {
        ParamCreep::MunsonDawson {
            aa1: 0.3, // MPa
            n1: 3.0,
            aa2: 0.5, // MPa
            n2: 4.0,
            aa: 0.5,
            bb: 0.05,
            m: 5.0,
            n: 5.0,
        }
    }

    /// Returns sample parameters for the RTL2020 model
    pub fn param_rtl2020() -> ParamCreep {
        ParamCreep::Rtl2020 {
            alpha: 0.7,
            aa2: 500.0, // MPa
            n2: 3.0,
            aa1: 100.0, // MPa
            n1: 2.0,
            aa: 2.0,
            bb: 0.5,
            m: 3.0,
            n: 3.0,
        }
    }

    /// Returns sample parameters for the Blanco-Martin model
    pub fn param_blanco_martin() -> ParamCreep {
        ParamCreep::BlancoMartin {
            alpha: 0.7,
            kr1: 1.0, // MPa
            kr2: 2.0, // MPa
            beta1: 1.0,
            beta2: 2.0,
            aa1: 1.0, // MPa
            n1: 3.0,
            aa: 2.0,
            bb: 0.5,
            m: 3.0,
            n: 3.0,
        }
    }

    /// Returns sample parameters for the Blanco-Martin model with the RTL2020 volumetric channel
    pub fn param_blanco_martin_rtl2020(volumetric: bool) -> ParamCreep {
        ParamCreep::BlancoMartinRtl2020 {
            alpha: 0.7,
            kr1: 1.0, // MPa
            kr2: 2.0, // MPa
            beta1: 1.0,
            beta2: 2.0,
            aa1: 1.0, // MPa
            n1: 3.0,
            aa: 2.0,
            bb: 0.5,
            m: 3.0,
            n: 3.0,
            volumetric,
            z: 0.05,
            nn_z: 0.5, // MPa
            n_z: 3.0,
            mm_z: 1.0, // MPa
            m_z: 1.0,  // MPa
        }
    }

    /// Returns one sample of each creep model
    pub fn param_creep_all() -> Vec<ParamCreep> {
        vec![
            SampleParams::param_maxwell(),
            SampleParams::param_kelvin(),
            SampleParams::param_burger(),
            SampleParams::param_lubby2(),
            SampleParams::param_modified_lemaitre(),
            SampleParams::param_munson_dawson(),
            SampleParams::param_rtl2020(),
            SampleParams::param_blanco_martin(),
            SampleParams::param_blanco_martin_rtl2020(false),
            SampleParams::param_blanco_martin_rtl2020(true),
        ]
    }

    /// Returns sample parameters for constant friction
    pub fn param_friction() -> ParamFriction {
        ParamFriction::Constant { friction: 0.6 }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
