use russell_lab::approx_eq;
use visco::material::shear_traction;
use visco::prelude::*;
use visco::StrError;

// Stick-slip of a frictional interface under monotonic shear displacement
//
// TEST GOAL
//
// This test verifies the friction return map: the shear traction grows elastically (no slip)
// until it reaches the frictional strength f |σn|; afterwards, the traction stays at the strength
// and the accumulated slip absorbs the extra displacement.
//
// CONFIGURATION AND PARAMETERS
//
// f = 0.6, k_n = 1000 MPa/m, k_s = 500 MPa/m, σn = -10 MPa
// Shear displacement increments of 0.0021 m in direction (0.6, 0.8), Δt = 1

#[test]
fn test_friction_stick_slip() -> Result<(), StrError> {
    let config = Config::new();
    let update = FrictionUpdate::<f64>::new(&SampleParams::param_friction(), &config)?;
    let stiffness = InterfaceStiffness::new(1000.0, 500.0)?;
    let mut state = FrictionState::new();
    let (sigma_n, ks, strength) = (-10.0, 500.0, 6.0);
    let (d1, d2) = (0.6, 0.8);
    let du = 0.0021;
    let mut traction = [sigma_n, 0.0, 0.0];
    let mut n_stick = 0;
    for step in 1..=20 {
        // elastic predictor
        let mut trial = [traction[0], traction[1] + ks * du * d1, traction[2] + ks * du * d2];
        update.update_traction(&mut state, &mut trial, &stiffness, 1.0)?;
        traction = trial;

        // total displacement u = step du = u_elastic + slip
        let u = (step as f64) * du;
        let slip = f64::sqrt(state.slip[1] * state.slip[1] + state.slip[2] * state.slip[2]);
        let tau = shear_traction(&traction);
        if ks * u <= strength {
            n_stick += 1;
            assert!(!state.slipping);
            assert_eq!(slip, 0.0);
            approx_eq(tau, ks * u, 1e-12);
        } else {
            assert!(state.slipping);
            approx_eq(tau, strength, 1e-12);
            approx_eq(slip, u - strength / ks, 1e-14);
            // the slip is aligned with the shear traction
            approx_eq(state.slip[1] * d2, state.slip[2] * d1, 1e-15);
        }
        assert_eq!(traction[0], sigma_n);
    }
    assert_eq!(n_stick, 5);
    Ok(())
}
