use russell_lab::approx_eq;
use visco::prelude::*;
use visco::StrError;

// Munson-Dawson transient creep with a stress drop
//
// TEST GOAL
//
// This test verifies the branch switch of the Munson-Dawson mechanism: the accumulated strain
// built under a high stress exceeds the saturation strain of a lower stress; thus, after the
// stress drop, the transient rate changes sign (recovery) and the strain decreases.
//
// CONFIGURATION AND PARAMETERS
//
// See demos/munson_dawson_switch.json
//
// Stage 1: q = 2 MPa during 1 day (hardening)
// Stage 2: q = 1 MPa during 1 day (recovery)

#[test]
fn test_munson_dawson_switch() -> Result<(), StrError> {
    let program = PointProgram::read_json("demos/munson_dawson_switch.json")?;
    let config = Config::new();
    let results = PointDriver::new(&program, &config)?.run()?;
    assert_eq!(results.outputs.len(), 201);
    assert_eq!(results.names, &["eqv_creep_strain_R"]);

    // hardening
    for k in 1..101 {
        approx_eq(results.outputs[k].von_mises_stress, 2.0, 1e-10);
        assert!(results.outputs[k].eqv_creep_strain > results.outputs[k - 1].eqv_creep_strain);
    }

    // the strain is above the saturation strain of the lower stress: γ̄ = (1/0.3)³ × 10⁻⁶
    let gamma_switch = results.outputs[100].eqv_creep_strain;
    let saturation = f64::powf(1.0 / 0.3, 3.0) * 1e-6;
    assert!(gamma_switch > saturation);

    // recovery
    for k in 101..201 {
        approx_eq(results.outputs[k].von_mises_stress, 1.0, 1e-10);
        assert!(results.outputs[k].eqv_creep_strain < results.outputs[k - 1].eqv_creep_strain);
        assert!(results.outputs[k].n_iterations <= 5);
    }
    Ok(())
}

#[test]
fn test_munson_dawson_rate_sign_follows_branch() -> Result<(), StrError> {
    let config = Config::new();
    let update = CreepUpdate::<f64>::new(&SampleParams::param_munson_dawson(), &config)?;
    let elasticity = Elasticity::new(20_000.0, 10_000.0)?;
    let q = 2.0;
    let saturation = f64::powf(q / 0.3, 3.0) * 1e-6;
    let trial = SymTensor::from_components(-(5.0 + 2.0 * q / 3.0), -(5.0 - q / 3.0), -(5.0 - q / 3.0), 0.0, 0.0, 0.0);

    // below the saturation strain: hardening (forward creep)
    let mut state = LocalState::from_values(&[0.9 * saturation]);
    let mut stress = trial;
    update.update_stress(&mut state, &mut stress, &elasticity, 0.01)?;
    assert!(state.internal_values[0] > 0.9 * saturation);
    assert!(stress.invariant_sigma_d() < q);

    // above the saturation strain: recovery (reverse creep)
    let mut state = LocalState::from_values(&[1.1 * saturation]);
    let mut stress = trial;
    update.update_stress(&mut state, &mut stress, &elasticity, 0.01)?;
    assert!(state.internal_values[0] < 1.1 * saturation);
    assert!(stress.invariant_sigma_d() > q);
    Ok(())
}
