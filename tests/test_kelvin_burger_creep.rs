use russell_lab::approx_eq;
use visco::prelude::*;
use visco::StrError;

// Creep of Kelvin and Burger material points under constant stress
//
// TEST GOAL
//
// This test verifies the single- and two-variable return maps (driven by stress) against
// the closed-form creep curves
//
// ```text
// Kelvin:  γ(t) = q/(3 G_K) (1 - exp(-G_K t/η_K))
// Burger:  γ(t) = q t/(3 η_M) + q/(3 G_K) (1 - exp(-G_K t/η_K))
// ```
//
// CONFIGURATION AND PARAMETERS
//
// K = 20000 MPa, G = 10000 MPa, η_M = 5000 MPa·day, η_K = 2000 MPa·day, G_K = 1000 MPa
// q = 10 MPa, p = 5 MPa, Δt = 0.01 day, 200 steps

fn program(param: ParamCreep) -> PointProgram {
    PointProgram {
        param,
        bulk: 20_000.0,
        shear: 10_000.0,
        dt: 0.01,
        loading: Loading::Creep {
            stages: vec![CreepStage {
                q: 10.0,
                p: 5.0,
                n_steps: 200,
            }],
        },
    }
}

#[test]
fn test_kelvin_creep() -> Result<(), StrError> {
    let (eta_k, gk, q) = (2_000.0, 1_000.0, 10.0);
    let config = Config::new();
    let results = PointDriver::new(&program(SampleParams::param_kelvin()), &config)?.run()?;
    for out in &results.outputs[1..] {
        let correct = q / (3.0 * gk) * (1.0 - f64::exp(-gk * out.time / eta_k));
        approx_eq(out.eqv_creep_strain, correct, 1e-5);
        approx_eq(out.von_mises_stress, q, 1e-10);
        approx_eq(out.pressure, 5.0, 1e-10);
    }
    // the creep strain saturates
    let last = results.outputs.last().unwrap();
    assert!(last.eqv_creep_strain < q / (3.0 * gk));
    assert!(last.eqv_strain_rate < results.outputs[2].eqv_strain_rate);
    Ok(())
}

#[test]
fn test_burger_creep() -> Result<(), StrError> {
    let (eta_m, eta_k, gk, q) = (5_000.0, 2_000.0, 1_000.0, 10.0);
    let config = Config::new();
    let results = PointDriver::new(&program(SampleParams::param_burger()), &config)?.run()?;
    assert_eq!(
        results.names,
        &["eqv_creep_strain_maxwell", "eqv_creep_strain_kelvin"]
    );
    for out in &results.outputs[1..] {
        let maxwell = q * out.time / (3.0 * eta_m);
        let kelvin = q / (3.0 * gk) * (1.0 - f64::exp(-gk * out.time / eta_k));
        approx_eq(out.eqv_creep_strain, maxwell + kelvin, 1e-5);
    }
    // the Maxwell mechanism is exact under constant stress
    let t = results.outputs.last().unwrap().time;
    approx_eq(results.internal_values[0], q * t / (3.0 * eta_m), 1e-12);
    Ok(())
}

#[test]
fn test_lubby2_is_faster_than_burger() -> Result<(), StrError> {
    // exponential stress dependence reduces the viscosities
    let config = Config::new();
    let burger = PointDriver::new(&program(SampleParams::param_burger()), &config)?.run()?;
    let lubby2 = PointDriver::new(&program(SampleParams::param_lubby2()), &config)?.run()?;
    let gamma_burger = burger.outputs.last().unwrap().eqv_creep_strain;
    let gamma_lubby2 = lubby2.outputs.last().unwrap().eqv_creep_strain;
    assert!(gamma_lubby2 > gamma_burger);
    Ok(())
}
