use super::{CreepUpdate, LocalState, PointOutput};
use crate::base::{Config, Elasticity, ParamCreep, SymTensor, DEFAULT_OUT_DIR};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Defines the tolerance of the stress-controlled (creep) fixed-point iterations
///
/// The test is `max |Δε_c(k+1) - Δε_c(k)| ≤ tol (1 + ‖Δε_c‖)`.
const CREEP_STAGE_TOLERANCE: f64 = 1e-13;

/// Defines the maximum number of stress-controlled (creep) fixed-point iterations
const CREEP_STAGE_MAX_ITERATIONS: usize = 500;

/// Holds one stage of constant (axisymmetric compression) stress
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreepStage {
    /// Deviatoric (von Mises) stress q
    pub q: f64,

    /// Pressure p (positive in compression)
    pub p: f64,

    /// Number of time steps
    pub n_steps: usize,
}

/// Specifies the loading applied to the material point
///
/// Axial strains are isochoric: `Δε = Δa diag(1, -½, -½)`, thus `q = 3G (a - γ)` for a single
/// mechanism.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Loading {
    /// Applies an axial strain in the first step and holds it (relaxation)
    Relaxation { axial_strain: f64, n_steps: usize },

    /// Applies a constant axial strain rate (stress build-up)
    StrainRate { axial_strain_rate: f64, n_steps: usize },

    /// Applies constant stress stages (creep)
    Creep { stages: Vec<CreepStage> },
}

/// Holds the input of a single-point simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointProgram {
    /// Creep model parameters
    pub param: ParamCreep,

    /// Bulk modulus K
    pub bulk: f64,

    /// Shear modulus G
    pub shear: f64,

    /// Time step Δt
    pub dt: f64,

    /// Loading program
    pub loading: Loading,
}

impl PointProgram {
    /// Reads a JSON file containing the program
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let program = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(program)
    }
}

/// Holds the results of a single-point simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointResults {
    /// Names of the internal values
    pub names: Vec<String>,

    /// Outputs at every time (including the initial state)
    pub outputs: Vec<PointOutput>,

    /// Final internal values
    pub internal_values: Vec<f64>,
}

impl PointResults {
    /// Writes a JSON file with the results
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }

    /// Returns a table with the results
    pub fn table(&self) -> String {
        let mut buffer = format!(
            "{:>12} {:>14} {:>14} {:>14} {:>14} {:>6}\n",
            "time", "q", "p", "eps_d", "gamma", "iter"
        );
        for out in &self.outputs {
            buffer.push_str(&format!(
                "{:>12.5e} {:>14.6e} {:>14.6e} {:>14.6e} {:>14.6e} {:>6}\n",
                out.time, out.von_mises_stress, out.pressure, out.eqv_strain, out.eqv_creep_strain, out.n_iterations
            ));
        }
        buffer
    }

    /// Returns the path of an output file
    ///
    /// A bare file name is placed under [DEFAULT_OUT_DIR]; any other path is kept.
    pub fn output_path(name: &str) -> String {
        if Path::new(name).components().count() > 1 {
            name.to_string()
        } else {
            format!("{}/{}", DEFAULT_OUT_DIR, name)
        }
    }
}

/// Runs creep and relaxation programs at a single material point
pub struct PointDriver {
    /// Holds the creep update
    update: CreepUpdate<f64>,

    /// Holds the elastic moduli
    elasticity: Elasticity,

    /// Holds the time step
    dt: f64,

    /// Holds the loading
    loading: Loading,
}

impl PointDriver {
    /// Allocates a new instance
    pub fn new(program: &PointProgram, config: &Config) -> Result<Self, StrError> {
        if program.dt <= 0.0 {
            return Err("dt must be > 0.0");
        }
        Ok(PointDriver {
            update: CreepUpdate::new(&program.param, config)?,
            elasticity: Elasticity::new(program.bulk, program.shear)?,
            dt: program.dt,
            loading: program.loading.clone(),
        })
    }

    /// Runs the program
    pub fn run(&self) -> Result<PointResults, StrError> {
        let mut state = self.update.new_local_state();
        let mut stress = SymTensor::new();
        let mut outputs = vec![PointOutput::default()];
        match &self.loading {
            Loading::Relaxation { axial_strain, n_steps } => {
                for step in 0..*n_steps {
                    let a = if step == 0 { *axial_strain } else { 0.0 };
                    let delta_strain = axial(a);
                    self.strain_step(&mut state, &mut stress, &delta_strain, &mut outputs)?;
                }
            }
            Loading::StrainRate {
                axial_strain_rate,
                n_steps,
            } => {
                let delta_strain = axial(axial_strain_rate * self.dt);
                for _ in 0..*n_steps {
                    self.strain_step(&mut state, &mut stress, &delta_strain, &mut outputs)?;
                }
            }
            Loading::Creep { stages } => {
                for stage in stages {
                    let target = axisymmetric_compression(stage.q, stage.p);
                    for _ in 0..stage.n_steps {
                        self.stress_step(&mut state, &mut stress, &target, &mut outputs)?;
                    }
                }
            }
        }
        Ok(PointResults {
            names: self.update.internal_value_names(),
            outputs,
            internal_values: state.internal_values.as_data().clone(),
        })
    }

    /// Performs a strain-controlled step
    fn strain_step(
        &self,
        state: &mut LocalState,
        stress: &mut SymTensor<f64>,
        delta_strain: &SymTensor<f64>,
        outputs: &mut Vec<PointOutput>,
    ) -> Result<(), StrError> {
        let mut sigma = self.elasticity.trial_stress(stress, delta_strain);
        self.update.update_stress(state, &mut sigma, &self.elasticity, self.dt)?;
        *stress = sigma;
        self.push_output(state, stress, delta_strain, outputs)
    }

    /// Performs a stress-controlled step
    ///
    /// The creep strain increment is found by fixed-point iterations such that the corrected stress
    /// equals the target stress. The state is modified only after the iterations converge.
    fn stress_step(
        &self,
        state: &mut LocalState,
        stress: &mut SymTensor<f64>,
        target: &SymTensor<f64>,
        outputs: &mut Vec<PointOutput>,
    ) -> Result<(), StrError> {
        let delta_elastic = self.elasticity.strain_increment(&(*target - *stress));
        let mut delta_creep = SymTensor::new();
        for _ in 0..CREEP_STAGE_MAX_ITERATIONS {
            let mut trial_state = state.clone();
            let delta_strain = delta_elastic + delta_creep;
            let mut sigma = self.elasticity.trial_stress(stress, &delta_strain);
            let inelastic = self.update.update_stress(&mut trial_state, &mut sigma, &self.elasticity, self.dt)?;
            let diff = inelastic.max_abs_diff(&delta_creep);
            delta_creep = inelastic;
            if diff <= CREEP_STAGE_TOLERANCE * (1.0 + delta_creep.norm()) {
                let delta_strain = delta_elastic + delta_creep;
                state.copy_from(&trial_state)?;
                *stress = sigma;
                return self.push_output(state, stress, &delta_strain, outputs);
            }
        }
        Err("stress-controlled step did not converge")
    }

    /// Computes and stores the outputs at the end of a step
    fn push_output(
        &self,
        state: &LocalState,
        stress: &SymTensor<f64>,
        delta_strain: &SymTensor<f64>,
        outputs: &mut Vec<PointOutput>,
    ) -> Result<(), StrError> {
        let n_mechanisms = self.update.actual.n_mechanisms();
        let gamma: f64 = state.internal_values.as_data()[..n_mechanisms].iter().sum();
        let previous = outputs.last().ok_or("outputs must not be empty")?;
        let output = PointOutput::new(previous, stress, delta_strain, gamma, state.n_iterations, self.dt)?;
        outputs.push(output);
        Ok(())
    }
}

/// Returns an isochoric axial strain `a diag(1, -½, -½)`
fn axial(a: f64) -> SymTensor<f64> {
    SymTensor::from_components(a, -0.5 * a, -0.5 * a, 0.0, 0.0, 0.0)
}

/// Returns the stress of an axisymmetric compression with given q and p
fn axisymmetric_compression(q: f64, p: f64) -> SymTensor<f64> {
    SymTensor::from_components(-(p + 2.0 * q / 3.0), -(p - q / 3.0), -(p - q / 3.0), 0.0, 0.0, 0.0)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
