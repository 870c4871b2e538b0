use structopt::StructOpt;
use visco::prelude::*;
use visco::StrError;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "visco_point",
    about = "Runs a creep or relaxation program at a single material point"
)]
struct Options {
    /// JSON file with the point program
    program: String,

    /// Writes the results to a JSON file instead of printing a table (bare names go to /tmp/visco/results)
    #[structopt(short, long)]
    output: Option<String>,

    /// Absolute tolerance of the local Newton iterations
    #[structopt(long, default_value = "1e-10")]
    abs_tol: f64,

    /// Relative tolerance of the local Newton iterations
    #[structopt(long, default_value = "1e-10")]
    rel_tol: f64,

    /// Solves the deviatoric and volumetric unknowns simultaneously
    #[structopt(long)]
    simultaneous: bool,

    /// Prints the local iterations
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // configuration
    let staging = if options.simultaneous {
        Staging::Simultaneous
    } else {
        Staging::Sequential
    };
    let mut config = Config::new();
    config
        .set_abs_tol(options.abs_tol)?
        .set_rel_tol(options.rel_tol)?
        .set_staging(staging)?
        .set_verbose_iterations(options.verbose)?;

    // run
    let program = PointProgram::read_json(&options.program)?;
    let driver = PointDriver::new(&program, &config)?;
    let results = driver.run()?;

    // output
    match &options.output {
        Some(name) => {
            let path = PointResults::output_path(name);
            results.write_json(&path)?;
            let thin_line = format!("{:─^1$}", "", path.len());
            println!("\n{}", thin_line);
            println!("results written to:");
            println!("{}", path);
            println!("{}\n", thin_line);
        }
        None => print!("{}", results.table()),
    }
    Ok(())
}
