use crate::base::{Config, Solver, UpdateError};

/// Maximum number of residual blocks
const N_BLOCK_MAX: usize = 2;

/// Controls the convergence of the local (Newton) iterations of a return map
///
/// The residual may be split into blocks (e.g., deviatoric and volumetric), each with its own
/// norm. The iterations converge when every block satisfies
///
/// ```text
/// ‖R‖ ≤ abs_tol    or    ‖R‖/‖R₀‖ ≤ rel_tol
/// ```
///
/// where `R₀` is the residual of the block at the initial guess. A non-finite residual stops
/// the iterations and is reported as [UpdateError::MaxIterationsExceeded].
pub struct LocalConvergence<'a> {
    config: &'a Config,
    solver: Solver,
    n_block: usize,
    iteration: usize,
    norm_r0: [f64; N_BLOCK_MAX],
    norm_r: [f64; N_BLOCK_MAX],
    largest_prev: f64,
    converged: bool,
}

impl<'a> LocalConvergence<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config, solver: Solver) -> Self {
        LocalConvergence {
            config,
            solver,
            n_block: 1,
            iteration: 0,
            norm_r0: [0.0; N_BLOCK_MAX],
            norm_r: [0.0; N_BLOCK_MAX],
            largest_prev: 0.0,
            converged: false,
        }
    }

    /// Records the residual norms at the initial guess and prints the header
    ///
    /// # Panics
    ///
    /// A panic will occur if `norms` has more than two blocks (or none)
    pub fn initialize(&mut self, norms: &[f64]) {
        assert!(!norms.is_empty() && norms.len() <= N_BLOCK_MAX);
        self.n_block = norms.len();
        self.iteration = 0;
        for b in 0..self.n_block {
            self.norm_r0[b] = norms[b];
            self.norm_r[b] = norms[b];
        }
        self.largest_prev = self.largest();
        self.converged = false;
        if self.config.verbose_iterations {
            println!("\n{} return map", self.solver.name());
            println!("{}", "─".repeat(52));
            println!("{:>5} {:>15} {:>15} {:>3}", "iter", "max ‖R‖", "max ‖R‖/‖R₀‖", "");
            println!("{}", "─".repeat(52));
            println!("{:>5} {:>15.8e} {:>15} {:>3}", 0, self.largest_prev, "", "➖");
        }
    }

    /// Analyzes the residual norms after a Newton update and returns whether the iterations converged
    pub fn analyze(&mut self, iteration: usize, norms: &[f64]) -> Result<bool, UpdateError> {
        self.iteration = iteration;
        self.largest_prev = self.largest();
        let mut finite = true;
        let mut converged = true;
        for b in 0..self.n_block {
            let norm = norms[b];
            self.norm_r[b] = norm;
            if !norm.is_finite() {
                finite = false;
            }
            converged =
                converged && (norm <= self.config.abs_tol || norm / self.norm_r0[b] <= self.config.rel_tol);
        }
        self.converged = finite && converged;
        self.print_iteration();
        if !finite {
            return Err(UpdateError::MaxIterationsExceeded(self.solver));
        }
        Ok(self.converged)
    }

    /// Returns the largest relative residual ‖R‖/‖R₀‖ among the blocks
    pub fn relative(&self) -> f64 {
        let mut res = 0.0;
        for b in 0..self.n_block {
            res = f64::max(res, self.norm_r[b] / self.norm_r0[b]);
        }
        res
    }

    /// Returns the number of Newton updates performed so far
    pub fn n_iterations(&self) -> usize {
        self.iteration
    }

    /// Returns the error to be reported when the iterations are exhausted
    pub fn exhausted(&self) -> UpdateError {
        if self.config.verbose_iterations {
            println!("{}", "─".repeat(52));
            println!("🎈 not converged after {} iterations", self.iteration);
        }
        UpdateError::MaxIterationsExceeded(self.solver)
    }

    /// Prints the footer after convergence
    pub fn print_footer(&self) {
        if self.config.verbose_iterations {
            println!("{}", "─".repeat(52));
        }
    }

    /// Returns the largest residual norm among the blocks
    fn largest(&self) -> f64 {
        let mut res = 0.0;
        for b in 0..self.n_block {
            res = f64::max(res, self.norm_r[b]);
        }
        res
    }

    /// Prints the current iteration
    fn print_iteration(&self) {
        if self.config.verbose_iterations {
            let largest = self.largest();
            let icon = if self.converged {
                "✅"
            } else if largest > self.largest_prev || !largest.is_finite() {
                "🎈"
            } else {
                "🔹"
            };
            println!(
                "{:>5} {:>15.8e} {:>15.8e} {:>3}",
                self.iteration,
                largest,
                self.relative(),
                icon
            );
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
