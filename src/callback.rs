use crate::{SolverOptions, SolverState};

/// Hook invoked once per solver iteration for logging, monitoring, or early stopping.
pub trait Callback {
    /// Creates a new callback from solver options.
    fn new(options: &SolverOptions) -> Self
    where
        Self: Sized;

    /// Called once before the first iteration.
    fn init(&mut self, state: &SolverState);

    /// Called at the end of each iteration with the current solver state.
    fn call(&mut self, state: &SolverState);
}

/// A callback that does nothing. Use when no per-iteration output is needed.
pub struct NoOpCallback {}

impl Callback for NoOpCallback {
    fn new(_options: &SolverOptions) -> Self {
        Self {}
    }

    fn init(&mut self, _state: &SolverState) {
        // Do nothing
    }

    fn call(&mut self, _state: &SolverState) {
        // Do nothing
    }
}

/// Prints the objective and dual infeasibility to stdout each iteration.
pub struct ConvergenceOutput {}

impl Callback for ConvergenceOutput {
    fn new(_options: &SolverOptions) -> Self {
        Self {}
    }

    fn init(&mut self, _state: &SolverState) {
        println!("| {:>4} | {:<12} | {:<8} |", "nit", "objective", "dual inf");
    }

    fn call(&mut self, state: &SolverState) {
        let txt = format!(
            "| {:4} | {:<12.5e} | {:<8.2e} |",
            state.nit, state.objective, state.dual_infeasibility,
        );
        println!("{}", txt);
    }
}
