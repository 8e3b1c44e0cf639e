use faer::Col;

use derive_more::{Display, Error};

pub type E = f64;
pub type I = usize;

pub mod callback;
pub mod linalg;
pub mod lp;
pub mod terminators;

#[cfg(test)]
pub mod tests;

/// Status codes for optimization solvers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Status {
    #[default]
    /// The solver is still running.
    InProgress,
    /// An optimal solution was found.
    Optimal,
    /// The problem is infeasible.
    Infeasible,
    /// The problem is unbounded.
    Unbounded,
    /// The solver stopped due to a time limit.
    TimeLimit,
    /// The solver stopped due to an iteration limit.
    IterationLimit,
    /// The solver was interrupted (e.g., by user or signal).
    Interrupted,
}

/// Errors surfaced to the caller by the solver entry points.
///
/// Structural rejects (`ZeroRow`, `ZeroColumn`, `Singular`) describe the
/// problem data and can be handled by preprocessing on the caller side.
/// `Infeasible` and `Unbounded` are definitive outcomes of the solve.
#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
pub enum SolverError {
    /// The feasible region is empty.
    #[display("problem is infeasible")]
    Infeasible,

    /// The objective is unbounded below on the feasible region.
    #[display("objective is unbounded below")]
    Unbounded,

    /// The constraint matrix has fewer than `m` linearly independent columns.
    #[display("constraint matrix is rank deficient")]
    Singular,

    /// A constraint row is identically zero (with a zero right-hand side).
    #[display("constraint matrix contains an all-zero row")]
    ZeroRow,

    /// A column is identically zero (with a non-negative cost).
    #[display("constraint matrix contains an all-zero column")]
    ZeroColumn,

    /// The iteration cap was reached before termination.
    #[display("iteration limit reached")]
    IterationLimit,
}

/// Trait for iterative optimization solvers.
///
/// Provides a standard interface for algorithms that proceed by repeated
/// iteration. The solver mutates `state` as it goes; `hooks` are polled once
/// per iteration for output and early termination.
pub trait Solver {
    /// Run the solver until convergence or maximum iterations.
    fn solve(
        &mut self,
        state: &mut SolverState,
        hooks: &mut SolverHooks,
    ) -> Result<Status, SolverError>;
}

/// Mutable per-solve state shared between the solver and its hooks.
#[derive(Debug, Clone)]
pub struct SolverState {
    pub(crate) status: Status,
    pub(crate) nit: usize,

    pub(crate) objective: E,
    pub(crate) dual_infeasibility: E,

    pub(crate) x: Option<Col<E>>,
    pub(crate) basis: Vec<I>,
}

impl SolverState {
    pub fn new() -> Self {
        Self {
            status: Status::InProgress,
            nit: 0,
            objective: E::NAN,
            dual_infeasibility: E::NAN,
            x: None,
            basis: Vec::new(),
        }
    }

    pub fn get_status(&self) -> Status {
        self.status
    }

    /// Number of pivots performed so far.
    pub fn get_iterations(&self) -> usize {
        self.nit
    }

    /// Current objective value; negative infinity when unbounded, NaN before
    /// the first iteration and on structural rejects.
    pub fn get_objective(&self) -> E {
        self.objective
    }

    /// Magnitude of the most negative reduced cost seen this iteration.
    pub fn get_dual_infeasibility(&self) -> E {
        self.dual_infeasibility
    }

    /// The primal vector, available once an optimal basis is reached.
    pub fn get_primal(&self) -> Option<&Col<E>> {
        self.x.as_ref()
    }

    /// Column indices of the final basic variables.
    pub fn get_basis(&self) -> &[I] {
        &self.basis
    }
}

impl Default for SolverState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-iteration hooks attached to a solve.
pub struct SolverHooks {
    pub callback: Box<dyn crate::callback::Callback>,
    pub terminator: Box<dyn crate::terminators::Terminator>,
}

impl Default for SolverHooks {
    fn default() -> Self {
        use crate::callback::{Callback, NoOpCallback};

        Self {
            callback: Box::new(NoOpCallback::new(&SolverOptions::default())),
            terminator: Box::new(crate::terminators::MultipleTerminators::new(Vec::new())),
        }
    }
}

/// Tunable knobs shared by the solver entry points.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Iteration cap for a single simplex run.
    pub max_iterations: usize,
    /// Reduced costs above `-tolerance` count as non-negative.
    pub tolerance: E,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: 1e-9,
        }
    }
}
