//! # Revised Simplex Method for Standard-Form Linear Programs
//!
//! This module implements the revised simplex method for problems of the
//! form:
//!
//! ```text
//!   min  c^T x
//!   s.t. A x = b
//!        x >= 0
//! ```
//!
//! Instead of carrying a full tableau, each iteration works from a
//! factorization of the current basis matrix: a transpose solve prices the
//! nonbasic columns, a forward solve yields the direction of change of the
//! basic values, and the minimum-ratio test bounds the step. Degenerate
//! pivots switch the entering rule from Dantzig's most-negative-reduced-cost
//! choice to Bland's least-index rule, which rules out basis cycling.
//!
//! The algorithmic structure follows the classical two-phase scheme as
//! described in:
//!
//! > V. Chvátal, "Linear Programming", W. H. Freeman, 1983.

pub(crate) mod basis;
pub(crate) mod phase_one;
pub mod pivot;

use std::marker::PhantomData;

use faer::Col;

use crate::linalg::lu::DenseLu;
use crate::linalg::solver::LinearSolver;
use crate::linalg::vector_ops::argmin;
use crate::lp::simplex::basis::Basis;
use crate::lp::simplex::phase_one::{INIT_POS_TOL, PhaseOneOutcome};
use crate::lp::simplex::pivot::{Bland, Dantzig, PivotStep, PivotRules};
use crate::lp::{Solution, StandardLp};
use crate::{E, I, Solver, SolverError, SolverHooks, SolverOptions, SolverState, Status};

/// Cost increases above this threshold indicate a defective pivot sequence
/// and abort the solve.
const MONOTONICITY_TOL: E = 1e-10;

/// Revised simplex solver over a standard-form linear program.
///
/// The linear-algebra backend is pluggable through the [`LinearSolver`]
/// parameter; [`DenseLu`] is the default.
pub struct RevisedSimplex<'a, L: LinearSolver = DenseLu> {
    lp: &'a StandardLp,
    initial_basis: Option<Vec<I>>,
    options: SolverOptions,

    _lin_solve: PhantomData<L>,
}

impl<'a, L: LinearSolver> RevisedSimplex<'a, L> {
    /// Creates a new solver instance for the given linear program and
    /// options.
    pub fn new(lp: &'a StandardLp, options: &SolverOptions) -> Self {
        Self {
            lp,
            initial_basis: None,
            options: options.clone(),
            _lin_solve: PhantomData,
        }
    }

    /// Starts the iteration from a caller-supplied basis instead of running
    /// the initialization phase. The basis must index `m` feasible columns;
    /// anything else is a programmer error and aborts the solve.
    pub fn with_initial_basis(mut self, basic: &[I]) -> Self {
        self.initial_basis = Some(basic.to_vec());
        self
    }
}

impl<L: LinearSolver> Solver for RevisedSimplex<'_, L> {
    fn solve(
        &mut self,
        state: &mut SolverState,
        hooks: &mut SolverHooks,
    ) -> Result<Status, SolverError> {
        let (n, m) = self.lp.get_dims();

        state.status = Status::InProgress;
        state.nit = 0;

        if let Err(err) = self.lp.validate() {
            return match err {
                SolverError::Infeasible => {
                    state.status = Status::Infeasible;
                    Ok(Status::Infeasible)
                }
                SolverError::Unbounded => {
                    state.status = Status::Unbounded;
                    state.objective = E::NEG_INFINITY;
                    Ok(Status::Unbounded)
                }
                other => Err(other),
            };
        }

        let mut basis = match &self.initial_basis {
            Some(basic) => {
                assert_eq!(
                    basic.len(),
                    m,
                    "supplied basis must have one column per constraint"
                );
                let basis = match Basis::<L>::new(self.lp, basic.clone()) {
                    Ok(basis) => basis,
                    Err(e) => panic!("supplied basis is singular: {e}"),
                };
                let worst = argmin(basis.xb.as_ref()).map_or(0.0, |(_, v)| v);
                assert!(worst >= -INIT_POS_TOL, "supplied basis is not feasible");
                basis
            }
            None => match phase_one::find_feasible_basis::<L>(self.lp, &self.options)? {
                PhaseOneOutcome::Feasible(basis) => basis,
                PhaseOneOutcome::Infeasible => {
                    state.status = Status::Infeasible;
                    return Ok(Status::Infeasible);
                }
                PhaseOneOutcome::IterationLimit => {
                    state.status = Status::IterationLimit;
                    return Ok(Status::IterationLimit);
                }
            },
        };

        hooks.callback.init(state);
        hooks.terminator.initialize();

        let status = simplex_loop(
            &mut basis,
            self.lp.rhs(),
            self.options.tolerance,
            self.options.max_iterations,
            state,
            hooks,
        );

        match status {
            Status::Optimal => {
                state.objective = basis.objective();
                state.x = Some(basis.expand_primal(n));
                state.basis = basis.basic().to_vec();
            }
            Status::Unbounded => {
                state.objective = E::NEG_INFINITY;
                state.x = None;
                state.basis.clear();
            }
            _ => {}
        }
        state.status = status;

        Ok(status)
    }
}

/// Runs simplex iterations on an already feasible basis until optimality,
/// unboundedness, a hook-requested stop, or the iteration cap.
///
/// A linear-solve failure inside the loop means a basis that was invertible
/// by construction stopped being solvable, which is a defect rather than a
/// data condition; it aborts the process.
pub(crate) fn simplex_loop<L: LinearSolver>(
    basis: &mut Basis<L>,
    b: &Col<E>,
    tol: E,
    max_iterations: usize,
    state: &mut SolverState,
    hooks: &mut SolverHooks,
) -> Status {
    let mut last_cost = basis.objective();
    state.objective = last_cost;

    for nit in 0..max_iterations {
        state.nit = nit;

        let reduced = basis
            .reduced_costs()
            .unwrap_or_else(|e| panic!("linear solve failed on a nonsingular basis: {e}"));
        state.dual_infeasibility = argmin(reduced.as_ref()).map_or(0.0, |(_, r)| E::max(0.0, -r));

        let mut choice = pivot::select(basis, &reduced, &PivotRules::from(Dantzig), tol);
        if matches!(choice, PivotStep::Swap { step, .. } if step <= 0.0) {
            // Degenerate pivot: switch to Bland's rule for this iteration.
            choice = pivot::select(basis, &reduced, &PivotRules::from(Bland), tol);
        }

        match choice {
            PivotStep::Optimal => return Status::Optimal,
            PivotStep::Unbounded => return Status::Unbounded,
            PivotStep::Swap { enter, leave, .. } => {
                basis.swap(leave, enter);
                basis
                    .refresh(b)
                    .unwrap_or_else(|e| panic!("linear solve failed on a nonsingular basis: {e}"));

                let cost = basis.objective();
                assert!(
                    cost - last_cost <= MONOTONICITY_TOL,
                    "objective increased from {last_cost} to {cost}"
                );
                last_cost = cost;
                state.objective = cost;
            }
        }

        hooks.callback.call(state);
        if let Some(stop) = hooks.terminator.terminate(state) {
            return stop;
        }
    }

    Status::IterationLimit
}

/// Solves a standard-form linear program and returns the optimal solution.
///
/// `initial_basis` either names `m` columns of a feasible starting basis
/// (verified, and aborting on a basis that is singular or infeasible) or is
/// `None`, in which case a feasible basis is constructed internally. Reduced
/// costs above `-tol` count as non-negative.
///
/// Infeasibility and unboundedness are reported through [`SolverError`]; an
/// unbounded problem has objective value negative infinity and no finite
/// solution vector to return.
pub fn solve(
    lp: &StandardLp,
    initial_basis: Option<&[I]>,
    tol: E,
) -> Result<Solution, SolverError> {
    let options = SolverOptions {
        tolerance: tol,
        ..SolverOptions::default()
    };

    let mut solver = RevisedSimplex::<DenseLu>::new(lp, &options);
    if let Some(basic) = initial_basis {
        solver = solver.with_initial_basis(basic);
    }

    let mut state = SolverState::new();
    let mut hooks = SolverHooks::default();

    match solver.solve(&mut state, &mut hooks)? {
        Status::Optimal => {
            let Some(x) = state.x.take() else {
                unreachable!("an optimal status always carries a solution")
            };
            Ok(Solution {
                objective: state.objective,
                x,
                basis: std::mem::take(&mut state.basis),
            })
        }
        Status::Infeasible => Err(SolverError::Infeasible),
        Status::Unbounded => Err(SolverError::Unbounded),
        Status::IterationLimit => Err(SolverError::IterationLimit),
        status => unreachable!("default hooks cannot produce {status:?}"),
    }
}
