use enum_dispatch::enum_dispatch;
use faer::Col;

use crate::E;
use crate::linalg::solver::LinearSolver;
use crate::linalg::vector_ops::argmin;
use crate::lp::simplex::basis::Basis;

/// Negativity threshold for Bland's rule. Reduced costs above this value are
/// treated as non-negative regardless of the caller's tolerance.
pub(crate) const BLAND_TOL: E = 1e-14;

/// Entering-variable selection strategy.
#[enum_dispatch]
pub trait PivotRule {
    /// Picks the nonbasic position that should enter the basis, or `None`
    /// when no reduced cost is negative enough.
    fn entering(&self, reduced: &Col<E>, tol: E) -> Option<usize>;
}

/// Dantzig's rule: enter the variable with the most negative reduced cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dantzig;

impl PivotRule for Dantzig {
    fn entering(&self, reduced: &Col<E>, tol: E) -> Option<usize> {
        match argmin(reduced.as_ref()) {
            Some((j, r)) if r < -tol => Some(j),
            _ => None,
        }
    }
}

/// Bland's anti-cycling rule: enter the first variable with a negative
/// reduced cost. Combined with the first-minimum ratio test this rules out
/// basis cycling on degenerate vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bland;

impl PivotRule for Bland {
    fn entering(&self, reduced: &Col<E>, _tol: E) -> Option<usize> {
        (0..reduced.nrows()).find(|&j| reduced[j] < -BLAND_TOL)
    }
}

/// An enum representing the available entering rules. Dantzig's rule is the
/// default; Bland's rule takes over for degenerate pivots.
#[enum_dispatch(PivotRule)]
#[derive(Debug, Clone, Copy)]
pub enum PivotRules {
    Dantzig,
    Bland,
}

/// Outcome of one entering/leaving selection.
pub(crate) enum PivotStep {
    /// No entering candidate remains: the current basis is optimal.
    Optimal,
    /// The entering variable can grow without leaving the feasible region.
    Unbounded,
    /// Exchange nonbasic position `enter` with basic position `leave`,
    /// moving the entering variable by `step`.
    Swap { enter: usize, leave: usize, step: E },
}

/// Runs the entering rule and the ratio test against the current basis.
pub(crate) fn select<L: LinearSolver>(
    basis: &Basis<L>,
    reduced: &Col<E>,
    rule: &PivotRules,
    tol: E,
) -> PivotStep {
    let Some(enter) = rule.entering(reduced, tol) else {
        return PivotStep::Optimal;
    };

    let d = basis
        .direction(enter)
        .unwrap_or_else(|e| panic!("linear solve failed on a nonsingular basis: {e}"));

    match ratio_test(&basis.xb, &d) {
        Some((leave, step)) => PivotStep::Swap { enter, leave, step },
        None => PivotStep::Unbounded,
    }
}

/// Minimum-ratio test over the rows where the direction is negative.
///
/// Returns the leaving row and the step length of the entering variable, or
/// `None` when no basic value decreases (the step is unbounded). Ties keep
/// the first row encountered.
pub(crate) fn ratio_test(xb: &Col<E>, d: &Col<E>) -> Option<(usize, E)> {
    let mut best: Option<(usize, E)> = None;

    for i in 0..d.nrows() {
        if d[i] < 0.0 {
            let step = xb[i] / -d[i];
            if best.is_none_or(|(_, s)| step < s) {
                best = Some((i, step));
            }
        }
    }

    best
}
