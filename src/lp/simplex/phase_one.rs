//! Initialization of the simplex iteration.
//!
//! A feasible starting basis is found in three steps: greedily collect a set
//! of linearly independent columns, check whether that candidate basis is
//! already feasible, and otherwise solve an auxiliary problem with a single
//! artificial variable whose optimal basis seeds the main iteration.

use faer::{Col, ColRef, Mat, MatRef};

use crate::linalg::qr::DenseQr;
use crate::linalg::solver::{LeastSquares, LinearSolver};
use crate::linalg::vector_ops::argmin;
use crate::lp::StandardLp;
use crate::lp::simplex::basis::Basis;
use crate::lp::simplex::simplex_loop;
use crate::{E, I, SolverError, SolverHooks, SolverOptions, SolverState, Status};

/// Residual threshold below which a column counts as linearly dependent.
pub(crate) const LIN_DEP_TOL: E = 1e-10;

/// Basic values above `-INIT_POS_TOL` count as non-negative.
pub(crate) const INIT_POS_TOL: E = 1e-14;

/// Optimality tolerance for the auxiliary problem.
const AUXILIARY_TOL: E = 1e-14;

/// Allowed defect when checking the constructed auxiliary basis.
const CONSTRUCTION_TOL: E = 1e-10;

pub(crate) enum PhaseOneOutcome<L: LinearSolver> {
    /// A feasible basis for the original problem.
    Feasible(Basis<L>),
    /// The equality constraints admit no non-negative solution.
    Infeasible,
    /// The auxiliary solve hit the iteration cap.
    IterationLimit,
}

/// Result of checking a candidate basis.
pub(crate) enum Probe<L: LinearSolver> {
    /// Nonsingular with non-negative basic values.
    Feasible(Basis<L>),
    /// Nonsingular, but the basic value in row `worst` is the most negative.
    Negative { basis: Basis<L>, worst: usize },
    /// The candidate columns do not form an invertible matrix.
    Singular,
}

/// Checks whether `basic` indexes a feasible basis for `lp`.
pub(crate) fn probe<L: LinearSolver>(lp: &StandardLp, basic: Vec<I>) -> Probe<L> {
    let basis = match Basis::new(lp, basic) {
        Ok(basis) => basis,
        Err(_) => return Probe::Singular,
    };
    match argmin(basis.xb.as_ref()) {
        Some((worst, value)) if value < -INIT_POS_TOL => Probe::Negative { basis, worst },
        _ => Probe::Feasible(basis),
    }
}

/// Produces a feasible basis for `lp` or decides that none exists.
pub(crate) fn find_feasible_basis<L: LinearSolver>(
    lp: &StandardLp,
    options: &SolverOptions,
) -> Result<PhaseOneOutcome<L>, SolverError> {
    let (n, m) = lp.get_dims();
    let a = lp.constraints();

    let picked = independent_columns(a.as_ref());
    if picked.len() < m {
        // The admitted columns already span the full column space. A
        // right-hand side outside that span makes the equalities unsolvable;
        // inside it, the rows are redundant and no invertible basis exists.
        return if in_span(a.as_ref(), &picked, lp.rhs().as_ref()) {
            Err(SolverError::Singular)
        } else {
            Ok(PhaseOneOutcome::Infeasible)
        };
    }

    let (basis, worst) = match probe::<L>(lp, picked) {
        Probe::Feasible(basis) => return Ok(PhaseOneOutcome::Feasible(basis)),
        Probe::Negative { basis, worst } => (basis, worst),
        Probe::Singular => return Err(SolverError::Singular),
    };

    let (aux, aux_basic) = build_auxiliary(lp, basis.basic(), worst);
    let mut aux_basis = match Basis::<L>::new(&aux, aux_basic) {
        Ok(basis) => basis,
        Err(e) => panic!("auxiliary basis is singular: {e}"),
    };

    let mut state = SolverState::new();
    let mut hooks = SolverHooks::default();
    match simplex_loop(
        &mut aux_basis,
        aux.rhs(),
        AUXILIARY_TOL,
        options.max_iterations,
        &mut state,
        &mut hooks,
    ) {
        Status::Optimal => {
            // The artificial column carries index `n`. If minimization could
            // not drive it out of the basis, no feasible point exists.
            if aux_basis.basic().contains(&n) {
                return Ok(PhaseOneOutcome::Infeasible);
            }
            match Basis::<L>::new(lp, aux_basis.basic().to_vec()) {
                Ok(basis) => Ok(PhaseOneOutcome::Feasible(basis)),
                Err(e) => panic!("basis from the auxiliary problem is singular: {e}"),
            }
        }
        Status::IterationLimit => Ok(PhaseOneOutcome::IterationLimit),
        status => panic!("auxiliary problem terminated with {status:?}"),
    }
}

/// Greedily collects up to `m` linearly independent columns of `a`.
///
/// Columns are scanned from the rightmost one downward; slack blocks usually
/// sit at the end of standard-form matrices and provide an identity-like
/// start. A column is admitted when it is not identically zero and cannot be
/// reproduced from the columns admitted so far.
pub(crate) fn independent_columns(a: MatRef<'_, E>) -> Vec<I> {
    let m = a.nrows();
    let mut picked: Vec<I> = Vec::with_capacity(m);

    for j in (0..a.ncols()).rev() {
        if picked.len() == m {
            break;
        }
        if (0..m).all(|i| a[(i, j)] == 0.0) {
            continue;
        }
        if picked.is_empty() || !in_span(a, &picked, a.col(j)) {
            picked.push(j);
        }
    }

    picked
}

/// Least-squares membership test: can `v` be written as a weighted sum of
/// the `picked` columns of `a` up to `LIN_DEP_TOL`?
pub(crate) fn in_span(a: MatRef<'_, E>, picked: &[I], v: ColRef<'_, E>) -> bool {
    let m = a.nrows();
    if picked.is_empty() {
        return (0..m).all(|i| v[i].abs() <= LIN_DEP_TOL);
    }

    let cols = Mat::from_fn(m, picked.len(), |r, k| a[(r, picked[k])]);
    let mut lstsq = DenseQr::new();
    lstsq
        .factorize(cols.as_ref())
        .unwrap_or_else(|e| panic!("least-squares factorization failed: {e}"));
    let w = lstsq
        .solve_lstsq(v.as_mat())
        .unwrap_or_else(|e| panic!("least-squares solve failed: {e}"));

    let reproduced = &cols * &w;
    let mut residual: E = 0.0;
    for r in 0..m {
        residual = E::max(residual, (reproduced[(r, 0)] - v[r]).abs());
    }

    residual <= LIN_DEP_TOL
}

/// Builds the auxiliary problem for an infeasible candidate basis.
///
/// The column at basic position `worst` is replaced by an artificial column
/// chosen so that the augmented basis maps the all-ones vector onto `b`.
/// Minimizing the artificial variable (the only one with a cost) drives it
/// to zero exactly when the original constraints are satisfiable.
fn build_auxiliary(lp: &StandardLp, basic: &[I], worst: usize) -> (StandardLp, Vec<I>) {
    let (n, m) = lp.get_dims();
    let a = lp.constraints();
    let b = lp.rhs();

    let mut art = b.clone();
    for (i, &j) in basic.iter().enumerate() {
        if i == worst {
            continue;
        }
        for r in 0..m {
            art[r] -= a[(r, j)];
        }
    }

    let aux_a = Mat::from_fn(m, n + 1, |r, j| if j < n { a[(r, j)] } else { art[r] });
    let mut aux_c = Col::zeros(n + 1);
    aux_c[n] = 1.0;

    let mut aux_basic = basic.to_vec();
    aux_basic[worst] = n;

    // The all-ones vector must solve the augmented basis exactly.
    for r in 0..m {
        let mut sum: E = 0.0;
        for &j in &aux_basic {
            sum += aux_a[(r, j)];
        }
        assert!(
            (sum - b[r]).abs() <= CONSTRUCTION_TOL,
            "auxiliary basis does not reproduce the right-hand side"
        );
    }

    (StandardLp::new(aux_c, aux_a, b.clone()), aux_basic)
}
