use faer::{Col, Mat};

use crate::{E, I, SolverError};

pub mod simplex;

/// A linear program in standard form:
///
/// ```text
/// min  c^T x
/// s.t. A x = b
///      x >= 0
/// ```
#[allow(non_snake_case)]
pub struct StandardLp {
    /// Objective function coefficients.
    c: Col<E>,
    /// Constraint matrix (dense, column-major).
    A: Mat<E>,
    /// Right-hand side of the equality constraints.
    b: Col<E>,
}

#[allow(non_snake_case)]
impl StandardLp {
    /// Creates a new linear program from the objective, constraints, and
    /// right-hand side.
    ///
    /// Dimension mismatches are programmer errors and abort immediately
    /// rather than being reported through the error channel.
    pub fn new(c: Col<E>, A: Mat<E>, b: Col<E>) -> Self {
        assert_eq!(
            c.nrows(),
            A.ncols(),
            "objective length must match the number of columns"
        );
        assert_eq!(
            b.nrows(),
            A.nrows(),
            "right-hand side length must match the number of rows"
        );
        assert!(A.nrows() > 0, "at least one constraint is required");
        assert!(
            A.nrows() <= A.ncols(),
            "standard form requires at least as many variables as constraints"
        );
        Self { c, A, b }
    }

    /// Builds a linear program from row slices. Convenient for small dense
    /// problems written out literally.
    pub fn from_rows(c: &[E], rows: &[&[E]], b: &[E]) -> Self {
        let m = rows.len();
        let n = c.len();
        for row in rows {
            assert_eq!(row.len(), n, "every row must have one entry per variable");
        }
        Self::new(
            Col::from_fn(n, |j| c[j]),
            Mat::from_fn(m, n, |i, j| rows[i][j]),
            Col::from_fn(m, |i| b[i]),
        )
    }

    /// Returns the number of variables (columns of `A`).
    pub fn get_n_vars(&self) -> usize {
        self.c.nrows()
    }

    /// Returns the number of constraints (rows of `A`).
    pub fn get_n_cons(&self) -> usize {
        self.b.nrows()
    }

    /// Returns `(n_vars, n_cons)`.
    pub fn get_dims(&self) -> (usize, usize) {
        (self.get_n_vars(), self.get_n_cons())
    }

    pub(crate) fn objective(&self) -> &Col<E> {
        &self.c
    }

    pub(crate) fn constraints(&self) -> &Mat<E> {
        &self.A
    }

    pub(crate) fn rhs(&self) -> &Col<E> {
        &self.b
    }

    /// Rejects trivially pathological structure before a solve.
    ///
    /// An all-zero row is vacuous when its right-hand side is zero and
    /// contradictory otherwise. An all-zero column pins its variable at zero
    /// when the cost is non-negative and lets it grow without bound when the
    /// cost is negative.
    pub(crate) fn validate(&self) -> Result<(), SolverError> {
        let (n, m) = self.get_dims();

        for i in 0..m {
            if (0..n).all(|j| self.A[(i, j)] == 0.0) {
                return Err(if self.b[i] != 0.0 {
                    SolverError::Infeasible
                } else {
                    SolverError::ZeroRow
                });
            }
        }

        for j in 0..n {
            if (0..m).all(|i| self.A[(i, j)] == 0.0) {
                return Err(if self.c[j] < 0.0 {
                    SolverError::Unbounded
                } else {
                    SolverError::ZeroColumn
                });
            }
        }

        Ok(())
    }
}

/// An optimal solution returned by [`simplex::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Minimal value of `c^T x`.
    pub objective: E,
    /// Optimal primal vector; nonbasic entries are exactly zero.
    pub x: Col<E>,
    /// Column indices whose entries in `x` are basic.
    pub basis: Vec<I>,
}
