use derive_more::{Display, Error};
use faer::{Mat, MatRef};

use crate::E;

#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
pub enum LinearSolverError {
    #[display("LU factorization error")]
    LuFactorization,

    #[display("QR factorization error")]
    QrFactorization,

    #[display("Uninitialized error")]
    Uninitialized,

    #[display("Unable to solve linear system")]
    SolveFailed,
}

/// Trait for dense linear solvers supporting factorization and solving square
/// systems.
///
/// This trait provides a standard interface for working with square dense
/// matrices and right-hand side vectors. Implementors must call `factorize`
/// before solving systems.
pub trait LinearSolver {
    fn new() -> Self
    where
        Self: Sized;

    /// Factorizes the given square matrix and prepares for solving.
    /// Returns `Ok(())` on success, or an error on failure.
    fn factorize(&mut self, mat: MatRef<'_, E>) -> Result<(), LinearSolverError>;

    /// Refactorizes the matrix, typically used when the matrix structure
    /// remains but values change. Returns `Ok(())` on success, or an error on
    /// failure.
    fn refactorize(&mut self, mat: MatRef<'_, E>) -> Result<(), LinearSolverError>;

    /// Solves the linear system for every column of `rhs` and returns the
    /// solution matrix, or an error when the factorized matrix turns out to
    /// be numerically singular.
    fn solve(&self, rhs: MatRef<'_, E>) -> Result<Mat<E>, LinearSolverError>;
}

/// Trait for least-squares solvers over tall dense matrices.
pub trait LeastSquares {
    fn new() -> Self
    where
        Self: Sized;

    /// Factorizes the (possibly rectangular) matrix.
    fn factorize(&mut self, mat: MatRef<'_, E>) -> Result<(), LinearSolverError>;

    /// Returns the least-squares solution of `mat * x = rhs`.
    fn solve_lstsq(&self, rhs: MatRef<'_, E>) -> Result<Mat<E>, LinearSolverError>;
}
