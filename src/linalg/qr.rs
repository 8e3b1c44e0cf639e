//! # Least-Squares Solvers for Dense Matrices using QR Factorization
//!
//! This module provides the [`DenseQr`] solver for over-determined dense
//! systems using the QR factorization from the Faer library. The primary
//! consumer is the rank probe of the simplex initialization, which asks
//! whether a column can be reproduced as a weighted sum of previously
//! admitted columns.

use faer::linalg::solvers::{Qr, SolveLstsq};
use faer::{Mat, MatRef};

use crate::E;
use crate::linalg::solver::{LeastSquares, LinearSolverError};
use crate::linalg::vector_ops::is_finite_mat;

/// Dense QR solver for least-squares problems with `nrows >= ncols`.
pub struct DenseQr {
    /// Numeric QR factorization (set by `factorize`).
    qr: Option<Qr<E>>,
}

impl LeastSquares for DenseQr {
    fn new() -> Self {
        Self { qr: None }
    }

    /// Performs the numeric QR factorization of a tall matrix.
    fn factorize(&mut self, mat: MatRef<'_, E>) -> Result<(), LinearSolverError> {
        if mat.nrows() < mat.ncols() || !is_finite_mat(mat) {
            return Err(LinearSolverError::QrFactorization);
        }

        self.qr = Some(mat.qr());

        Ok(())
    }

    /// Returns the least-squares solution of `mat * x = rhs`.
    fn solve_lstsq(&self, rhs: MatRef<'_, E>) -> Result<Mat<E>, LinearSolverError> {
        let qr = self.qr.as_ref().ok_or(LinearSolverError::Uninitialized)?;
        Ok(qr.solve_lstsq(rhs))
    }
}

impl DenseQr {
    /// Creates a new instance of `DenseQr` with the factorization unset.
    pub fn new() -> Self {
        Self { qr: None }
    }
}

impl Default for DenseQr {
    fn default() -> Self {
        Self::new()
    }
}
