use faer::{Col, Mat};

use crate::linalg::solver::{LinearSolver, LinearSolverError};
use crate::linalg::vector_ops::{dot, neg};
use crate::lp::StandardLp;
use crate::{E, I};

/// Working state of a revised simplex run.
///
/// The basic columns are held in `Ab` (factorized in `lu`, with the
/// transpose factorized in `lu_t` for pricing solves) and the remaining
/// columns in `An`. Position `i` of `basic` corresponds to row `i` of `xb`,
/// so `Ab * xb = b` holds whenever the state is fresh.
#[allow(non_snake_case)]
pub(crate) struct Basis<L: LinearSolver> {
    pub(crate) basic: Vec<I>,
    pub(crate) nonbasic: Vec<I>,

    pub(crate) Ab: Mat<E>,
    pub(crate) An: Mat<E>,

    pub(crate) cb: Col<E>,
    pub(crate) cn: Col<E>,
    pub(crate) xb: Col<E>,

    lu: L,
    lu_t: L,
}

impl<L: LinearSolver> Basis<L> {
    /// Assembles the basis state for the given column indices and solves for
    /// the basic values. Fails when the selected columns are singular.
    ///
    /// Malformed index lists (wrong length, duplicates, out of range) are
    /// programmer errors and abort.
    pub(crate) fn new(lp: &StandardLp, basic: Vec<I>) -> Result<Self, LinearSolverError> {
        let (n, m) = lp.get_dims();

        assert_eq!(basic.len(), m, "basis must have one column per constraint");
        let mut in_basis = vec![false; n];
        for &j in &basic {
            assert!(j < n, "basic column index out of range");
            assert!(!in_basis[j], "basic column indices must be distinct");
            in_basis[j] = true;
        }
        let nonbasic: Vec<I> = (0..n).filter(|&j| !in_basis[j]).collect();

        let a = lp.constraints();
        let c = lp.objective();

        #[allow(non_snake_case)]
        let Ab = Mat::from_fn(m, m, |r, k| a[(r, basic[k])]);
        #[allow(non_snake_case)]
        let An = Mat::from_fn(m, n - m, |r, k| a[(r, nonbasic[k])]);
        let cb = Col::from_fn(m, |k| c[basic[k]]);
        let cn = Col::from_fn(n - m, |k| c[nonbasic[k]]);

        let mut lu = L::new();
        lu.factorize(Ab.as_ref())?;
        let mut lu_t = L::new();
        lu_t.factorize(Ab.as_ref().transpose())?;

        let xb = lu.solve(lp.rhs().as_ref().as_mat())?.col(0).to_owned();

        Ok(Self {
            basic,
            nonbasic,
            Ab,
            An,
            cb,
            cn,
            xb,
            lu,
            lu_t,
        })
    }

    pub(crate) fn basic(&self) -> &[I] {
        &self.basic
    }

    /// Solves `Ab^T y = cb` and prices out the nonbasic columns, yielding
    /// the reduced cost of each nonbasic variable.
    pub(crate) fn reduced_costs(&self) -> Result<Col<E>, LinearSolverError> {
        let y = self.lu_t.solve(self.cb.as_ref().as_mat())?;
        let y = y.col(0);

        let mut reduced = self.cn.clone();
        for k in 0..self.nonbasic.len() {
            reduced[k] -= dot(self.An.col(k), y);
        }

        Ok(reduced)
    }

    /// Rate of change of each basic value as nonbasic position `enter`
    /// increases from zero.
    pub(crate) fn direction(&self, enter: usize) -> Result<Col<E>, LinearSolverError> {
        let z = self.lu.solve(self.An.col(enter).as_mat())?;
        Ok(neg(z.col(0)))
    }

    /// Exchanges basic position `leave` with nonbasic position `enter`,
    /// swapping indices, costs, and matrix columns. The factorizations are
    /// stale afterwards; call [`Basis::refresh`] before the next solve.
    pub(crate) fn swap(&mut self, leave: usize, enter: usize) {
        let j = self.basic[leave];
        self.basic[leave] = self.nonbasic[enter];
        self.nonbasic[enter] = j;

        let c = self.cb[leave];
        self.cb[leave] = self.cn[enter];
        self.cn[enter] = c;

        for r in 0..self.Ab.nrows() {
            let v = self.Ab[(r, leave)];
            self.Ab[(r, leave)] = self.An[(r, enter)];
            self.An[(r, enter)] = v;
        }
    }

    /// Refactorizes the basis matrix and recomputes the basic values.
    pub(crate) fn refresh(&mut self, b: &Col<E>) -> Result<(), LinearSolverError> {
        self.lu.refactorize(self.Ab.as_ref())?;
        self.lu_t.refactorize(self.Ab.as_ref().transpose())?;
        self.xb = self.lu.solve(b.as_ref().as_mat())?.col(0).to_owned();
        Ok(())
    }

    pub(crate) fn objective(&self) -> E {
        dot(self.cb.as_ref(), self.xb.as_ref())
    }

    /// Expands the basic values into a full-length primal vector with zeros
    /// in every nonbasic position.
    pub(crate) fn expand_primal(&self, n: usize) -> Col<E> {
        let mut x = Col::zeros(n);
        for (i, &j) in self.basic.iter().enumerate() {
            x[j] = self.xb[i];
        }
        x
    }
}
