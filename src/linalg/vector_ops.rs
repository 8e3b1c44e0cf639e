use faer::{Col, ColRef, MatRef, unzip, zip};

use crate::E;

pub(crate) fn dot<'a>(x1: ColRef<'a, E>, x2: ColRef<'a, E>) -> E {
    let mut acc = 0.0;

    zip!(x1, x2).for_each(|unzip!(x1, x2)| acc += *x1 * *x2);

    acc
}

pub(crate) fn neg<'a>(x: ColRef<'a, E>) -> Col<E> {
    let mut out = Col::<E>::zeros(x.nrows());

    zip!(x, out.as_mut()).for_each(|unzip!(x, out)| *out = -*x);

    out
}

/// Index and value of the smallest entry, scanning front to back.
pub(crate) fn argmin<'a>(x: ColRef<'a, E>) -> Option<(usize, E)> {
    let mut best: Option<(usize, E)> = None;

    for i in 0..x.nrows() {
        let v = x[i];
        if best.is_none_or(|(_, bv)| v < bv) {
            best = Some((i, v));
        }
    }

    best
}

pub(crate) fn is_finite_mat<'a>(mat: MatRef<'a, E>) -> bool {
    for j in 0..mat.ncols() {
        for i in 0..mat.nrows() {
            if !mat[(i, j)].is_finite() {
                return false;
            }
        }
    }
    true
}
