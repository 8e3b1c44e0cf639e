use divan::black_box;
use faer::{Col, Mat};

use revlp::lp::StandardLp;
use revlp::lp::simplex;

fn main() {
    divan::main();
}

/// Degenerate problem that exercises the anti-cycling fallback.
fn beale() -> StandardLp {
    StandardLp::from_rows(
        &[-0.75, 150.0, -0.02, 6.0, 0.0, 0.0, 0.0],
        &[
            &[0.25, -60.0, -0.04, 9.0, 1.0, 0.0, 0.0],
            &[0.5, -90.0, -0.02, 3.0, 0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        ],
        &[0.0, 0.0, 1.0],
    )
}

/// Bounded dense problem with a banded block and a slack identity.
fn banded(m: usize) -> StandardLp {
    let n = 2 * m;
    let a = Mat::from_fn(m, n, |i, j| {
        if j >= m {
            if j - m == i { 1.0 } else { 0.0 }
        } else if i.abs_diff(j) <= 1 {
            1.0 + ((i + 2 * j) % 3) as f64 * 0.25
        } else {
            0.0
        }
    });
    let c = Col::from_fn(n, |j| if j < m { -1.0 - (j % 4) as f64 * 0.1 } else { 0.0 });
    let b = Col::from_fn(m, |i| 1.0 + (i % 5) as f64);
    StandardLp::new(c, a, b)
}

#[divan::bench]
fn beale_degenerate(bencher: divan::Bencher) {
    let lp = beale();
    bencher.bench_local(|| simplex::solve(black_box(&lp), None, 1e-9));
}

#[divan::bench(args = [8, 16, 32])]
fn banded_dense(bencher: divan::Bencher, m: usize) {
    let lp = banded(m);
    bencher.bench_local(|| simplex::solve(black_box(&lp), None, 1e-9));
}
