//! Non-negative least squares.
//!
//! Solves `min ‖A·x − b‖₂` subject to `x ≥ 0` with the active-set method of
//! Lawson & Hanson (1974). The unconstrained subproblem on the passive set is
//! handled by an SVD least-squares driver, so rank-deficient draws are fine.

#[allow(unused_extern_crates)]
extern crate blas_src;

use anyhow::{bail, Error};
use log::debug;
use ndarray::prelude::*;
use ndarray_linalg::LeastSquaresSvd;

/// Solution of a non-negative least-squares problem.
#[derive(Clone, Debug)]
pub struct NnlsResult {
    /// Fitted coefficients, elementwise `>= 0`
    pub x: Array1<f64>,
    /// Euclidean norm of the residual `A·x − b`
    pub rnorm: f64,
}

/// Solve `min ‖a·x − b‖₂` subject to `x ≥ 0`.
///
/// An empty system returns the zero solution. Dimension mismatch is an error,
/// as is failure to converge within `3·n` subproblem solves.
pub fn nnls(a: ArrayView2<f64>, b: ArrayView1<f64>) -> Result<NnlsResult, Error> {
    nnls_with_tolerance(a, b, None)
}

/// Like [`nnls`], with an explicit optimality tolerance on the dual vector
/// `aᵀ(b − a·x)`. `None` picks `10·ε·‖a‖₁·max(m, n)`.
pub fn nnls_with_tolerance(
    a: ArrayView2<f64>,
    b: ArrayView1<f64>,
    tolerance: Option<f64>,
) -> Result<NnlsResult, Error> {
    let (m, n) = a.dim();
    if b.len() != m {
        bail!("matrix of {} rows against right-hand side of length {}", m, b.len());
    }

    let mut x = Array1::<f64>::zeros(n);
    if m == 0 || n == 0 {
        let rnorm = b.dot(&b).sqrt();
        return Ok(NnlsResult { x, rnorm });
    }

    let tolerance = tolerance.unwrap_or_else(|| {
        let norm1 = a
            .axis_iter(Axis(1))
            .map(|col| col.fold(0.0, |acc, v| acc + v.abs()))
            .fold(0.0, f64::max);
        10.0 * f64::EPSILON * norm1 * m.max(n) as f64
    });

    let rhs = b.to_owned();
    let mut passive = vec![false; n];
    let max_iterations = 3 * n;
    let mut iterations = 0;

    loop {
        // Dual vector over the current residual. Optimal once no rejected
        // column has positive correlation left.
        let w = a.t().dot(&(&rhs - &a.dot(&x)));
        let mut candidate: Option<(usize, f64)> = None;
        for j in 0..n {
            if !passive[j] && w[j] > tolerance {
                match candidate {
                    Some((_, best)) if w[j] <= best => {}
                    _ => candidate = Some((j, w[j])),
                }
            }
        }
        let enter = match candidate {
            Some((j, _)) => j,
            None => break,
        };
        passive[enter] = true;

        loop {
            iterations += 1;
            if iterations > max_iterations {
                bail!("nnls failed to converge in {} subproblem solves", max_iterations);
            }

            let support: Vec<usize> = (0..n).filter(|&j| passive[j]).collect();
            let z = a.select(Axis(1), &support).least_squares(&rhs)?.solution;

            if z.iter().all(|&v| v > 0.0) {
                x.fill(0.0);
                for (&j, &v) in support.iter().zip(z.iter()) {
                    x[j] = v;
                }
                break;
            }

            // Shortest step toward z that keeps x feasible, taken over the
            // entries the subproblem pushed nonpositive.
            let mut alpha = f64::INFINITY;
            for (&j, &v) in support.iter().zip(z.iter()) {
                if v <= 0.0 {
                    let step = x[j] / (x[j] - v);
                    if step < alpha {
                        alpha = step;
                    }
                }
            }
            for (&j, &v) in support.iter().zip(z.iter()) {
                x[j] += alpha * (v - x[j]);
            }
            for &j in &support {
                if x[j] <= f64::EPSILON {
                    x[j] = 0.0;
                    passive[j] = false;
                }
            }
        }
    }

    debug!("nnls converged after {} subproblem solves", iterations);
    let residual = &rhs - &a.dot(&x);
    let rnorm = residual.dot(&residual).sqrt();
    Ok(NnlsResult { x, rnorm })
}
