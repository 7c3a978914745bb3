//! Linear system solvers.

use faer::prelude::*;
use faer::sparse::{SparseColMat, Triplet};
use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Systems with this many or more variables use the sparse solver path.
pub const SPARSE_THRESHOLD: usize = 50;

/// Reject solutions containing NaN or infinity.
fn ensure_finite(x: DVector<f64>) -> Result<DVector<f64>> {
    match x.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(Error::SingularMatrix(format!(
            "non-finite value for unknown {i}"
        ))),
        None => Ok(x),
    }
}

/// Solve a linear system Ax = b using LU decomposition.
///
/// A pivot smaller than `n * eps * max|A|` counts as zero, so systems that
/// are singular up to rounding are reported as singular instead of
/// returning huge, meaningless values.
pub fn solve_dense(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(DVector::zeros(0));
    }

    let scale = a.amax();
    let tolerance = scale * f64::EPSILON * a.nrows() as f64;

    let lu = a.clone().lu();
    let pivots = lu.u().diagonal();
    if let Some(col) = pivots.iter().position(|p| p.is_nan() || p.abs() <= tolerance) {
        return Err(Error::SingularMatrix(format!("zero pivot for unknown {col}")));
    }

    let x = lu
        .solve(b)
        .ok_or_else(|| Error::SingularMatrix("LU solve failed".to_string()))?;
    ensure_finite(x)
}

/// Relative residual above which a sparse solution is rejected.
const SPARSE_RESIDUAL_TOL: f64 = 1e-9;

/// Reject `x` unless `‖A·x − b‖∞ <= tol · (‖A‖∞·‖x‖∞ + ‖b‖∞)`.
///
/// A factorization of a singular matrix can finish with a tiny pivot instead
/// of failing; the residual exposes the meaningless solution it produces.
fn check_residual(
    size: usize,
    triplets: &[(usize, usize, f64)],
    rhs: &DVector<f64>,
    x: &DVector<f64>,
) -> Result<()> {
    let mut residual = -rhs.clone();
    let mut row_norms = vec![0.0; size];
    for &(r, c, v) in triplets {
        residual[r] += v * x[c];
        row_norms[r] += v.abs();
    }

    let a_norm = row_norms.iter().copied().fold(0.0, f64::max);
    let scale = a_norm * x.amax() + rhs.amax();
    let error = residual.amax();
    if error > SPARSE_RESIDUAL_TOL * scale {
        return Err(Error::SingularMatrix(format!(
            "residual {error:.3e} exceeds tolerance for scale {scale:.3e}"
        )));
    }
    Ok(())
}

/// Solve a sparse linear system Ax = b using sparse LU decomposition.
///
/// The matrix is constructed from triplets `(row, col, value)`. Duplicate entries
/// at the same position are summed automatically by faer. The solution is
/// checked against the original triplets, so a near-singular factorization is
/// reported as [`Error::SingularMatrix`] like on the dense path.
pub fn solve_sparse(
    size: usize,
    triplets: &[(usize, usize, f64)],
    rhs: &DVector<f64>,
) -> Result<DVector<f64>> {
    if size != rhs.len() {
        return Err(Error::DimensionMismatch {
            expected: size,
            actual: rhs.len(),
        });
    }
    if size == 0 {
        return Ok(DVector::zeros(0));
    }

    let faer_triplets: Vec<_> = triplets
        .iter()
        .map(|&(r, c, v)| Triplet::new(r, c, v))
        .collect();

    let sparse_mat = SparseColMat::<usize, f64>::try_new_from_triplets(
        size,
        size,
        &faer_triplets,
    )
    .map_err(|e| Error::SingularMatrix(format!("invalid sparse matrix: {e:?}")))?;

    let lu = sparse_mat
        .sp_lu()
        .map_err(|e| Error::SingularMatrix(format!("sparse LU failed: {e:?}")))?;

    let faer_rhs = Col::<f64>::from_fn(size, |i| rhs[i]);
    let faer_x = lu.solve(&faer_rhs);

    let x = ensure_finite(DVector::from_fn(size, |i, _| faer_x[i]))?;
    check_residual(size, triplets, rhs, &x)?;
    Ok(x)
}
