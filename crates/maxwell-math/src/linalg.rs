//! Linear algebra utilities.
//!
//! Thin SVD and Moore–Penrose pseudoinverse with singular value cutoff.
//! The decomposition itself is nalgebra's; matrices cross the boundary
//! as ndarray `Array2`.

use maxwell_types::error::{MaxwellError, MaxwellResult};
use nalgebra::{DMatrix, SVD};
use ndarray::{Array1, Array2};

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let (m, n) = a.dim();
    DMatrix::from_fn(m, n, |i, j| a[[i, j]])
}

/// Thin SVD.
///
/// Returns (U, sigma, Vt) where A ≈ U * diag(sigma) * Vt and sigma is
/// sorted in descending order. U is m×k and Vt is k×n with k = min(m, n).
pub fn svd(a: &Array2<f64>) -> MaxwellResult<(Array2<f64>, Array1<f64>, Array2<f64>)> {
    let (m, n) = a.dim();
    if m == 0 || n == 0 {
        return Ok((Array2::zeros((m, 0)), Array1::zeros(0), Array2::zeros((0, n))));
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(MaxwellError::LinAlg(
            "SVD input contains non-finite values".to_string(),
        ));
    }

    let decomp = SVD::try_new(to_dmatrix(a), true, true, f64::EPSILON, 0)
        .ok_or_else(|| MaxwellError::LinAlg("SVD did not converge".to_string()))?;
    let u = decomp
        .u
        .ok_or_else(|| MaxwellError::LinAlg("SVD returned no U".to_string()))?;
    let v_t = decomp
        .v_t
        .ok_or_else(|| MaxwellError::LinAlg("SVD returned no Vt".to_string()))?;
    let s = decomp.singular_values;
    let k = s.len();

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&i, &j| s[j].partial_cmp(&s[i]).unwrap_or(std::cmp::Ordering::Equal));

    let mut sigma = Array1::zeros(k);
    let mut u_out = Array2::zeros((m, k));
    let mut vt_out = Array2::zeros((k, n));
    for (idx, &src) in order.iter().enumerate() {
        sigma[idx] = s[src];
        for i in 0..m {
            u_out[[i, idx]] = u[(i, src)];
        }
        for j in 0..n {
            vt_out[[idx, j]] = v_t[(src, j)];
        }
    }

    Ok((u_out, sigma, vt_out))
}

/// Assemble V * diag(1/sigma) * U^T over singular values above `sv_cutoff`.
/// Returns the pseudoinverse and the number of values kept.
fn pinv_from_svd(
    u: &Array2<f64>,
    sigma: &Array1<f64>,
    vt: &Array2<f64>,
    sv_cutoff: f64,
) -> (Array2<f64>, usize) {
    let m = u.nrows();
    let n = vt.ncols();
    let mut result = Array2::zeros((n, m));
    let mut rank = 0;

    for idx in 0..sigma.len() {
        if sigma[idx] > sv_cutoff {
            rank += 1;
            let inv_s = 1.0 / sigma[idx];
            for i in 0..n {
                let vi = vt[[idx, i]] * inv_s;
                for j in 0..m {
                    result[[i, j]] += vi * u[[j, idx]];
                }
            }
        }
    }

    (result, rank)
}

/// Pseudoinverse with a cutoff relative to the largest singular value.
///
/// Singular values `<= rcond * sigma_max` are discarded, matching
/// `scipy.linalg.pinv(A, cond=rcond)`. Returns the pseudoinverse and its
/// effective rank.
pub fn pinv(a: &Array2<f64>, rcond: f64) -> MaxwellResult<(Array2<f64>, usize)> {
    if !rcond.is_finite() || rcond < 0.0 {
        return Err(MaxwellError::LinAlg(format!(
            "pinv rcond must be finite and >= 0, got {rcond}"
        )));
    }
    let (u, sigma, vt) = svd(a)?;
    let sigma_max = sigma.iter().cloned().fold(0.0_f64, f64::max);
    Ok(pinv_from_svd(&u, &sigma, &vt, rcond * sigma_max))
}
