// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — SSS Basis
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Internal/external multipole basis of a sensor array.
//!
//! Each basis column is the sensor response to one real vector spherical
//! harmonic: the negated potential gradient, dotted with the coil normals
//! and integrated over every coil's quadrature points (Taulu and Kajola,
//! 2005, Eq. 5–7). Columns are independent and assembled in parallel.

use crate::geometry::{concatenate_coils, ConcatenatedCoils};
use maxwell_math::coords::{cart_to_sph, Spherical};
use maxwell_math::harmonics::Expansion;
use maxwell_math::multipole::{basis_index, degree_order_pairs, n_basis, num_moments};
use maxwell_types::coil::Coil;
use maxwell_types::error::{MaxwellError, MaxwellResult};
use ndarray::{concatenate, Array1, Array2, Axis};
use rayon::prelude::*;

/// Internal and external basis matrices, `[n_sensors, n_columns]` each.
#[derive(Debug, Clone)]
pub struct SssBasis {
    pub s_in: Array2<f64>,
    pub s_out: Array2<f64>,
}

impl SssBasis {
    pub fn n_sensors(&self) -> usize {
        self.s_in.nrows()
    }

    pub fn n_moments(&self) -> usize {
        self.s_in.ncols() + self.s_out.ncols()
    }
}

/// `[S_in | S_out]`.
pub fn stack_bases(s_in: &Array2<f64>, s_out: &Array2<f64>) -> MaxwellResult<Array2<f64>> {
    if s_out.nrows() != s_in.nrows() {
        return Err(MaxwellError::ShapeMismatch {
            expected: (s_in.nrows(), s_out.ncols()),
            found: s_out.dim(),
        });
    }
    concatenate(Axis(1), &[s_in.view(), s_out.view()])
        .map_err(|e| MaxwellError::LinAlg(format!("basis concatenation failed: {e}")))
}

/// Per-sensor row scale: magnetometers ×100, gradiometers ×1.
pub fn coil_scale(coils: &[Coil]) -> Array1<f64> {
    coils.iter().map(Coil::scale).collect()
}

/// One basis column to compute.
#[derive(Debug, Clone, Copy)]
struct ColumnTask {
    side: Expansion,
    degree: usize,
    order: i32,
}

fn column_tasks(int_order: usize, ext_order: usize) -> Vec<ColumnTask> {
    [(Expansion::Internal, int_order), (Expansion::External, ext_order)]
        .into_iter()
        .flat_map(|(side, bound)| {
            degree_order_pairs(bound)
                .into_iter()
                .map(move |(degree, order)| ColumnTask {
                    side,
                    degree,
                    order,
                })
        })
        .collect()
}

/// Sensor responses for one `(side, degree, order)`.
fn basis_column(
    task: ColumnTask,
    sph: &[Spherical],
    coils: &ConcatenatedCoils,
) -> MaxwellResult<Array1<f64>> {
    let mut weighted = Vec::with_capacity(coils.n_points());
    for (k, s) in sph.iter().enumerate() {
        let g = task.side.cartesian_gradient(task.degree, task.order, s)?;
        let n = coils.normals[k];
        // B = -grad V
        weighted.push(-coils.weights[k] * (g[0] * n[0] + g[1] * n[1] + g[2] * n[2]));
    }
    Ok(coils
        .ranges
        .iter()
        .map(|r| weighted[r.clone()].iter().sum::<f64>())
        .collect())
}

/// Scale rows by `scale`, then normalize every column to unit length.
fn scale_and_normalize(basis: &mut Array2<f64>, scale: &Array1<f64>) -> MaxwellResult<()> {
    for (mut row, &s) in basis.rows_mut().into_iter().zip(scale.iter()) {
        row *= s;
    }
    for (j, mut col) in basis.columns_mut().into_iter().enumerate() {
        let norm = col.dot(&col).sqrt();
        if !norm.is_finite() {
            return Err(MaxwellError::LinAlg(format!(
                "basis column {j} is non-finite (integration point on the expansion axis?)"
            )));
        }
        if norm == 0.0 {
            return Err(MaxwellError::LinAlg(format!("basis column {j} has zero norm")));
        }
        col /= norm;
    }
    Ok(())
}

/// Compute the SSS basis for `coils` around `origin` [m].
///
/// Fails when the requested number of moments exceeds the number of
/// sensors, or when an integration point coincides with the origin.
pub fn sss_basis(
    coils: &[Coil],
    origin: [f64; 3],
    int_order: usize,
    ext_order: usize,
) -> MaxwellResult<SssBasis> {
    if coils.is_empty() {
        return Err(MaxwellError::NoMegChannels);
    }
    if origin.iter().any(|v| !v.is_finite()) {
        return Err(MaxwellError::ConfigError(format!(
            "expansion origin must be finite, got {origin:?}"
        )));
    }
    for coil in coils {
        coil.validate()?;
    }

    let n_sens = coils.len();
    let n_bases = num_moments(int_order, ext_order);
    if n_bases > n_sens {
        return Err(MaxwellError::InsufficientSensors {
            requested: n_bases,
            available: n_sens,
        });
    }

    let conc = concatenate_coils(coils);
    let relative: Vec<[f64; 3]> = conc
        .points
        .iter()
        .map(|p| [p[0] - origin[0], p[1] - origin[1], p[2] - origin[2]])
        .collect();
    let sph = cart_to_sph(&relative)?;

    let columns = column_tasks(int_order, ext_order)
        .into_par_iter()
        .map(|task| basis_column(task, &sph, &conc).map(|col| (task, col)))
        .collect::<MaxwellResult<Vec<_>>>()?;

    let mut s_in = Array2::zeros((conc.n_sensors(), n_basis(int_order)));
    let mut s_out = Array2::zeros((conc.n_sensors(), n_basis(ext_order)));
    for (task, col) in columns {
        let target = match task.side {
            Expansion::Internal => &mut s_in,
            Expansion::External => &mut s_out,
        };
        target
            .column_mut(basis_index(task.degree, task.order))
            .assign(&col);
    }

    let scale = coil_scale(coils);
    scale_and_normalize(&mut s_in, &scale)?;
    scale_and_normalize(&mut s_out, &scale)?;

    Ok(SssBasis { s_in, s_out })
}
