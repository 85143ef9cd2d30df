// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Projection and Reconstruction
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Least-squares multipole moments and internal-only reconstruction.

use crate::basis::stack_bases;
use maxwell_math::linalg::pinv;
use maxwell_types::constants::PINV_RCOND;
use maxwell_types::error::{MaxwellError, MaxwellResult};
use ndarray::{s, Array1, Array2, Axis};
use tracing::debug;

/// Moments of the combined basis and the reconstructed sensor data.
#[derive(Debug, Clone)]
pub struct Projection {
    /// `[n_in + n_out, n_times]`, internal moments first.
    pub moments: Array2<f64>,
    /// `[n_sensors, n_times]`, in original sensor units.
    pub recon: Array2<f64>,
    /// Number of singular values kept by the pseudo-inverse.
    pub rank: usize,
}

/// Project `data` onto `[s_in | s_out]` and rebuild it from the internal
/// moments only, using the default singular-value cutoff.
pub fn project(
    s_in: &Array2<f64>,
    s_out: &Array2<f64>,
    data: &Array2<f64>,
    coil_scale: &Array1<f64>,
) -> MaxwellResult<Projection> {
    project_with_rcond(s_in, s_out, data, coil_scale, PINV_RCOND)
}

pub fn project_with_rcond(
    s_in: &Array2<f64>,
    s_out: &Array2<f64>,
    data: &Array2<f64>,
    coil_scale: &Array1<f64>,
    rcond: f64,
) -> MaxwellResult<Projection> {
    let n_sens = s_in.nrows();
    if data.nrows() != n_sens {
        return Err(MaxwellError::ShapeMismatch {
            expected: (n_sens, data.ncols()),
            found: data.dim(),
        });
    }
    if coil_scale.len() != n_sens {
        return Err(MaxwellError::ShapeMismatch {
            expected: (n_sens, 1),
            found: (coil_scale.len(), 1),
        });
    }
    if coil_scale.iter().any(|&c| !(c.is_finite() && c > 0.0)) {
        return Err(MaxwellError::ConfigError(
            "coil scale factors must be finite and positive".to_string(),
        ));
    }

    let n_in = s_in.ncols();
    let s_tot = stack_bases(s_in, s_out)?;
    let (pinv_tot, rank) = pinv(&s_tot, rcond)?;
    debug!(
        n_sensors = n_sens,
        n_moments = s_tot.ncols(),
        rank,
        "pseudo-inverse of combined basis"
    );

    let scale_col = coil_scale.view().insert_axis(Axis(1));
    let scaled = data * &scale_col;
    let moments = pinv_tot.dot(&scaled);

    let mut recon = s_in.dot(&moments.slice(s![..n_in, ..]));
    recon /= &scale_col;

    Ok(Projection {
        moments,
        recon,
        rank,
    })
}
