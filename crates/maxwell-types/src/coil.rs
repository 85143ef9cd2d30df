// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Coil
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sensor coil descriptors as seen by the basis assembly.

use serde::{Deserialize, Serialize};

use crate::constants::MAG_SCALE;
use crate::error::{MaxwellError, MaxwellResult};

/// Coil class. Only magnetometers are rescaled before the SSS solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoilClass {
    Magnetometer,
    AxialGradiometer,
    PlanarGradiometer,
}

impl CoilClass {
    pub fn is_magnetometer(self) -> bool {
        matches!(self, CoilClass::Magnetometer)
    }
}

/// One MEG sensor with its integration points in head coordinates [m].
#[derive(Debug, Clone)]
pub struct Coil {
    pub ch_name: String,
    pub coil_type: u32,
    pub coil_class: CoilClass,
    /// Integration point positions.
    pub points: Vec<[f64; 3]>,
    /// Unit normals, one per integration point.
    pub normals: Vec<[f64; 3]>,
    /// Quadrature weights, one per integration point.
    pub weights: Vec<f64>,
}

impl Coil {
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Data/basis row scale for this coil.
    pub fn scale(&self) -> f64 {
        if self.coil_class.is_magnetometer() {
            MAG_SCALE
        } else {
            1.0
        }
    }

    pub fn validate(&self) -> MaxwellResult<()> {
        let n = self.points.len();
        if n == 0 {
            return Err(MaxwellError::ConfigError(format!(
                "coil {} has no integration points",
                self.ch_name
            )));
        }
        if self.normals.len() != n || self.weights.len() != n {
            return Err(MaxwellError::ConfigError(format!(
                "coil {}: {} points, {} normals, {} weights",
                self.ch_name,
                n,
                self.normals.len(),
                self.weights.len()
            )));
        }
        let finite = self
            .points
            .iter()
            .chain(self.normals.iter())
            .flatten()
            .chain(self.weights.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(MaxwellError::ConfigError(format!(
                "coil {} has non-finite geometry",
                self.ch_name
            )));
        }
        Ok(())
    }
}
