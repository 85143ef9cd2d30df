// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Coil Definitions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coil template tables keyed by coil type and accuracy.
//!
//! A template lists integration points in the coil's own frame (z along
//! the coil normal). The built-in table covers the point magnetometer and
//! the Vectorview sensors; vendor tables can be loaded from JSON.

use maxwell_types::coil::CoilClass;
use maxwell_types::error::{MaxwellError, MaxwellResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distance of the Vectorview pickup loops above the coil frame origin [m].
const VV_Z_OFFSET: f64 = 3e-4;

/// 3-point Gauss–Legendre nodes on [-1, 1] and weights normalized to 1.
const GL3_NODES: [f64; 3] = [-0.774_596_669_241_483_4, 0.0, 0.774_596_669_241_483_4];
const GL3_WEIGHTS: [f64; 3] = [5.0 / 18.0, 8.0 / 18.0, 5.0 / 18.0];

/// Integration detail level of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoilAccuracy {
    Point,
    Normal,
    Accurate,
}

/// One quadrature point in coil coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatePoint {
    pub weight: f64,
    pub pos: [f64; 3],
    pub normal: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoilTemplate {
    pub coil_type: u32,
    pub coil_class: CoilClass,
    pub accuracy: CoilAccuracy,
    /// Loop side length [m].
    pub size: f64,
    /// Gradiometer baseline [m], zero for magnetometers.
    pub base: f64,
    pub description: String,
    pub points: Vec<TemplatePoint>,
}

/// A calibration table of coil templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoilDefinitions {
    pub coils: Vec<CoilTemplate>,
}

fn up(weight: f64, x: f64, y: f64, z: f64) -> TemplatePoint {
    TemplatePoint {
        weight,
        pos: [x, y, z],
        normal: [0.0, 0.0, 1.0],
    }
}

fn point_magnetometer(coil_type: u32) -> Vec<CoilTemplate> {
    [CoilAccuracy::Point, CoilAccuracy::Normal, CoilAccuracy::Accurate]
        .into_iter()
        .map(|accuracy| CoilTemplate {
            coil_type,
            coil_class: CoilClass::Magnetometer,
            accuracy,
            size: 0.0,
            base: 0.0,
            description: "Point magnetometer".to_string(),
            points: vec![up(1.0, 0.0, 0.0, 0.0)],
        })
        .collect()
}

/// Square magnetometer loop of side `size`.
fn square_magnetometer(coil_type: u32, size: f64, description: &str) -> Vec<CoilTemplate> {
    let q = size / 4.0;
    let h = size / 2.0;
    let normal = vec![
        up(0.25, -q, -q, VV_Z_OFFSET),
        up(0.25, -q, q, VV_Z_OFFSET),
        up(0.25, q, -q, VV_Z_OFFSET),
        up(0.25, q, q, VV_Z_OFFSET),
    ];
    let mut accurate = Vec::with_capacity(9);
    for (xi, wx) in GL3_NODES.iter().zip(GL3_WEIGHTS.iter()) {
        for (yi, wy) in GL3_NODES.iter().zip(GL3_WEIGHTS.iter()) {
            accurate.push(up(wx * wy, xi * h, yi * h, VV_Z_OFFSET));
        }
    }

    let make = |accuracy, points| CoilTemplate {
        coil_type,
        coil_class: CoilClass::Magnetometer,
        accuracy,
        size,
        base: 0.0,
        description: description.to_string(),
        points,
    };
    vec![
        make(CoilAccuracy::Point, vec![up(1.0, 0.0, 0.0, VV_Z_OFFSET)]),
        make(CoilAccuracy::Normal, normal),
        make(CoilAccuracy::Accurate, accurate),
    ]
}

/// Planar gradiometer: two loops at ±base/2 along x with opposite weights.
fn planar_gradiometer(coil_type: u32, size: f64, base: f64, description: &str) -> Vec<CoilTemplate> {
    let b = base / 2.0;
    let w = 1.0 / base;
    let q = size / 4.0;
    let h = size / 2.0;

    let point = vec![up(w, b, 0.0, VV_Z_OFFSET), up(-w, -b, 0.0, VV_Z_OFFSET)];
    let normal = vec![
        up(w / 2.0, b, -q, VV_Z_OFFSET),
        up(w / 2.0, b, q, VV_Z_OFFSET),
        up(-w / 2.0, -b, -q, VV_Z_OFFSET),
        up(-w / 2.0, -b, q, VV_Z_OFFSET),
    ];
    let mut accurate = Vec::with_capacity(6);
    for (sign, x) in [(1.0, b), (-1.0, -b)] {
        for (yi, wy) in GL3_NODES.iter().zip(GL3_WEIGHTS.iter()) {
            accurate.push(up(sign * w * wy, x, yi * h, VV_Z_OFFSET));
        }
    }

    let make = |accuracy, points| CoilTemplate {
        coil_type,
        coil_class: CoilClass::PlanarGradiometer,
        accuracy,
        size,
        base,
        description: description.to_string(),
        points,
    };
    vec![
        make(CoilAccuracy::Point, point),
        make(CoilAccuracy::Normal, normal),
        make(CoilAccuracy::Accurate, accurate),
    ]
}

impl CoilDefinitions {
    /// Default table shipped with the filter.
    pub fn builtin() -> Self {
        let mut coils = point_magnetometer(2000);
        for (coil_type, label) in [(3012, "T1"), (3013, "T2"), (3014, "T3")] {
            coils.extend(planar_gradiometer(
                coil_type,
                26.39e-3,
                16.80e-3,
                &format!("Vectorview planar gradiometer {label}"),
            ));
        }
        coils.extend(square_magnetometer(3022, 25.80e-3, "Vectorview magnetometer T1"));
        coils.extend(square_magnetometer(3023, 25.80e-3, "Vectorview magnetometer T2"));
        coils.extend(square_magnetometer(3024, 21.00e-3, "Vectorview magnetometer T3"));
        CoilDefinitions { coils }
    }

    /// Load a table from JSON.
    pub fn from_file(path: &str) -> MaxwellResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let defs: Self = serde_json::from_str(&contents)?;
        defs.validate()?;
        Ok(defs)
    }

    pub fn validate(&self) -> MaxwellResult<()> {
        for t in &self.coils {
            if t.points.is_empty() {
                return Err(MaxwellError::ConfigError(format!(
                    "coil template {} ({:?}) has no integration points",
                    t.coil_type, t.accuracy
                )));
            }
            for p in &t.points {
                let n = p.normal;
                let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
                if !p.weight.is_finite() || (len - 1.0).abs() > 1e-6 {
                    return Err(MaxwellError::ConfigError(format!(
                        "coil template {} has an invalid point (weight {}, |normal| {len})",
                        t.coil_type, p.weight
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn find(&self, coil_type: u32, accuracy: CoilAccuracy) -> Option<&CoilTemplate> {
        self.coils
            .iter()
            .find(|t| t.coil_type == coil_type && t.accuracy == accuracy)
    }

    /// Coil types available at `accuracy`.
    pub fn coil_types(&self, accuracy: CoilAccuracy) -> BTreeSet<u32> {
        self.coils
            .iter()
            .filter(|t| t.accuracy == accuracy)
            .map(|t| t.coil_type)
            .collect()
    }

    pub fn covers(&self, required: &BTreeSet<u32>, accuracy: CoilAccuracy) -> bool {
        required.is_subset(&self.coil_types(accuracy))
    }
}
