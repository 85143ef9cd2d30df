// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sensor geometry: MEG coil construction from templates and the
//! concatenated integration-point layout used by the basis assembly.

use crate::coil_defs::{CoilAccuracy, CoilDefinitions, CoilTemplate};
use maxwell_types::coil::Coil;
use maxwell_types::error::{MaxwellError, MaxwellResult};
use maxwell_types::raw::{ChannelInfo, MeasInfo, Transform};
use std::collections::BTreeSet;
use std::ops::Range;
use tracing::warn;

/// Source of MEG coil descriptions for a measurement.
///
/// Implementations return one coil per MEG channel, in channel order.
pub trait GeometryProvider {
    fn meg_coils(&self, info: &MeasInfo) -> MaxwellResult<Vec<Coil>>;
}

/// Geometry built from coil template tables.
///
/// The primary table is used when it defines every coil type present in
/// the measurement; otherwise the fallback table is used.
#[derive(Debug, Clone)]
pub struct TemplateGeometry {
    pub primary: Option<CoilDefinitions>,
    pub fallback: CoilDefinitions,
    pub accuracy: CoilAccuracy,
}

impl Default for TemplateGeometry {
    fn default() -> Self {
        TemplateGeometry {
            primary: None,
            fallback: CoilDefinitions::builtin(),
            accuracy: CoilAccuracy::Accurate,
        }
    }
}

impl TemplateGeometry {
    pub fn new(accuracy: CoilAccuracy) -> Self {
        TemplateGeometry {
            accuracy,
            ..Self::default()
        }
    }

    pub fn with_primary(mut self, primary: CoilDefinitions) -> Self {
        self.primary = Some(primary);
        self
    }

    fn select_table(&self, required: &BTreeSet<u32>) -> &CoilDefinitions {
        match &self.primary {
            Some(primary) if primary.covers(required, self.accuracy) => primary,
            Some(primary) => {
                let missing: Vec<u32> = required
                    .difference(&primary.coil_types(self.accuracy))
                    .copied()
                    .collect();
                warn!(
                    ?missing,
                    accuracy = ?self.accuracy,
                    "primary coil table is incomplete, using default coil definitions"
                );
                &self.fallback
            }
            None => &self.fallback,
        }
    }
}

impl GeometryProvider for TemplateGeometry {
    fn meg_coils(&self, info: &MeasInfo) -> MaxwellResult<Vec<Coil>> {
        let picks = info.meg_picks();
        if picks.is_empty() {
            return Err(MaxwellError::NoMegChannels);
        }
        let required: BTreeSet<u32> = picks.iter().map(|&i| info.chs[i].coil_type).collect();
        let table = self.select_table(&required);

        picks
            .iter()
            .map(|&i| {
                let ch = &info.chs[i];
                let template = table.find(ch.coil_type, self.accuracy).ok_or_else(|| {
                    MaxwellError::ConfigError(format!(
                        "no {:?} coil definition for type {} (channel {})",
                        self.accuracy, ch.coil_type, ch.name
                    ))
                })?;
                let coil = create_coil(ch, template, &info.dev_head_t);
                coil.validate()?;
                Ok(coil)
            })
            .collect()
    }
}

/// Place a template at a channel: coil frame (device) then `dev_head_t`.
pub fn create_coil(ch: &ChannelInfo, template: &CoilTemplate, dev_head_t: &Transform) -> Coil {
    let r0 = ch.coil_origin();
    let [ex, ey, ez] = ch.coil_axes();
    let to_device = |v: [f64; 3]| -> [f64; 3] {
        let mut out = [0.0; 3];
        for (k, o) in out.iter_mut().enumerate() {
            *o = v[0] * ex[k] + v[1] * ey[k] + v[2] * ez[k];
        }
        out
    };

    let mut points = Vec::with_capacity(template.points.len());
    let mut normals = Vec::with_capacity(template.points.len());
    let mut weights = Vec::with_capacity(template.points.len());
    for p in &template.points {
        let d = to_device(p.pos);
        points.push(dev_head_t.apply_point([r0[0] + d[0], r0[1] + d[1], r0[2] + d[2]]));
        normals.push(dev_head_t.apply_vector(to_device(p.normal)));
        weights.push(p.weight);
    }

    Coil {
        ch_name: ch.name.clone(),
        coil_type: template.coil_type,
        coil_class: template.coil_class,
        points,
        normals,
        weights,
    }
}

/// All coils' integration points laid end to end.
///
/// `ranges[k]` is the contiguous slice of points belonging to coil `k`.
#[derive(Debug, Clone)]
pub struct ConcatenatedCoils {
    pub points: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub weights: Vec<f64>,
    pub ranges: Vec<Range<usize>>,
}

impl ConcatenatedCoils {
    pub fn n_sensors(&self) -> usize {
        self.ranges.len()
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }
}

pub fn concatenate_coils(coils: &[Coil]) -> ConcatenatedCoils {
    let total: usize = coils.iter().map(Coil::n_points).sum();
    let mut points = Vec::with_capacity(total);
    let mut normals = Vec::with_capacity(total);
    let mut weights = Vec::with_capacity(total);
    let mut ranges = Vec::with_capacity(coils.len());

    let mut start = 0;
    for coil in coils {
        points.extend_from_slice(&coil.points);
        normals.extend_from_slice(&coil.normals);
        weights.extend_from_slice(&coil.weights);
        let end = start + coil.n_points();
        ranges.push(start..end);
        start = end;
    }

    ConcatenatedCoils {
        points,
        normals,
        weights,
        ranges,
    }
}
