// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Raw
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! In-memory measurement record: channel table, device-to-head transform,
//! processing history and the channels × samples data block.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{MaxwellError, MaxwellResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Meg,
    /// MEG reference sensors, never part of the SSS basis.
    RefMeg,
    Eeg,
    Stim,
    Misc,
}

/// One channel of the measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub name: String,
    pub kind: ChannelKind,
    /// Coil template key, meaningful for MEG channels only.
    pub coil_type: u32,
    /// Coil frame in device coordinates: origin, ex, ey, ez.
    pub loc: [f64; 12],
}

impl ChannelInfo {
    pub fn coil_origin(&self) -> [f64; 3] {
        [self.loc[0], self.loc[1], self.loc[2]]
    }

    /// Coil frame axes (ex, ey, ez).
    pub fn coil_axes(&self) -> [[f64; 3]; 3] {
        [
            [self.loc[3], self.loc[4], self.loc[5]],
            [self.loc[6], self.loc[7], self.loc[8]],
            [self.loc[9], self.loc[10], self.loc[11]],
        ]
    }
}

/// Homogeneous 4×4 rigid transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [[f64; 4]; 4],
}

impl Transform {
    pub fn identity() -> Self {
        let mut matrix = [[0.0; 4]; 4];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Transform { matrix }
    }

    pub fn from_translation(t: [f64; 3]) -> Self {
        let mut tr = Self::identity();
        for i in 0..3 {
            tr.matrix[i][3] = t[i];
        }
        tr
    }

    /// Rotation about z by `angle` [rad] followed by translation `t`.
    pub fn from_z_rotation(angle: f64, t: [f64; 3]) -> Self {
        let (s, c) = angle.sin_cos();
        let mut tr = Self::from_translation(t);
        tr.matrix[0][0] = c;
        tr.matrix[0][1] = -s;
        tr.matrix[1][0] = s;
        tr.matrix[1][1] = c;
        tr
    }

    /// Rotate and translate a position.
    pub fn apply_point(&self, p: [f64; 3]) -> [f64; 3] {
        let m = &self.matrix;
        let mut out = [0.0; 3];
        for (i, o) in out.iter_mut().enumerate() {
            *o = m[i][0] * p[0] + m[i][1] * p[1] + m[i][2] * p[2] + m[i][3];
        }
        out
    }

    /// Rotate a direction (translation ignored).
    pub fn apply_vector(&self, v: [f64; 3]) -> [f64; 3] {
        let m = &self.matrix;
        let mut out = [0.0; 3];
        for (i, o) in out.iter_mut().enumerate() {
            *o = m[i][0] * v[0] + m[i][1] * v[1] + m[i][2] * v[2];
        }
        out
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Provenance entry appended by each Maxwell filtering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingRecord {
    pub int_order: usize,
    pub ext_order: usize,
    /// Expansion origin [m].
    pub origin: [f64; 3],
    pub n_sensors: usize,
    pub n_moments: usize,
    pub creator: String,
}

/// Measurement info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasInfo {
    pub chs: Vec<ChannelInfo>,
    /// Names of channels flagged as defective.
    #[serde(default)]
    pub bads: Vec<String>,
    #[serde(default)]
    pub dev_head_t: Transform,
    /// Newest record first; `None` until the first processing pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proc_history: Option<Vec<ProcessingRecord>>,
    #[serde(default)]
    pub maxshield: bool,
}

impl MeasInfo {
    pub fn new(chs: Vec<ChannelInfo>) -> Self {
        MeasInfo {
            chs,
            bads: Vec::new(),
            dev_head_t: Transform::identity(),
            proc_history: None,
            maxshield: false,
        }
    }

    pub fn n_channels(&self) -> usize {
        self.chs.len()
    }

    pub fn ch_index(&self, name: &str) -> Option<usize> {
        self.chs.iter().position(|ch| ch.name == name)
    }

    /// Rows are looked up by name, so every channel name must be unique.
    pub fn check_unique_names(&self) -> MaxwellResult<()> {
        let mut seen = HashSet::with_capacity(self.chs.len());
        for ch in &self.chs {
            if !seen.insert(ch.name.as_str()) {
                return Err(MaxwellError::ConfigError(format!(
                    "duplicate channel name {}",
                    ch.name
                )));
            }
        }
        Ok(())
    }

    /// Indices of MEG channels (reference sensors excluded), in channel order.
    pub fn meg_picks(&self) -> Vec<usize> {
        self.chs
            .iter()
            .enumerate()
            .filter(|(_, ch)| ch.kind == ChannelKind::Meg)
            .map(|(i, _)| i)
            .collect()
    }

    /// Prepend a record, creating the history if it does not exist yet.
    pub fn push_processing_record(&mut self, record: ProcessingRecord) {
        match self.proc_history.as_mut() {
            Some(history) => history.insert(0, record),
            None => self.proc_history = Some(vec![record]),
        }
    }
}

/// Raw recording: info plus `[n_channels, n_times]` samples.
#[derive(Debug, Clone)]
pub struct RawData {
    pub info: MeasInfo,
    pub data: Array2<f64>,
}

impl RawData {
    pub fn new(info: MeasInfo, data: Array2<f64>) -> MaxwellResult<Self> {
        let raw = RawData { info, data };
        raw.check_shape()?;
        Ok(raw)
    }

    pub fn n_times(&self) -> usize {
        self.data.ncols()
    }

    /// Data rows must match the channel table.
    pub fn check_shape(&self) -> MaxwellResult<()> {
        if self.data.nrows() != self.info.n_channels() {
            return Err(MaxwellError::ShapeMismatch {
                expected: (self.info.n_channels(), self.data.ncols()),
                found: self.data.dim(),
            });
        }
        Ok(())
    }
}
