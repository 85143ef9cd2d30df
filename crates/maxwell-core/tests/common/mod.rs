// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Synthetic Sensor Arrays for Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![allow(dead_code)]

use maxwell_types::coil::Coil;
use maxwell_types::raw::{ChannelInfo, ChannelKind};
use ndarray::Array2;

/// μ0 / 4π [T·m/A].
pub const MU0_4PI: f64 = 1e-7;

/// Quasi-uniform unit directions (Fibonacci sphere). Never on the z axis.
pub fn fibonacci_dirs(n: usize) -> Vec<[f64; 3]> {
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..n)
        .map(|i| {
            let z = 1.0 - (2.0 * i as f64 + 1.0) / n as f64;
            let rho = (1.0 - z * z).sqrt();
            let phi = golden * i as f64;
            [rho * phi.cos(), rho * phi.sin(), z]
        })
        .collect()
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn unit(v: [f64; 3]) -> [f64; 3] {
    let n = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / n, v[1] / n, v[2] / n]
}

/// Coil frame at `position` whose z axis is `normal`.
pub fn frame_loc(position: [f64; 3], normal: [f64; 3]) -> [f64; 12] {
    let ez = unit(normal);
    let helper = if ez[2].abs() > 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 0.0, 1.0]
    };
    let ex = unit(cross(helper, ez));
    let ey = cross(ez, ex);
    [
        position[0], position[1], position[2], ex[0], ex[1], ex[2], ey[0], ey[1], ey[2], ez[0],
        ez[1], ez[2],
    ]
}

pub fn meg_channel(name: &str, coil_type: u32, position: [f64; 3], normal: [f64; 3]) -> ChannelInfo {
    ChannelInfo {
        name: name.to_string(),
        kind: ChannelKind::Meg,
        coil_type,
        loc: frame_loc(position, normal),
    }
}

pub fn other_channel(name: &str, kind: ChannelKind) -> ChannelInfo {
    ChannelInfo {
        name: name.to_string(),
        kind,
        coil_type: 0,
        loc: [0.0; 12],
    }
}

/// `n` radial MEG channels around `center`, alternating between two shells
/// (10 and 12 cm) and cycling through `coil_types`.
pub fn helmet(n: usize, center: [f64; 3], coil_types: &[u32]) -> Vec<ChannelInfo> {
    fibonacci_dirs(n)
        .into_iter()
        .enumerate()
        .map(|(i, dir)| {
            let radius = if i % 2 == 0 { 0.10 } else { 0.12 };
            let pos = [
                center[0] + radius * dir[0],
                center[1] + radius * dir[1],
                center[2] + radius * dir[2],
            ];
            meg_channel(&format!("MEG{i:04}"), coil_types[i % coil_types.len()], pos, dir)
        })
        .collect()
}

/// Field at `p` of a magnetic dipole `m` located at `q`.
pub fn dipole_field(q: [f64; 3], m: [f64; 3], p: [f64; 3]) -> [f64; 3] {
    let r = [p[0] - q[0], p[1] - q[1], p[2] - q[2]];
    let dist = (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt();
    let rh = [r[0] / dist, r[1] / dist, r[2] / dist];
    let mr = m[0] * rh[0] + m[1] * rh[1] + m[2] * rh[2];
    let k = MU0_4PI / dist.powi(3);
    [
        k * (3.0 * rh[0] * mr - m[0]),
        k * (3.0 * rh[1] * mr - m[1]),
        k * (3.0 * rh[2] * mr - m[2]),
    ]
}

/// Integrated coil response to `field`.
pub fn coil_response(coil: &Coil, field: impl Fn([f64; 3]) -> [f64; 3]) -> f64 {
    coil.points
        .iter()
        .zip(coil.normals.iter())
        .zip(coil.weights.iter())
        .map(|((p, n), w)| {
            let b = field(*p);
            w * (b[0] * n[0] + b[1] * n[1] + b[2] * n[2])
        })
        .sum()
}

/// `[coils.len(), n_times]` responses with a per-sample field.
pub fn simulate(
    coils: &[Coil],
    n_times: usize,
    field: impl Fn(usize, [f64; 3]) -> [f64; 3],
) -> Array2<f64> {
    Array2::from_shape_fn((coils.len(), n_times), |(i, t)| {
        coil_response(&coils[i], |p| field(t, p))
    })
}

pub fn rel_error(actual: &Array2<f64>, expected: &Array2<f64>) -> f64 {
    let diff: f64 = actual
        .iter()
        .zip(expected.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    let norm: f64 = expected.iter().map(|b| b * b).sum();
    (diff / norm).sqrt()
}
