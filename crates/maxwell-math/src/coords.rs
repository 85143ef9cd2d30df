//! Cartesian ↔ spherical coordinate conversions.
//!
//! Spherical points are `(radius, azimuth, polar)`: azimuth is measured in
//! the xy-plane from +x, polar from +z. Harmonic notation differs between
//! sources, so the explicit names are used everywhere instead of θ/φ.

use maxwell_types::error::{MaxwellError, MaxwellResult};
use std::f64::consts::PI;

/// A point in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    /// Azimuth in (−π, π].
    pub azimuth: f64,
    /// Polar angle in [0, π].
    pub polar: f64,
}

/// Convert one cartesian point.
///
/// Fails on the origin itself, where both angles are undefined.
pub fn point_to_sph(p: [f64; 3]) -> MaxwellResult<Spherical> {
    if p.iter().any(|v| !v.is_finite()) {
        return Err(MaxwellError::Domain(format!(
            "non-finite cartesian point {p:?}"
        )));
    }
    let radius = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    if radius == 0.0 {
        return Err(MaxwellError::Domain(
            "integration point coincides with the expansion origin".to_string(),
        ));
    }
    let mut azimuth = p[1].atan2(p[0]);
    if azimuth <= -PI {
        azimuth = PI;
    }
    let polar = (p[2] / radius).clamp(-1.0, 1.0).acos();
    Ok(Spherical {
        radius,
        azimuth,
        polar,
    })
}

/// Convert a list of cartesian points.
pub fn cart_to_sph(points: &[[f64; 3]]) -> MaxwellResult<Vec<Spherical>> {
    points.iter().map(|&p| point_to_sph(p)).collect()
}

/// Inverse of [`point_to_sph`].
pub fn sph_to_cart(s: &Spherical) -> [f64; 3] {
    let (s_a, c_a) = s.azimuth.sin_cos();
    let (s_p, c_p) = s.polar.sin_cos();
    [s.radius * s_p * c_a, s.radius * s_p * s_a, s.radius * c_p]
}

/// Convert spherical gradient components `(∂r, ∂azimuth, ∂polar)` at `s`
/// to cartesian `(∂x, ∂y, ∂z)`.
///
/// The components are already the physical ones along the local unit
/// vectors r̂, φ̂ and θ̂, so the transform is the matrix whose columns are
/// those unit vectors. It depends on the point's angles.
pub fn sph_to_cart_partials(s: &Spherical, grad: [f64; 3]) -> [f64; 3] {
    let (s_a, c_a) = s.azimuth.sin_cos();
    let (s_p, c_p) = s.polar.sin_cos();

    let trans = [
        [c_a * s_p, -s_a, c_a * c_p],
        [s_a * s_p, c_a, c_p * s_a],
        [c_p, 0.0, -s_p],
    ];

    let mut out = [0.0; 3];
    for (i, row) in trans.iter().enumerate() {
        out[i] = row[0] * grad[0] + row[1] * grad[1] + row[2] * grad[2];
    }
    out
}
