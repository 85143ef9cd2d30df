//! Spherical harmonics and gradients of the multipole potential terms.
//!
//! Equation numbers refer to Taulu and Kajola, 2005, "Presentation of
//! electromagnetic multichannel data: The signal space separation method".
//!
//! The complex harmonics are orthonormal with the Condon–Shortley phase.
//! The real basis used by SSS is built from them by [`realize`].

use crate::coords::{sph_to_cart_partials, Spherical};
use maxwell_types::error::{MaxwellError, MaxwellResult};
use num_complex::Complex64;
use std::f64::consts::{PI, SQRT_2};

/// Complex gradient `(∂r, ∂azimuth, ∂polar)` in spherical components.
pub type SphericalGradient = [Complex64; 3];

/// n! as f64. Exact up to 22!, far above any expansion order in use.
pub fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// P_l^m(x) for m ≥ 0 by upward recurrence in l.
fn legendre_nonneg(degree: usize, order: usize, x: f64) -> f64 {
    if order > degree {
        return 0.0;
    }
    let mut pmm = 1.0;
    if order > 0 {
        let somx2 = ((1.0 - x) * (1.0 + x)).max(0.0).sqrt();
        let mut fact = 1.0;
        for _ in 0..order {
            pmm *= -fact * somx2;
            fact += 2.0;
        }
    }
    if degree == order {
        return pmm;
    }
    let mut pmmp1 = x * (2 * order + 1) as f64 * pmm;
    if degree == order + 1 {
        return pmmp1;
    }
    let mut pll = 0.0;
    for ll in (order + 2)..=degree {
        pll = (x * (2 * ll - 1) as f64 * pmmp1 - (ll + order - 1) as f64 * pmm)
            / (ll - order) as f64;
        pmm = pmmp1;
        pmmp1 = pll;
    }
    pll
}

/// (−1)^m (l−m)!/(l+m)!, relating P_l^{−m} to P_l^m.
fn negative_order_factor(degree: usize, order: usize) -> f64 {
    let sign = if order % 2 == 0 { 1.0 } else { -1.0 };
    sign * factorial(degree - order) / factorial(degree + order)
}

/// P_l^m(x) for any sign of m; zero when |m| > l.
fn legendre(degree: usize, order: i32, x: f64) -> f64 {
    let m = order.unsigned_abs() as usize;
    if m > degree {
        return 0.0;
    }
    if order >= 0 {
        legendre_nonneg(degree, m, x)
    } else {
        negative_order_factor(degree, m) * legendre_nonneg(degree, m, x)
    }
}

/// Associated Legendre function P_l^m(x) with Condon–Shortley phase.
///
/// Negative orders are mapped through (−1)^m (l−m)!/(l+m)!. Fails when
/// |m| > l.
pub fn assoc_legendre(degree: usize, order: i32, x: f64) -> MaxwellResult<f64> {
    check_indices(degree, order)?;
    Ok(legendre(degree, order, x))
}

/// Orthonormalization constant sqrt((2l+1)/(4π) · (l−m)!/(l+m)!).
fn norm_factor(degree: usize, order: i32) -> f64 {
    let l = degree as i64;
    let m = order as i64;
    let num = factorial((l - m) as usize);
    let den = factorial((l + m) as usize);
    ((2 * degree + 1) as f64 / (4.0 * PI) * num / den).sqrt()
}

fn check_indices(degree: usize, order: i32) -> MaxwellResult<()> {
    if order.unsigned_abs() as usize > degree {
        return Err(MaxwellError::Domain(format!(
            "|order| must be <= degree, got degree={degree}, order={order}"
        )));
    }
    Ok(())
}

/// Spherical harmonic Y_l^m at (azimuth, polar). Eq. 4.
///
/// Azimuth must lie in [−2π, 2π] and polar in [0, π].
pub fn sph_harmonic(degree: usize, order: i32, azimuth: f64, polar: f64) -> MaxwellResult<Complex64> {
    check_indices(degree, order)?;
    if !(-2.0 * PI..=2.0 * PI).contains(&azimuth) {
        return Err(MaxwellError::Domain(format!(
            "azimuth must lie in [-2*pi, 2*pi], got {azimuth}"
        )));
    }
    if !(0.0..=PI).contains(&polar) {
        return Err(MaxwellError::Domain(format!(
            "polar must lie in [0, pi], got {polar}"
        )));
    }
    let p = legendre(degree, order, polar.cos());
    let phase = Complex64::new(0.0, order as f64 * azimuth).exp();
    Ok(phase * (norm_factor(degree, order) * p))
}

fn legendre_deriv(degree: usize, order: i32, x: f64) -> f64 {
    let m = order.unsigned_abs() as usize;
    let c = if order < 0 {
        negative_order_factor(degree, m)
    } else {
        1.0
    };
    let l = degree as f64;
    let mf = m as f64;
    let one_minus_x2 = 1.0 - x * x;
    c * (mf * x * legendre_nonneg(degree, m, x)
        + (l + mf) * (l - mf + 1.0) * one_minus_x2.sqrt() * legendre(degree, m as i32 - 1, x))
        / one_minus_x2
}

/// dP_l^m/dx at `x`.
///
/// Singular at x = ±1 (the poles). Fails when |m| > l.
pub fn alegendre_deriv(degree: usize, order: i32, x: f64) -> MaxwellResult<f64> {
    check_indices(degree, order)?;
    Ok(legendre_deriv(degree, order, x))
}

/// ∂Y_l^m/∂polar.
fn dy_dpolar(degree: usize, order: i32, s: &Spherical) -> Complex64 {
    let phase = Complex64::new(0.0, order as f64 * s.azimuth).exp();
    phase
        * (norm_factor(degree, order) * -s.polar.sin() * legendre_deriv(degree, order, s.polar.cos()))
}

/// Gradient of the internal term Y_l^m / r^(l+1). Eq. 6.
pub fn grad_in_components(degree: usize, order: i32, s: &Spherical) -> MaxwellResult<SphericalGradient> {
    let y = sph_harmonic(degree, order, s.azimuth, s.polar)?;
    let r_pow = s.radius.powi(degree as i32 + 2);

    let g_rad = y * (-(degree as f64 + 1.0) / r_pow);
    let g_az = Complex64::i() * order as f64 * y / (r_pow * s.polar.sin());
    let g_pol = dy_dpolar(degree, order, s) / r_pow;
    Ok([g_rad, g_az, g_pol])
}

/// Gradient of the external term Y_l^m · r^l. Eq. 7.
pub fn grad_out_components(degree: usize, order: i32, s: &Spherical) -> MaxwellResult<SphericalGradient> {
    let y = sph_harmonic(degree, order, s.azimuth, s.polar)?;
    let r_pow = s.radius.powi(degree as i32 - 1);

    let g_rad = y * (degree as f64 * r_pow);
    let g_az = Complex64::i() * order as f64 * y * r_pow / s.polar.sin();
    let g_pol = dy_dpolar(degree, order, s) * r_pow;
    Ok([g_rad, g_az, g_pol])
}

/// Real (tesseral) harmonic family selected by the sign of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmonicKind {
    /// m > 0: √2 · Re
    Cosine,
    /// m < 0: √2 · Im
    Sine,
    /// m = 0: already real
    Zonal,
}

impl HarmonicKind {
    pub fn of_order(order: i32) -> Self {
        match order {
            o if o > 0 => HarmonicKind::Cosine,
            o if o < 0 => HarmonicKind::Sine,
            _ => HarmonicKind::Zonal,
        }
    }
}

/// Project a complex gradient onto the real harmonic basis.
pub fn realize(grad: &SphericalGradient, order: i32) -> [f64; 3] {
    match HarmonicKind::of_order(order) {
        HarmonicKind::Cosine => grad.map(|g| SQRT_2 * g.re),
        HarmonicKind::Sine => grad.map(|g| SQRT_2 * g.im),
        HarmonicKind::Zonal => grad.map(|g| g.re),
    }
}

/// Which side of the multipole expansion a basis term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expansion {
    /// Sources inside the sphere, decaying with r.
    Internal,
    /// Sources outside the sphere, growing with r.
    External,
}

impl Expansion {
    pub fn gradient(self, degree: usize, order: i32, s: &Spherical) -> MaxwellResult<SphericalGradient> {
        match self {
            Expansion::Internal => grad_in_components(degree, order, s),
            Expansion::External => grad_out_components(degree, order, s),
        }
    }

    /// Real-basis gradient in cartesian components.
    pub fn cartesian_gradient(self, degree: usize, order: i32, s: &Spherical) -> MaxwellResult<[f64; 3]> {
        let grad = self.gradient(degree, order, s)?;
        Ok(sph_to_cart_partials(s, realize(&grad, order)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::point_to_sph;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(10), 3_628_800.0);
    }

    #[test]
    fn test_legendre_low_degrees() {
        let x: f64 = 0.3;
        let assoc_legendre = |l, m, x| assoc_legendre(l, m, x).unwrap();
        let s = (1.0 - x * x).sqrt();
        assert!((assoc_legendre(1, 0, x) - x).abs() < 1e-15);
        assert!((assoc_legendre(1, 1, x) + s).abs() < 1e-15);
        assert!((assoc_legendre(2, 0, x) - 0.5 * (3.0 * x * x - 1.0)).abs() < 1e-15);
        assert!((assoc_legendre(2, 1, x) + 3.0 * x * s).abs() < 1e-15);
        assert!((assoc_legendre(2, 2, x) - 3.0 * (1.0 - x * x)).abs() < 1e-14);
        assert!((assoc_legendre(1, -1, x) - 0.5 * s).abs() < 1e-15);
    }

    #[test]
    fn test_legendre_order_out_of_range_rejected() {
        for (degree, order) in [(2usize, 3i32), (1, -3), (0, 1), (3, -4)] {
            assert!(matches!(
                assoc_legendre(degree, order, 0.5),
                Err(MaxwellError::Domain(_))
            ));
            assert!(matches!(
                alegendre_deriv(degree, order, 0.5),
                Err(MaxwellError::Domain(_))
            ));
        }
        assert!(alegendre_deriv(0, 0, 0.5).unwrap().abs() < 1e-15);
    }

    #[test]
    fn test_legendre_derivative_matches_finite_difference() {
        let h = 1e-6;
        for degree in 1..=5 {
            for order in -(degree as i32)..=degree as i32 {
                for &x in &[-0.7, -0.2, 0.1, 0.55, 0.9] {
                    let fd = (assoc_legendre(degree, order, x + h).unwrap()
                        - assoc_legendre(degree, order, x - h).unwrap())
                        / (2.0 * h);
                    let an = alegendre_deriv(degree, order, x).unwrap();
                    assert!(
                        (fd - an).abs() < 1e-5 * (1.0 + an.abs()),
                        "l={degree} m={order} x={x}: fd={fd} analytic={an}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_y10_value() {
        let y = sph_harmonic(1, 0, 0.0, 0.0).unwrap();
        assert!((y.re - (3.0 / (4.0 * PI)).sqrt()).abs() < 1e-15);
        assert!(y.im.abs() < 1e-15);
    }

    #[test]
    fn test_conjugate_symmetry() {
        // Y_l^{-m} = (-1)^m conj(Y_l^m)
        let (az, pol) = (0.7, 1.1);
        for degree in 1..=4usize {
            for order in 1..=degree as i32 {
                let pos = sph_harmonic(degree, order, az, pol).unwrap();
                let neg = sph_harmonic(degree, -order, az, pol).unwrap();
                let sign = if order % 2 == 0 { 1.0 } else { -1.0 };
                let expected = pos.conj() * sign;
                assert!((neg - expected).norm() < 1e-13, "l={degree} m={order}");
            }
        }
    }

    #[test]
    fn test_orthonormal_quadrature() {
        // Midpoint quadrature of ∫|Y|² dΩ over the sphere.
        let n_pol = 200;
        let n_az = 200;
        for &(degree, order) in &[(1usize, 0i32), (2, -1), (3, 2)] {
            let mut total = 0.0;
            for i in 0..n_pol {
                let pol = (i as f64 + 0.5) * PI / n_pol as f64;
                for j in 0..n_az {
                    let az = (j as f64 + 0.5) * 2.0 * PI / n_az as f64 - PI;
                    let y = sph_harmonic(degree, order, az, pol).unwrap();
                    total += y.norm_sqr() * pol.sin();
                }
            }
            total *= (PI / n_pol as f64) * (2.0 * PI / n_az as f64);
            assert!((total - 1.0).abs() < 1e-3, "l={degree} m={order}: {total}");
        }
    }

    #[test]
    fn test_order_exceeds_degree_rejected() {
        let err = sph_harmonic(2, 3, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, MaxwellError::Domain(_)));
        assert!(sph_harmonic(2, -3, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_angle_ranges_rejected() {
        assert!(sph_harmonic(1, 0, 7.0, 1.0).is_err());
        assert!(sph_harmonic(1, 0, 0.0, -0.1).is_err());
        assert!(sph_harmonic(1, 0, 0.0, 3.2).is_err());
        assert!(sph_harmonic(1, 0, -2.0 * PI, PI).is_ok());
    }

    #[test]
    fn test_realize_dispatch() {
        let g = [Complex64::new(1.0, 2.0); 3];
        assert_eq!(realize(&g, 2), [SQRT_2; 3]);
        assert_eq!(realize(&g, -1), [2.0 * SQRT_2; 3]);
        assert_eq!(realize(&g, 0), [1.0; 3]);
    }

    /// Real potential evaluated through the same complex → real mapping.
    fn real_potential(side: Expansion, degree: usize, order: i32, p: [f64; 3]) -> f64 {
        let s = point_to_sph(p).unwrap();
        let y = sph_harmonic(degree, order, s.azimuth, s.polar).unwrap();
        let v = match side {
            Expansion::Internal => y / s.radius.powi(degree as i32 + 1),
            Expansion::External => y * s.radius.powi(degree as i32),
        };
        match HarmonicKind::of_order(order) {
            HarmonicKind::Cosine => SQRT_2 * v.re,
            HarmonicKind::Sine => SQRT_2 * v.im,
            HarmonicKind::Zonal => v.re,
        }
    }

    #[test]
    fn test_cartesian_gradient_matches_finite_difference() {
        let p = [0.031, -0.052, 0.087];
        let h = 1e-7;
        for side in [Expansion::Internal, Expansion::External] {
            for degree in 1..=3usize {
                for order in -(degree as i32)..=degree as i32 {
                    let s = point_to_sph(p).unwrap();
                    let g = side.cartesian_gradient(degree, order, &s).unwrap();
                    let scale = g.iter().map(|v| v.abs()).fold(0.0, f64::max).max(1e-12);
                    for axis in 0..3 {
                        let mut hi = p;
                        let mut lo = p;
                        hi[axis] += h;
                        lo[axis] -= h;
                        let fd = (real_potential(side, degree, order, hi)
                            - real_potential(side, degree, order, lo))
                            / (2.0 * h);
                        assert!(
                            (fd - g[axis]).abs() < 1e-5 * scale,
                            "{side:?} l={degree} m={order} axis={axis}: fd={fd} analytic={}",
                            g[axis]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_internal_gradient_radial_scaling() {
        // Internal gradient scales as r^-(l+2), external as r^(l-1).
        let a = Spherical { radius: 0.1, azimuth: 0.4, polar: 1.0 };
        let b = Spherical { radius: 0.2, ..a };
        let degree = 3;
        let gi_a = grad_in_components(degree, 1, &a).unwrap();
        let gi_b = grad_in_components(degree, 1, &b).unwrap();
        let ratio = gi_a[0].norm() / gi_b[0].norm();
        assert!((ratio - 2f64.powi(5)).abs() < 1e-9);

        let ge_a = grad_out_components(degree, 1, &a).unwrap();
        let ge_b = grad_out_components(degree, 1, &b).unwrap();
        let ratio = ge_b[2].norm() / ge_a[2].norm();
        assert!((ratio - 2f64.powi(2)).abs() < 1e-9);
    }
}
