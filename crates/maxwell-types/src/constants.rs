// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Row scale applied to magnetometer-class sensors in both the basis and
/// the data, bringing them to the dynamic range of the gradiometers.
pub const MAG_SCALE: f64 = 100.0;

/// Relative singular-value cutoff of the basis pseudo-inverse.
/// Values below `PINV_RCOND * sigma_max` are treated as zero.
pub const PINV_RCOND: f64 = 1e-15;

/// Default expansion origin in head coordinates [mm].
pub const DEFAULT_ORIGIN_MM: [f64; 3] = [0.0, 0.0, 40.0];

/// Default internal expansion order.
pub const DEFAULT_INT_ORDER: usize = 8;

/// Default external expansion order.
pub const DEFAULT_EXT_ORDER: usize = 3;

/// Millimeter to meter.
pub const MM_TO_M: f64 = 1e-3;

/// Creator tag written to every processing record.
pub const CREATOR_TAG: &str = "SCPN Maxwell Filter";
