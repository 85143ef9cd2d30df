// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Signal Space Separation.
//!
//! Coil geometry, SSS basis assembly, projection onto the internal
//! subspace and the end-to-end filter.

pub mod basis;
pub mod coil_defs;
pub mod filter;
pub mod geometry;
pub mod projector;

pub use filter::{maxwell_filter, maxwell_filter_default};
