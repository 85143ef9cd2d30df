// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXT_ORDER, DEFAULT_INT_ORDER, DEFAULT_ORIGIN_MM, MM_TO_M};
use crate::error::{MaxwellError, MaxwellResult};

/// Maxwell filter parameters.
/// Every field is optional in JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxwellConfig {
    /// Expansion origin in head coordinates [mm].
    #[serde(default = "default_origin")]
    pub origin: [f64; 3],
    /// Order of the internal multipole expansion.
    #[serde(default = "default_int_order")]
    pub int_order: usize,
    /// Order of the external multipole expansion. Zero disables the
    /// external basis.
    #[serde(default = "default_ext_order")]
    pub ext_order: usize,
}

fn default_origin() -> [f64; 3] {
    DEFAULT_ORIGIN_MM
}
fn default_int_order() -> usize {
    DEFAULT_INT_ORDER
}
fn default_ext_order() -> usize {
    DEFAULT_EXT_ORDER
}

impl Default for MaxwellConfig {
    fn default() -> Self {
        MaxwellConfig {
            origin: default_origin(),
            int_order: default_int_order(),
            ext_order: default_ext_order(),
        }
    }
}

impl MaxwellConfig {
    pub fn new(origin: [f64; 3], int_order: usize, ext_order: usize) -> Self {
        MaxwellConfig {
            origin,
            int_order,
            ext_order,
        }
    }

    /// Load from a JSON file.
    pub fn from_file(path: &str) -> MaxwellResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MaxwellResult<()> {
        if self.origin.iter().any(|v| !v.is_finite()) {
            return Err(MaxwellError::ConfigError(format!(
                "origin must be finite, got {:?}",
                self.origin
            )));
        }
        if self.int_order == 0 {
            return Err(MaxwellError::ConfigError(
                "int_order must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Origin converted to meters.
    pub fn origin_m(&self) -> [f64; 3] {
        [
            self.origin[0] * MM_TO_M,
            self.origin[1] * MM_TO_M,
            self.origin[2] * MM_TO_M,
        ]
    }
}
