// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaxwellError {
    #[error("Maxwell filter does not handle bad channels, found: {names:?}")]
    BadChannels { names: Vec<String> },

    #[error("Could not find any MEG channels")]
    NoMegChannels,

    #[error("Number of requested bases ({requested}) exceeds number of sensors ({available})")]
    InsufficientSensors { requested: usize, available: usize },

    #[error("Spherical coordinate out of domain: {0}")]
    Domain(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Linear algebra error: {0}")]
    LinAlg(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MaxwellResult<T> = Result<T, MaxwellError>;
