// ─────────────────────────────────────────────────────────────────────
// SCPN Maxwell Filter — Orchestrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! End-to-end SSS filtering of a raw recording.

use crate::basis::{coil_scale, sss_basis};
use crate::geometry::{GeometryProvider, TemplateGeometry};
use crate::projector::project;
use maxwell_types::config::MaxwellConfig;
use maxwell_types::constants::CREATOR_TAG;
use maxwell_types::error::{MaxwellError, MaxwellResult};
use maxwell_types::raw::{ProcessingRecord, RawData};
use ndarray::Axis;
use tracing::info;

/// Apply the Maxwell filter to the MEG channels of `raw`.
///
/// Returns a copy of `raw` whose MEG rows hold the field reconstructed from
/// the internal multipole moments. Other channels are copied unchanged. The
/// input is never modified.
pub fn maxwell_filter<G: GeometryProvider + ?Sized>(
    raw: &RawData,
    geometry: &G,
    config: &MaxwellConfig,
) -> MaxwellResult<RawData> {
    if !raw.info.bads.is_empty() {
        return Err(MaxwellError::BadChannels {
            names: raw.info.bads.clone(),
        });
    }
    config.validate()?;
    raw.check_shape()?;
    raw.info.check_unique_names()?;

    let coils = geometry.meg_coils(&raw.info)?;
    if coils.is_empty() {
        return Err(MaxwellError::NoMegChannels);
    }
    let picks = coils
        .iter()
        .map(|coil| {
            raw.info.ch_index(&coil.ch_name).ok_or_else(|| {
                MaxwellError::ConfigError(format!(
                    "coil {} has no matching channel in the recording",
                    coil.ch_name
                ))
            })
        })
        .collect::<MaxwellResult<Vec<usize>>>()?;

    let origin = config.origin_m();
    info!(
        n_sensors = coils.len(),
        int_order = config.int_order,
        ext_order = config.ext_order,
        ?origin,
        "maxwell filter start"
    );

    let basis = sss_basis(&coils, origin, config.int_order, config.ext_order)?;
    let scale = coil_scale(&coils);
    let meg_data = raw.data.select(Axis(0), &picks);
    let projection = project(&basis.s_in, &basis.s_out, &meg_data, &scale)?;

    let mut out = raw.clone();
    for (row, &pick) in projection.recon.rows().into_iter().zip(picks.iter()) {
        out.data.row_mut(pick).assign(&row);
    }
    out.info.maxshield = false;
    out.info.push_processing_record(ProcessingRecord {
        int_order: config.int_order,
        ext_order: config.ext_order,
        origin,
        n_sensors: basis.n_sensors(),
        n_moments: basis.n_moments(),
        creator: CREATOR_TAG.to_string(),
    });

    info!(
        n_moments = basis.n_moments(),
        rank = projection.rank,
        n_times = out.n_times(),
        "maxwell filter done"
    );
    Ok(out)
}

/// Filter with the built-in coil definitions and default parameters.
pub fn maxwell_filter_default(raw: &RawData) -> MaxwellResult<RawData> {
    maxwell_filter(raw, &TemplateGeometry::default(), &MaxwellConfig::default())
}
