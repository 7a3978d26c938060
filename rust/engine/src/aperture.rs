// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Effective aperture metrics
//!
//! Sidelighting: `sum(window area x VT) / primary sidelit area`.
//! Skylights: `sum(0.85 x skylight area x VT x WF) / toplit area`, with a
//! well factor for wells shallower than 2 ft.
//!
//! Openings without a known visible transmittance are left out. When no
//! opening contributes, the metric is [`NO_APERTURE`].

use daylit_core::{Opening, OpeningKind, Room, SurfaceKind};
use serde::Serialize;

use crate::diagnostics::{DiagnosticKind, Diagnostics, Severity};
use crate::resolver::AreaResult;

/// Returned when nothing contributes to an aperture
pub const NO_APERTURE: f64 = 9999.0;

/// Skylight glazing transmittance derate
const SKYLIGHT_GLAZING_FACTOR: f64 = 0.85;

/// Well factor for skylight wells under 2 ft deep
const SKYLIGHT_WELL_FACTOR: f64 = 0.9;

/// Both effective apertures of a room
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Apertures {
    pub sidelighting: f64,
    pub skylight: f64,
}

impl Default for Apertures {
    fn default() -> Self {
        Self {
            sidelighting: NO_APERTURE,
            skylight: NO_APERTURE,
        }
    }
}

/// Compute both effective apertures for a room
pub fn effective_apertures(
    room: &Room,
    areas: &AreaResult,
    diagnostics: &mut Diagnostics,
) -> Apertures {
    let sidelighting = weighted_aperture(
        room,
        SurfaceKind::Wall,
        OpeningKind::is_window,
        1.0,
        areas.primary_sidelighted_area,
        diagnostics,
    );
    let skylight = weighted_aperture(
        room,
        SurfaceKind::RoofCeiling,
        OpeningKind::is_skylight,
        SKYLIGHT_GLAZING_FACTOR * SKYLIGHT_WELL_FACTOR,
        areas.toplighted_area,
        diagnostics,
    );

    tracing::debug!(
        room = diagnostics.room(),
        sidelighting,
        skylight,
        "effective apertures"
    );

    Apertures {
        sidelighting,
        skylight,
    }
}

fn weighted_aperture(
    room: &Room,
    surface_kind: SurfaceKind,
    is_kind: fn(OpeningKind) -> bool,
    factor: f64,
    lighted_area: f64,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let openings: Vec<&Opening> = room
        .exterior_surfaces()
        .filter(|s| s.kind == surface_kind)
        .flat_map(|s| s.openings.iter())
        .filter(|o| o.is_exterior() && is_kind(o.kind))
        .collect();

    let mut weighted = 0.0;
    for opening in &openings {
        match opening.visible_transmittance {
            Some(vt) => weighted += factor * opening.area() * vt,
            None => diagnostics.push(
                Severity::Warning,
                Some(&opening.name),
                DiagnosticKind::UnknownVisibleTransmittance,
            ),
        }
    }

    if weighted == 0.0 {
        if !openings.is_empty() {
            diagnostics.error(DiagnosticKind::UnknownVisibleTransmittance);
        }
        return NO_APERTURE;
    }
    if lighted_area <= 0.0 {
        return NO_APERTURE;
    }

    weighted / lighted_area
}
