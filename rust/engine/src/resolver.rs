// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Area Resolver
//!
//! Per room: build footprints, union each category, resolve priority
//! (toplighting beats primary sidelighting beats secondary sidelighting)
//! and measure what is left against the floor outline.

use daylit_core::{Room, WidthExtension};
use daylit_geometry::{
    count_z_violations, overlap_area, set_z, subtract, total_area, union, JoinOutcome, Plane,
    Polygon,
};
use serde::Serialize;

use crate::config::DaylightingConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics, PolygonSet};
use crate::footprint::{generate_footprints, FloorReference, FootprintCategory};

/// Lighted-area totals for one room, all in m²
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AreaResult {
    pub toplighted_area: f64,
    pub primary_sidelighted_area: f64,
    pub secondary_sidelighted_area: f64,
    pub total_window_area: f64,
    pub total_skylight_area: f64,
}

impl AreaResult {
    /// Sum of the three lighted categories
    pub fn daylighted_area(&self) -> f64 {
        self.toplighted_area + self.primary_sidelighted_area + self.secondary_sidelighted_area
    }
}

/// Final per-category regions, at the floor's elevation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedRegions {
    pub floor: Vec<Polygon>,
    pub toplit: Vec<Polygon>,
    pub primary: Vec<Polygon>,
    pub secondary: Vec<Polygon>,
}

/// Everything the resolver learned about a room
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaResolution {
    pub areas: AreaResult,
    /// Area of the joined floor outline (m²)
    pub floor_area: f64,
    /// Floor plane facing up, `None` when the room has no usable floor
    pub floor_plane: Option<Plane>,
    pub regions: ResolvedRegions,
}

/// Resolve a room's daylighted areas
pub fn resolve_areas(
    room: &Room,
    extension: WidthExtension,
    config: &DaylightingConfig,
) -> (AreaResolution, Diagnostics) {
    let mut diagnostics = Diagnostics::new(room.name.as_str());
    let resolution = resolve_into(room, extension, config, &mut diagnostics);
    (resolution, diagnostics)
}

pub(crate) fn resolve_into(
    room: &Room,
    extension: WidthExtension,
    config: &DaylightingConfig,
    diagnostics: &mut Diagnostics,
) -> AreaResolution {
    let floor = match FloorReference::from_room(room) {
        Ok(floor) => floor,
        Err(e) => {
            tracing::error!(room = %room.name, error = %e, "cannot resolve daylighted areas");
            diagnostics.error(DiagnosticKind::MissingFloor);
            return AreaResolution::default();
        }
    };

    let footprints = generate_footprints(room, &floor, extension, config, diagnostics);

    // Everything entering the set engine sits on z = 0
    let floor_polygons = set_z(&floor.polygons, 0.0);
    let toplit = set_z(&footprints.polygons(FootprintCategory::Toplit), 0.0);
    let primary = set_z(&footprints.polygons(FootprintCategory::PrimarySidelit), 0.0);
    let secondary = set_z(&footprints.polygons(FootprintCategory::SecondarySidelit), 0.0);

    if config.check_z {
        check_z(PolygonSet::Floor, &floor_polygons, diagnostics);
        check_z(PolygonSet::Toplit, &toplit, diagnostics);
        check_z(PolygonSet::PrimarySidelit, &primary, diagnostics);
        check_z(PolygonSet::SecondarySidelit, &secondary, diagnostics);
    }

    let min_area = config.min_polygon_area_m2;
    let floor_polygons = join(PolygonSet::Floor, &floor_polygons, min_area, diagnostics);
    let toplit = join(PolygonSet::Toplit, &toplit, min_area, diagnostics);
    let primary = join(PolygonSet::PrimarySidelit, &primary, min_area, diagnostics);
    let secondary = join(PolygonSet::SecondarySidelit, &secondary, min_area, diagnostics);

    if config.check_z {
        check_z(PolygonSet::Floor, &floor_polygons, diagnostics);
        check_z(PolygonSet::Toplit, &toplit, diagnostics);
        check_z(PolygonSet::PrimarySidelit, &primary, diagnostics);
        check_z(PolygonSet::SecondarySidelit, &secondary, diagnostics);
    }

    // Toplighting wins over sidelighting, primary wins over secondary
    let primary =
        subtract_logged(PolygonSet::PrimarySidelit, &primary, &toplit, min_area, diagnostics);
    let secondary =
        subtract_logged(PolygonSet::SecondarySidelit, &secondary, &toplit, min_area, diagnostics);
    let secondary =
        subtract_logged(PolygonSet::SecondarySidelit, &secondary, &primary, min_area, diagnostics);

    let tolerance = config.vertex_tolerance_m;
    let areas = AreaResult {
        toplighted_area: overlap_area(&toplit, &floor_polygons, tolerance),
        primary_sidelighted_area: overlap_area(&primary, &floor_polygons, tolerance),
        secondary_sidelighted_area: overlap_area(&secondary, &floor_polygons, tolerance),
        total_window_area: footprints.total_window_area,
        total_skylight_area: footprints.total_skylight_area,
    };
    let floor_area = total_area(&floor_polygons);

    diagnostics.info(DiagnosticKind::AreaComputed {
        toplit: areas.toplighted_area,
        primary: areas.primary_sidelighted_area,
        secondary: areas.secondary_sidelighted_area,
    });

    AreaResolution {
        areas,
        floor_area,
        floor_plane: Some(floor.plane),
        regions: ResolvedRegions {
            floor: set_z(&floor_polygons, floor.elevation),
            toplit: set_z(&toplit, floor.elevation),
            primary: set_z(&primary, floor.elevation),
            secondary: set_z(&secondary, floor.elevation),
        },
    }
}

fn check_z(set: PolygonSet, polygons: &[Polygon], diagnostics: &mut Diagnostics) {
    let count = count_z_violations(polygons);
    if count > 0 {
        diagnostics.warn(DiagnosticKind::ZCoordinateViolation { set, count });
    }
}

fn join(
    set: PolygonSet,
    polygons: &[Polygon],
    min_area: f64,
    diagnostics: &mut Diagnostics,
) -> Vec<Polygon> {
    match union(polygons, min_area) {
        JoinOutcome::Joined(joined) => {
            tracing::debug!(
                room = diagnostics.room(),
                %set,
                input = polygons.len(),
                output = joined.len(),
                "joined polygons"
            );
            joined
        }
        JoinOutcome::Recovered(joined) => {
            diagnostics.warn(DiagnosticKind::JoinInnerLoopRecovered { set });
            joined
        }
        JoinOutcome::Unjoined(inputs) => {
            diagnostics.warn(DiagnosticKind::JoinRecoveryFailed { set });
            inputs
        }
    }
}

fn subtract_logged(
    set: PolygonSet,
    a: &[Polygon],
    b: &[Polygon],
    min_area: f64,
    diagnostics: &mut Diagnostics,
) -> Vec<Polygon> {
    let result = subtract(a, b, min_area);
    if result.dropped > 0 {
        diagnostics.debug(DiagnosticKind::DegeneratePolygonsDropped {
            set,
            count: result.dropped,
        });
    }
    result.polygons
}
