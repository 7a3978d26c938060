// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint Generator
//!
//! Builds the floor-plane influence zone of every qualifying opening:
//!
//! - **Windows** on vertical exterior walls produce a primary band (floor to
//!   head height) and a secondary band (head height to twice head height),
//!   both widened by the room's extension policy. The bands are built in the
//!   window's own frame, mapped back to the wall and then folded 90 degrees
//!   about the wall's floor line so they lie on the floor.
//! - **Skylights** on horizontal roofs are projected onto the floor and
//!   expanded by `0.7 x ceiling height` on every side.
//!
//! All footprints come out flattened onto `z = 0` and wound counter-clockwise.

use std::f64::consts::FRAC_PI_2;

use daylit_core::{Opening, Room, Surface, SurfaceKind, WidthExtension};
use daylit_geometry::{
    align_face, align_face_along, rotation_about_axis, transform_polygon, Plane, Point3, Polygon,
    Vector3,
};
use serde::Serialize;

use crate::config::DaylightingConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Severity};
use crate::error::{Error, Result};

/// Lighted-area category of a footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FootprintCategory {
    Toplit,
    PrimarySidelit,
    SecondarySidelit,
}

/// One opening's candidate lit area, flattened onto `z = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub category: FootprintCategory,
    pub opening: String,
    pub polygon: Polygon,
}

/// All footprints of a room plus raw opening-area totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootprintSet {
    pub footprints: Vec<Footprint>,
    /// Net area of exterior windows and glass doors (m²)
    pub total_window_area: f64,
    /// Net area of exterior skylights (m²)
    pub total_skylight_area: f64,
}

impl FootprintSet {
    /// Polygons of one category, in generation order
    pub fn polygons(&self, category: FootprintCategory) -> Vec<Polygon> {
        self.footprints
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.polygon.clone())
            .collect()
    }
}

/// Why an opening produced no footprint
#[derive(Debug, Clone, PartialEq)]
pub enum FootprintSkip {
    NonQuad(usize),
    NonRectangular,
    Degenerate(String),
}

impl From<daylit_geometry::Error> for FootprintSkip {
    fn from(e: daylit_geometry::Error) -> Self {
        FootprintSkip::Degenerate(e.to_string())
    }
}

impl From<daylit_core::Error> for FootprintSkip {
    fn from(e: daylit_core::Error) -> Self {
        FootprintSkip::Degenerate(e.to_string())
    }
}

impl FootprintSkip {
    fn into_diagnostic(self) -> DiagnosticKind {
        match self {
            FootprintSkip::NonQuad(vertices) => DiagnosticKind::NonQuadOpening { vertices },
            FootprintSkip::NonRectangular => DiagnosticKind::NonRectangularOpening,
            FootprintSkip::Degenerate(reason) => DiagnosticKind::DegenerateGeometry { reason },
        }
    }
}

/// The room's floor: reference plane for heights plus flattened outlines
#[derive(Debug, Clone, PartialEq)]
pub struct FloorReference {
    /// Plane of the first floor surface, normal pointing up into the room
    pub plane: Plane,
    /// Every floor surface flattened onto `z = 0`
    pub polygons: Vec<Polygon>,
    /// Elevation of the first floor vertex, used to lift results back
    pub elevation: f64,
}

impl FloorReference {
    pub fn from_room(room: &Room) -> Result<Self> {
        let floors: Vec<&Surface> = room.floors().collect();
        let first = floors
            .first()
            .ok_or_else(|| daylit_core::Error::MissingFloor(room.name.clone()))?;

        let outline = first.polygon();
        let plane = Plane::from_polygon(&outline)
            .map_err(|_| Error::Model(daylit_core::Error::DegenerateSurface(first.name.clone())))?
            .facing_up();
        let elevation = outline.vertices[0].z;

        let polygons = floors.iter().map(|f| f.polygon().with_z(0.0)).collect();

        Ok(Self {
            plane,
            polygons,
            elevation,
        })
    }

    /// Height of a point above the floor plane
    pub fn height_of(&self, point: &Point3<f64>) -> f64 {
        self.plane.distance(point)
    }
}

/// Build every footprint in the room
///
/// Window and skylight areas are totalled for every exterior opening of
/// the right kind, including ones whose footprint is skipped.
pub fn generate_footprints(
    room: &Room,
    floor: &FloorReference,
    extension: WidthExtension,
    config: &DaylightingConfig,
    diagnostics: &mut Diagnostics,
) -> FootprintSet {
    let mut set = FootprintSet::default();

    for surface in room.exterior_surfaces() {
        match surface.kind {
            SurfaceKind::Wall => {
                let windows: Vec<&Opening> = surface
                    .openings
                    .iter()
                    .filter(|o| o.is_exterior() && o.kind.is_window())
                    .collect();
                set.total_window_area += windows.iter().map(|o| o.area()).sum::<f64>();

                if surface.openings.is_empty() {
                    continue;
                }
                if !is_vertical(surface, config) {
                    diagnostics.warn(DiagnosticKind::NonVerticalWall {
                        surface: surface.name.clone(),
                    });
                    continue;
                }

                for window in windows {
                    match window_footprints(window, floor, extension, config) {
                        Ok([primary, secondary]) => {
                            set.footprints.push(Footprint {
                                category: FootprintCategory::PrimarySidelit,
                                opening: window.name.clone(),
                                polygon: primary,
                            });
                            set.footprints.push(Footprint {
                                category: FootprintCategory::SecondarySidelit,
                                opening: window.name.clone(),
                                polygon: secondary,
                            });
                        }
                        Err(skip) => diagnostics.push(
                            Severity::Warning,
                            Some(&window.name),
                            skip.into_diagnostic(),
                        ),
                    }
                }
            }
            SurfaceKind::RoofCeiling => {
                let skylights: Vec<&Opening> = surface
                    .openings
                    .iter()
                    .filter(|o| o.is_exterior() && o.kind.is_skylight())
                    .collect();
                set.total_skylight_area += skylights.iter().map(|o| o.area()).sum::<f64>();

                if surface.openings.is_empty() {
                    continue;
                }
                if !is_horizontal(surface, config) {
                    diagnostics.warn(DiagnosticKind::NonHorizontalRoof {
                        surface: surface.name.clone(),
                    });
                    continue;
                }

                for skylight in skylights {
                    match skylight_footprint(skylight, floor, config) {
                        Ok(polygon) => set.footprints.push(Footprint {
                            category: FootprintCategory::Toplit,
                            opening: skylight.name.clone(),
                            polygon,
                        }),
                        Err(skip) => diagnostics.push(
                            Severity::Warning,
                            Some(&skylight.name),
                            skip.into_diagnostic(),
                        ),
                    }
                }
            }
            SurfaceKind::Floor => {}
        }
    }

    tracing::debug!(
        room = %room.name,
        footprints = set.footprints.len(),
        "generated footprints"
    );

    set
}

/// Primary and secondary sidelit footprints of a window
pub fn window_footprints(
    window: &Opening,
    floor: &FloorReference,
    extension: WidthExtension,
    config: &DaylightingConfig,
) -> std::result::Result<[Polygon; 2], FootprintSkip> {
    if window.vertices.len() != 4 {
        return Err(FootprintSkip::NonQuad(window.vertices.len()));
    }

    let (sill, head) = sill_and_head(&window.vertices, floor);

    // Any floor-projected vertex lies on the wall's floor line; follow the
    // end of the longest projected edge
    let projected: Vec<Point3<f64>> = window
        .vertices
        .iter()
        .map(|v| floor.plane.project(v))
        .collect();
    let mut rotation_origin = projected[0];
    let mut longest = 0.0;
    for edge in projected.windows(2) {
        let width = (edge[1] - edge[0]).norm();
        if width > longest {
            longest = width;
            rotation_origin = edge[1];
        }
    }

    let extra = extension.extra_width(head, config.fixed_extension_m);

    let (frame, aligned) = align_face(&window.vertices)?;
    let bounds = rectangle_bounds(&aligned, config.vertex_tolerance_m)?;

    // Local y is height above the window bottom, so -sill is the floor
    let x0 = bounds.min_x - extra;
    let x1 = bounds.max_x + extra;
    let primary_local = Polygon::rectangle(x0, bounds.min_y - sill, x1, bounds.max_y);
    let secondary_local =
        Polygon::rectangle(x0, bounds.min_y - sill + head, x1, bounds.max_y + head);

    // Fold the vertical bands onto the floor about the wall's floor line
    let down = -Vector3::z();
    let outward = window.outward_normal()?;
    let fold = rotation_about_axis(&rotation_origin, &down.cross(&outward), FRAC_PI_2)?;

    let flatten = |local: &Polygon| {
        transform_polygon(&fold, &frame.world_polygon(local))
            .with_z(0.0)
            .ensure_ccw()
    };

    Ok([flatten(&primary_local), flatten(&secondary_local)])
}

/// Toplit footprint of a flush skylight
pub fn skylight_footprint(
    skylight: &Opening,
    floor: &FloorReference,
    config: &DaylightingConfig,
) -> std::result::Result<Polygon, FootprintSkip> {
    if skylight.vertices.len() != 4 {
        return Err(FootprintSkip::NonQuad(skylight.vertices.len()));
    }

    // Flush skylight: its highest vertex is the ceiling
    let (_, ceiling_height) = sill_and_head(&skylight.vertices, floor);
    let on_floor: Vec<Point3<f64>> = skylight
        .vertices
        .iter()
        .map(|v| floor.plane.project(v))
        .collect();

    // Square up with the skylight's own edges, not the world axes
    let (frame, aligned) = align_face_along(&on_floor, &longest_edge(&on_floor))?;
    let bounds = rectangle_bounds(&aligned, config.vertex_tolerance_m)?;

    let extent = config.toplit_extension_factor * ceiling_height;
    let local = Polygon::rectangle(
        bounds.min_x - extent,
        bounds.min_y - extent,
        bounds.max_x + extent,
        bounds.max_y + extent,
    );

    Ok(frame.world_polygon(&local).with_z(0.0).ensure_ccw())
}

/// Direction of the longest edge of a closed loop
fn longest_edge(vertices: &[Point3<f64>]) -> Vector3<f64> {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| b - a)
        .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()))
        .unwrap_or_else(Vector3::x)
}

/// Lowest and highest vertex heights above the floor
fn sill_and_head(vertices: &[Point3<f64>], floor: &FloorReference) -> (f64, f64) {
    vertices
        .iter()
        .map(|v| floor.height_of(v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), h| {
            (lo.min(h), hi.max(h))
        })
}

fn is_vertical(surface: &Surface, config: &DaylightingConfig) -> bool {
    surface
        .outward_normal()
        .map(|n| n.z.abs() < config.vertical_wall_tolerance)
        .unwrap_or(false)
}

fn is_horizontal(surface: &Surface, config: &DaylightingConfig) -> bool {
    surface
        .outward_normal()
        .map(|n| n.z > 0.0 && n.xy().norm() < config.horizontal_roof_tolerance)
        .unwrap_or(false)
}

struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

/// Axis-aligned bounds of an aligned loop that must be a rectangle
fn rectangle_bounds(
    aligned: &[Point3<f64>],
    tolerance: f64,
) -> std::result::Result<Bounds, FootprintSkip> {
    let mut b = Bounds {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };
    for p in aligned {
        b.min_x = b.min_x.min(p.x);
        b.max_x = b.max_x.max(p.x);
        b.min_y = b.min_y.min(p.y);
        b.max_y = b.max_y.max(p.y);
    }

    let on_x_edge = |x: f64| (x - b.min_x).abs() < tolerance || (x - b.max_x).abs() < tolerance;
    let on_y_edge = |y: f64| (y - b.min_y).abs() < tolerance || (y - b.max_y).abs() < tolerance;
    if !aligned.iter().all(|p| on_x_edge(p.x) && on_y_edge(p.y)) {
        return Err(FootprintSkip::NonRectangular);
    }

    if b.max_x - b.min_x < tolerance || b.max_y - b.min_y < tolerance {
        return Err(FootprintSkip::Degenerate("zero-width opening".into()));
    }

    Ok(b)
}
