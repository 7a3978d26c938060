// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooms, surfaces and openings.
//!
//! Vertices are in room coordinates, ordered counter-clockwise when viewed
//! from outside the room, so Newell's method yields the outward normal.

use daylit_geometry::Polygon;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::standards::RoomStandards;

/// Kind of sub-surface on an exterior wall or roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpeningKind {
    FixedWindow,
    OperableWindow,
    GlassDoor,
    Skylight,
    /// Opaque door; never daylighting fenestration.
    Door,
}

impl OpeningKind {
    /// Vertical fenestration that produces sidelit footprints.
    pub fn is_window(self) -> bool {
        matches!(
            self,
            OpeningKind::FixedWindow | OpeningKind::OperableWindow | OpeningKind::GlassDoor
        )
    }

    pub fn is_skylight(self) -> bool {
        self == OpeningKind::Skylight
    }

    /// Counts toward the room's exterior fenestration area.
    pub fn is_fenestration(self) -> bool {
        self.is_window() || self.is_skylight()
    }

    /// Eligible to anchor a daylighting sensor. Glass doors light the floor
    /// but are not used for siting sensors.
    pub fn is_sensor_anchor(self) -> bool {
        matches!(
            self,
            OpeningKind::FixedWindow | OpeningKind::OperableWindow | OpeningKind::Skylight
        )
    }
}

/// What lies on the other side of a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundaryCondition {
    #[default]
    Outdoors,
    Ground,
    Adiabatic,
    /// Interior partition adjacent to another room.
    Surface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SurfaceKind {
    Wall,
    RoofCeiling,
    Floor,
}

/// A window, glass door, door or skylight owned by an exterior surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Opening {
    pub name: String,
    pub kind: OpeningKind,
    pub boundary: BoundaryCondition,
    pub vertices: Vec<Point3<f64>>,
    /// Net glazed area; the gross polygon area is used when absent.
    pub net_area: Option<f64>,
    /// Glass visible transmittance from the opening's construction.
    pub visible_transmittance: Option<f64>,
}

impl Opening {
    /// Exterior opening with the given vertices.
    pub fn new(name: impl Into<String>, kind: OpeningKind, vertices: Vec<Point3<f64>>) -> Self {
        Self {
            name: name.into(),
            kind,
            boundary: BoundaryCondition::Outdoors,
            vertices,
            net_area: None,
            visible_transmittance: None,
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_net_area(mut self, area_m2: f64) -> Self {
        self.net_area = Some(area_m2);
        self
    }

    pub fn with_visible_transmittance(mut self, vt: f64) -> Self {
        self.visible_transmittance = Some(vt);
        self
    }

    pub fn polygon(&self) -> Polygon {
        Polygon::new(self.vertices.clone())
    }

    pub fn is_exterior(&self) -> bool {
        self.boundary == BoundaryCondition::Outdoors
    }

    /// Net area in m², falling back to the polygon area.
    pub fn area(&self) -> f64 {
        self.net_area.unwrap_or_else(|| self.polygon().area())
    }

    pub fn outward_normal(&self) -> Result<Vector3<f64>> {
        self.polygon()
            .normal()
            .map_err(|_| Error::DegenerateSurface(self.name.clone()))
    }

    pub fn centroid(&self) -> Option<Point3<f64>> {
        self.polygon().centroid()
    }
}

/// A wall, roof or floor of a room.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Surface {
    pub name: String,
    pub kind: SurfaceKind,
    pub boundary: BoundaryCondition,
    pub vertices: Vec<Point3<f64>>,
    pub openings: Vec<Opening>,
}

impl Surface {
    /// Exterior surface without openings.
    pub fn new(name: impl Into<String>, kind: SurfaceKind, vertices: Vec<Point3<f64>>) -> Self {
        Self {
            name: name.into(),
            kind,
            boundary: BoundaryCondition::Outdoors,
            vertices,
            openings: Vec::new(),
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.openings.push(opening);
        self
    }

    pub fn polygon(&self) -> Polygon {
        Polygon::new(self.vertices.clone())
    }

    pub fn is_exterior(&self) -> bool {
        self.boundary == BoundaryCondition::Outdoors
    }

    pub fn outward_normal(&self) -> Result<Vector3<f64>> {
        self.polygon()
            .normal()
            .map_err(|_| Error::DegenerateSurface(self.name.clone()))
    }

    pub fn area(&self) -> f64 {
        self.polygon().area()
    }
}

/// The space being evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    pub name: String,
    pub surfaces: Vec<Surface>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surfaces: Vec::new(),
        }
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn floors(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter().filter(|s| s.kind == SurfaceKind::Floor)
    }

    /// Walls and roofs facing outdoors.
    pub fn exterior_surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces
            .iter()
            .filter(|s| s.is_exterior() && s.kind != SurfaceKind::Floor)
    }

    /// Sum of floor surface areas in m².
    pub fn floor_area(&self) -> f64 {
        self.floors().map(Surface::area).sum()
    }

    /// Net area of exterior windows, glass doors and skylights on outdoor
    /// surfaces.
    pub fn fenestration_area(&self) -> f64 {
        self.surfaces
            .iter()
            .filter(|s| s.is_exterior())
            .flat_map(|s| s.openings.iter())
            .filter(|o| o.is_exterior() && o.kind.is_fenestration())
            .map(Opening::area)
            .sum()
    }
}

/// A room together with its standards-lookup inputs.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoomInput {
    pub room: Room,
    pub standards: RoomStandards,
}

impl RoomInput {
    pub fn new(room: Room, standards: RoomStandards) -> Self {
        Self { room, standards }
    }
}
