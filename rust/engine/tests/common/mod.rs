// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box-room builders shared by the integration tests.

#![allow(dead_code)]

use daylit_core::{BoundaryCondition, Opening, OpeningKind, Room, Surface, SurfaceKind};
use daylit_geometry::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    South,
    East,
    North,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::South, Side::East, Side::North, Side::West];

    pub fn wall_name(self) -> &'static str {
        match self {
            Side::South => "South Wall",
            Side::East => "East Wall",
            Side::North => "North Wall",
            Side::West => "West Wall",
        }
    }

    /// Wall start and end on the floor, ordered so the outward normal
    /// points away from the room
    fn run(self, width: f64, depth: f64) -> ((f64, f64), (f64, f64)) {
        match self {
            Side::South => ((0.0, 0.0), (width, 0.0)),
            Side::East => ((width, 0.0), (width, depth)),
            Side::North => ((width, depth), (0.0, depth)),
            Side::West => ((0.0, depth), (0.0, 0.0)),
        }
    }
}

/// Room dimensions in meters; the floor sits at `elevation`
#[derive(Debug, Clone, Copy)]
pub struct BoxRoom {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub elevation: f64,
}

impl BoxRoom {
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
            elevation: 0.0,
        }
    }

    /// Rectangle on a wall, `along` measured from the wall's start and
    /// `sill`/`head` from the floor
    pub fn wall_rect(self, side: Side, along: (f64, f64), sill: f64, head: f64) -> Vec<Point3<f64>> {
        let ((x0, y0), (x1, y1)) = side.run(self.width, self.depth);
        let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        let (ux, uy) = ((x1 - x0) / len, (y1 - y0) / len);
        let at = |a: f64, z: f64| Point3::new(x0 + ux * a, y0 + uy * a, self.elevation + z);

        vec![
            at(along.0, head),
            at(along.0, sill),
            at(along.1, sill),
            at(along.1, head),
        ]
    }

    pub fn wall(self, side: Side) -> Surface {
        let length = match side {
            Side::South | Side::North => self.width,
            Side::East | Side::West => self.depth,
        };
        Surface::new(
            side.wall_name(),
            SurfaceKind::Wall,
            self.wall_rect(side, (0.0, length), 0.0, self.height),
        )
    }

    pub fn floor(self) -> Surface {
        let z = self.elevation;
        Surface::new(
            "Floor",
            SurfaceKind::Floor,
            vec![
                Point3::new(0.0, 0.0, z),
                Point3::new(0.0, self.depth, z),
                Point3::new(self.width, self.depth, z),
                Point3::new(self.width, 0.0, z),
            ],
        )
        .with_boundary(BoundaryCondition::Ground)
    }

    pub fn roof(self) -> Surface {
        Surface::new(
            "Roof",
            SurfaceKind::RoofCeiling,
            self.roof_rect((0.0, 0.0), (self.width, self.depth)),
        )
    }

    /// Counter-clockwise rectangle at ceiling height
    pub fn roof_rect(self, min: (f64, f64), max: (f64, f64)) -> Vec<Point3<f64>> {
        let z = self.elevation + self.height;
        vec![
            Point3::new(min.0, min.1, z),
            Point3::new(max.0, min.1, z),
            Point3::new(max.0, max.1, z),
            Point3::new(min.0, max.1, z),
        ]
    }

    /// Floor, four exterior walls and an exterior roof, no openings
    pub fn room(self, name: &str) -> Room {
        let mut room = Room::new(name).with_surface(self.floor());
        for side in Side::ALL {
            room = room.with_surface(self.wall(side));
        }
        room.with_surface(self.roof())
    }

    pub fn window(
        self,
        name: &str,
        side: Side,
        along: (f64, f64),
        sill: f64,
        head: f64,
    ) -> Opening {
        Opening::new(
            name,
            OpeningKind::FixedWindow,
            self.wall_rect(side, along, sill, head),
        )
        .with_visible_transmittance(0.6)
    }

    pub fn skylight(self, name: &str, min: (f64, f64), max: (f64, f64)) -> Opening {
        Opening::new(name, OpeningKind::Skylight, self.roof_rect(min, max))
            .with_visible_transmittance(0.5)
    }
}

/// Attach an opening to the named surface
pub fn add_opening(room: &mut Room, surface: &str, opening: Opening) {
    if let Some(s) = room.surfaces.iter_mut().find(|s| s.name == surface) {
        s.openings.push(opening);
    }
}

/// 10 m x 10 m x 3 m room with one 2 m x 1.5 m south window, sill 0.9 m
/// and head 2.4 m, centered on the wall
pub fn single_window_room() -> Room {
    let dims = BoxRoom::new(10.0, 10.0, 3.0);
    let mut room = dims.room("Office");
    add_opening(
        &mut room,
        Side::South.wall_name(),
        dims.window("South Window", Side::South, (4.0, 6.0), 0.9, 2.4),
    );
    room
}

/// 10 m x 10 m room with every wall fully glazed
pub fn fully_glazed_room() -> Room {
    let dims = BoxRoom::new(10.0, 10.0, 3.0);
    let mut room = dims.room("Atrium");
    for side in Side::ALL {
        add_opening(
            &mut room,
            side.wall_name(),
            dims.window(
                &format!("{} Glazing", side.wall_name()),
                side,
                (0.0, 10.0),
                0.0,
                3.0,
            ),
        );
    }
    room
}

/// 10 m x 10 m x 3 m room with a centered 1 m x 1 m skylight
pub fn skylight_room() -> Room {
    let dims = BoxRoom::new(10.0, 10.0, 3.0);
    let mut room = dims.room("Warehouse");
    add_opening(
        &mut room,
        "Roof",
        dims.skylight("Skylight", (4.5, 4.5), (5.5, 5.5)),
    );
    room
}

/// Turn every surface and opening of a room about the world z axis
pub fn rotate_about_z(mut room: Room, degrees: f64) -> Room {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let turn = |p: &mut Point3<f64>| {
        let (x, y) = (p.x, p.y);
        p.x = x * cos - y * sin;
        p.y = x * sin + y * cos;
    };

    for surface in &mut room.surfaces {
        surface.vertices.iter_mut().for_each(turn);
        for opening in &mut surface.openings {
            opening.vertices.iter_mut().for_each(turn);
        }
    }
    room
}
