// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade orientation used to rank sensor anchor openings.

use daylit_geometry::Vector3;
use serde::Serialize;

/// Orientation bucket of an opening, in sensor-siting priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Facade {
    /// Horizontal roof
    Up,
    South,
    West,
    East,
    North,
}

impl Facade {
    /// Bucket for an azimuth in degrees clockwise from north
    pub fn from_azimuth(azimuth_deg: f64) -> Self {
        let azimuth = azimuth_deg.rem_euclid(360.0);
        if (45.0..135.0).contains(&azimuth) {
            Facade::East
        } else if (135.0..225.0).contains(&azimuth) {
            Facade::South
        } else if (225.0..315.0).contains(&azimuth) {
            Facade::West
        } else {
            Facade::North
        }
    }

    /// Bucket for an outward normal in building coordinates
    ///
    /// `north_axis_deg` is the building's clockwise rotation from true north.
    /// Normals within `horizontal_tolerance` of straight up are [`Facade::Up`].
    pub fn from_normal(
        normal: &Vector3<f64>,
        north_axis_deg: f64,
        horizontal_tolerance: f64,
    ) -> Self {
        if normal.z > 0.0 && normal.xy().norm() < horizontal_tolerance {
            return Facade::Up;
        }
        Facade::from_azimuth(azimuth_deg(normal, north_axis_deg))
    }
}

/// Azimuth of a normal's horizontal component, clockwise from true north
pub fn azimuth_deg(normal: &Vector3<f64>, north_axis_deg: f64) -> f64 {
    let building = normal.x.atan2(normal.y).to_degrees();
    (building + north_axis_deg).rem_euclid(360.0)
}
