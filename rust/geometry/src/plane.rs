// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference planes and orthogonal projection onto them.

use crate::error::Result;
use crate::polygon::Polygon;
use nalgebra::{Point3, Unit, Vector3};

/// Infinite plane through `origin` with unit `normal`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    pub origin: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
}

impl Plane {
    /// Plane through a point with the given normal (normalized here)
    pub fn new(origin: Point3<f64>, normal: Vector3<f64>) -> Option<Self> {
        Unit::try_new(normal, 1e-12).map(|normal| Self { origin, normal })
    }

    /// Horizontal plane at height `z`, normal pointing up
    pub fn horizontal(z: f64) -> Self {
        Self {
            origin: Point3::new(0.0, 0.0, z),
            normal: Vector3::z_axis(),
        }
    }

    /// Plane of a polygon; the normal follows the vertex winding
    pub fn from_polygon(polygon: &Polygon) -> Result<Self> {
        let normal = polygon.normal()?;
        Ok(Self {
            origin: polygon.vertices[0],
            normal: Unit::new_unchecked(normal),
        })
    }

    /// Same plane with the normal flipped, if needed, to point toward +z
    pub fn facing_up(self) -> Self {
        if self.normal.z < 0.0 {
            Self {
                origin: self.origin,
                normal: Unit::new_unchecked(-self.normal.into_inner()),
            }
        } else {
            self
        }
    }

    /// Signed distance from the plane along its normal
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Unsigned distance between a point and its projection on the plane
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Orthogonal projection of a point onto the plane
    pub fn project(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.normal.into_inner() * self.signed_distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_project_onto_horizontal_plane() {
        let floor = Plane::horizontal(1.5);
        let p = floor.project(&Point3::new(3.0, -2.0, 4.0));
        assert_relative_eq!(p, Point3::new(3.0, -2.0, 1.5));
        assert_relative_eq!(floor.distance(&Point3::new(0.0, 0.0, 4.0)), 2.5);
        assert_relative_eq!(floor.signed_distance(&Point3::new(0.0, 0.0, 0.5)), -1.0);
    }

    #[test]
    fn test_project_onto_tilted_plane() {
        let plane = Plane::new(Point3::origin(), Vector3::new(1.0, 0.0, 1.0)).unwrap();
        let p = plane.project(&Point3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(p, Point3::origin(), epsilon = 1e-12);
    }

    #[test]
    fn test_from_floor_polygon_facing_up() {
        // Floors are wound clockwise from above, so their outward normal points down
        let floor = Polygon::rectangle(0.0, 0.0, 10.0, 10.0).reversed().with_z(2.0);
        let plane = Plane::from_polygon(&floor).unwrap();
        assert_relative_eq!(plane.normal.z, -1.0);

        let up = plane.facing_up();
        assert_relative_eq!(up.normal.z, 1.0);
        assert_relative_eq!(up.signed_distance(&Point3::new(5.0, 5.0, 5.0)), 3.0);
    }

    #[test]
    fn test_new_rejects_zero_normal() {
        assert!(Plane::new(Point3::origin(), Vector3::zeros()).is_none());
    }
}
