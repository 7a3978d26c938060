// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygons
//!
//! A [`Polygon`] is an ordered loop of 3D vertices lying in a single plane.
//! Footprints are built in 3D and then flattened with [`set_z`] before they
//! enter the polygon set engine, which only looks at `x` and `y`.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// Normals shorter than this are treated as degenerate
const NORMAL_EPSILON: f64 = 1e-12;

/// Ordered, planar vertex loop
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Point3<f64>>,
}

impl Polygon {
    /// Create a polygon from 3D vertices
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        Self { vertices }
    }

    /// Create a polygon on `z = 0` from 2D points
    pub fn from_xy(points: &[Point2<f64>]) -> Self {
        Self {
            vertices: points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect(),
        }
    }

    /// Axis-aligned rectangle on `z = 0`, counter-clockwise from `(x0, y0)`
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(vec![
            Point3::new(x0, y0, 0.0),
            Point3::new(x1, y0, 0.0),
            Point3::new(x1, y1, 0.0),
            Point3::new(x0, y1, 0.0),
        ])
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unnormalized Newell normal; its length is twice the polygon area
    fn newell(&self) -> Vector3<f64> {
        let mut normal = Vector3::zeros();
        let n = self.vertices.len();

        for i in 0..n {
            let curr = &self.vertices[i];
            let next = &self.vertices[(i + 1) % n];

            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }

        normal
    }

    /// Unit normal by Newell's method
    ///
    /// Follows the right-hand rule relative to the vertex winding, so a loop
    /// that is counter-clockwise when viewed from outside yields the outward
    /// normal.
    pub fn normal(&self) -> Result<Vector3<f64>> {
        if self.vertices.len() < 3 {
            return Err(Error::DegenerateNormal);
        }
        let normal = self.newell();
        let len = normal.norm();
        if len < NORMAL_EPSILON {
            return Err(Error::DegenerateNormal);
        }
        Ok(normal / len)
    }

    /// Area in the polygon's own plane
    pub fn area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        self.newell().norm() * 0.5
    }

    /// Signed area of the xy projection
    /// Positive = counter-clockwise, Negative = clockwise
    pub fn signed_area_xy(&self) -> f64 {
        signed_area(self.vertices.iter().map(|p| [p.x, p.y]))
    }

    /// Area-weighted centroid
    ///
    /// Falls back to the vertex average for degenerate loops.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        let first = *self.vertices.first()?;
        let mut weighted = Vector3::zeros();
        let mut total = 0.0;

        if let Ok(normal) = self.normal() {
            // Signed triangle fan around the first vertex, so concave loops
            // still weight correctly
            for pair in self.vertices[1..].windows(2) {
                let (b, c) = (pair[0], pair[1]);
                let area = (b - first).cross(&(c - first)).dot(&normal) * 0.5;
                let center = (first.coords + b.coords + c.coords) / 3.0;
                weighted += center * area;
                total += area;
            }
        }

        if total > NORMAL_EPSILON {
            Some(Point3::from(weighted / total))
        } else {
            let sum = self
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, p| acc + p.coords);
            Some(Point3::from(sum / self.vertices.len() as f64))
        }
    }

    /// Copy with every vertex's z forced to `z`
    pub fn with_z(&self, z: f64) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|p| Point3::new(p.x, p.y, z))
                .collect(),
        }
    }

    /// Copy with the vertex order reversed
    pub fn reversed(&self) -> Self {
        Self {
            vertices: self.vertices.iter().rev().cloned().collect(),
        }
    }

    /// Ensure counter-clockwise winding in the xy plane (positive area)
    pub fn ensure_ccw(self) -> Self {
        if self.signed_area_xy() < 0.0 {
            self.reversed()
        } else {
            self
        }
    }

    /// Number of vertices whose z is not exactly zero
    pub fn z_violations(&self) -> usize {
        self.vertices.iter().filter(|p| p.z != 0.0).count()
    }

    /// xy bounding box as `(min, max)`
    pub fn bounds_xy(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = self.vertices.first()?;
        let mut min = Point2::new(first.x, first.y);
        let mut max = min;

        for p in self.vertices.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some((min, max))
    }
}

/// Flatten every polygon onto the plane `z = new_z`
pub fn set_z(polygons: &[Polygon], new_z: f64) -> Vec<Polygon> {
    polygons.iter().map(|p| p.with_z(new_z)).collect()
}

/// Count vertices across a polygon set whose z is not exactly zero
pub fn count_z_violations(polygons: &[Polygon]) -> usize {
    polygons.iter().map(Polygon::z_violations).sum()
}

/// Shoelace signed area over a closed loop of xy pairs
pub(crate) fn signed_area<I>(points: I) -> f64
where
    I: IntoIterator<Item = [f64; 2]>,
    I::IntoIter: Clone,
{
    let iter = points.into_iter();
    let mut next = iter.clone().cycle().skip(1);
    let mut area = 0.0;

    for p in iter {
        if let Some(q) = next.next() {
            area += p[0] * q[1] - q[0] * p[1];
        }
    }

    area * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::rectangle(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn test_signed_area_ccw_and_cw() {
        let ccw = unit_square();
        assert_relative_eq!(ccw.signed_area_xy(), 1.0);
        assert_relative_eq!(ccw.reversed().signed_area_xy(), -1.0);
    }

    #[test]
    fn test_normal_follows_winding() {
        let n = unit_square().normal().unwrap();
        assert_relative_eq!(n.z, 1.0);
        let n = unit_square().reversed().normal().unwrap();
        assert_relative_eq!(n.z, -1.0);
    }

    #[test]
    fn test_normal_degenerate() {
        let line = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(line.normal(), Err(Error::DegenerateNormal));
        assert_eq!(Polygon::new(Vec::new()).area(), 0.0);
    }

    #[test]
    fn test_area_of_vertical_rectangle() {
        // 2m wide x 1.5m tall window in the y = 0 plane
        let window = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.9),
            Point3::new(2.0, 0.0, 0.9),
            Point3::new(2.0, 0.0, 2.4),
            Point3::new(0.0, 0.0, 2.4),
        ]);
        assert_relative_eq!(window.area(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(window.signed_area_xy(), 0.0);
    }

    #[test]
    fn test_centroid() {
        let c = Polygon::rectangle(2.0, 4.0, 6.0, 8.0).centroid().unwrap();
        assert_relative_eq!(c.x, 4.0);
        assert_relative_eq!(c.y, 6.0);

        // L-shape: centroid is pulled toward the heavier arm
        let l = Polygon::from_xy(&[
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ]);
        let c = l.centroid().unwrap();
        assert_relative_eq!(c.x, 5.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 5.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_set_z_and_violations() {
        let raised = unit_square().with_z(3.2);
        assert_eq!(raised.z_violations(), 4);

        let flattened = set_z(&[raised.clone(), raised], 0.0);
        assert_eq!(count_z_violations(&flattened), 0);
    }

    #[test]
    fn test_ensure_ccw() {
        let cw = unit_square().reversed();
        assert!(cw.ensure_ccw().signed_area_xy() > 0.0);
    }

    #[test]
    fn test_bounds_xy() {
        let (min, max) = Polygon::rectangle(-1.0, 2.0, 3.0, 5.0).bounds_xy().unwrap();
        assert_eq!(min, Point2::new(-1.0, 2.0));
        assert_eq!(max, Point2::new(3.0, 5.0));
        assert!(Polygon::new(Vec::new()).bounds_xy().is_none());
    }
}
