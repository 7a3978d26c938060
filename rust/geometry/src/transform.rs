// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rigid transforms for footprint construction
//!
//! [`align_face`] maps an arbitrarily oriented planar loop into a local frame
//! where the loop lies on `z = 0`. Width and height math is done there in
//! axis-aligned terms, then mapped back with [`FaceFrame::to_world`].

use crate::error::{Error, Result};
use crate::polygon::Polygon;
use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};

/// Normals with |z| above this are treated as horizontal faces
const HORIZONTAL_FACE_COS: f64 = 0.9;

/// Local coordinate frame of a planar face
///
/// Local axes:
/// - z: the face normal
/// - x: horizontal, `up x normal` (world x for horizontal faces, unless a
///   hint is given)
/// - y: `normal x x`, i.e. straight up for vertical faces
///
/// The local origin sits at the minimum x/y corner of the face, so aligned
/// vertices have non-negative x and y.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceFrame {
    /// Local-to-world matrix
    pub to_world: Matrix4<f64>,
    /// World-to-local matrix
    pub to_local: Matrix4<f64>,
}

impl FaceFrame {
    /// Map a local point to world coordinates
    pub fn world_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.to_world.transform_point(p)
    }

    /// Map a world point to local coordinates
    pub fn local_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.to_local.transform_point(p)
    }

    /// Map a local polygon to world coordinates
    pub fn world_polygon(&self, polygon: &Polygon) -> Polygon {
        Polygon::new(polygon.vertices.iter().map(|p| self.world_point(p)).collect())
    }
}

/// Compute the frame that flattens a planar loop onto local `z = 0`
///
/// Returns the frame together with the aligned (local) vertices.
pub fn align_face(vertices: &[Point3<f64>]) -> Result<(FaceFrame, Vec<Point3<f64>>)> {
    let polygon = Polygon::new(vertices.to_vec());
    let z_axis = polygon.normal()?;

    // Pick a helper direction that is not parallel to the normal
    let x_hint = if z_axis.z.abs() < HORIZONTAL_FACE_COS {
        Vector3::z().cross(&z_axis)
    } else {
        // Horizontal face: keep world x
        Vector3::x()
    };
    frame_from_axes(vertices, z_axis, &x_hint)
}

/// Like [`align_face`], but with local x following `x_hint` projected onto
/// the face
///
/// Used for loops whose edges are not aligned with world axes, e.g. a
/// skylight in a rotated building.
pub fn align_face_along(
    vertices: &[Point3<f64>],
    x_hint: &Vector3<f64>,
) -> Result<(FaceFrame, Vec<Point3<f64>>)> {
    let z_axis = Polygon::new(vertices.to_vec()).normal()?;
    frame_from_axes(vertices, z_axis, x_hint)
}

fn frame_from_axes(
    vertices: &[Point3<f64>],
    z_axis: Vector3<f64>,
    x_hint: &Vector3<f64>,
) -> Result<(FaceFrame, Vec<Point3<f64>>)> {
    // Orthogonalize the hint against the normal
    let x_axis = (x_hint - z_axis * x_hint.dot(&z_axis))
        .try_normalize(1e-12)
        .ok_or(Error::DegenerateAxis)?;
    let y_axis = z_axis.cross(&x_axis).normalize();

    // Rotation-only frame, columns are the local axes in world space
    let mut rotation = Matrix4::identity();
    for (col, axis) in [x_axis, y_axis, z_axis].iter().enumerate() {
        rotation[(0, col)] = axis.x;
        rotation[(1, col)] = axis.y;
        rotation[(2, col)] = axis.z;
    }
    let rotation_inv = rotation.transpose();

    // Shift the origin to the aligned minimum corner
    let rotated: Vec<Point3<f64>> = vertices
        .iter()
        .map(|p| rotation_inv.transform_point(p))
        .collect();
    let min_x = rotated.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = rotated.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let plane_z = rotated[0].z;
    let offset = Vector3::new(min_x, min_y, plane_z);

    let to_world = rotation * Matrix4::new_translation(&offset);
    let to_local = to_world.try_inverse().ok_or(Error::SingularTransform)?;

    let aligned = rotated
        .iter()
        .map(|p| Point3::new(p.x - min_x, p.y - min_y, p.z - plane_z))
        .collect();

    Ok((FaceFrame { to_world, to_local }, aligned))
}

/// Rotation by `angle` radians about the line through `origin` along `axis`
pub fn rotation_about_axis(
    origin: &Point3<f64>,
    axis: &Vector3<f64>,
    angle: f64,
) -> Result<Matrix4<f64>> {
    let unit_axis = Unit::try_new(*axis, 1e-15).ok_or(Error::DegenerateAxis)?;
    let rotation = Rotation3::from_axis_angle(&unit_axis, angle).to_homogeneous();

    Ok(Matrix4::new_translation(&origin.coords)
        * rotation
        * Matrix4::new_translation(&(-origin.coords)))
}

/// Apply a 4x4 transform to every vertex of a polygon
pub fn transform_polygon(matrix: &Matrix4<f64>, polygon: &Polygon) -> Polygon {
    Polygon::new(
        polygon
            .vertices
            .iter()
            .map(|p| matrix.transform_point(p))
            .collect(),
    )
}
