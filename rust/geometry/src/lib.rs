// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Daylit Geometry
//!
//! Geometry primitives and polygon set operations used by the daylighted-area
//! calculator.
//!
//! - **Primitives**: floor-plane projection, face alignment into a local 2D
//!   frame, rigid rotations about an arbitrary axis ([`plane`], [`transform`])
//! - **Polygons**: planar vertex loops with Newell normals, areas and the
//!   z-flattening used before any boolean operation ([`polygon`])
//! - **Polygon set engine**: union with inner-loop recovery, priority
//!   subtraction and overlap-area measurement backed by
//!   [i_overlay](https://docs.rs/i_overlay) ([`bool2d`])
//!
//! Every polygon handed to [`bool2d`] must already lie on `z = 0`; callers
//! flatten with [`polygon::set_z`] first.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for [`Polygon`] and [`Plane`]

pub mod bool2d;
pub mod error;
pub mod plane;
pub mod polygon;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use bool2d::{
    join_all, overlap_area, subtract, total_area, union, JoinOutcome, Subtraction,
    DEFAULT_TOLERANCE, MIN_POLYGON_AREA,
};
pub use error::{Error, Result};
pub use plane::Plane;
pub use polygon::{count_z_violations, set_z, Polygon};
pub use transform::{align_face, align_face_along, rotation_about_axis, transform_polygon, FaceFrame};
