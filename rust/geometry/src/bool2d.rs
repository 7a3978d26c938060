// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon Set Engine
//!
//! Union ("join"), subtraction and overlap-area measurement over sets of
//! hole-free polygons, using the i_overlay crate for the boolean kernel.
//!
//! Results are always expressed as simple polygons without holes. A union
//! whose result contains an interior hole (the classic case being windows on
//! all four walls of a room, which light a donut-shaped region) is reported
//! as an inner loop and handled by [`union`]'s hold-out retry. Subtractions
//! that would leave a hole are cut into hole-free pieces instead.
//!
//! All inputs must already be flattened onto `z = 0`; only x and y are read.

use crate::error::{Error, Result};
use crate::polygon::{signed_area, Polygon};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use rustc_hash::FxHashSet;

/// Polygons smaller than this (0.5 ft^2) are computational noise
pub const MIN_POLYGON_AREA: f64 = 0.0465;

/// Vertex-distance tolerance for containment and intersection tests (1 cm)
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Holes smaller than this are rounding slivers, not inner loops
const HOLE_AREA_EPSILON: f64 = 1e-6;

/// Recursion limit when cutting holes out of a subtraction result
const MAX_SPLIT_DEPTH: usize = 32;

type Path = Vec<[f64; 2]>;
type Shape = Vec<Path>;

/// Result of [`union`]
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// All polygons merged without trouble
    Joined(Vec<Polygon>),
    /// The union had an inner loop; recovered by holding out the first
    /// polygon, joining the rest, and adding back the held-out remainder
    Recovered(Vec<Polygon>),
    /// The retry also hit an inner loop; the inputs are returned un-merged,
    /// so any overlap between them is counted twice downstream
    Unjoined(Vec<Polygon>),
}

impl JoinOutcome {
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            JoinOutcome::Joined(p) | JoinOutcome::Recovered(p) | JoinOutcome::Unjoined(p) => p,
        }
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        match self {
            JoinOutcome::Joined(p) | JoinOutcome::Recovered(p) | JoinOutcome::Unjoined(p) => p,
        }
    }
}

/// Result of [`subtract`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subtraction {
    pub polygons: Vec<Polygon>,
    /// Remnants dropped for being smaller than the minimum area
    pub dropped: usize,
}

/// Merge a same-category polygon set into disjoint polygons
///
/// Fails with [`Error::InnerLoop`] when the merged region has an interior
/// hole, which a hole-free polygon cannot represent.
pub fn join_all(polygons: &[Polygon], min_area: f64) -> Result<Vec<Polygon>> {
    let valid: Vec<&Polygon> = polygons.iter().filter(|p| p.len() >= 3).collect();

    match valid.as_slice() {
        [] => return Ok(Vec::new()),
        [single] => return Ok(vec![(*single).clone().ensure_ccw()]),
        _ => {}
    }

    // Start with first contour as subject, the rest as clip
    let subject: Shape = vec![polygon_to_path(valid[0])];
    let clip: Shape = valid[1..].iter().map(|p| polygon_to_path(p)).collect();

    let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);

    let inner_loops: usize = shapes.iter().map(|s| significant_holes(s).count()).sum();
    if inner_loops > 0 {
        return Err(Error::InnerLoop(inner_loops));
    }

    Ok(shapes
        .iter()
        .filter_map(|s| s.first())
        .map(|outer| path_to_polygon(outer))
        .filter(|p| p.area() >= min_area)
        .collect())
}

/// Union with inner-loop recovery
///
/// On an inner loop, the first polygon is held out, the remainder is joined,
/// and `held_out - joined_remainder` is added back. This resolves the common
/// four-wall donut; it is not a general fix for arbitrary inner-loop
/// topologies. If the retry fails too, the inputs come back un-merged.
pub fn union(polygons: &[Polygon], min_area: f64) -> JoinOutcome {
    let loops = match join_all(polygons, min_area) {
        Ok(joined) => return JoinOutcome::Joined(joined),
        Err(Error::InnerLoop(n)) => n,
        Err(_) => 0,
    };

    tracing::debug!(
        inner_loops = loops,
        polygons = polygons.len(),
        "union has inner loops, retrying with the first polygon held out"
    );

    let Some((held_out, rest)) = polygons.split_first() else {
        return JoinOutcome::Unjoined(Vec::new());
    };

    match join_all(rest, min_area) {
        Ok(mut partial) => {
            let remainder = subtract(std::slice::from_ref(held_out), &partial, min_area);
            partial.extend(remainder.polygons);
            JoinOutcome::Recovered(partial)
        }
        Err(_) => {
            tracing::debug!("hold-out retry also has inner loops, leaving polygons un-merged");
            JoinOutcome::Unjoined(polygons.to_vec())
        }
    }
}

/// For every polygon in `a`, subtract all polygons in `b`
///
/// An empty `b` passes `a` through unchanged. Remnants smaller than
/// `min_area` are dropped and counted; exact duplicates are removed.
pub fn subtract(a: &[Polygon], b: &[Polygon], min_area: f64) -> Subtraction {
    let clip: Shape = b
        .iter()
        .filter(|p| p.len() >= 3)
        .map(polygon_to_path)
        .collect();

    if a.is_empty() || clip.is_empty() {
        return Subtraction {
            polygons: a.to_vec(),
            dropped: 0,
        };
    }

    let mut seen: FxHashSet<Vec<(u64, u64)>> = FxHashSet::default();
    let mut result = Subtraction::default();

    for polygon in a {
        if polygon.len() < 3 {
            result.dropped += 1;
            continue;
        }

        let subject: Shape = vec![polygon_to_path(polygon)];
        let shapes = subject.overlay(&clip, OverlayRule::Difference, FillRule::NonZero);

        for shape in shapes {
            for piece in split_holes(shape, 0) {
                if piece.area() < min_area {
                    result.dropped += 1;
                    continue;
                }
                if seen.insert(polygon_key(&piece)) {
                    result.polygons.push(piece);
                }
            }
        }
    }

    result
}

/// Area of `a` that overlaps `b`, summed over every `(a, b)` pair
///
/// Assumes polygons within each set do not overlap one another. A polygon
/// wholly within another contributes its full area; a partial overlap
/// contributes `area(b) - area(b - a)`.
pub fn overlap_area(a: &[Polygon], b: &[Polygon], tolerance: f64) -> f64 {
    let mut overlap = 0.0;

    for b_polygon in b.iter().filter(|p| p.len() >= 3) {
        let b_shape: Shape = vec![polygon_to_path(b_polygon)];

        for a_polygon in a.iter().filter(|p| p.len() >= 3) {
            if within(a_polygon, b_polygon, tolerance) {
                overlap += a_polygon.area();
            } else if intersects(a_polygon, b_polygon, tolerance) {
                let area_initial = b_polygon.area();
                let remaining = b_shape.overlay(
                    &vec![polygon_to_path(a_polygon)],
                    OverlayRule::Difference,
                    FillRule::NonZero,
                );
                overlap += area_initial - area_of_shapes(&remaining);
            }
        }
    }

    overlap
}

/// True when `a` lies entirely inside `b`, up to `tolerance`
pub fn within(a: &Polygon, b: &Polygon, tolerance: f64) -> bool {
    let outside = vec![polygon_to_path(a)].overlay(
        &vec![polygon_to_path(b)],
        OverlayRule::Difference,
        FillRule::NonZero,
    );
    area_of_shapes(&outside) <= tolerance * tolerance
}

/// True when `a` and `b` share more than a sliver of area
pub fn intersects(a: &Polygon, b: &Polygon, tolerance: f64) -> bool {
    let common = vec![polygon_to_path(a)].overlay(
        &vec![polygon_to_path(b)],
        OverlayRule::Intersect,
        FillRule::NonZero,
    );
    area_of_shapes(&common) > tolerance * tolerance
}

/// Sum of polygon areas
pub fn total_area(polygons: &[Polygon]) -> f64 {
    polygons.iter().map(Polygon::area).sum()
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert a polygon to a counter-clockwise i_overlay path
fn polygon_to_path(polygon: &Polygon) -> Path {
    let mut path: Path = polygon.vertices.iter().map(|p| [p.x, p.y]).collect();
    if signed_area(path.iter().copied()) < 0.0 {
        path.reverse();
    }
    path
}

/// Convert an i_overlay path back to a counter-clockwise polygon on z = 0
fn path_to_polygon(path: &Path) -> Polygon {
    let points = path
        .iter()
        .map(|p| nalgebra::Point3::new(p[0], p[1], 0.0))
        .collect();
    Polygon::new(points).ensure_ccw()
}

fn path_area(path: &Path) -> f64 {
    signed_area(path.iter().copied()).abs()
}

/// Holes of an i_overlay shape that are larger than rounding noise
///
/// The first contour of a shape is its outer boundary, the rest are holes.
fn significant_holes(shape: &Shape) -> impl Iterator<Item = &Path> {
    shape
        .iter()
        .skip(1)
        .filter(|hole| path_area(hole) > HOLE_AREA_EPSILON)
}

/// Net area of i_overlay shapes (outer boundaries minus holes)
fn area_of_shapes(shapes: &[Shape]) -> f64 {
    shapes
        .iter()
        .filter_map(|shape| {
            let (outer, holes) = shape.split_first()?;
            Some(path_area(outer) - holes.iter().map(path_area).sum::<f64>())
        })
        .sum()
}

/// Cut a shape with holes into hole-free pieces
///
/// Each pass splits the shape along a vertical line through the middle of
/// its first hole, which opens that hole onto the cut.
fn split_holes(shape: Shape, depth: usize) -> Vec<Polygon> {
    let Some(outer) = shape.first() else {
        return Vec::new();
    };

    let Some(hole) = significant_holes(&shape).next() else {
        return vec![path_to_polygon(outer)];
    };

    if depth >= MAX_SPLIT_DEPTH {
        tracing::warn!(depth, "could not cut holes out of subtraction result");
        return vec![path_to_polygon(outer)];
    }

    let (hole_min, hole_max) = x_range(hole);
    let cut = 0.5 * (hole_min + hole_max);

    let (min_x, max_x) = x_range(outer);
    let min_y = outer.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min) - 1.0;
    let max_y = outer.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max) + 1.0;

    let halves = [
        rectangle_path(min_x - 1.0, min_y, cut, max_y),
        rectangle_path(cut, min_y, max_x + 1.0, max_y),
    ];

    let mut pieces = Vec::new();
    for half in halves {
        let parts = shape.overlay(&vec![half], OverlayRule::Intersect, FillRule::EvenOdd);
        for part in parts {
            pieces.extend(split_holes(part, depth + 1));
        }
    }
    pieces
}

fn x_range(path: &Path) -> (f64, f64) {
    path.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p[0]), hi.max(p[0]))
    })
}

fn rectangle_path(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

/// Bit-exact identity of a polygon's xy vertices, for duplicate removal
fn polygon_key(polygon: &Polygon) -> Vec<(u64, u64)> {
    polygon
        .vertices
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect()
}
