//! Separating Axis Theorem narrow phase
//!
//! Tests two convex polygons (given as world-space vertex loops) for
//! overlap. Every edge normal of both polygons is a candidate separating
//! axis; if the vertex projections onto any axis do not overlap, the
//! polygons are disjoint. Otherwise the axis with the smallest overlap is
//! the contact normal and that overlap is the penetration depth.

use glam::Vec2;

/// Axes shorter than this are degenerate (duplicate vertices) and skipped.
const EDGE_EPSILON: f32 = 1e-6;

/// Result of a positive overlap test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit minimum-translation direction, pointing from the first polygon
    /// toward the second.
    pub normal: Vec2,
    /// Penetration depth along `normal`.
    pub depth: f32,
}

/// Test two convex polygons for overlap.
///
/// `a_center`/`b_center` disambiguate the normal's sign: the returned normal
/// always points from body A toward body B. Returns `None` when any axis
/// separates the polygons (or either polygon is degenerate).
pub fn polygon_overlap(a: &[Vec2], a_center: Vec2, b: &[Vec2], b_center: Vec2) -> Option<Contact> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let mut min_depth = f32::INFINITY;
    let mut min_axis = Vec2::ZERO;

    for (polygon, other) in [(a, b), (b, a)] {
        for i in 0..polygon.len() {
            let edge = polygon[(i + 1) % polygon.len()] - polygon[i];
            let axis = Vec2::new(-edge.y, edge.x);
            let length = axis.length();
            if length < EDGE_EPSILON {
                continue;
            }
            let axis = axis / length;

            let (min_a, max_a) = project(polygon, axis);
            let (min_b, max_b) = project(other, axis);
            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap <= 0.0 {
                return None;
            }
            if overlap < min_depth {
                min_depth = overlap;
                min_axis = axis;
            }
        }
    }

    // orient the normal from A toward B
    if min_axis.dot(b_center - a_center) < 0.0 {
        min_axis = -min_axis;
    }
    Some(Contact {
        normal: min_axis,
        depth: min_depth,
    })
}

fn project(polygon: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for vertex in polygon {
        let p = vertex.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}
