//! Separating axis overlap test.
//!
//! Exact for convex polygons. Concave footprints are tested through their
//! convex plot cell instead.

use bevy::prelude::*;

use super::primitives::{open_ring, EDGE_EPSILON};

/// Projection gaps up to this many drawing units still count as touching.
pub const SEPARATION_TOLERANCE: f32 = 0.1;

fn project(ring: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &p in ring {
        let dot = p.dot(axis);
        lo = lo.min(dot);
        hi = hi.max(dot);
    }
    (lo, hi)
}

/// True if the interiors of two polygons overlap by more than the tolerance.
/// Shared edges and corners are not overlaps.
pub fn polygons_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    let a = open_ring(a);
    let b = open_ring(b);
    if a.len() < 3 || b.len() < 3 {
        return false;
    }

    for ring in [a, b] {
        let n = ring.len();
        for i in 0..n {
            let edge = ring[(i + 1) % n] - ring[i];
            let len = edge.length();
            if len < EDGE_EPSILON {
                continue;
            }
            let axis = Vec2::new(edge.y, -edge.x) / len;
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            if max_a <= min_b + SEPARATION_TOLERANCE || max_b <= min_a + SEPARATION_TOLERANCE {
                return false;
            }
        }
    }
    true
}

/// True if `candidate` overlaps any ring in `others`.
pub fn overlaps_any<'a, I>(candidate: &[Vec2], others: I) -> bool
where
    I: IntoIterator<Item = &'a [Vec2]>,
{
    others.into_iter().any(|other| polygons_overlap(candidate, other))
}
