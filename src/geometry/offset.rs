//! Parallel offsetting of rings and polylines.
//!
//! Each edge is moved along its left-hand normal `(-dy, dx)` by the signed
//! distance, and every new vertex is the intersection of the two adjacent
//! offset lines. Edges therefore stay exactly parallel to their originals.

use bevy::prelude::*;

use super::primitives::{area, line_intersection, open_ring, signed_area, EDGE_EPSILON};

/// Offset every edge of `points` by `distance` along its left-hand normal.
///
/// With `closed` the last vertex connects back to the first. Returns an empty
/// vector if fewer than two usable edges remain.
pub fn offset(points: &[Vec2], distance: f32, closed: bool) -> Vec<Vec2> {
    let points = if closed { open_ring(points) } else { points };
    let n = points.len();
    if n < 2 || (closed && n < 3) {
        return Vec::new();
    }

    let edge_count = if closed { n } else { n - 1 };
    let mut lines: Vec<(Vec2, Vec2)> = Vec::with_capacity(edge_count);
    for i in 0..edge_count {
        let a = points[i];
        let b = points[(i + 1) % n];
        let dir = b - a;
        let len = dir.length();
        if len < EDGE_EPSILON {
            continue;
        }
        let shift = dir.perp() / len * distance;
        lines.push((a + shift, b + shift));
    }

    if lines.is_empty() {
        return Vec::new();
    }

    let join = |prev: (Vec2, Vec2), next: (Vec2, Vec2)| {
        line_intersection(prev.0, prev.1, next.0, next.1).unwrap_or(next.0)
    };

    if closed {
        let m = lines.len();
        if m < 3 {
            return Vec::new();
        }
        (0..m).map(|i| join(lines[(i + m - 1) % m], lines[i])).collect()
    } else {
        let mut result = Vec::with_capacity(lines.len() + 1);
        result.push(lines[0].0);
        for pair in lines.windows(2) {
            result.push(join(pair[0], pair[1]));
        }
        if let Some(last) = lines.last() {
            result.push(last.1);
        }
        result
    }
}

/// Offset a closed ring toward its interior regardless of winding.
///
/// Both signs are tried and the candidate enclosing less area wins. An empty
/// result means the ring is too narrow for `distance`, including the case
/// where the shrunken candidate has turned inside out.
pub fn inward_offset(ring: &[Vec2], distance: f32) -> Vec<Vec2> {
    let ring = open_ring(ring);
    if ring.len() < 3 {
        return Vec::new();
    }

    let plus = offset(ring, distance, true);
    let minus = offset(ring, -distance, true);

    let chosen = match (plus.len() >= 3, minus.len() >= 3) {
        (false, false) => return Vec::new(),
        (true, false) => plus,
        (false, true) => minus,
        (true, true) => {
            if area(&plus) <= area(&minus) {
                plus
            } else {
                minus
            }
        }
    };

    let original = signed_area(ring);
    let shrunk = signed_area(&chosen);
    if distance > 0.0 && (shrunk * original <= 0.0 || shrunk.abs() >= original.abs()) {
        return Vec::new();
    }

    chosen
}
