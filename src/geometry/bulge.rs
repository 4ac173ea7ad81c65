//! Curved boundary edges encoded as bulge values.
//!
//! A bulge is the sagitta divided by the half-chord, signed toward the left
//! normal of the edge. Zero means a straight edge.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::primitives::EDGE_EPSILON;

/// A boundary vertex whose outgoing edge may be an arc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BulgeVertex {
    pub position: Vec2,
    pub bulge: f32,
}

impl BulgeVertex {
    pub fn straight(position: Vec2) -> Self {
        Self {
            position,
            bulge: 0.0,
        }
    }
}

/// Point halfway along the arc from `p1` to `p2`.
pub fn arc_midpoint(p1: Vec2, p2: Vec2, bulge: f32) -> Vec2 {
    let chord = p2 - p1;
    let len = chord.length();
    let mid = (p1 + p2) * 0.5;
    if len < EDGE_EPSILON || bulge == 0.0 {
        return mid;
    }
    let normal = chord.perp() / len;
    mid + normal * (len * 0.5 * bulge)
}

/// Bulge of the arc from `p1` to `p2` passing through `mid`.
pub fn bulge_from_midpoint(p1: Vec2, p2: Vec2, mid: Vec2) -> f32 {
    let chord = p2 - p1;
    let len = chord.length();
    if len < EDGE_EPSILON {
        return 0.0;
    }
    let normal = chord.perp() / len;
    let sagitta = (mid - (p1 + p2) * 0.5).dot(normal);
    sagitta / (len * 0.5)
}

/// Radius of the arc, `None` for straight edges.
pub fn arc_radius(p1: Vec2, p2: Vec2, bulge: f32) -> Option<f32> {
    let len = p1.distance(p2);
    if len < EDGE_EPSILON || bulge.abs() < 1e-6 {
        return None;
    }
    Some((len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs()))
}

/// Append the interior samples of one arc, excluding both endpoints.
fn sample_arc(p1: Vec2, p2: Vec2, bulge: f32, segments: usize, out: &mut Vec<Vec2>) {
    let chord = p2 - p1;
    let len = chord.length();
    if len < EDGE_EPSILON || bulge.abs() < 1e-6 || segments < 2 {
        return;
    }

    let half = len * 0.5;
    let normal = chord.perp() / len;
    let sagitta = half * bulge;
    // Signed radius keeps the centre on the side opposite the sagitta.
    let signed_radius = (half * half + sagitta * sagitta) / (2.0 * sagitta);
    let center = (p1 + p2) * 0.5 + normal * (sagitta - signed_radius);
    let radius = signed_radius.abs();

    let start = (p1 - center).to_angle();
    let sweep = -4.0 * bulge.atan();
    for i in 1..segments {
        let t = i as f32 / segments as f32;
        out.push(center + Vec2::from_angle(start + sweep * t) * radius);
    }
}

/// Resolve a bulged boundary into a plain polyline ring.
pub fn resolve_bulged_ring(vertices: &[BulgeVertex], segments_per_arc: usize) -> Vec<Vec2> {
    let n = vertices.len();
    let mut ring = Vec::with_capacity(n * segments_per_arc.max(1));
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        ring.push(a.position);
        sample_arc(a.position, b.position, a.bulge, segments_per_arc, &mut ring);
    }
    ring
}
