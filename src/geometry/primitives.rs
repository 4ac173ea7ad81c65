//! Basic measurements and predicates over rings of `Vec2` points.
//!
//! Every function accepts rings with or without a repeated closing vertex.

use bevy::prelude::*;

/// Edges shorter than this are treated as degenerate.
pub const EDGE_EPSILON: f32 = 1e-6;

/// Drop a trailing vertex that repeats the first one.
pub fn open_ring(ring: &[Vec2]) -> &[Vec2] {
    match ring {
        [first, .., last] if ring.len() > 1 && first.distance_squared(*last) < EDGE_EPSILON => {
            &ring[..ring.len() - 1]
        }
        _ => ring,
    }
}

/// Shoelace area. Positive for counter-clockwise winding in a y-up frame.
pub fn signed_area(ring: &[Vec2]) -> f32 {
    let ring = open_ring(ring);
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

pub fn area(ring: &[Vec2]) -> f32 {
    signed_area(ring).abs()
}

/// Even-odd ray cast. Points exactly on an edge may land on either side.
pub fn point_in_polygon(point: Vec2, ring: &[Vec2]) -> bool {
    let ring = open_ring(ring);
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (ring[i], ring[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounding box.
pub fn bounds(ring: &[Vec2]) -> Rect {
    let mut min = Vec2::splat(f32::MAX);
    let mut max = Vec2::splat(f32::MIN);

    for &v in ring {
        min = min.min(v);
        max = max.max(v);
    }

    Rect { min, max }
}

/// Plain average of the vertices.
pub fn vertex_average(ring: &[Vec2]) -> Vec2 {
    let ring = open_ring(ring);
    if ring.is_empty() {
        return Vec2::ZERO;
    }

    ring.iter().copied().sum::<Vec2>() / ring.len() as f32
}

/// Area-weighted centroid, falling back to the vertex average for
/// zero-area rings.
pub fn centroid(ring: &[Vec2]) -> Vec2 {
    let ring = open_ring(ring);
    let n = ring.len();
    let signed = signed_area(ring);
    if n < 3 || signed.abs() < EDGE_EPSILON {
        return vertex_average(ring);
    }

    // Shift to the first vertex to keep the cross products small.
    let origin = ring[0];
    let mut acc = Vec2::ZERO;
    for i in 0..n {
        let a = ring[i] - origin;
        let b = ring[(i + 1) % n] - origin;
        let cross = a.perp_dot(b);
        acc += (a + b) * cross;
    }
    origin + acc / (6.0 * signed)
}

pub fn perimeter(ring: &[Vec2]) -> f32 {
    let ring = open_ring(ring);
    let n = ring.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| ring[i].distance(ring[(i + 1) % n])).sum()
}

/// Length of an open polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Closest point to `p` on segment `a-b`, with the projection clamped to the segment.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EDGE_EPSILON * EDGE_EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

pub fn distance_point_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Whether every point lies inside `ring` or within `tolerance` of its edges.
pub fn ring_contains(ring: &[Vec2], points: &[Vec2], tolerance: f32) -> bool {
    let ring = open_ring(ring);
    let n = ring.len();
    n >= 3
        && points.iter().all(|&p| {
            point_in_polygon(p, ring)
                || (0..n).any(|i| {
                    distance_point_to_segment(p, ring[i], ring[(i + 1) % n]) <= tolerance
                })
        })
}

/// Intersection of the infinite lines through `a-b` and `c-d`, with the
/// parameters along each. `None` when the lines are parallel.
fn line_parameters(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<(f32, f32)> {
    let r = b - a;
    let s = d - c;
    let denom = r.perp_dot(s);
    if denom.abs() <= 1e-6 * r.length() * s.length() {
        return None;
    }
    let ac = c - a;
    let t = ac.perp_dot(s) / denom;
    let u = ac.perp_dot(r) / denom;
    Some((t, u))
}

/// Unbounded intersection of the lines through `a-b` and `c-d`.
pub fn line_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    line_parameters(a, b, c, d).map(|(t, _)| a + (b - a) * t)
}

/// Intersection point of segments `a-b` and `c-d`, if they cross.
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let (t, u) = line_parameters(a, b, c, d)?;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a + (b - a) * t)
    } else {
        None
    }
}

/// Every crossing of segment `a-b` with the edges of `ring`, ordered by
/// distance from `a`.
pub fn ring_crossings(a: Vec2, b: Vec2, ring: &[Vec2]) -> Vec<Vec2> {
    let ring = open_ring(ring);
    let n = ring.len();
    let mut hits: Vec<Vec2> = (0..n)
        .filter_map(|i| segment_intersection(a, b, ring[i], ring[(i + 1) % n]))
        .collect();
    hits.sort_by(|p, q| a.distance_squared(*p).total_cmp(&a.distance_squared(*q)));
    hits.dedup_by(|p, q| p.distance_squared(*q) < EDGE_EPSILON);
    hits
}

/// Minimum-area rectangle aligned to one of the ring's edges.
pub fn oriented_bounds(ring: &[Vec2]) -> Option<[Vec2; 4]> {
    let ring = open_ring(ring);
    let n = ring.len();
    if n < 3 {
        return None;
    }

    let mut best: Option<(f32, [Vec2; 4])> = None;
    for i in 0..n {
        let edge = ring[(i + 1) % n] - ring[i];
        let len = edge.length();
        if len < EDGE_EPSILON {
            continue;
        }
        let axis = edge / len;
        let perp = axis.perp();

        let (mut min_u, mut max_u) = (f32::MAX, f32::MIN);
        let (mut min_v, mut max_v) = (f32::MAX, f32::MIN);
        for &p in ring {
            let u = p.dot(axis);
            let v = p.dot(perp);
            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }

        let rect_area = (max_u - min_u) * (max_v - min_v);
        if best.map_or(true, |(a, _)| rect_area < a) {
            let corner = |u: f32, v: f32| axis * u + perp * v;
            best = Some((
                rect_area,
                [
                    corner(min_u, min_v),
                    corner(max_u, min_v),
                    corner(max_u, max_v),
                    corner(min_u, max_v),
                ],
            ));
        }
    }

    best.map(|(_, rect)| rect)
}

/// Axis-aligned rectangle ring, counter-clockwise.
pub fn rect_ring(min: Vec2, max: Vec2) -> Vec<Vec2> {
    vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
}

/// Quad around segment `a-b` extending `half_width` to either side.
pub fn segment_quad(a: Vec2, b: Vec2, half_width: f32) -> Vec<Vec2> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let n = dir.perp() * half_width;
    vec![a - n, b - n, b + n, a + n]
}
