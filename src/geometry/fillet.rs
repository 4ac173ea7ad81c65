//! Corner rounding with quadratic curves, and the curved path type that
//! carries the result.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::primitives::{area, open_ring, point_in_polygon, EDGE_EPSILON};

/// Corners within this many radians of a straight line are left sharp.
pub const STRAIGHT_ANGLE_TOLERANCE: f32 = 1e-3;

/// Tangent distance never exceeds this share of the shorter incident edge.
pub const FILLET_EDGE_SHARE: f32 = 0.45;

/// Curve subdivisions used when a path is flattened for measurement.
pub const DEFAULT_CURVE_SEGMENTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    Close,
}

/// A sequence of subpaths made of lines and quadratic curves.
/// Multiple closed subpaths are filled with the even-odd rule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvedPath {
    pub commands: Vec<PathCommand>,
}

impl CurvedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Vec2) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn quad_to(&mut self, ctrl: Vec2, to: Vec2) {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Append all subpaths of `other`.
    pub fn extend(&mut self, other: CurvedPath) {
        self.commands.extend(other.commands);
    }

    /// Straight-line path through `points`.
    pub fn from_polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        let points = open_ring(points);
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for &p in rest {
                path.line_to(p);
            }
            path.close();
        }
        path
    }

    /// Flatten every subpath, sampling each curve with `segments` pieces.
    pub fn subpaths(&self, segments: usize) -> Vec<Vec<Vec2>> {
        let segments = segments.max(1);
        let mut out = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    if current.len() > 1 {
                        out.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathCommand::LineTo(p) => current.push(p),
                PathCommand::QuadTo { ctrl, to } => {
                    let Some(&from) = current.last() else {
                        current.push(to);
                        continue;
                    };
                    for i in 1..=segments {
                        let t = i as f32 / segments as f32;
                        let u = 1.0 - t;
                        current.push(from * (u * u) + ctrl * (2.0 * u * t) + to * (t * t));
                    }
                }
                PathCommand::Close => {
                    if current.len() > 1 {
                        out.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if current.len() > 1 {
            out.push(current);
        }
        out
    }

    /// Points of the first subpath, flattened with the default resolution.
    pub fn outline(&self) -> Vec<Vec2> {
        self.subpaths(DEFAULT_CURVE_SEGMENTS)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Enclosed area under the even-odd rule.
    pub fn area(&self) -> f32 {
        let rings = self.subpaths(DEFAULT_CURVE_SEGMENTS);
        let mut total = 0.0;
        for (i, ring) in rings.iter().enumerate() {
            let Some(&probe) = ring.first() else { continue };
            let depth = rings
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && point_in_polygon(probe, other))
                .count();
            if depth % 2 == 0 {
                total += area(ring);
            } else {
                total -= area(ring);
            }
        }
        total.max(0.0)
    }

    /// SVG path data, e.g. `M 0 0 L 10 0 Q 20 0 20 10 Z`.
    pub fn to_svg(&self) -> String {
        self.commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(p) => format!("M {} {}", p.x, p.y),
                PathCommand::LineTo(p) => format!("L {} {}", p.x, p.y),
                PathCommand::QuadTo { ctrl, to } => {
                    format!("Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)
                }
                PathCommand::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Tangent points of a rounded corner at `corner`, or `None` if the corner
/// is effectively straight or folded back on itself.
pub fn corner_tangents(
    prev: Vec2,
    corner: Vec2,
    next: Vec2,
    radius: f32,
    straight_tolerance: f32,
) -> Option<(Vec2, Vec2)> {
    let v1 = prev - corner;
    let v2 = next - corner;
    let (l1, l2) = (v1.length(), v2.length());
    if l1 < EDGE_EPSILON || l2 < EDGE_EPSILON || radius <= 0.0 {
        return None;
    }

    let u1 = v1 / l1;
    let u2 = v2 / l2;
    let angle = u1.dot(u2).clamp(-1.0, 1.0).acos();
    if angle < straight_tolerance || (std::f32::consts::PI - angle) < straight_tolerance {
        return None;
    }
    let half_tan = (angle * 0.5).tan();
    if half_tan < 1e-6 {
        return None;
    }

    let d = (radius / half_tan).min(FILLET_EDGE_SHARE * l1.min(l2));
    Some((corner + u1 * d, corner + u2 * d))
}

/// Round every corner of a closed ring with a quadratic curve whose control
/// point is the original vertex.
pub fn fillet_path(ring: &[Vec2], radius: f32) -> CurvedPath {
    let ring = open_ring(ring);
    let n = ring.len();
    let mut path = CurvedPath::new();
    if n < 3 {
        return path;
    }

    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let corner = ring[i];
        let next = ring[(i + 1) % n];

        match corner_tangents(prev, corner, next, radius, STRAIGHT_ANGLE_TOLERANCE) {
            Some((t1, t2)) => {
                if i == 0 {
                    path.move_to(t1);
                } else {
                    path.line_to(t1);
                }
                path.quad_to(corner, t2);
            }
            None if i == 0 => path.move_to(corner),
            None => path.line_to(corner),
        }
    }
    path.close();
    path
}

/// Round the corners of a road centerline, replacing each corner with
/// tangent point, curve midpoint and tangent point.
///
/// Open polylines keep their end vertices. Corners within 0.1 rad of
/// straight or of a full fold are kept as they are.
pub fn fillet_polyline(points: &[Vec2], radius: f32, closed: bool) -> Vec<Vec2> {
    let points = if closed { open_ring(points) } else { points };
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(n * 3);
    for i in 0..n {
        let interior = closed || (i > 0 && i < n - 1);
        if !interior {
            out.push(points[i]);
            continue;
        }
        let prev = points[(i + n - 1) % n];
        let corner = points[i];
        let next = points[(i + 1) % n];
        match corner_tangents(prev, corner, next, radius, 0.1) {
            Some((t1, t2)) => {
                out.push(t1);
                out.push(t1 * 0.25 + corner * 0.5 + t2 * 0.25);
                out.push(t2);
            }
            None => out.push(corner),
        }
    }
    out
}
