//! Half-plane clipping and gap splitting.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::primitives::{bounds, open_ring, ring_crossings};

/// Points within this distance of the clip line count as on the kept side.
const SIDE_TOLERANCE: f32 = 1e-6;

/// Which side of a directed line survives a clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Left of the direction `a -> b`.
    Left,
    Right,
}

/// Direction of a split line for axis-aligned splits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitAxis {
    /// The split line runs along x = constant.
    Vertical,
    /// The split line runs along y = constant.
    Horizontal,
}

/// Sutherland-Hodgman clip of `ring` against the infinite line through `a-b`.
pub fn clip_half_plane(ring: &[Vec2], a: Vec2, b: Vec2, keep: Side) -> Vec<Vec2> {
    let ring = open_ring(ring);
    let n = ring.len();
    let dir = (b - a).normalize_or_zero();
    if n < 3 || dir == Vec2::ZERO {
        return Vec::new();
    }

    let sign = match keep {
        Side::Left => 1.0,
        Side::Right => -1.0,
    };
    let side = |p: Vec2| sign * dir.perp_dot(p - a);

    let mut out = Vec::with_capacity(n + 2);
    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let cur = ring[i];
        let (sp, sc) = (side(prev), side(cur));
        let prev_in = sp >= -SIDE_TOLERANCE;
        let cur_in = sc >= -SIDE_TOLERANCE;

        if cur_in != prev_in {
            let t = sp / (sp - sc);
            out.push(prev + (cur - prev) * t);
        }
        if cur_in {
            out.push(cur);
        }
    }

    out.dedup_by(|p, q| p.distance_squared(*q) < SIDE_TOLERANCE);
    if out.len() > 1 && out[0].distance_squared(out[out.len() - 1]) < SIDE_TOLERANCE {
        out.pop();
    }
    if out.len() < 3 {
        return Vec::new();
    }
    out
}

/// Split `ring` along the line `p1 -> p2`, leaving a corridor of width `gap`.
///
/// Returns `(left, right)` relative to the direction `p1 -> p2`. Either piece
/// is empty when nothing survives on its side.
pub fn split_with_gap(ring: &[Vec2], p1: Vec2, p2: Vec2, gap: f32) -> (Vec<Vec2>, Vec<Vec2>) {
    let dir = (p2 - p1).normalize_or_zero();
    if dir == Vec2::ZERO {
        return (Vec::new(), Vec::new());
    }

    let shift = dir.perp() * (gap * 0.5);
    let left = clip_half_plane(ring, p1 + shift, p2 + shift, Side::Left);
    let right = clip_half_plane(ring, p1 - shift, p2 - shift, Side::Right);
    (left, right)
}

/// The part of `ring` within `width / 2` of the line through `p1 -> p2`.
pub fn clip_band(ring: &[Vec2], p1: Vec2, p2: Vec2, width: f32) -> Vec<Vec2> {
    let dir = (p2 - p1).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }

    let shift = dir.perp() * (width * 0.5);
    let inside_left = clip_half_plane(ring, p1 + shift, p2 + shift, Side::Right);
    clip_half_plane(&inside_left, p1 - shift, p2 - shift, Side::Left)
}

/// Two points on the split line `axis = at`, directed so the left side is
/// the low-coordinate side for vertical lines and the high side for
/// horizontal ones.
pub fn axis_line(axis: SplitAxis, at: f32) -> (Vec2, Vec2) {
    match axis {
        SplitAxis::Vertical => (Vec2::new(at, 0.0), Vec2::new(at, 1.0)),
        SplitAxis::Horizontal => (Vec2::new(0.0, at), Vec2::new(1.0, at)),
    }
}

/// Axis-aligned split at coordinate `at`.
///
/// Returns `(low, high)`: the piece with smaller coordinates along the split
/// normal first.
pub fn split_axis(ring: &[Vec2], axis: SplitAxis, at: f32, gap: f32) -> (Vec<Vec2>, Vec<Vec2>) {
    let (p1, p2) = axis_line(axis, at);
    let (left, right) = split_with_gap(ring, p1, p2, gap);
    match axis {
        SplitAxis::Vertical => (left, right),
        SplitAxis::Horizontal => (right, left),
    }
}

/// Segment where the infinite line through `p1 -> p2` crosses `ring`, from
/// the first crossing to the last.
pub fn line_chord(ring: &[Vec2], p1: Vec2, p2: Vec2) -> Option<(Vec2, Vec2)> {
    let dir = (p2 - p1).normalize_or_zero();
    if dir == Vec2::ZERO || ring.len() < 3 {
        return None;
    }
    let rect = bounds(ring);
    let reach = rect.size().length() + p1.distance(rect.center());
    let hits = ring_crossings(p1 - dir * reach, p1 + dir * reach, ring);
    match (hits.first(), hits.last()) {
        (Some(&a), Some(&b)) if hits.len() >= 2 => Some((a, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::overlap::polygons_overlap;
    use crate::geometry::primitives::{area, bounds, rect_ring};

    #[test]
    fn gap_split_leaves_corridor() {
        let square = rect_ring(Vec2::ZERO, Vec2::splat(40.0));
        let (low, high) = split_axis(&square, SplitAxis::Vertical, 20.0, 4.0);

        assert_eq!(low.len(), 4);
        assert_eq!(high.len(), 4);
        assert!((bounds(&low).max.x - 18.0).abs() < 1e-4);
        assert!((bounds(&high).min.x - 22.0).abs() < 1e-4);
        assert!((area(&low) - 720.0).abs() < 1e-2);
        assert!((area(&high) - 720.0).abs() < 1e-2);
    }

    #[test]
    fn zero_gap_split_conserves_area() {
        let ring = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, -5.0),
            Vec2::new(60.0, 30.0),
            Vec2::new(20.0, 45.0),
            Vec2::new(-10.0, 20.0),
        ];
        let (left, right) = split_with_gap(&ring, Vec2::new(5.0, -20.0), Vec2::new(30.0, 60.0), 0.0);

        assert!(!left.is_empty() && !right.is_empty());
        let total = area(&left) + area(&right);
        assert!((total - area(&ring)).abs() < 1e-2 * area(&ring));
        assert!(!polygons_overlap(&left, &right));
    }

    #[test]
    fn horizontal_split_orders_low_then_high() {
        let square = rect_ring(Vec2::ZERO, Vec2::splat(40.0));
        let (low, high) = split_axis(&square, SplitAxis::Horizontal, 10.0, 2.0);
        assert!((bounds(&low).max.y - 9.0).abs() < 1e-4);
        assert!((bounds(&high).min.y - 11.0).abs() < 1e-4);
    }

    #[test]
    fn band_and_chord_follow_split_line() {
        let square = rect_ring(Vec2::ZERO, Vec2::splat(40.0));
        let (p1, p2) = axis_line(SplitAxis::Vertical, 20.0);
        let band = clip_band(&square, p1, p2, 4.0);
        let b = bounds(&band);
        assert!((b.min.x - 18.0).abs() < 1e-4 && (b.max.x - 22.0).abs() < 1e-4);
        assert!((area(&band) - 160.0).abs() < 1e-2);

        let (a, c) = line_chord(&square, p1, p2).unwrap();
        assert!((a - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert!((c - Vec2::new(20.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn split_missing_ring_is_empty() {
        let square = rect_ring(Vec2::ZERO, Vec2::splat(10.0));
        let (left, right) = split_with_gap(&square, Vec2::new(50.0, 0.0), Vec2::new(50.0, 1.0), 2.0);
        // Line x = 50 travelling +y: left is -x, the whole square.
        assert_eq!(left.len(), 4);
        assert!(right.is_empty());
    }
}
