//! Entry/exit connectors and block-crossing spine roads.
//!
//! Both are straight roads that blend into the ring road through rounded
//! corners. After a road is placed, plots in its way are removed and green
//! islands it crosses are cut in two.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::overlap::polygons_overlap;
use crate::geometry::{
    bounds, clip_band, closest_point_on_segment, distance_point_to_segment, open_ring,
    point_in_polygon, ring_crossings, segment_intersection, segment_quad, split_with_gap,
    CurvedPath, Orientation,
};

use super::plots::Plot;

/// Connectors shorter than this are not built.
const MIN_CONNECTOR_LENGTH: f32 = 1.0;
/// Share of the connector length the junction fillet may consume.
const FILLET_LENGTH_SHARE: f32 = 0.7;
/// Rays used to extend spines are this long.
const RAY_REACH: f32 = 10_000.0;

/// Nearest point on the closed ring to `p`, with the edge it lies on.
pub fn nearest_point_on_ring(ring: &[Vec2], p: Vec2) -> Option<(Vec2, usize)> {
    let ring = open_ring(ring);
    let n = ring.len();
    if n < 2 {
        return None;
    }
    (0..n)
        .map(|i| (closest_point_on_segment(p, ring[i], ring[(i + 1) % n]), i))
        .min_by(|a, b| p.distance_squared(a.0).total_cmp(&p.distance_squared(b.0)))
}

/// Road from the site boundary into the ring road.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryConnector {
    /// Carriageway outline, flared into the ring road at the junction.
    pub carriageway: CurvedPath,
    /// Full-width outline including both pavements, drawn beneath the
    /// carriageway.
    pub pavement: CurvedPath,
    /// From the boundary point to the junction on the ring road.
    pub centerline: [Vec2; 2],
}

impl EntryConnector {
    /// Flattened outlines used for clearance checks.
    pub fn polygons(&self) -> Vec<Vec<Vec2>> {
        vec![self.carriageway.outline(), self.pavement.outline()]
    }
}

/// Connector from `boundary_point` to the nearest point of `ring`.
///
/// `None` when the boundary point already sits on the ring.
pub fn entry_connector(
    boundary_point: Vec2,
    ring: &[Vec2],
    carriageway: f32,
    footpath: f32,
    radius: f32,
) -> Option<EntryConnector> {
    let ring = open_ring(ring);
    let (junction, edge) = nearest_point_on_ring(ring, boundary_point)?;
    let len = boundary_point.distance(junction);
    if len < MIN_CONNECTOR_LENGTH {
        return None;
    }

    let n = ring.len();
    let tangent = align_tangent(ring[(edge + 1) % n] - ring[edge], (junction - boundary_point).perp());
    let half = carriageway * 0.5;
    let r = radius.min(len * FILLET_LENGTH_SHARE).max(0.0);

    Some(EntryConnector {
        carriageway: flared_outline(boundary_point, junction, half, r, None, tangent),
        pavement: flared_outline(
            boundary_point,
            junction,
            half + footpath,
            r + footpath,
            None,
            tangent,
        ),
        centerline: [boundary_point, junction],
    })
}

/// Outline of a straight road of half-width `w` from `start` to `end`.
///
/// Ends with a tangent are rounded into the crossing road by radius `r`;
/// ends without one are cut square.
fn flared_outline(
    start: Vec2,
    end: Vec2,
    w: f32,
    r: f32,
    start_tangent: Option<Vec2>,
    end_tangent: Vec2,
) -> CurvedPath {
    let u = (end - start).normalize_or_zero();
    let n = u.perp();
    let mut path = CurvedPath::new();

    let start_right = start + n * w;
    let start_left = start - n * w;
    let end_right = end + n * w;
    let end_left = end - n * w;

    match start_tangent {
        Some(t) => {
            path.move_to(start_right + t * r);
            path.quad_to(start_right, start_right + u * r);
        }
        None => path.move_to(start_right),
    }
    path.line_to(end_right - u * r);
    path.quad_to(end_right, end_right + end_tangent * r);
    path.line_to(end_left - end_tangent * r);
    path.quad_to(end_left, end_left - u * r);
    match start_tangent {
        Some(t) => {
            path.line_to(start_left + u * r);
            path.quad_to(start_left, start_left - t * r);
        }
        None => path.line_to(start_left),
    }
    path.close();
    path
}

/// Ring-edge direction flipped to agree with the road normal.
fn align_tangent(edge: Vec2, normal: Vec2) -> Vec2 {
    let t = edge.normalize_or_zero();
    if t.dot(normal) < 0.0 {
        -t
    } else {
        t
    }
}

fn point_near_polygon(p: Vec2, polygon: &[Vec2], buffer: f32) -> bool {
    if point_in_polygon(p, polygon) {
        return true;
    }
    let n = polygon.len();
    (0..n).any(|i| distance_point_to_segment(p, polygon[i], polygon[(i + 1) % n]) < buffer)
}

/// Whether any vertex of either polygon lies inside or within `buffer` of
/// the other.
pub fn polygons_near(a: &[Vec2], b: &[Vec2], buffer: f32) -> bool {
    a.iter().any(|&p| point_near_polygon(p, b, buffer))
        || b.iter().any(|&p| point_near_polygon(p, a, buffer))
}

/// Drop plots within `clearance` of any of `polygons`. Returns how many went.
pub fn remove_conflicting_plots(
    plots: &mut Vec<Plot>,
    polygons: &[Vec<Vec2>],
    clearance: f32,
) -> usize {
    let before = plots.len();
    plots.retain(|plot| {
        !polygons
            .iter()
            .filter(|poly| poly.len() >= 3)
            .any(|poly| polygons_near(&plot.vertices, poly, clearance))
    });
    before - plots.len()
}

/// Cut every green the line `p1 -> p2` passes through, leaving a `gap`.
///
/// Greens the line misses, or that would lose a whole side, stay intact.
pub fn bisect_greens(greens: Vec<Vec<Vec2>>, p1: Vec2, p2: Vec2, gap: f32) -> Vec<Vec<Vec2>> {
    let mut out = Vec::with_capacity(greens.len() + 2);
    for green in greens {
        let (left, right) = split_with_gap(&green, p1, p2, gap);
        if left.len() >= 3 && right.len() >= 3 {
            out.push(left);
            out.push(right);
        } else {
            out.push(green);
        }
    }
    out
}

/// Green halves and road strip left by a centerline crossing a green.
#[derive(Clone, Debug, PartialEq)]
pub struct GreenCrossing {
    pub pieces: [Vec<Vec2>; 2],
    pub road: Vec<Vec2>,
    pub chord: (Vec2, Vec2),
}

/// Split `green` where a drawn centerline crosses it.
///
/// The first two crossings along the centerline define the cut.
pub fn bisect_with_centerline(green: &[Vec2], centerline: &[Vec2], gap: f32) -> Option<GreenCrossing> {
    let mut hits: Vec<Vec2> = Vec::new();
    for w in centerline.windows(2) {
        for hit in ring_crossings(w[0], w[1], green) {
            if hits.last().map_or(true, |last| last.distance(hit) > 1e-3) {
                hits.push(hit);
            }
        }
        if hits.len() >= 2 {
            break;
        }
    }
    let (&p1, &p2) = (hits.first()?, hits.get(1)?);

    let (left, right) = split_with_gap(green, p1, p2, gap);
    if left.len() < 3 || right.len() < 3 {
        return None;
    }
    let road = clip_band(green, p1, p2, gap);
    Some(GreenCrossing {
        pieces: [left, right],
        road,
        chord: (p1, p2),
    })
}

/// Candidate spines: for every edge longer than `min_length`, the segment
/// from its midpoint along the inward normal to the nearest opposite edge.
pub fn bifurcation_spines(
    polygon: &[Vec2],
    min_length: f32,
    orientation: Option<Orientation>,
) -> Vec<(Vec2, Vec2)> {
    let ring = open_ring(polygon);
    let n = ring.len();
    let Some(orientation) = orientation.or_else(|| Orientation::of(ring)) else {
        return Vec::new();
    };
    let reach = bounds(ring).size().length() * 2.0;

    let mut spines = Vec::new();
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        if a.distance(b) <= min_length {
            continue;
        }
        let mid = (a + b) * 0.5;
        let mut inward = orientation.inward_normal(b - a);
        if !point_in_polygon(mid + inward * 0.1, ring) {
            inward = -inward;
        }
        let ray_end = mid + inward * reach;

        let hit = (0..n)
            .filter(|&j| j != i)
            .filter_map(|j| segment_intersection(mid, ray_end, ring[j], ring[(j + 1) % n]))
            .filter(|p| p.distance(mid) > 1e-3)
            .min_by(|p, q| mid.distance_squared(*p).total_cmp(&mid.distance_squared(*q)));
        if let Some(hit) = hit {
            spines.push((mid, hit));
        }
    }
    spines
}

pub fn shortest_spine(spines: &[(Vec2, Vec2)]) -> Option<(Vec2, Vec2)> {
    spines
        .iter()
        .copied()
        .min_by(|a, b| a.0.distance(a.1).total_cmp(&b.0.distance(b.1)))
}

/// A spine extended across the block onto the ring road.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpineRoad {
    pub carriageway: CurvedPath,
    /// Full-width outline including pavements, beneath the carriageway.
    pub pavement: CurvedPath,
    pub centerline: (Vec2, Vec2),
    /// Road footprint and the wider clearance zone around it.
    pub conflict_zones: [Vec<Vec2>; 2],
    /// Gap cut into greens the road crosses.
    pub green_gap: f32,
}

/// Extend `spine` both ways to `ring_inner` and round all four corners into
/// the ring.
pub fn spine_road(
    spine: (Vec2, Vec2),
    ring_inner: &[Vec2],
    carriageway: f32,
    footpath: f32,
    radius: f32,
) -> Option<SpineRoad> {
    let ring = open_ring(ring_inner);
    let n = ring.len();
    let (mut start, mut end) = spine;
    let u = (end - start).normalize_or_zero();
    if n < 3 || u == Vec2::ZERO {
        return None;
    }
    let normal = u.perp();

    let mut start_tangent = normal;
    let mut end_tangent = normal;
    let (mut best_start, mut best_end) = (f32::MAX, f32::MAX);
    let (origin_start, origin_end) = spine;
    for i in 0..n {
        let (p1, p2) = (ring[i], ring[(i + 1) % n]);
        let t = (p2 - p1).normalize_or_zero();

        if let Some(hit) = segment_intersection(origin_start, origin_start - u * RAY_REACH, p1, p2) {
            let d = hit.distance(origin_start);
            if d < best_start {
                best_start = d;
                start = hit;
                start_tangent = t;
            }
        }
        if let Some(hit) = segment_intersection(origin_end, origin_end + u * RAY_REACH, p1, p2) {
            let d = hit.distance(origin_end);
            if d < best_end {
                best_end = d;
                end = hit;
                end_tangent = t;
            }
        }
    }

    let t_start = align_tangent(start_tangent, normal);
    let t_end = align_tangent(end_tangent, normal);
    let half = carriageway * 0.5;
    let outline = |w: f32| {
        let r = radius + (w - half);
        flared_outline(start, end, w, r, Some(t_start), t_end)
    };

    Some(SpineRoad {
        carriageway: outline(half),
        pavement: outline(half + footpath),
        centerline: (start, end),
        conflict_zones: [
            segment_quad(start, end, half + footpath),
            segment_quad(start, end, half + footpath + radius),
        ],
        green_gap: (half + footpath) * 2.0,
    })
}

impl SpineRoad {
    /// Remove overlapping plots and cut crossed greens.
    pub fn clear(&self, plots: &mut Vec<Plot>, greens: Vec<Vec<Vec2>>) -> (usize, Vec<Vec<Vec2>>) {
        let before = plots.len();
        plots.retain(|plot| {
            !self
                .conflict_zones
                .iter()
                .any(|zone| polygons_overlap(&plot.vertices, zone))
        });
        let (a, b) = self.centerline;
        (before - plots.len(), bisect_greens(greens, a, b, self.green_gap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{area, rect_ring};
    use crate::subdivision::Scale;

    #[test]
    fn connector_ends_on_nearest_ring_edge() {
        let ring = rect_ring(Vec2::ZERO, Vec2::splat(100.0));
        // 50 units below the bottom edge.
        let entry = Vec2::new(40.0, -50.0);
        let connector = entry_connector(entry, &ring, 9.0, 2.0, 15.0).unwrap();

        let [start, junction] = connector.centerline;
        assert_eq!(start, entry);
        let d = distance_point_to_segment(junction, ring[0], ring[1]);
        assert!(d < 1e-4, "junction {junction} is {d} off the edge");
        assert!((junction - Vec2::new(40.0, 0.0)).length() < 1e-4);

        let road = connector.carriageway.area();
        let pavement = connector.pavement.area();
        assert!(road > 9.0 * 50.0);
        assert!(pavement > road);
    }

    #[test]
    fn connector_flares_along_the_ring() {
        let ring = rect_ring(Vec2::ZERO, Vec2::splat(100.0));
        let connector = entry_connector(Vec2::new(40.0, -50.0), &ring, 9.0, 2.0, 15.0).unwrap();
        let outline = connector.carriageway.outline();
        let b = bounds(&outline);
        // The junction corners run 15 units along the ring edge on both sides.
        assert!((b.min.x - (40.0 - 4.5 - 15.0)).abs() < 1e-3);
        assert!((b.max.x - (40.0 + 4.5 + 15.0)).abs() < 1e-3);
        assert!(b.max.y.abs() < 1e-3);
    }

    #[test]
    fn connector_on_ring_is_skipped() {
        let ring = rect_ring(Vec2::ZERO, Vec2::splat(100.0));
        assert!(entry_connector(Vec2::new(50.0, 0.2), &ring, 9.0, 2.0, 15.0).is_none());
    }

    #[test]
    fn conflicting_plots_are_removed() {
        let road = segment_quad(Vec2::new(50.0, -20.0), Vec2::new(50.0, 40.0), 4.5);
        let mut plots = vec![
            Plot::cell(rect_ring(Vec2::new(40.0, 0.0), Vec2::new(52.0, 20.0)), Scale(1.0)),
            Plot::cell(rect_ring(Vec2::new(58.0, 0.0), Vec2::new(70.0, 20.0)), Scale(1.0)),
            Plot::cell(rect_ring(Vec2::new(80.0, 0.0), Vec2::new(92.0, 20.0)), Scale(1.0)),
        ];
        let removed = remove_conflicting_plots(&mut plots, &[road], 6.5);
        // The second plot is 3.5 from the road edge.
        assert_eq!(removed, 2);
        assert_eq!(plots.len(), 1);
        assert!((plots[0].vertices[0].x - 80.0).abs() < 1e-6);
    }

    #[test]
    fn spines_cross_long_edges() {
        let block = rect_ring(Vec2::ZERO, Vec2::new(200.0, 80.0));
        let spines = bifurcation_spines(&block, 40.0, None);
        assert_eq!(spines.len(), 4);
        let (a, b) = shortest_spine(&spines).unwrap();
        assert!((a.distance(b) - 80.0).abs() < 1e-3);

        let short = rect_ring(Vec2::ZERO, Vec2::new(200.0, 30.0));
        assert_eq!(bifurcation_spines(&short, 40.0, None).len(), 2);
    }

    #[test]
    fn spine_road_reaches_ring_and_cuts_green() {
        let ring = rect_ring(Vec2::new(-50.0, -50.0), Vec2::new(250.0, 130.0));
        let spine = (Vec2::new(100.0, 0.0), Vec2::new(100.0, 80.0));
        let road = spine_road(spine, &ring, 9.0, 2.0, 10.0).unwrap();

        let (start, end) = road.centerline;
        assert!((start - Vec2::new(100.0, -50.0)).length() < 1e-3);
        assert!((end - Vec2::new(100.0, 130.0)).length() < 1e-3);
        assert!(road.pavement.area() > road.carriageway.area());

        let mut plots = vec![
            Plot::cell(rect_ring(Vec2::new(90.0, 10.0), Vec2::new(102.0, 30.0)), Scale(1.0)),
            Plot::cell(rect_ring(Vec2::new(150.0, 10.0), Vec2::new(162.0, 30.0)), Scale(1.0)),
        ];
        let green = rect_ring(Vec2::new(60.0, 40.0), Vec2::new(140.0, 70.0));
        let (removed, greens) = road.clear(&mut plots, vec![green.clone()]);
        assert_eq!(removed, 1);
        assert_eq!(greens.len(), 2);
        let kept: f32 = greens.iter().map(|g| area(g)).sum();
        assert!((kept - (area(&green) - 13.0 * 30.0)).abs() < 1e-2);
    }

    #[test]
    fn centerline_bisects_green_island() {
        let green = rect_ring(Vec2::ZERO, Vec2::new(60.0, 40.0));
        let centerline = [Vec2::new(30.0, -20.0), Vec2::new(30.0, 20.0), Vec2::new(30.0, 70.0)];
        let crossing = bisect_with_centerline(&green, &centerline, 9.0).unwrap();
        assert!((area(&crossing.road) - 9.0 * 40.0).abs() < 1e-2);
        let total: f32 = crossing.pieces.iter().map(|p| area(p)).sum();
        assert!((total - (2400.0 - 360.0)).abs() < 1e-2);

        let miss = [Vec2::new(100.0, -20.0), Vec2::new(100.0, 70.0)];
        assert!(bisect_with_centerline(&green, &miss, 9.0).is_none());
    }
}
