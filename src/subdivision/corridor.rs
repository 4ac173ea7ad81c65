//! Road corridors: concentric ring-road bands, centerline buffering,
//! parallel parking and block-cutting road strips.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::geometry::{
    axis_line, clip_band, fillet_path, inward_offset, line_chord, offset, open_ring,
    point_in_polygon, CurvedPath, Orientation, SplitAxis,
};

use super::road_network::RoadKind;
use super::{Corridor, Role, Scale};

/// Ring-road cross-section measured inward from the site boundary, in
/// drawing units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossSection {
    /// Depth of the boundary plot row in front of the road.
    pub setback: f32,
    pub outer_pavement: f32,
    pub carriageway: f32,
    pub inner_pavement: f32,
}

impl CrossSection {
    pub fn total(&self) -> f32 {
        self.setback + self.outer_pavement + self.carriageway + self.inner_pavement
    }
}

/// Concentric ring road around the inside of a site.
#[derive(Clone, Debug, Default)]
pub struct RingRoad {
    pub bands: Vec<(Role, Vec<Vec2>)>,
    /// Inward offsets at the four cumulative cross-section distances. Later
    /// entries may be empty when the site is too narrow.
    pub edges: [Vec<Vec2>; 4],
    /// Carriageway centerline, empty when the carriageway collapsed.
    pub centerline: Vec<Vec2>,
}

impl RingRoad {
    pub fn carriageway_outer(&self) -> &[Vec2] {
        &self.edges[1]
    }

    pub fn carriageway_inner(&self) -> &[Vec2] {
        &self.edges[2]
    }

    /// Innermost edge, bounding the developable remainder.
    pub fn inner_edge(&self) -> &[Vec2] {
        &self.edges[3]
    }
}

/// Strip between two concentric rings with matching vertex order.
///
/// The outer ring is closed explicitly before the inner ring is walked
/// backwards, so the strip covers every edge including the last.
pub fn band_ring(outer: &[Vec2], inner: &[Vec2]) -> Vec<Vec2> {
    let outer = open_ring(outer);
    let inner = open_ring(inner);
    let (Some(&o0), Some(&i0)) = (outer.first(), inner.first()) else {
        return Vec::new();
    };
    if outer.len() < 3 || inner.len() < 3 {
        return Vec::new();
    }

    let mut strip = Vec::with_capacity(outer.len() + inner.len() + 3);
    strip.extend_from_slice(outer);
    strip.push(o0);
    strip.push(i0);
    strip.extend(inner.iter().skip(1).rev().copied());
    strip.push(i0);
    strip
}

/// Pavement, carriageway and pavement bands at cumulative inward offsets.
///
/// `None` when even the outer pavement cannot be formed.
pub fn ring_road(boundary: &[Vec2], section: &CrossSection) -> Option<RingRoad> {
    let d1 = section.setback;
    let d2 = d1 + section.outer_pavement;
    let d3 = d2 + section.carriageway;
    let d4 = d3 + section.inner_pavement;
    let edges = [d1, d2, d3, d4].map(|d| inward_offset(boundary, d));

    if edges[0].len() < 3 || edges[1].len() < 3 {
        return None;
    }

    let mut road = RingRoad::default();
    road.bands.push((Role::Pavement, band_ring(&edges[0], &edges[1])));
    if edges[2].len() >= 3 {
        road.bands
            .push((Role::Carriageway, band_ring(&edges[1], &edges[2])));
        road.centerline = inward_offset(boundary, d2 + section.carriageway * 0.5);
        if edges[3].len() >= 3 {
            road.bands.push((Role::Pavement, band_ring(&edges[2], &edges[3])));
        }
    }
    road.edges = edges;
    Some(road)
}

/// Filleted carriageway as a two-subpath even-odd path.
pub fn ring_road_path(road: &RingRoad, radius: f32, carriageway: f32) -> CurvedPath {
    let mut path = fillet_path(road.carriageway_outer(), radius);
    if road.carriageway_inner().len() >= 3 {
        path.extend(fillet_path(
            road.carriageway_inner(),
            (radius - carriageway).max(1.0),
        ));
    }
    path
}

/// Parallel parking along the inner carriageway edge. Metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParkingConfig {
    pub enabled: bool,
    /// Spacing between bay starts.
    pub interval: f32,
    pub bay_length: f32,
    pub bay_width: f32,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: 7.0,
            bay_length: 6.0,
            bay_width: 2.4,
        }
    }
}

/// Parking bays standing on the carriageway side of `edge`.
pub fn parking_bays(edge: &[Vec2], config: &ParkingConfig, scale: Scale) -> Vec<Vec<Vec2>> {
    let edge = open_ring(edge);
    let n = edge.len();
    let Some(orientation) = Orientation::of(edge) else {
        return Vec::new();
    };
    let interval = scale.units(config.interval);
    let length = scale.units(config.bay_length);
    let width = scale.units(config.bay_width);
    if n < 3 || interval <= 0.0 || length <= 0.0 {
        return Vec::new();
    }

    let mut bays = Vec::new();
    for i in 0..n {
        let (a, b) = (edge[i], edge[(i + 1) % n]);
        let len = a.distance(b);
        if len < length {
            continue;
        }
        let u = (b - a) / len;
        let mut outward = -orientation.inward_normal(u);
        if point_in_polygon((a + b) * 0.5 + outward * 0.1, edge) {
            outward = -outward;
        }

        let mut d = 0.0;
        while d < len - length {
            let start = a + u * d;
            let end = start + u * length;
            bays.push(vec![start, end, end + outward * width, start + outward * width]);
            d += interval;
        }
    }
    bays
}

/// Road polygon of fixed `half_width` around a centerline.
pub fn buffer_centerline(spine: &[Vec2], half_width: f32, closed: bool) -> Vec<Vec2> {
    let left = offset(spine, half_width, closed);
    let right = offset(spine, -half_width, closed);
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }
    if closed {
        band_ring(&left, &right)
    } else {
        let mut polygon = left;
        polygon.extend(right.into_iter().rev());
        polygon
    }
}

/// Carriageway and both pavements around a centerline, in drawing units.
pub fn centerline_road(
    spine: &[Vec2],
    carriageway: f32,
    footpath: f32,
    closed: bool,
) -> Vec<(Role, Vec<Vec2>)> {
    let half = carriageway * 0.5;
    let road = buffer_centerline(spine, half, closed);
    if road.len() < 3 {
        return Vec::new();
    }

    let mut out = vec![(Role::Carriageway, road)];
    if footpath > 0.0 {
        for side in [1.0, -1.0] {
            let inner = offset(spine, side * half, closed);
            let outer = offset(spine, side * (half + footpath), closed);
            let pavement = if closed {
                band_ring(&outer, &inner)
            } else {
                let mut strip = inner;
                strip.extend(outer.into_iter().rev());
                strip
            };
            if pavement.len() >= 3 {
                out.push((Role::Pavement, pavement));
            }
        }
    }
    out
}

/// Road strip of `width` cut through `ring` along the line `p1 -> p2`.
pub fn line_corridor(
    ring: &[Vec2],
    p1: Vec2,
    p2: Vec2,
    width: f32,
    kind: RoadKind,
) -> Option<Corridor> {
    let strip = clip_band(ring, p1, p2, width);
    if strip.len() < 3 {
        return None;
    }
    let (a, b) = line_chord(ring, p1, p2)?;
    Some(Corridor {
        strip,
        centerline: smallvec![a, b],
        kind,
    })
}

pub fn axis_corridor(
    ring: &[Vec2],
    axis: SplitAxis,
    at: f32,
    width: f32,
    kind: RoadKind,
) -> Option<Corridor> {
    let (p1, p2) = axis_line(axis, at);
    line_corridor(ring, p1, p2, width, kind)
}
