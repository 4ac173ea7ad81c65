//! Road centerline graph for a generated layout.
//!
//! Uses petgraph for the underlying graph structure. Nodes are snapped so
//! that spines and connectors share junctions with the ring road.

use bevy::prelude::*;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::polyline_length;

/// A node in the road network (junction or road end).
#[derive(Clone, Debug)]
pub struct RoadNode {
    pub position: Vec2,
    pub node_type: RoadNodeType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoadNodeType {
    Junction,
    Endpoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadKind {
    Ring,
    Spine,
    Feeder,
    Connector,
}

/// A road segment between two nodes.
#[derive(Clone, Debug)]
pub struct RoadEdge {
    /// Centerline points including both ends.
    pub points: SmallVec<[Vec2; 8]>,
    pub kind: RoadKind,
    /// Length in drawing units.
    pub length: f32,
}

impl RoadEdge {
    pub fn new(points: SmallVec<[Vec2; 8]>, kind: RoadKind) -> Self {
        let length = polyline_length(&points);
        Self {
            points,
            kind,
            length,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RoadNetwork {
    pub graph: UnGraph<RoadNode, RoadEdge>,
    node_positions: Vec<(NodeIndex, Vec2)>,
}

impl RoadNetwork {
    pub fn add_node(&mut self, position: Vec2, node_type: RoadNodeType) -> NodeIndex {
        let idx = self.graph.add_node(RoadNode {
            position,
            node_type,
        });
        self.node_positions.push((idx, position));
        idx
    }

    /// Find the nearest node within a radius.
    pub fn find_nearest(&self, position: Vec2, max_distance: f32) -> Option<NodeIndex> {
        self.node_positions
            .iter()
            .map(|&(idx, pos)| (idx, position.distance(pos)))
            .filter(|&(_, dist)| dist <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }

    /// Reuse a node within `snap_distance`, or create a new endpoint.
    pub fn snap_or_create(&mut self, position: Vec2, snap_distance: f32) -> NodeIndex {
        if let Some(existing) = self.find_nearest(position, snap_distance) {
            if let Some(node) = self.graph.node_weight_mut(existing) {
                node.node_type = RoadNodeType::Junction;
            }
            existing
        } else {
            self.add_node(position, RoadNodeType::Endpoint)
        }
    }

    /// Add an open centerline as a single edge between its end nodes.
    pub fn add_road(&mut self, points: &[Vec2], kind: RoadKind, snap_distance: f32) {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return;
        };
        if points.len() < 2 {
            return;
        }
        let a = self.snap_or_create(first, snap_distance);
        let b = self.snap_or_create(last, snap_distance);
        self.graph
            .add_edge(a, b, RoadEdge::new(points.iter().copied().collect(), kind));
    }

    /// Add a closed loop, one edge per segment.
    pub fn add_loop(&mut self, ring: &[Vec2], kind: RoadKind, snap_distance: f32) {
        let n = ring.len();
        if n < 3 {
            return;
        }
        for i in 0..n {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            self.add_road(&[a, b], kind, snap_distance);
        }
    }

    /// Nearest point on any edge of the given kind.
    pub fn nearest_point_on(&self, kind: RoadKind, position: Vec2) -> Option<Vec2> {
        self.edges()
            .filter(|e| e.kind == kind)
            .flat_map(|e| e.points.windows(2).map(|w| (w[0], w[1])).collect::<Vec<_>>())
            .map(|(a, b)| crate::geometry::closest_point_on_segment(position, a, b))
            .min_by(|p, q| {
                position
                    .distance_squared(*p)
                    .total_cmp(&position.distance_squared(*q))
            })
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &RoadNode)> {
        self.graph.node_indices().map(|i| (i, &self.graph[i]))
    }

    pub fn edges(&self) -> impl Iterator<Item = &RoadEdge> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    /// Centerline length in drawing units, optionally for one kind only.
    pub fn total_length(&self, kind: Option<RoadKind>) -> f32 {
        self.edges()
            .filter(|e| kind.map_or(true, |k| e.kind == k))
            .map(|e| e.length)
            .sum()
    }
}
