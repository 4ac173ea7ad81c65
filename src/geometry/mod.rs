//! Planar geometry kernel.
//!
//! - Ring measurements and predicates
//! - Parallel offsetting
//! - Half-plane clipping and gap splits
//! - Separating axis overlap
//! - Corner fillets and curved paths
//! - Bulged boundary resolution
//!
//! All routines work in drawing units. Degenerate results come back as empty
//! vectors, never as errors.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod bulge;
pub mod clip;
pub mod fillet;
pub mod offset;
pub mod overlap;
pub mod primitives;

pub use bulge::{arc_midpoint, bulge_from_midpoint, resolve_bulged_ring, BulgeVertex};
pub use clip::{
    axis_line, clip_band, clip_half_plane, line_chord, split_axis, split_with_gap, Side, SplitAxis,
};
pub use fillet::{fillet_path, fillet_polyline, CurvedPath, PathCommand};
pub use offset::{inward_offset, offset};
pub use overlap::polygons_overlap;
pub use primitives::*;

/// Winding of a ring, derived once from its signed area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
}

impl Orientation {
    /// `None` for rings without enclosed area.
    pub fn of(ring: &[Vec2]) -> Option<Self> {
        let signed = signed_area(ring);
        if signed > EDGE_EPSILON {
            Some(Self::CounterClockwise)
        } else if signed < -EDGE_EPSILON {
            Some(Self::Clockwise)
        } else {
            None
        }
    }

    /// Unit normal pointing into the ring for an edge running along `dir`.
    pub fn inward_normal(self, dir: Vec2) -> Vec2 {
        let left = dir.normalize_or_zero().perp();
        match self {
            Self::CounterClockwise => left,
            Self::Clockwise => -left,
        }
    }
}
