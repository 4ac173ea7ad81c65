//! Site subdivision engine.
//!
//! - Edge-aligned plot rows with prototype footprints
//! - Recursive bifurcation and alternative fill strategies
//! - Concentric road corridors, ring road and parking
//! - Entry/exit connectors and spine roads
//! - Whole-site layout, variants and summary metrics

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::{area, CurvedPath};

pub mod bifurcation;
pub mod connector;
pub mod corridor;
pub mod layout;
pub mod plots;
pub mod plugin;
pub mod prototypes;
pub mod road_network;
pub mod standards;
pub mod strategies;

pub use layout::{generate_layout, generate_variants, LayoutParams, LayoutSolution, LayoutSummary};
pub use plots::{generate_plots_along_edges, Plot, PlotFrontage, PlotSettings};
pub use prototypes::{Prototype, PrototypeChoice, PrototypeMix};
pub use road_network::{RoadKind, RoadNetwork};
pub use standards::{DensityProfile, RoadClass, RoadProfile, Setbacks, SocialCategory, SocialMix};
pub use strategies::Strategy;

/// Metres per drawing unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale(pub f32);

impl Default for Scale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Scale {
    /// Metres to drawing units.
    pub fn units(self, meters: f32) -> f32 {
        meters / self.0
    }

    pub fn meters(self, units: f32) -> f32 {
        units * self.0
    }

    /// Drawing-unit area to square metres.
    pub fn square_meters(self, area_units: f32) -> f32 {
        area_units * self.0 * self.0
    }
}

/// Semantic role of an output shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Plot,
    Carriageway,
    Pavement,
    /// Internal road corridor left between split blocks.
    InfraSpine,
    Parking,
    Green,
    Amenity,
    EntryExitRoad,
    EntryExitPavement,
}

impl Role {
    pub fn is_infra(self) -> bool {
        matches!(
            self,
            Self::Carriageway
                | Self::Pavement
                | Self::InfraSpine
                | Self::Parking
                | Self::EntryExitRoad
                | Self::EntryExitPavement
        )
    }

    /// Surfaces that carry vehicles.
    pub fn is_road(self) -> bool {
        matches!(self, Self::Carriageway | Self::InfraSpine | Self::EntryExitRoad)
    }

    pub fn is_open_space(self) -> bool {
        matches!(self, Self::Green | Self::Amenity)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Ring(Vec<Vec2>),
    Path(CurvedPath),
}

impl Shape {
    /// Polygon outline; curved paths are flattened.
    pub fn outline(&self) -> Vec<Vec2> {
        match self {
            Self::Ring(points) => points.clone(),
            Self::Path(path) => path.outline(),
        }
    }

    /// Area in drawing units.
    pub fn area(&self) -> f32 {
        match self {
            Self::Ring(points) => area(points),
            Self::Path(path) => path.area(),
        }
    }
}

/// One tagged output shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub role: Role,
    pub shape: Shape,
    /// Square metres.
    pub area: f32,
    pub social: Option<SocialCategory>,
    pub prototype: Option<Prototype>,
    pub footprints: Vec<Vec<Vec2>>,
}

impl Feature {
    pub fn ring(role: Role, points: Vec<Vec2>, scale: Scale) -> Self {
        let area = scale.square_meters(area(&points));
        Self {
            role,
            shape: Shape::Ring(points),
            area,
            social: None,
            prototype: None,
            footprints: Vec::new(),
        }
    }

    pub fn path(role: Role, path: CurvedPath, scale: Scale) -> Self {
        let area = scale.square_meters(path.area());
        Self {
            role,
            shape: Shape::Path(path),
            area,
            social: None,
            prototype: None,
            footprints: Vec::new(),
        }
    }
}

impl From<Plot> for Feature {
    fn from(plot: Plot) -> Self {
        Self {
            role: plot.role,
            shape: Shape::Ring(plot.vertices),
            area: plot.area,
            social: plot.social,
            prototype: plot.prototype,
            footprints: plot.footprints,
        }
    }
}

/// A road strip cut through a block, with its centerline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub strip: Vec<Vec2>,
    pub centerline: SmallVec<[Vec2; 8]>,
    pub kind: RoadKind,
}

/// Plots and internal corridors produced by a fill strategy.
#[derive(Clone, Debug, Default)]
pub struct FillOutput {
    pub plots: Vec<Plot>,
    pub corridors: Vec<Corridor>,
}
