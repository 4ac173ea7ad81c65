//! Planning standards: road cross-sections, density profiles, setbacks and
//! the social mix.
//!
//! All values are metric.

use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// Cross-section of a road: carriageway with a footpath on each side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadProfile {
    pub carriageway: f32,
    pub footpath: f32,
}

impl RoadProfile {
    pub const ARTERIAL: Self = Self::new(20.0, 4.0);
    pub const COLLECTOR: Self = Self::new(14.0, 3.0);
    pub const LOCAL: Self = Self::new(9.0, 2.0);
    pub const ACCESS: Self = Self::new(5.0, 1.0);

    pub const fn new(carriageway: f32, footpath: f32) -> Self {
        Self {
            carriageway,
            footpath,
        }
    }

    /// Carriageway plus both footpaths.
    pub fn total_width(&self) -> f32 {
        self.carriageway + 2.0 * self.footpath
    }
}

impl Default for RoadProfile {
    fn default() -> Self {
        Self::LOCAL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadClass {
    Arterial,
    Collector,
    Local,
    Access,
}

impl RoadClass {
    pub fn profile(self) -> RoadProfile {
        match self {
            Self::Arterial => RoadProfile::ARTERIAL,
            Self::Collector => RoadProfile::COLLECTOR,
            Self::Local => RoadProfile::LOCAL,
            Self::Access => RoadProfile::ACCESS,
        }
    }
}

/// Zoning density profile controlling minimum plot dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DensityProfile {
    High,
    #[default]
    Medium,
    Low,
    Commercial,
}

impl DensityProfile {
    /// Minimum plot frontage in metres.
    pub fn min_frontage(self) -> f32 {
        match self {
            Self::High => 7.5,
            Self::Medium => 10.5,
            Self::Low => 15.0,
            Self::Commercial => 13.5,
        }
    }

    /// Minimum plot area in square metres.
    pub fn min_area(self) -> f32 {
        match self {
            Self::High => 100.0,
            Self::Medium => 200.0,
            Self::Low => 400.0,
            Self::Commercial => 325.0,
        }
    }

    /// Permitted floor space index.
    pub fn fsi(self) -> f32 {
        match self {
            Self::High => 2.0,
            Self::Medium => 1.4,
            Self::Low => 0.75,
            Self::Commercial => 2.5,
        }
    }
}

/// Building setbacks from the plot edges, in the same unit as the plot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setbacks {
    pub front: f32,
    pub side: f32,
    pub rear: f32,
}

impl Default for Setbacks {
    fn default() -> Self {
        Self {
            front: 4.5,
            side: 2.0,
            rear: 3.5,
        }
    }
}

impl Setbacks {
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            front: self.front * factor,
            side: self.side * factor,
            rear: self.rear * factor,
        }
    }
}

/// Public realm targets as percentages of site area.
pub const GREEN_TARGET_PCT: f32 = 12.0;
pub const AMENITY_TARGET_PCT: f32 = 7.0;

/// Affordability tier of a plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialCategory {
    EwsLig,
    Mig,
    Hig,
}

impl SocialCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::EwsLig => "EWS/LIG",
            Self::Mig => "MIG",
            Self::Hig => "HIG",
        }
    }
}

/// Weights of the three affordability tiers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SocialMix {
    pub ews_lig: f32,
    pub mig: f32,
    pub hig: f32,
}

impl Default for SocialMix {
    fn default() -> Self {
        Self {
            ews_lig: 0.25,
            mig: 0.45,
            hig: 0.30,
        }
    }
}

impl SocialMix {
    /// Weighted draw of a category. An all-zero mix yields MIG.
    pub fn draw(&self, rng: &mut StdRng) -> SocialCategory {
        let total = self.ews_lig.max(0.0) + self.mig.max(0.0) + self.hig.max(0.0);
        if total <= 0.0 {
            return SocialCategory::Mig;
        }
        let roll: f32 = rng.gen_range(0.0..total);
        if roll < self.ews_lig.max(0.0) {
            SocialCategory::EwsLig
        } else if roll < self.ews_lig.max(0.0) + self.mig.max(0.0) {
            SocialCategory::Mig
        } else {
            SocialCategory::Hig
        }
    }
}
