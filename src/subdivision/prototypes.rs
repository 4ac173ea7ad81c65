//! Building prototypes and their parametric footprint rules.
//!
//! Footprints are produced in plot-local coordinates: `x` runs along the
//! frontage from 0 to the plot width, `y` runs inward from the frontage to
//! the plot depth.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

use super::standards::Setbacks;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prototype {
    Compact,
    LShape,
    UShape,
    Courtyard,
    Twin,
    TownhouseMid,
    TownhouseEnd,
}

impl Prototype {
    pub const ALL: [Prototype; 7] = [
        Prototype::Compact,
        Prototype::LShape,
        Prototype::Courtyard,
        Prototype::UShape,
        Prototype::TownhouseEnd,
        Prototype::TownhouseMid,
        Prototype::Twin,
    ];

    /// Typical plot area in square metres.
    pub fn typical_plot_area(self) -> f32 {
        match self {
            Self::Compact => 175.0,
            Self::LShape => 250.0,
            Self::Courtyard => 300.0,
            Self::UShape => 375.0,
            Self::TownhouseEnd => 100.0,
            Self::TownhouseMid => 85.0,
            Self::Twin => 175.0,
        }
    }

    /// Building footprints within a `width` x `depth` plot.
    ///
    /// Returns nothing when the setbacks leave no buildable interior.
    pub fn footprints(self, width: f32, depth: f32, setbacks: &Setbacks) -> Vec<Vec<Vec2>> {
        let Setbacks { front, side, rear } = *setbacks;
        let iw = width - 2.0 * side;
        let id = depth - front - rear;
        let back = depth - rear;
        let right = width - side;
        if iw <= 0.0 || id <= 0.0 {
            return Vec::new();
        }

        let v = Vec2::new;
        let quad = |x0: f32, y0: f32, x1: f32, y1: f32| vec![v(x0, y0), v(x1, y0), v(x1, y1), v(x0, y1)];

        match self {
            Self::Compact => vec![quad(side, front, right, back)],
            Self::LShape => {
                let (bx, by) = (side + iw * 0.4, front + id * 0.4);
                vec![vec![
                    v(side, front),
                    v(right, front),
                    v(right, by),
                    v(bx, by),
                    v(bx, back),
                    v(side, back),
                ]]
            }
            Self::UShape => {
                let th = iw * 0.3;
                let inner = front + id * 0.3;
                vec![vec![
                    v(side, back),
                    v(side, front),
                    v(right, front),
                    v(right, back),
                    v(right - th, back),
                    v(right - th, inner),
                    v(side + th, inner),
                    v(side + th, back),
                ]]
            }
            Self::Courtyard => {
                let th = iw.min(id) * 0.25;
                vec![
                    quad(side, front, right, front + th),
                    quad(side, back - th, right, back),
                    quad(side, front + th, side + th, back - th),
                    quad(right - th, front + th, right, back - th),
                ]
            }
            Self::Twin => {
                let gap = iw * 0.1;
                let unit = (iw - gap) * 0.5;
                vec![
                    quad(side, front, side + unit, back),
                    quad(right - unit, front, right, back),
                ]
            }
            Self::TownhouseMid => vec![quad(0.0, front, width, back)],
            Self::TownhouseEnd => vec![quad(side, front, width, back)],
        }
    }
}

/// Relative weights for sampling prototypes in mixed mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrototypeMix {
    pub weights: Vec<(Prototype, f32)>,
}

impl Default for PrototypeMix {
    fn default() -> Self {
        Self {
            weights: vec![
                (Prototype::Compact, 20.0),
                (Prototype::LShape, 20.0),
                (Prototype::Courtyard, 20.0),
                (Prototype::UShape, 10.0),
                (Prototype::TownhouseEnd, 10.0),
                (Prototype::TownhouseMid, 10.0),
                (Prototype::Twin, 10.0),
            ],
        }
    }
}

impl PrototypeMix {
    /// Weighted draw. Falls back to `Compact` when no weight is positive.
    pub fn sample(&self, rng: &mut StdRng) -> Prototype {
        let total: f32 = self.weights.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return Prototype::Compact;
        }

        let mut roll = rng.gen_range(0.0..total);
        for &(prototype, weight) in &self.weights {
            let weight = weight.max(0.0);
            if roll < weight {
                return prototype;
            }
            roll -= weight;
        }
        Prototype::Compact
    }
}

/// How plot cells pick their prototype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PrototypeChoice {
    /// Every cell uses one prototype at the requested plot width.
    Fixed(Prototype),
    /// Each cell samples a prototype and sizes itself from its typical area.
    Mixed(PrototypeMix),
}

impl Default for PrototypeChoice {
    fn default() -> Self {
        Self::Mixed(PrototypeMix::default())
    }
}
