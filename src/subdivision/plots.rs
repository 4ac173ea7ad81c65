//! Edge-aligned plot generation.
//!
//! Walks every boundary edge, cutting rectangular cells that reach a fixed
//! depth into the polygon. Cells that would overlap an accepted cell or an
//! externally supplied ring are dropped.

use bevy::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::geometry::overlap::polygons_overlap;
use crate::geometry::{open_ring, point_in_polygon, Orientation};

use super::prototypes::{Prototype, PrototypeChoice};
use super::standards::{DensityProfile, Setbacks, SocialCategory, SocialMix};
use super::{Role, Scale};

/// Distance of the probe point used to confirm an inward normal.
const INWARD_PROBE: f32 = 0.1;

/// Cells narrower than this share of the minimum frontage end an edge.
pub const MIN_FRONTAGE_SHARE: f32 = 0.8;

/// The boundary edge a plot fronts onto.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotFrontage {
    pub edge_index: usize,
    /// Frontage width in drawing units.
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub vertices: Vec<Vec2>,
    /// Square metres.
    pub area: f32,
    /// `Plot`, or `Green`/`Amenity` once reclassified.
    pub role: Role,
    pub social: Option<SocialCategory>,
    pub prototype: Option<Prototype>,
    pub footprints: Vec<Vec<Vec2>>,
    pub frontage: Option<PlotFrontage>,
}

impl Plot {
    /// A bare cell without prototype or social tier.
    pub fn cell(vertices: Vec<Vec2>, scale: Scale) -> Self {
        let area = scale.square_meters(crate::geometry::area(&vertices));
        Self {
            vertices,
            area,
            role: Role::Plot,
            social: None,
            prototype: None,
            footprints: Vec::new(),
            frontage: None,
        }
    }

    pub fn is_buildable(&self) -> bool {
        self.role == Role::Plot
    }

    /// Turn the plot into open space, dropping its buildings.
    pub fn reclassify(&mut self, role: Role) {
        self.role = role;
        self.social = None;
        self.prototype = None;
        self.footprints.clear();
    }
}

/// Parameters for one pass of edge-aligned plots, in drawing units.
#[derive(Clone, Debug)]
pub struct PlotSettings {
    pub depth: f32,
    /// Cell width in fixed-prototype mode.
    pub width: f32,
    pub density: DensityProfile,
    pub prototypes: PrototypeChoice,
    /// Building setbacks in drawing units.
    pub setbacks: Setbacks,
    pub social_mix: SocialMix,
    pub scale: Scale,
}

impl PlotSettings {
    pub fn min_frontage(&self) -> f32 {
        self.scale.units(self.density.min_frontage())
    }

    pub fn pick_prototype(&self, rng: &mut StdRng) -> Prototype {
        match &self.prototypes {
            PrototypeChoice::Fixed(prototype) => *prototype,
            PrototypeChoice::Mixed(mix) => mix.sample(rng),
        }
    }

    /// Prototype and target width for the next cell.
    fn next_cell(&self, rng: &mut StdRng) -> (Prototype, f32) {
        let prototype = self.pick_prototype(rng);
        let width = match self.prototypes {
            PrototypeChoice::Fixed(_) => self.width,
            PrototypeChoice::Mixed(_) => {
                let depth_m = self.scale.meters(self.depth).max(f32::EPSILON);
                let width_m = prototype.typical_plot_area() / depth_m;
                self.scale.units(width_m).max(self.min_frontage())
            }
        };
        (prototype, width)
    }

    /// Fill footprints and social tier for a freshly accepted cell.
    pub fn furnish(&self, plot: &mut Plot, prototype: Prototype, rng: &mut StdRng) {
        plot.social = Some(self.social_mix.draw(rng));
        plot.prototype = Some(prototype);
        if plot.vertices.len() == 4 {
            let origin = plot.vertices[0];
            let along = plot.vertices[1] - origin;
            let inward = plot.vertices[3] - origin;
            let (w, d) = (along.length(), inward.length());
            if w > 0.0 && d > 0.0 {
                let (u, n) = (along / w, inward / d);
                plot.footprints = prototype
                    .footprints(w, d, &self.setbacks)
                    .into_iter()
                    .map(|fp| fp.into_iter().map(|p| origin + u * p.x + n * p.y).collect())
                    .collect();
            }
        }
    }
}

/// Cut plot cells along every edge of `boundary`.
///
/// `orientation` is derived from the ring when not supplied. Each candidate
/// normal is still checked against the ring and flipped if it points out.
pub fn generate_plots_along_edges(
    boundary: &[Vec2],
    orientation: Option<Orientation>,
    existing: &[Vec<Vec2>],
    settings: &PlotSettings,
    rng: &mut StdRng,
) -> Vec<Plot> {
    let ring = open_ring(boundary);
    let n = ring.len();
    let Some(orientation) = orientation.or_else(|| Orientation::of(ring)) else {
        return Vec::new();
    };
    if n < 3 || settings.depth <= 0.0 {
        return Vec::new();
    }

    let min_frontage = settings.min_frontage();
    let mut accepted: Vec<Plot> = Vec::new();

    for i in 0..n {
        let start = ring[i];
        let end = ring[(i + 1) % n];
        let len = start.distance(end);
        if len < min_frontage || len < f32::EPSILON {
            continue;
        }

        let along = (end - start) / len;
        let mut inward = orientation.inward_normal(along);
        let midpoint = (start + end) * 0.5;
        if !point_in_polygon(midpoint + inward * INWARD_PROBE, ring) {
            inward = -inward;
        }

        let mut walked = 0.0;
        while walked < len - 1e-3 {
            let (prototype, target) = settings.next_cell(rng);
            let width = target.min(len - walked);
            if width < MIN_FRONTAGE_SHARE * min_frontage {
                break;
            }

            let front_a = start + along * walked;
            let front_b = start + along * (walked + width);
            let depth = inward * settings.depth;
            let cell = vec![front_a, front_b, front_b + depth, front_a + depth];
            walked += width;

            let blocked = accepted
                .iter()
                .any(|p| polygons_overlap(&cell, &p.vertices))
                || existing.iter().any(|r| polygons_overlap(&cell, r));
            if blocked {
                continue;
            }

            let mut plot = Plot::cell(cell, settings.scale);
            plot.frontage = Some(PlotFrontage {
                edge_index: i,
                width,
            });
            settings.furnish(&mut plot, prototype, rng);
            accepted.push(plot);
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_ring;
    use crate::subdivision::prototypes::PrototypeMix;
    use rand::SeedableRng;

    fn settings(prototypes: PrototypeChoice) -> PlotSettings {
        PlotSettings {
            depth: 20.0,
            width: 12.0,
            density: DensityProfile::Medium,
            prototypes,
            setbacks: Setbacks::default(),
            social_mix: SocialMix::default(),
            scale: Scale(1.0),
        }
    }

    #[test]
    fn square_site_gets_a_row_on_every_edge() {
        let site = rect_ring(Vec2::ZERO, Vec2::splat(100.0));
        let mut rng = StdRng::seed_from_u64(11);
        let plots = generate_plots_along_edges(
            &site,
            None,
            &[],
            &settings(PrototypeChoice::Fixed(Prototype::Compact)),
            &mut rng,
        );

        let mut per_edge = [0usize; 4];
        for plot in &plots {
            per_edge[plot.frontage.unwrap().edge_index] += 1;
        }
        assert!(per_edge.iter().all(|&c| c >= 4), "{per_edge:?}");

        for (i, a) in plots.iter().enumerate() {
            for b in &plots[i + 1..] {
                assert!(!polygons_overlap(&a.vertices, &b.vertices));
            }
        }
    }

    #[test]
    fn clockwise_site_still_grows_inward() {
        let mut site = rect_ring(Vec2::ZERO, Vec2::splat(100.0));
        site.reverse();
        let mut rng = StdRng::seed_from_u64(5);
        let plots = generate_plots_along_edges(
            &site,
            // Deliberately wrong orientation: the probe must correct it.
            Some(Orientation::CounterClockwise),
            &[],
            &settings(PrototypeChoice::Fixed(Prototype::Compact)),
            &mut rng,
        );
        assert!(!plots.is_empty());
        for plot in &plots {
            let c = crate::geometry::vertex_average(&plot.vertices);
            assert!(point_in_polygon(c, &site));
        }
    }

    #[test]
    fn frontage_never_drops_below_minimum_share() {
        let site = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(87.0, 0.0),
            Vec2::new(95.0, 61.0),
            Vec2::new(12.0, 70.0),
        ];
        let s = settings(PrototypeChoice::Mixed(PrototypeMix::default()));
        let mut rng = StdRng::seed_from_u64(99);
        let plots = generate_plots_along_edges(&site, None, &[], &s, &mut rng);
        assert!(!plots.is_empty());
        for plot in &plots {
            let frontage = plot.frontage.unwrap();
            assert!(frontage.width >= MIN_FRONTAGE_SHARE * s.min_frontage() - 1e-4);
        }
    }

    #[test]
    fn existing_rings_block_cells() {
        let site = rect_ring(Vec2::ZERO, Vec2::new(100.0, 40.0));
        let blocker = rect_ring(Vec2::new(-10.0, -10.0), Vec2::new(110.0, 25.0));
        let mut rng = StdRng::seed_from_u64(2);
        let plots = generate_plots_along_edges(
            &site,
            None,
            &[blocker.clone()],
            &settings(PrototypeChoice::Fixed(Prototype::Compact)),
            &mut rng,
        );
        assert!(plots.iter().all(|p| !polygons_overlap(&p.vertices, &blocker)));
    }

    #[test]
    fn accepted_plots_carry_footprints_and_tier() {
        let site = rect_ring(Vec2::ZERO, Vec2::splat(60.0));
        let mut rng = StdRng::seed_from_u64(4);
        let plots = generate_plots_along_edges(
            &site,
            None,
            &[],
            &settings(PrototypeChoice::Fixed(Prototype::Twin)),
            &mut rng,
        );
        for plot in &plots {
            assert_eq!(plot.footprints.len(), 2);
            assert!(plot.social.is_some());
            assert!((plot.area - plot.frontage.unwrap().width * 20.0).abs() < 1e-2);
            for fp in &plot.footprints {
                for p in fp {
                    assert!(point_in_polygon(*p, &plot.vertices));
                }
            }
        }
    }
}
