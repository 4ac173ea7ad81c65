//! Fill strategies for the inner remainder of a site.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::overlap::polygons_overlap;
use crate::geometry::{area, bounds, centroid, open_ring, point_in_polygon, Orientation, SplitAxis};

use super::bifurcation::{bifurcate, BifurcationSettings};
use super::corridor::axis_corridor;
use super::plots::{generate_plots_along_edges, Plot};
use super::road_network::RoadKind;
use super::FillOutput;

/// Angular sectors of the radial strategy.
const RADIAL_SECTORS: usize = 8;
/// Upper bound on organic seeds per remainder.
const MAX_ORGANIC_SEEDS: usize = 50;
const SEED_ATTEMPTS: usize = 50;
/// Feeder roads are spaced this many plot widths apart.
const FEEDER_INTERVAL_PLOTS: f32 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Grid,
    Radial,
    Organic,
    Hierarchical,
    #[default]
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Grid,
        Strategy::Radial,
        Strategy::Organic,
        Strategy::Hierarchical,
        Strategy::Hybrid,
    ];

    /// Strategies cycled through by design variants.
    pub const VARIANT_CYCLE: [Strategy; 4] = [
        Strategy::Grid,
        Strategy::Radial,
        Strategy::Hybrid,
        Strategy::Hierarchical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Grid => "grid",
            Strategy::Radial => "radial",
            Strategy::Organic => "organic",
            Strategy::Hierarchical => "hierarchical",
            Strategy::Hybrid => "hybrid",
        }
    }

    pub fn for_variant(index: usize) -> Self {
        Self::VARIANT_CYCLE[index % Self::VARIANT_CYCLE.len()]
    }
}

pub fn fill_with_strategy(
    strategy: Strategy,
    remainder: &[Vec2],
    settings: &BifurcationSettings,
    rng: &mut StdRng,
) -> FillOutput {
    let remainder = open_ring(remainder);
    if remainder.len() < 3 {
        return FillOutput::default();
    }

    let out = match strategy {
        Strategy::Grid => grid_fill(remainder, settings, rng),
        Strategy::Radial => radial_fill(remainder, settings, rng),
        Strategy::Organic => organic_fill(remainder, settings, rng),
        Strategy::Hierarchical => hierarchical_fill(remainder, settings, rng),
        Strategy::Hybrid => bifurcate(remainder, settings, rng).0,
    };
    debug!(
        "{} fill: {} plots, {} corridors",
        strategy.label(),
        out.plots.len(),
        out.corridors.len()
    );
    out
}

/// Axis-aligned lattice of `width x depth` cells whose centers fall inside
/// the ring.
pub fn grid_fill(ring: &[Vec2], settings: &BifurcationSettings, rng: &mut StdRng) -> FillOutput {
    let plot = &settings.plot;
    let (w, d) = (plot.width, plot.depth);
    let mut out = FillOutput::default();
    if w <= 0.0 || d <= 0.0 {
        return out;
    }

    let rect = bounds(ring);
    let mut y = rect.min.y;
    while y < rect.max.y {
        let mut x = rect.min.x;
        while x < rect.max.x {
            let center = Vec2::new(x + w * 0.5, y + d * 0.5);
            if point_in_polygon(center, ring) {
                let cell = vec![
                    Vec2::new(x, y),
                    Vec2::new(x + w, y),
                    Vec2::new(x + w, y + d),
                    Vec2::new(x, y + d),
                ];
                let mut cell = Plot::cell(cell, plot.scale);
                let prototype = plot.pick_prototype(rng);
                plot.furnish(&mut cell, prototype, rng);
                out.plots.push(cell);
            }
            x += w;
        }
        y += d;
    }
    out
}

/// Annular cells in eight sectors around the ring's centroid.
pub fn radial_fill(ring: &[Vec2], settings: &BifurcationSettings, rng: &mut StdRng) -> FillOutput {
    let plot = &settings.plot;
    let depth = plot.depth;
    let mut out = FillOutput::default();
    if depth <= 0.0 {
        return out;
    }

    let center = centroid(ring);
    let reach = ring
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0_f32, f32::max);

    for i in 0..RADIAL_SECTORS {
        let a1 = i as f32 / RADIAL_SECTORS as f32 * TAU;
        let a2 = (i + 1) as f32 / RADIAL_SECTORS as f32 * TAU;
        let (u1, u2) = (Vec2::from_angle(a1), Vec2::from_angle(a2));
        let mid = Vec2::from_angle((a1 + a2) * 0.5);

        let mut r = depth;
        while r < reach {
            if point_in_polygon(center + mid * (r + depth * 0.5), ring) {
                let outer = r + depth;
                let cell = vec![
                    center + u1 * r,
                    center + u2 * r,
                    center + u2 * outer,
                    center + u1 * outer,
                ];
                let mut cell = Plot::cell(cell, plot.scale);
                cell.social = Some(plot.social_mix.draw(rng));
                cell.prototype = Some(plot.pick_prototype(rng));
                out.plots.push(cell);
            }
            r += depth;
        }
    }
    out
}

/// Randomly rotated 4 to 6 sided cells grown from spaced seeds.
pub fn organic_fill(ring: &[Vec2], settings: &BifurcationSettings, rng: &mut StdRng) -> FillOutput {
    let plot = &settings.plot;
    let depth = plot.depth;
    let mut out = FillOutput::default();
    if depth <= 0.0 || plot.width <= 0.0 {
        return out;
    }

    let cell_m2 = plot.scale.meters(depth) * plot.scale.meters(plot.width) * 2.5;
    let wanted = (plot.scale.square_meters(area(ring)) / cell_m2).floor() as usize;
    let rect = bounds(ring);
    let spacing = depth * 2.0;

    let mut seeds: Vec<Vec2> = Vec::new();
    for _ in 0..wanted.min(MAX_ORGANIC_SEEDS) {
        for _ in 0..SEED_ATTEMPTS {
            let p = Vec2::new(
                rng.gen_range(rect.min.x..=rect.max.x),
                rng.gen_range(rect.min.y..=rect.max.y),
            );
            if point_in_polygon(p, ring) && seeds.iter().all(|s| s.distance(p) >= spacing) {
                seeds.push(p);
                break;
            }
        }
    }

    for seed in seeds {
        let size = depth * rng.gen_range(0.8..1.2);
        let rotation = rng.gen_range(0.0..TAU);
        let sides = rng.gen_range(4..=6);
        let cell: Vec<Vec2> = (0..sides)
            .map(|i| seed + Vec2::from_angle(rotation + i as f32 / sides as f32 * TAU) * size)
            .collect();

        if !cell.iter().all(|p| point_in_polygon(*p, ring))
            || out.plots.iter().any(|p| polygons_overlap(&cell, &p.vertices))
        {
            continue;
        }
        let mut cell = Plot::cell(cell, plot.scale);
        let prototype = plot.pick_prototype(rng);
        plot.furnish(&mut cell, prototype, rng);
        out.plots.push(cell);
    }
    out
}

/// One spine through the middle, feeders across each half and edge plots in
/// every resulting block.
pub fn hierarchical_fill(
    ring: &[Vec2],
    settings: &BifurcationSettings,
    rng: &mut StdRng,
) -> FillOutput {
    let mut out = FillOutput::default();
    let carriage = settings.road_width;
    let gap = carriage + settings.footpath * 2.0;

    let rect = bounds(ring);
    let size = rect.size();
    let (spine_axis, feeder_axis, mid) = if size.x > size.y {
        (SplitAxis::Vertical, SplitAxis::Horizontal, rect.center().x)
    } else {
        (SplitAxis::Horizontal, SplitAxis::Vertical, rect.center().y)
    };

    if let Some(spine) = axis_corridor(ring, spine_axis, mid, carriage, RoadKind::Spine) {
        out.corridors.push(spine);
    }

    let (low, high) = crate::geometry::split_axis(ring, spine_axis, mid, gap);
    let interval = settings.plot.width * FEEDER_INTERVAL_PLOTS;

    for mut block in [low, high] {
        if block.len() < 3 {
            continue;
        }
        let block_rect = bounds(&block);
        let (start, end) = match feeder_axis {
            SplitAxis::Vertical => (block_rect.min.x, block_rect.max.x),
            SplitAxis::Horizontal => (block_rect.min.y, block_rect.max.y),
        };

        let mut pos = start + interval;
        while interval > 0.0 && pos < end && block.len() >= 3 {
            if let Some(feeder) = axis_corridor(&block, feeder_axis, pos, carriage, RoadKind::Feeder) {
                out.corridors.push(feeder);
            }
            let (before, after) = crate::geometry::split_axis(&block, feeder_axis, pos, gap);
            out.plots.extend(edge_plots(&before, settings, rng));
            block = after;
            pos += interval;
        }
        out.plots.extend(edge_plots(&block, settings, rng));
    }
    out
}

fn edge_plots(block: &[Vec2], settings: &BifurcationSettings, rng: &mut StdRng) -> Vec<Plot> {
    if block.len() < 3 {
        return Vec::new();
    }
    generate_plots_along_edges(block, Orientation::of(block), &[], &settings.plot, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_ring;
    use crate::subdivision::bifurcation::BifurcationConfig;
    use crate::subdivision::plots::PlotSettings;
    use crate::subdivision::prototypes::{Prototype, PrototypeChoice};
    use crate::subdivision::standards::{DensityProfile, Setbacks, SocialMix};
    use crate::subdivision::Scale;
    use rand::SeedableRng;

    fn settings() -> BifurcationSettings {
        BifurcationSettings {
            plot: PlotSettings {
                depth: 20.0,
                width: 12.0,
                density: DensityProfile::Medium,
                prototypes: PrototypeChoice::Fixed(Prototype::Compact),
                setbacks: Setbacks::default(),
                social_mix: SocialMix::default(),
                scale: Scale(1.0),
            },
            road_width: 9.0,
            footpath: 2.0,
            garden: 3.0,
            green_pct: 12.0,
            amenity_pct: 7.0,
            config: BifurcationConfig::default(),
        }
    }

    #[test]
    fn grid_cells_are_centered_inside() {
        let ring = rect_ring(Vec2::ZERO, Vec2::new(120.0, 100.0));
        let mut rng = StdRng::seed_from_u64(1);
        let out = grid_fill(&ring, &settings(), &mut rng);
        // 10 columns by 5 rows.
        assert_eq!(out.plots.len(), 50);
        for plot in &out.plots {
            assert!((plot.area - 240.0).abs() < 1e-3);
            assert!(plot.social.is_some());
            assert!(!plot.footprints.is_empty());
        }
    }

    #[test]
    fn radial_sectors_stay_inside() {
        let ring = rect_ring(Vec2::new(-100.0, -100.0), Vec2::splat(100.0));
        let mut rng = StdRng::seed_from_u64(1);
        let out = radial_fill(&ring, &settings(), &mut rng);
        assert!(out.plots.len() >= RADIAL_SECTORS * 3);
        for plot in &out.plots {
            assert_eq!(plot.vertices.len(), 4);
            assert!(plot.area > 0.0);
        }
    }

    #[test]
    fn organic_cells_are_inside_and_disjoint() {
        let ring = rect_ring(Vec2::ZERO, Vec2::splat(300.0));
        let mut rng = StdRng::seed_from_u64(17);
        let out = organic_fill(&ring, &settings(), &mut rng);
        assert!(!out.plots.is_empty());
        for (i, a) in out.plots.iter().enumerate() {
            assert!((4..=6).contains(&a.vertices.len()));
            assert!(a.vertices.iter().all(|p| point_in_polygon(*p, &ring)));
            for b in &out.plots[i + 1..] {
                assert!(!polygons_overlap(&a.vertices, &b.vertices));
            }
        }
    }

    #[test]
    fn organic_fill_is_reproducible() {
        let ring = rect_ring(Vec2::ZERO, Vec2::splat(300.0));
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            organic_fill(&ring, &settings(), &mut rng).plots
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn hierarchical_has_spine_and_feeders() {
        let ring = rect_ring(Vec2::ZERO, Vec2::new(320.0, 200.0));
        let mut rng = StdRng::seed_from_u64(9);
        let out = hierarchical_fill(&ring, &settings(), &mut rng);
        let spines = out.corridors.iter().filter(|c| c.kind == RoadKind::Spine).count();
        let feeders = out.corridors.iter().filter(|c| c.kind == RoadKind::Feeder).count();
        assert_eq!(spines, 1);
        // Feeders at y = 96 and y = 192 in each half.
        assert_eq!(feeders, 4);
        assert!(!out.plots.is_empty());

        let spine = &out.corridors[0];
        for plot in &out.plots {
            assert!(!polygons_overlap(&plot.vertices, &spine.strip));
        }
    }

    #[test]
    fn every_strategy_handles_a_degenerate_remainder() {
        let sliver = vec![Vec2::ZERO, Vec2::new(10.0, 0.0)];
        for strategy in Strategy::ALL {
            let mut rng = StdRng::seed_from_u64(0);
            let out = fill_with_strategy(strategy, &sliver, &settings(), &mut rng);
            assert!(out.plots.is_empty());
        }
    }

    #[test]
    fn variant_cycle_wraps() {
        assert_eq!(Strategy::for_variant(0), Strategy::Grid);
        assert_eq!(Strategy::for_variant(2), Strategy::Hybrid);
        assert_eq!(Strategy::for_variant(7), Strategy::Hierarchical);
        assert!(Strategy::ALL.iter().all(|s| !s.label().is_empty()));
    }
}
