//! Recursive bifurcation of an inner remainder into plot blocks.
//!
//! Blocks wider than a few plot rows are split at their bounding-box midpoint
//! with a road gap. Small enough blocks get one row of edge plots and a
//! second row on the inset remainder. The recursion runs on an explicit
//! work-list and keeps the depth cap and strict-shrink guards.

use bevy::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::geometry::{
    area, bounds, centroid, inward_offset, open_ring, split_axis, Orientation, SplitAxis,
};

use super::corridor::axis_corridor;
use super::plots::{generate_plots_along_edges, Plot, PlotSettings};
use super::road_network::RoadKind;
use super::{FillOutput, Role};

/// Recursion guards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BifurcationConfig {
    pub max_depth: u32,
    /// A block splits once its bounding box exceeds this many plot depths
    /// plus one road width.
    pub split_rows: f32,
    /// A split piece is only visited if its area is below this share of the
    /// parent.
    pub shrink_guard: f32,
    /// Upper bound on the second-row inset, as a share of the block area.
    pub second_row_ceiling: f32,
    /// Blocks smaller than this many squared plot depths are dropped.
    pub min_area_factor: f32,
    /// Smallest plot depth, in drawing units, worth recursing on.
    pub depth_epsilon: f32,
}

impl Default for BifurcationConfig {
    fn default() -> Self {
        Self {
            max_depth: 40,
            split_rows: 5.0,
            shrink_guard: 0.98,
            second_row_ceiling: 0.9,
            min_area_factor: 0.1,
            depth_epsilon: 0.1,
        }
    }
}

/// Everything the hybrid fill needs, in drawing units.
#[derive(Clone, Debug)]
pub struct BifurcationSettings {
    pub plot: PlotSettings,
    /// Gap left by every split.
    pub road_width: f32,
    /// Pavement beside internal roads.
    pub footpath: f32,
    /// Garden strip between back-to-back plot rows.
    pub garden: f32,
    /// Percent of each block's area turned into green.
    pub green_pct: f32,
    pub amenity_pct: f32,
    pub config: BifurcationConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BifurcationStats {
    pub blocks: usize,
    pub splits: usize,
    pub max_level: u32,
}

#[derive(Clone, Copy, Debug)]
enum NodeKind {
    Split,
    Fill { block_area: f32, center: Vec2 },
}

struct Node {
    kind: NodeKind,
    parent: Option<usize>,
    plots: Vec<Plot>,
}

struct Pending {
    ring: Vec<Vec2>,
    level: u32,
    parent: Option<usize>,
}

/// Hybrid fill of `remainder`.
pub fn fill_inner_area(remainder: &[Vec2], settings: &BifurcationSettings, rng: &mut StdRng) -> FillOutput {
    bifurcate(remainder, settings, rng).0
}

/// Hybrid fill with traversal statistics.
pub fn bifurcate(
    remainder: &[Vec2],
    settings: &BifurcationSettings,
    rng: &mut StdRng,
) -> (FillOutput, BifurcationStats) {
    let cfg = &settings.config;
    let depth = settings.plot.depth;
    let scale = settings.plot.scale;

    let mut stats = BifurcationStats::default();
    let mut corridors = Vec::new();
    let mut nodes: Vec<Node> = Vec::new();
    let mut pending = vec![Pending {
        ring: open_ring(remainder).to_vec(),
        level: 0,
        parent: None,
    }];

    while let Some(Pending {
        ring,
        level,
        parent,
    }) = pending.pop()
    {
        if level > cfg.max_depth || depth < cfg.depth_epsilon || ring.len() < 3 {
            continue;
        }
        let current = area(&ring);
        if current < depth * depth * cfg.min_area_factor {
            continue;
        }
        stats.max_level = stats.max_level.max(level);

        let rect = bounds(&ring);
        let size = rect.size();
        let limit = depth * cfg.split_rows + settings.road_width;
        let id = nodes.len();

        if size.x > limit || size.y > limit {
            let (axis, at) = if size.x > size.y {
                (SplitAxis::Vertical, rect.center().x)
            } else {
                (SplitAxis::Horizontal, rect.center().y)
            };
            nodes.push(Node {
                kind: NodeKind::Split,
                parent,
                plots: Vec::new(),
            });
            stats.splits += 1;

            if let Some(corridor) = axis_corridor(&ring, axis, at, settings.road_width, RoadKind::Spine) {
                corridors.push(corridor);
            }

            let (low, high) = split_axis(&ring, axis, at, settings.road_width);
            // Pushed high first so the low piece is filled first.
            for piece in [high, low] {
                if piece.len() >= 3 && area(&piece) < current * cfg.shrink_guard {
                    pending.push(Pending {
                        ring: piece,
                        level: level + 1,
                        parent: Some(id),
                    });
                }
            }
            continue;
        }

        let plots = generate_plots_along_edges(&ring, Orientation::of(&ring), &[], &settings.plot, rng);
        let inset = inward_offset(&ring, 2.0 * depth + settings.garden);
        if inset.len() >= 3 {
            let inset_area = area(&inset);
            if inset_area > depth * depth && inset_area < current * cfg.second_row_ceiling {
                pending.push(Pending {
                    ring: inset,
                    level: level + 1,
                    parent: Some(id),
                });
            }
        }

        nodes.push(Node {
            kind: NodeKind::Fill {
                block_area: scale.square_meters(current),
                center: rect.center(),
            },
            parent,
            plots,
        });
        stats.blocks += 1;
    }

    // Children always sit after their parent, so a reverse sweep finishes
    // every subtree before its parent allocates open space.
    let mut gathered: Vec<Vec<Plot>> = (0..nodes.len()).map(|_| Vec::new()).collect();
    let mut plots = Vec::new();
    for id in (0..nodes.len()).rev() {
        let mut level_plots = std::mem::take(&mut nodes[id].plots);
        level_plots.append(&mut gathered[id]);

        if let NodeKind::Fill { block_area, center } = nodes[id].kind {
            allocate_open_space(
                &mut level_plots,
                block_area,
                center,
                settings.green_pct,
                settings.amenity_pct,
            );
        }

        match nodes[id].parent {
            Some(parent) => gathered[parent].append(&mut level_plots),
            None => plots.append(&mut level_plots),
        }
    }

    debug!(
        "Bifurcation: {} blocks, {} splits, depth {}",
        stats.blocks, stats.splits, stats.max_level
    );

    (FillOutput { plots, corridors }, stats)
}

/// Reclassify plots nearest `center` into green, then amenity, until each
/// quota (percent of `block_area`, square metres) is met.
///
/// Plots already green or amenity count toward their quota.
pub fn allocate_open_space(
    plots: &mut [Plot],
    block_area: f32,
    center: Vec2,
    green_pct: f32,
    amenity_pct: f32,
) {
    let needed_green = block_area * green_pct / 100.0;
    let needed_amenity = block_area * amenity_pct / 100.0;

    let allocated = |role: Role, plots: &[Plot]| -> f32 {
        plots.iter().filter(|p| p.role == role).map(|p| p.area).sum()
    };
    let mut green = allocated(Role::Green, plots);
    let mut amenity = allocated(Role::Amenity, plots);

    let mut order: Vec<(usize, f32)> = plots
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_buildable())
        .map(|(i, p)| (i, centroid(&p.vertices).distance(center)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (i, _) in order {
        let plot = &mut plots[i];
        if green < needed_green {
            plot.reclassify(Role::Green);
            green += plot.area;
        } else if amenity < needed_amenity {
            plot.reclassify(Role::Amenity);
            amenity += plot.area;
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_ring;
    use crate::subdivision::prototypes::{Prototype, PrototypeChoice};
    use crate::subdivision::standards::{DensityProfile, Setbacks, SocialMix};
    use crate::subdivision::Scale;
    use rand::SeedableRng;

    fn settings(green_pct: f32, amenity_pct: f32) -> BifurcationSettings {
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
            green_pct,
            amenity_pct,
            config: BifurcationConfig::default(),
        }
    }

    #[test]
    fn large_block_is_split_with_corridors() {
        let block = rect_ring(Vec2::ZERO, Vec2::new(400.0, 180.0));
        let mut rng = StdRng::seed_from_u64(8);
        let (out, stats) = bifurcate(&block, &settings(0.0, 0.0), &mut rng);
        assert!(stats.splits > 0);
        assert!(!out.corridors.is_empty());
        assert!(!out.plots.is_empty());
        assert!(out.plots.iter().all(|p| p.role == Role::Plot));
    }

    #[test]
    fn bifurcation_terminates_on_awkward_shapes() {
        let shapes = vec![
            rect_ring(Vec2::ZERO, Vec2::new(900.0, 700.0)),
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(300.0, 0.0),
                Vec2::new(300.0, 60.0),
                Vec2::new(60.0, 60.0),
                Vec2::new(60.0, 300.0),
                Vec2::new(0.0, 300.0),
            ],
            vec![Vec2::ZERO, Vec2::new(500.0, 10.0), Vec2::new(40.0, 260.0)],
            rect_ring(Vec2::ZERO, Vec2::new(1000.0, 3.0)),
            vec![Vec2::ZERO, Vec2::X, Vec2::Y],
        ];
        let s = settings(10.0, 5.0);
        for shape in shapes {
            let mut rng = StdRng::seed_from_u64(21);
            let (_, stats) = bifurcate(&shape, &s, &mut rng);
            assert!(stats.max_level <= s.config.max_depth);
        }
    }

    #[test]
    fn open_space_quota_is_met_nearest_first() {
        let mut plots: Vec<Plot> = (0..10)
            .map(|i| {
                let x = i as f32 * 10.0;
                Plot::cell(rect_ring(Vec2::new(x, 0.0), Vec2::new(x + 10.0, 10.0)), Scale(1.0))
            })
            .collect();
        // Block of 1000 m²: 20% green, 10% amenity.
        allocate_open_space(&mut plots, 1000.0, Vec2::new(0.0, 5.0), 20.0, 10.0);

        let total = |role: Role| -> f32 {
            plots.iter().filter(|p| p.role == role).map(|p| p.area).sum()
        };
        assert!((total(Role::Green) - 200.0).abs() < 1e-3);
        assert!((total(Role::Amenity) - 100.0).abs() < 1e-3);
        assert_eq!(plots[0].role, Role::Green);
        assert_eq!(plots[1].role, Role::Green);
        assert_eq!(plots[2].role, Role::Amenity);
        assert_eq!(plots[3].role, Role::Plot);
    }

    #[test]
    fn existing_green_counts_toward_quota() {
        let mut plots: Vec<Plot> = (0..4)
            .map(|i| {
                let x = i as f32 * 10.0;
                Plot::cell(rect_ring(Vec2::new(x, 0.0), Vec2::new(x + 10.0, 10.0)), Scale(1.0))
            })
            .collect();
        plots[3].reclassify(Role::Green);
        allocate_open_space(&mut plots, 1000.0, Vec2::ZERO, 10.0, 0.0);
        assert_eq!(plots.iter().filter(|p| p.role == Role::Green).count(), 1);
    }

    #[test]
    fn single_block_meets_both_quotas() {
        // Under the split threshold and too small for a second row: one fill block.
        let block = rect_ring(Vec2::ZERO, Vec2::splat(100.0));
        let mut rng = StdRng::seed_from_u64(5);
        let (out, stats) = bifurcate(&block, &settings(12.0, 7.0), &mut rng);
        assert_eq!(stats.blocks, 1);
        assert_eq!(stats.splits, 0);

        let total = |role: Role| -> f32 {
            out.plots.iter().filter(|p| p.role == role).map(|p| p.area).sum()
        };
        let largest = out.plots.iter().map(|p| p.area).fold(0.0, f32::max);
        let (green, amenity) = (total(Role::Green), total(Role::Amenity));
        assert!(green >= 1_200.0 && green < 1_200.0 + largest);
        assert!(amenity >= 700.0 && amenity < 700.0 + largest);
        assert!(out.plots.iter().any(|p| p.role == Role::Plot));
    }

    #[test]
    fn quota_shortfall_takes_every_plot() {
        let mut plots: Vec<Plot> = (0..2)
            .map(|i| {
                let x = i as f32 * 10.0;
                Plot::cell(rect_ring(Vec2::new(x, 0.0), Vec2::new(x + 10.0, 10.0)), Scale(1.0))
            })
            .collect();
        allocate_open_space(&mut plots, 10_000.0, Vec2::ZERO, 20.0, 10.0);
        assert!(plots.iter().all(|p| p.role == Role::Green));

        let block = rect_ring(Vec2::ZERO, Vec2::splat(100.0));
        let mut rng = StdRng::seed_from_u64(5);
        let out = fill_inner_area(&block, &settings(90.0, 10.0), &mut rng);
        assert!(!out.plots.is_empty());
        assert!(out.plots.iter().all(|p| p.role != Role::Plot));
    }

    #[test]
    fn hybrid_allocates_green_share() {
        let block = rect_ring(Vec2::ZERO, Vec2::new(110.0, 110.0));
        let mut rng = StdRng::seed_from_u64(3);
        let out = fill_inner_area(&block, &settings(12.0, 7.0), &mut rng);
        assert!(out.plots.iter().any(|p| p.role == Role::Green));
        assert!(out.plots.iter().any(|p| p.role == Role::Amenity));
        assert!(out.plots.iter().any(|p| p.role == Role::Plot));
    }
}
