//! Whole-site layout pipeline.
//!
//! Boundary plots, ring road, inner fill, green island, optional connectors
//! and spine road, then a global overlap filter and summary metrics. Every
//! run is a pure function of the boundary and [`LayoutParams`].

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::geometry::overlap::{polygons_overlap, SEPARATION_TOLERANCE};
use crate::geometry::{
    area, inward_offset, open_ring, perimeter, ring_contains, CurvedPath, Orientation,
};

use super::bifurcation::{BifurcationConfig, BifurcationSettings};
use super::connector::{
    bifurcation_spines, bisect_with_centerline, entry_connector, remove_conflicting_plots,
    shortest_spine, spine_road,
};
use super::corridor::{parking_bays, ring_road, ring_road_path, CrossSection, ParkingConfig};
use super::plots::{generate_plots_along_edges, Plot, PlotSettings};
use super::prototypes::PrototypeChoice;
use super::road_network::{RoadKind, RoadNetwork};
use super::standards::{
    DensityProfile, RoadProfile, Setbacks, SocialCategory, SocialMix, AMENITY_TARGET_PCT,
    GREEN_TARGET_PCT,
};
use super::strategies::{fill_with_strategy, Strategy};
use super::{Feature, Role, Scale};

/// Road network nodes closer than this are merged, in drawing units.
const SNAP_DISTANCE: f32 = 0.5;
/// Minimum edge length for bifurcation spines, in metres.
const SPINE_MIN_EDGE: f32 = 40.0;
/// Green island inset from the remainder, in plot depths.
const GREEN_ISLAND_INSET: f32 = 1.5;
const SQUARE_METERS_PER_HECTARE: f32 = 10_000.0;

/// Metric layout inputs. Points (entry, exit, centerline, existing rings)
/// are in drawing units.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub scale: Scale,
    pub plot_width: f32,
    pub plot_depth: f32,
    /// Garden strip between back-to-back plot rows.
    pub garden: f32,
    pub road: RoadProfile,
    pub green_pct: f32,
    pub amenity_pct: f32,
    pub density: DensityProfile,
    pub prototypes: PrototypeChoice,
    pub social_mix: SocialMix,
    pub setbacks: Setbacks,
    pub turning_radius: f32,
    pub strategy: Strategy,
    pub parking: ParkingConfig,
    pub bifurcation: BifurcationConfig,
    pub entry: Option<Vec2>,
    pub exit: Option<Vec2>,
    /// Cut the shortest bifurcation spine through the remainder.
    pub spine_road: bool,
    /// Host-drawn road centerline that splits green islands it crosses.
    pub road_centerline: Option<Vec<Vec2>>,
    /// Rings boundary plots must not collide with.
    pub existing: Vec<Vec<Vec2>>,
    pub seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            plot_width: 12.0,
            plot_depth: 20.0,
            garden: 0.0,
            road: RoadProfile::LOCAL,
            green_pct: GREEN_TARGET_PCT,
            amenity_pct: AMENITY_TARGET_PCT,
            density: DensityProfile::Medium,
            prototypes: PrototypeChoice::default(),
            social_mix: SocialMix::default(),
            setbacks: Setbacks::default(),
            turning_radius: 15.0,
            strategy: Strategy::default(),
            parking: ParkingConfig::default(),
            bifurcation: BifurcationConfig::default(),
            entry: None,
            exit: None,
            spine_road: false,
            road_centerline: None,
            existing: Vec::new(),
            seed: 42,
        }
    }
}

impl LayoutParams {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.scale.0.is_finite() && self.scale.0 > 0.0) {
            return Err(ParameterError::NonPositiveScale(self.scale.0));
        }
        for (name, value) in [("width", self.plot_width), ("depth", self.plot_depth)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::NonPositiveDimension { name, value });
            }
        }
        for (name, value) in [
            ("carriageway", self.road.carriageway),
            ("footpath", self.road.footpath),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ParameterError::InvalidRoadWidth { name, value });
            }
        }
        for (name, value) in [("green", self.green_pct), ("amenity", self.amenity_pct)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ParameterError::PercentageOutOfRange { name, value });
            }
        }
        if self.green_pct + self.amenity_pct > 100.0 {
            return Err(ParameterError::OpenSpaceOverCommitted {
                green: self.green_pct,
                amenity: self.amenity_pct,
            });
        }
        if !(self.turning_radius.is_finite() && self.turning_radius >= 0.0) {
            return Err(ParameterError::NegativeTurningRadius(self.turning_radius));
        }
        if !(self.garden.is_finite() && self.garden >= 0.0) {
            return Err(ParameterError::InvalidGarden(self.garden));
        }
        Ok(())
    }

    fn plot_settings(&self) -> PlotSettings {
        let scale = self.scale;
        PlotSettings {
            depth: scale.units(self.plot_depth),
            width: scale.units(self.plot_width),
            density: self.density,
            prototypes: self.prototypes.clone(),
            setbacks: self.setbacks.scaled(1.0 / scale.0),
            social_mix: self.social_mix,
            scale,
        }
    }

    fn fill_settings(&self) -> BifurcationSettings {
        BifurcationSettings {
            plot: self.plot_settings(),
            road_width: self.scale.units(self.road.carriageway),
            footpath: self.scale.units(self.road.footpath),
            garden: self.scale.units(self.garden),
            green_pct: self.green_pct,
            amenity_pct: self.amenity_pct,
            config: self.bifurcation.clone(),
        }
    }
}

/// Social tier counts of buildable plots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialCounts {
    pub ews_lig: usize,
    pub mig: usize,
    pub hig: usize,
}

/// Areas in square metres, lengths in metres, shares in percent of site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub site_area: f32,
    pub plot_count: usize,
    pub plot_area: f32,
    pub infra_area: f32,
    pub green_area: f32,
    pub amenity_area: f32,
    pub plot_pct: f32,
    pub infra_pct: f32,
    pub green_pct: f32,
    pub amenity_pct: f32,
    pub road_length: f32,
    pub social: SocialCounts,
    pub plots_per_hectare: f32,
    /// Green plus amenity over site area.
    pub open_space_ratio: f32,
    /// Infrastructure area per square metre of plot.
    pub infrastructure_index: f32,
    /// Metres.
    pub site_perimeter: f32,
    /// Floor area the density profile allows on the plots, square metres.
    pub permitted_floor_area: f32,
}

impl LayoutSummary {
    pub fn from_features(features: &[Feature], site_area: f32, road_length: f32) -> Self {
        let mut summary = Self {
            site_area,
            road_length,
            ..Default::default()
        };
        for feature in features {
            match feature.role {
                Role::Plot => {
                    summary.plot_count += 1;
                    summary.plot_area += feature.area;
                    match feature.social {
                        Some(SocialCategory::EwsLig) => summary.social.ews_lig += 1,
                        Some(SocialCategory::Mig) => summary.social.mig += 1,
                        Some(SocialCategory::Hig) => summary.social.hig += 1,
                        None => {}
                    }
                }
                Role::Green => summary.green_area += feature.area,
                Role::Amenity => summary.amenity_area += feature.area,
                role if role.is_infra() => summary.infra_area += feature.area,
                _ => {}
            }
        }

        if site_area > 0.0 {
            let pct = |a: f32| a / site_area * 100.0;
            summary.plot_pct = pct(summary.plot_area);
            summary.infra_pct = pct(summary.infra_area);
            summary.green_pct = pct(summary.green_area);
            summary.amenity_pct = pct(summary.amenity_area);
            summary.plots_per_hectare =
                summary.plot_count as f32 / (site_area / SQUARE_METERS_PER_HECTARE);
            summary.open_space_ratio = (summary.green_area + summary.amenity_area) / site_area;
        }
        if summary.plot_area > 0.0 {
            summary.infrastructure_index = summary.infra_area / summary.plot_area;
        }
        summary
    }
}

#[derive(Clone, Debug)]
pub struct LayoutSolution {
    pub features: Vec<Feature>,
    pub network: RoadNetwork,
    pub summary: LayoutSummary,
    pub strategy: Strategy,
}

impl LayoutSolution {
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.role == role)
    }
}

/// Lay out one site.
pub fn generate_layout(
    boundary: &[Vec2],
    params: &LayoutParams,
) -> Result<LayoutSolution, ParameterError> {
    params.validate()?;
    let site = distinct_vertices(boundary);
    if site.len() < 3 {
        return Err(ParameterError::DegenerateBoundary(site.len()));
    }
    let Some(orientation) = Orientation::of(&site) else {
        return Err(ParameterError::ZeroAreaBoundary(site.len()));
    };

    let scale = params.scale;
    let mut rng = StdRng::seed_from_u64(params.seed);
    let settings = params.fill_settings();
    let depth = settings.plot.depth;
    let carriage = settings.road_width;
    let footpath = settings.footpath;
    let radius = scale.units(params.turning_radius);

    info!(
        "Generating {} layout for a {:.0} m² site",
        params.strategy.label(),
        scale.square_meters(area(&site))
    );

    let mut features: Vec<Feature> = Vec::new();
    let mut network = RoadNetwork::default();
    let mut greens: Vec<Vec<Vec2>> = Vec::new();

    // Boundary row.
    let mut plots = generate_plots_along_edges(
        &site,
        Some(orientation),
        &params.existing,
        &settings.plot,
        &mut rng,
    );

    // Ring road.
    let section = CrossSection {
        setback: depth,
        outer_pavement: footpath,
        carriageway: carriage,
        inner_pavement: footpath,
    };
    let ring = ring_road(&site, &section);
    let remainder = match &ring {
        Some(road) => {
            for (role, band) in &road.bands {
                if *role == Role::Carriageway && radius > 0.0 {
                    let path = ring_road_path(road, radius, carriage);
                    features.push(Feature::path(Role::Carriageway, path, scale));
                } else {
                    features.push(Feature::ring(*role, band.clone(), scale));
                }
            }
            if params.parking.enabled {
                for bay in parking_bays(road.carriageway_inner(), &params.parking, scale) {
                    features.push(Feature::ring(Role::Parking, bay, scale));
                }
            }
            network.add_loop(&road.centerline, RoadKind::Ring, SNAP_DISTANCE);
            road.inner_edge().to_vec()
        }
        None => Vec::new(),
    };

    // Inner fill and the central green island.
    if remainder.len() >= 3 {
        let mut fill = fill_with_strategy(params.strategy, &remainder, &settings, &mut rng);
        // Interior plots may not reach into the ring road.
        let before = fill.plots.len();
        fill.plots
            .retain(|p| ring_contains(&remainder, &p.vertices, SEPARATION_TOLERANCE));
        debug!("Dropped {} plots crossing the ring road", before - fill.plots.len());
        for corridor in fill.corridors {
            network.add_road(&corridor.centerline, corridor.kind, SNAP_DISTANCE);
            features.push(Feature::ring(Role::InfraSpine, corridor.strip, scale));
        }

        let island = inward_offset(&remainder, depth * GREEN_ISLAND_INSET);
        let island_clear = island.len() >= 3
            && !fill
                .plots
                .iter()
                .any(|p| polygons_overlap(&p.vertices, &island));
        if island_clear {
            greens.push(island);
        }
        plots.extend(fill.plots);
    }

    // Entry and exit connectors.
    if let Some(road) = &ring {
        let clearance = (carriage + 2.0 * footpath) * 0.5;
        for point in [params.entry, params.exit].into_iter().flatten() {
            let Some(connector) =
                entry_connector(point, road.carriageway_outer(), carriage, footpath, radius)
            else {
                warn!("Connector at {point} is on the ring road, skipping");
                continue;
            };
            let removed = remove_conflicting_plots(&mut plots, &connector.polygons(), clearance);
            debug!("Connector at {point} removed {removed} plots");
            network.add_road(&connector.centerline, RoadKind::Connector, SNAP_DISTANCE);
            push_road_pair(
                &mut features,
                connector.carriageway,
                connector.pavement,
                (Role::EntryExitRoad, Role::EntryExitPavement),
                scale,
            );
        }
    }

    // Spine road across the block.
    if params.spine_road {
        if let Some(road) = &ring {
            let analysis = inward_offset(&site, depth * 2.0 + carriage + 2.0 * footpath);
            let spines = bifurcation_spines(&analysis, scale.units(SPINE_MIN_EDGE), None);
            let spine = shortest_spine(&spines)
                .and_then(|s| spine_road(s, road.carriageway_inner(), carriage, footpath, radius));
            if let Some(spine) = spine {
                let (removed, cut) = spine.clear(&mut plots, std::mem::take(&mut greens));
                greens = cut;
                debug!("Spine road removed {removed} plots");
                let (a, b) = spine.centerline;
                network.add_road(&[a, b], RoadKind::Spine, SNAP_DISTANCE);
                push_road_pair(
                    &mut features,
                    spine.carriageway,
                    spine.pavement,
                    (Role::Carriageway, Role::Pavement),
                    scale,
                );
            }
        }
    }

    // Host centerline through green islands.
    if let Some(centerline) = params.road_centerline.as_deref().filter(|c| c.len() >= 2) {
        let mut kept = Vec::with_capacity(greens.len());
        for green in greens {
            match bisect_with_centerline(&green, centerline, carriage) {
                Some(crossing) => {
                    kept.extend(crossing.pieces);
                    if crossing.road.len() >= 3 {
                        features.push(Feature::ring(Role::Carriageway, crossing.road, scale));
                    }
                    let (a, b) = crossing.chord;
                    network.add_road(&[a, b], RoadKind::Connector, SNAP_DISTANCE);
                }
                None => kept.push(green),
            }
        }
        greens = kept;
    }

    for green in greens {
        if !overlaps_existing(&green, &params.existing) {
            features.push(Feature::ring(Role::Green, green, scale));
        }
    }

    // First come, first kept, behind the host's existing rings.
    let before = plots.len();
    let accepted = overlap_filter(plots, &params.existing);
    debug!("Overlap filter dropped {} plots", before - accepted.len());
    features.extend(accepted.into_iter().map(Feature::from));

    let mut summary = LayoutSummary::from_features(
        &features,
        scale.square_meters(area(&site)),
        scale.meters(network.total_length(None)),
    );
    summary.site_perimeter = scale.meters(perimeter(&site));
    summary.permitted_floor_area = summary.plot_area * params.density.fsi();
    info!(
        "Layout done: {} plots, {} features, {:.0} m of road",
        summary.plot_count,
        features.len(),
        summary.road_length
    );

    Ok(LayoutSolution {
        features,
        network,
        summary,
        strategy: params.strategy,
    })
}

/// `count` independent variants of `params`, in index order.
///
/// Each variant draws its own depth, width and garden multipliers and cycles
/// through the rectangular strategies.
pub fn generate_variants(
    boundary: &[Vec2],
    params: &LayoutParams,
    count: usize,
) -> Result<Vec<LayoutSolution>, ParameterError> {
    params.validate()?;
    (0..count)
        .into_par_iter()
        .map(|index| generate_layout(boundary, &variant_params(params, index)))
        .collect()
}

/// Parameters of design variant `index`.
pub fn variant_params(base: &LayoutParams, index: usize) -> LayoutParams {
    let seed = base
        .seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(index as u64);
    let mut rng = StdRng::seed_from_u64(seed);
    LayoutParams {
        plot_depth: base.plot_depth * rng.gen_range(0.8..1.3),
        plot_width: base.plot_width * rng.gen_range(0.9..1.1),
        garden: rng.gen_range(0..15) as f32,
        strategy: Strategy::for_variant(index),
        seed,
        ..base.clone()
    }
}

fn push_road_pair(
    features: &mut Vec<Feature>,
    carriageway: CurvedPath,
    pavement: CurvedPath,
    (road_role, pavement_role): (Role, Role),
    scale: Scale,
) {
    let road = Feature::path(road_role, carriageway, scale);
    let mut pave = Feature::path(pavement_role, pavement, scale);
    // The pavement outline includes the carriageway it surrounds.
    pave.area = (pave.area - road.area).max(0.0);
    features.push(pave);
    features.push(road);
}

fn overlaps_existing(ring: &[Vec2], existing: &[Vec<Vec2>]) -> bool {
    existing
        .iter()
        .any(|other| other.len() >= 3 && polygons_overlap(ring, other))
}

fn overlap_filter(plots: Vec<Plot>, existing: &[Vec<Vec2>]) -> Vec<Plot> {
    let mut accepted: Vec<Plot> = Vec::with_capacity(plots.len());
    for plot in plots {
        if !overlaps_existing(&plot.vertices, existing)
            && !accepted
                .iter()
                .any(|p| polygons_overlap(&plot.vertices, &p.vertices))
        {
            accepted.push(plot);
        }
    }
    accepted
}

fn distinct_vertices(boundary: &[Vec2]) -> Vec<Vec2> {
    let mut points = open_ring(boundary).to_vec();
    points.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
    while points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) < 1e-12 {
        points.pop();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{point_in_polygon, rect_ring};
    use crate::subdivision::prototypes::Prototype;

    fn square(side: f32) -> Vec<Vec2> {
        rect_ring(Vec2::ZERO, Vec2::splat(side))
    }

    fn fixed_params() -> LayoutParams {
        LayoutParams {
            prototypes: PrototypeChoice::Fixed(Prototype::Compact),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(LayoutParams::default().validate().is_ok());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let bad = LayoutParams {
            plot_depth: 0.0,
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ParameterError::NonPositiveDimension {
                name: "depth",
                value: 0.0
            })
        );

        let over = LayoutParams {
            green_pct: 60.0,
            amenity_pct: 50.0,
            ..Default::default()
        };
        assert!(matches!(
            over.validate(),
            Err(ParameterError::OpenSpaceOverCommitted { .. })
        ));

        let scale = LayoutParams {
            scale: Scale(0.0),
            ..Default::default()
        };
        assert_eq!(scale.validate(), Err(ParameterError::NonPositiveScale(0.0)));

        let radius = LayoutParams {
            turning_radius: -1.0,
            ..Default::default()
        };
        assert!(radius.validate().is_err());
    }

    #[test]
    fn degenerate_boundary_is_rejected() {
        let line = [Vec2::ZERO, Vec2::X, Vec2::X, Vec2::ZERO];
        let err = generate_layout(&line, &LayoutParams::default()).unwrap_err();
        assert_eq!(err, ParameterError::DegenerateBoundary(2));
    }

    #[test]
    fn collinear_boundary_reports_zero_area() {
        let line = [Vec2::ZERO, Vec2::X, Vec2::X * 2.0];
        let err = generate_layout(&line, &LayoutParams::default()).unwrap_err();
        assert_eq!(err, ParameterError::ZeroAreaBoundary(3));
    }

    #[test]
    fn existing_rings_are_kept_clear() {
        let existing = rect_ring(Vec2::splat(90.0), Vec2::splat(150.0));
        for strategy in Strategy::ALL {
            let params = LayoutParams {
                strategy,
                existing: vec![existing.clone()],
                ..Default::default()
            };
            let solution = generate_layout(&square(240.0), &params).unwrap();
            for feature in solution
                .features
                .iter()
                .filter(|f| matches!(f.role, Role::Plot | Role::Green | Role::Amenity))
            {
                assert!(
                    !polygons_overlap(&feature.shape.outline(), &existing),
                    "{} placed {:?} on an existing ring",
                    strategy.label(),
                    feature.role
                );
            }
        }
    }

    #[test]
    fn interior_plots_stay_off_the_ring_road() {
        // Ring road inner edge: setback 20 + pavement 2 + carriageway 9 + pavement 2.
        let site = square(240.0);
        let remainder = inward_offset(&site, 33.0);
        let carriageway = inward_offset(&site, 22.0 + SEPARATION_TOLERANCE);
        let params = LayoutParams {
            strategy: Strategy::Grid,
            ..Default::default()
        };
        let solution = generate_layout(&site, &params).unwrap();
        for plot in solution.with_role(Role::Plot) {
            let cell = plot.shape.outline();
            let boundary_row = !cell.iter().any(|p| point_in_polygon(*p, &carriageway));
            assert!(boundary_row || ring_contains(&remainder, &cell, SEPARATION_TOLERANCE));
        }
    }

    #[test]
    fn summary_reports_perimeter_and_floor_area() {
        let solution = generate_layout(&square(200.0), &fixed_params()).unwrap();
        let s = &solution.summary;
        assert!((s.site_perimeter - 800.0).abs() < 1e-2);
        let fsi = DensityProfile::Medium.fsi();
        assert!((s.permitted_floor_area - s.plot_area * fsi).abs() < 1e-2);
    }

    #[test]
    fn square_site_has_ring_road_and_plots() {
        let solution = generate_layout(&square(100.0), &fixed_params()).unwrap();
        assert!(solution.with_role(Role::Carriageway).count() >= 1);
        assert_eq!(solution.with_role(Role::Pavement).count(), 2);
        assert!(solution.summary.plot_count >= 16);
        assert!(solution.network.total_length(Some(RoadKind::Ring)) > 0.0);

        let plots: Vec<_> = solution.with_role(Role::Plot).collect();
        for (i, a) in plots.iter().enumerate() {
            for b in &plots[i + 1..] {
                assert!(!polygons_overlap(&a.shape.outline(), &b.shape.outline()));
            }
        }
    }

    #[test]
    fn narrow_site_keeps_boundary_row_only() {
        let site = rect_ring(Vec2::ZERO, Vec2::new(200.0, 30.0));
        let solution = generate_layout(&site, &fixed_params()).unwrap();
        assert_eq!(solution.with_role(Role::Carriageway).count(), 0);
        assert_eq!(solution.network.edge_count(), 0);
    }

    #[test]
    fn layout_is_reproducible() {
        let site = square(260.0);
        let a = generate_layout(&site, &LayoutParams::default()).unwrap();
        let b = generate_layout(&site, &LayoutParams::default()).unwrap();
        assert_eq!(a.features, b.features);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn entry_removes_plots_in_its_way() {
        let site = square(200.0);
        let without = generate_layout(&site, &fixed_params()).unwrap();
        let params = LayoutParams {
            entry: Some(Vec2::new(100.0, 0.0)),
            ..fixed_params()
        };
        let with = generate_layout(&site, &params).unwrap();

        assert_eq!(with.with_role(Role::EntryExitRoad).count(), 1);
        assert_eq!(with.with_role(Role::EntryExitPavement).count(), 1);
        assert!(with.summary.plot_count < without.summary.plot_count);
        assert!((with.network.total_length(Some(RoadKind::Connector)) - 22.0).abs() < 1e-3);
    }

    #[test]
    fn summary_shares_add_up() {
        let solution = generate_layout(&square(300.0), &LayoutParams::default()).unwrap();
        let s = &solution.summary;
        assert!((s.site_area - 90_000.0).abs() < 1.0);
        assert!(s.plot_pct + s.infra_pct + s.green_pct + s.amenity_pct <= 100.0 + 1e-3);
        assert_eq!(s.social.ews_lig + s.social.mig + s.social.hig, s.plot_count);
        assert!(s.plots_per_hectare > 0.0);
    }

    #[test]
    fn variants_cycle_strategies_in_order() {
        let variants = generate_variants(&square(250.0), &LayoutParams::default(), 6).unwrap();
        let strategies: Vec<_> = variants.iter().map(|v| v.strategy).collect();
        assert_eq!(
            strategies,
            vec![
                Strategy::Grid,
                Strategy::Radial,
                Strategy::Hybrid,
                Strategy::Hierarchical,
                Strategy::Grid,
                Strategy::Radial,
            ]
        );
    }

    #[test]
    fn variant_multipliers_stay_in_range() {
        let base = LayoutParams::default();
        for index in 0..20 {
            let v = variant_params(&base, index);
            assert!((16.0..26.0).contains(&v.plot_depth));
            assert!((10.8..13.2).contains(&v.plot_width));
            assert!((0.0..=14.0).contains(&v.garden));
            assert_eq!(variant_params(&base, index), v);
        }
    }
}
