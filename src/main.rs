//! Headless demo: lays out a 240 m square site once and logs the summary.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use site_subdivision::geometry::rect_ring;
use site_subdivision::{
    GenerateLayoutEvent, GeneratedLayout, LayoutParams, SiteBoundary, SubdivisionPlugin,
};

fn main() {
    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()))
        .add_plugins(LogPlugin::default())
        .add_plugins(SubdivisionPlugin)
        .insert_resource(SiteBoundary(rect_ring(Vec2::ZERO, Vec2::splat(240.0))))
        .insert_resource(LayoutParams {
            entry: Some(Vec2::new(120.0, 0.0)),
            ..default()
        })
        .add_systems(Startup, request_layout)
        .add_systems(Last, report_layout)
        .run();
}

fn request_layout(mut events: EventWriter<GenerateLayoutEvent>) {
    events.send(GenerateLayoutEvent);
}

fn report_layout(layout: Res<GeneratedLayout>) {
    let Some(solution) = &layout.0 else {
        warn!("No geometry could be generated for these parameters");
        return;
    };
    let s = &solution.summary;
    info!(
        "{} plots ({:.1}% of site), infra {:.1}%, green {:.1}%, amenity {:.1}%",
        s.plot_count, s.plot_pct, s.infra_pct, s.green_pct, s.amenity_pct
    );
    info!(
        "Road length {:.0} m, {:.1} plots/ha, social mix {}/{}/{}",
        s.road_length, s.plots_per_hectare, s.social.ews_lig, s.social.mig, s.social.hig
    );
}
