//! Bevy integration: the host edits resources and sends events, the plugin
//! regenerates the layout.

use bevy::prelude::*;

use super::layout::{generate_layout, generate_variants, LayoutParams, LayoutSolution};

/// Site boundary in drawing units.
#[derive(Resource, Clone, Debug, Default)]
pub struct SiteBoundary(pub Vec<Vec2>);

/// Most recent layout, `None` until generated or after a rejected request.
#[derive(Resource, Default)]
pub struct GeneratedLayout(pub Option<LayoutSolution>);

#[derive(Resource, Default)]
pub struct LayoutVariants(pub Vec<LayoutSolution>);

/// Event to regenerate [`GeneratedLayout`].
#[derive(Event)]
pub struct GenerateLayoutEvent;

/// Event to regenerate [`LayoutVariants`].
#[derive(Event)]
pub struct GenerateVariantsEvent {
    pub count: usize,
}

pub struct SubdivisionPlugin;

impl Plugin for SubdivisionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SiteBoundary>()
            .init_resource::<LayoutParams>()
            .init_resource::<GeneratedLayout>()
            .init_resource::<LayoutVariants>()
            .add_event::<GenerateLayoutEvent>()
            .add_event::<GenerateVariantsEvent>()
            .add_systems(Update, (generate_layout_on_event, generate_variants_on_event));
    }
}

fn generate_layout_on_event(
    mut events: EventReader<GenerateLayoutEvent>,
    boundary: Res<SiteBoundary>,
    params: Res<LayoutParams>,
    mut layout: ResMut<GeneratedLayout>,
) {
    // Several requests in one frame regenerate once.
    if events.read().count() == 0 {
        return;
    }

    match generate_layout(&boundary.0, &params) {
        Ok(solution) => layout.0 = Some(solution),
        Err(err) => {
            warn!("Layout request rejected: {err}");
            layout.0 = None;
        }
    }
}

fn generate_variants_on_event(
    mut events: EventReader<GenerateVariantsEvent>,
    boundary: Res<SiteBoundary>,
    params: Res<LayoutParams>,
    mut variants: ResMut<LayoutVariants>,
) {
    let Some(count) = events.read().last().map(|e| e.count) else {
        return;
    };

    info!("Generating {count} layout variants...");
    match generate_variants(&boundary.0, &params, count) {
        Ok(solutions) => {
            info!("Generated {} variants", solutions.len());
            variants.0 = solutions;
        }
        Err(err) => {
            warn!("Variant request rejected: {err}");
            variants.0.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_ring;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(SubdivisionPlugin);
        app
    }

    #[test]
    fn event_regenerates_layout() {
        let mut app = app();
        app.insert_resource(SiteBoundary(rect_ring(Vec2::ZERO, Vec2::splat(150.0))));
        app.world_mut().send_event(GenerateLayoutEvent);
        app.update();

        let layout = app.world().resource::<GeneratedLayout>();
        let solution = layout.0.as_ref().unwrap();
        assert!(solution.summary.plot_count > 0);
    }

    #[test]
    fn invalid_request_clears_layout() {
        let mut app = app();
        app.insert_resource(SiteBoundary(vec![Vec2::ZERO, Vec2::X]));
        app.world_mut().send_event(GenerateLayoutEvent);
        app.update();
        assert!(app.world().resource::<GeneratedLayout>().0.is_none());
    }

    #[test]
    fn variants_follow_requested_count() {
        let mut app = app();
        app.insert_resource(SiteBoundary(rect_ring(Vec2::ZERO, Vec2::splat(150.0))));
        app.world_mut().send_event(GenerateVariantsEvent { count: 3 });
        app.update();
        assert_eq!(app.world().resource::<LayoutVariants>().0.len(), 3);
    }
}
