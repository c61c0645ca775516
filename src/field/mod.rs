use bevy::prelude::*;

pub mod draw;
pub mod network;
pub mod particle;
pub mod systems;

use systems::{
    FieldBounds, FieldRng, FieldSurface, HeroRegion, PointerState, attach_field_surface,
    rebuild_particles, step_particles, track_pointer, update_field_bounds,
};

use crate::config::HERO_HEIGHT;

/// Plug this into your App with `.add_plugins(FieldPlugin)`.
pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HeroRegion {
            height: HERO_HEIGHT,
        })
        .init_resource::<PointerState>()
        .init_resource::<FieldRng>()
        // Bind to the window; camera + meshes only if that worked
        .add_systems(
            Startup,
            (
                attach_field_surface,
                (draw::spawn_field_camera, draw::setup_particle_visuals)
                    .run_if(resource_exists::<FieldSurface>),
            )
                .chain(),
        )
        // One pass per displayed frame: size, rebuild on change, pointer,
        // motion, then draw (discs, outlines, network on top)
        .add_systems(
            Update,
            (
                update_field_bounds,
                rebuild_particles.run_if(resource_exists_and_changed::<FieldBounds>),
                draw::attach_particle_visuals,
                track_pointer,
                step_particles,
                draw::draw_particle_outlines,
                draw::draw_connections,
            )
                .chain()
                .run_if(resource_exists::<FieldSurface>),
        );
    }
}
