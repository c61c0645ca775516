use bevy::prelude::*;

use super::network::links;
use super::particle::Particle;
use super::systems::FieldBounds;
use crate::config::{OUTLINE_COLOR, PALETTE};
use crate::theme::Theme;

/// Shared disc mesh (unit radius, scaled per particle) and one material per palette entry.
#[derive(Resource)]
pub struct ParticleVisuals {
    pub mesh: Handle<Mesh>,
    pub materials: Vec<(Color, Handle<ColorMaterial>)>,
}

impl ParticleVisuals {
    fn material_for(&self, color: Color) -> Option<Handle<ColorMaterial>> {
        self.materials
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, h)| h.clone())
    }
}

/// Spawn the 2D camera the field and the UI render through.
pub fn spawn_field_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn setup_particle_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let mesh = meshes.add(Circle::new(1.0));
    let handles = PALETTE.iter().map(|&c| (c, materials.add(c))).collect();
    commands.insert_resource(ParticleVisuals {
        mesh,
        materials: handles,
    });
}

/// Give freshly spawned particles their filled disc.
pub fn attach_particle_visuals(
    mut commands: Commands,
    visuals: Res<ParticleVisuals>,
    q: Query<(Entity, &Particle), Added<Particle>>,
) {
    for (e, p) in &q {
        let Some(material) = visuals.material_for(p.color) else {
            continue;
        };
        commands
            .entity(e)
            .insert((Mesh2d(visuals.mesh.clone()), MeshMaterial2d(material)));
    }
}

/// Thin dark outline around each disc.
pub fn draw_particle_outlines(mut gizmos: Gizmos, bounds: Res<FieldBounds>, q: Query<&Particle>) {
    for p in &q {
        gizmos.circle_2d(bounds.to_world(p.position), p.size, OUTLINE_COLOR);
    }
}

/// Network lines between near pairs, stroked in the current theme.
pub fn draw_connections(
    mut gizmos: Gizmos,
    bounds: Res<FieldBounds>,
    theme: Res<Theme>,
    q: Query<&Particle>,
) {
    let particles: Vec<Particle> = q.iter().copied().collect();
    for link in links(&particles, bounds.size) {
        if link.opacity <= 0.0 {
            continue;
        }
        gizmos.line_2d(
            bounds.to_world(particles[link.a].position),
            bounds.to_world(particles[link.b].position),
            theme.link_color(link.opacity),
        );
    }
}
