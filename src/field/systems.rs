use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::network::populate;
use super::particle::Particle;

/// Present only when a window was found at startup; every per-frame field
/// system is gated on it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FieldSurface {
    pub window: Entity,
}

/// Hero container the field lives in. `height: None` falls back to the viewport.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct HeroRegion {
    pub height: Option<f32>,
}

/// Field size (`size`) and the full window size (`viewport`), logical pixels.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub size: Vec2,
    pub viewport: Vec2,
}

impl FieldBounds {
    pub fn from_viewport(viewport: Vec2, hero: HeroRegion) -> Self {
        Self {
            size: Vec2::new(viewport.x, hero.height.unwrap_or(viewport.y)),
            viewport,
        }
    }

    /// Field space (top-left origin, +y down) to Bevy world space
    /// (window-centred origin, +y up).
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - 0.5 * self.viewport.x, 0.5 * self.viewport.y - p.y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.size.x && p.y <= self.size.y
    }
}

/// Last pointer position inside the field, cleared when it leaves.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerState(pub Option<Vec2>);

#[derive(Resource)]
pub struct FieldRng(pub StdRng);

impl Default for FieldRng {
    fn default() -> Self {
        Self(StdRng::seed_from_u64(rand::random()))
    }
}

/// Bind the field to the primary window. Without one the field stays inert.
pub fn attach_field_surface(
    mut commands: Commands,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    hero: Res<HeroRegion>,
) {
    let Ok((window, win)) = windows.single() else {
        tracing::debug!("no primary window; particle field stays inert");
        return;
    };
    let bounds = FieldBounds::from_viewport(win.size(), *hero);
    tracing::info!(width = bounds.size.x, height = bounds.size.y, "particle field attached");
    commands.insert_resource(FieldSurface { window });
    commands.insert_resource(bounds);
}

/// Keep `FieldBounds` in step with the window (resizes / DPI changes).
/// Only writes on an actual change so the rebuild fires once per resize.
pub fn update_field_bounds(
    surface: Res<FieldSurface>,
    windows: Query<&Window>,
    hero: Res<HeroRegion>,
    mut bounds: ResMut<FieldBounds>,
) {
    if let Ok(w) = windows.get(surface.window) {
        bounds.set_if_neq(FieldBounds::from_viewport(w.size(), *hero));
    }
}

/// Drop every particle and spawn a fresh batch sized from the current area.
pub fn rebuild_particles(
    mut commands: Commands,
    bounds: Res<FieldBounds>,
    existing: Query<Entity, With<Particle>>,
    mut rng: ResMut<FieldRng>,
) {
    for e in &existing {
        commands.entity(e).despawn();
    }
    let batch = populate(&mut rng.0, bounds.size);
    tracing::debug!(
        count = batch.len(),
        width = bounds.size.x,
        height = bounds.size.y,
        "rebuilt particle field"
    );
    for p in batch {
        let world = bounds.to_world(p.position);
        commands.spawn((
            Transform::from_xyz(world.x, world.y, 0.0).with_scale(Vec3::splat(p.size)),
            p,
        ));
    }
}

/// Track the cursor while it is over the field (window coords are already
/// top-left origin, matching field space).
pub fn track_pointer(
    surface: Res<FieldSurface>,
    windows: Query<&Window>,
    bounds: Res<FieldBounds>,
    mut pointer: ResMut<PointerState>,
) {
    let inside = windows
        .get(surface.window)
        .ok()
        .and_then(|w| w.cursor_position())
        .filter(|p| bounds.contains(*p));
    pointer.set_if_neq(PointerState(inside));
}

/// One frame of the field: bounce, pointer push, drift, then sync `Transform`.
pub fn step_particles(
    bounds: Res<FieldBounds>,
    pointer: Res<PointerState>,
    mut q: Query<(&mut Particle, &mut Transform)>,
) {
    for (mut p, mut tf) in &mut q {
        p.tick(pointer.0, bounds.size);
        let world = bounds.to_world(p.position);
        tf.translation.x = world.x;
        tf.translation.y = world.y;
    }
}
