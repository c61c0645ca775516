use bevy::prelude::*;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};

use crate::config::*;

/// A single drifting point of the network.
/// Lives as a Component on its rendered entity (which also has a Transform).
///
/// Positions are in field space: origin top-left, +y down, logical pixels.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Per-axis direction in [-1, 1]; scaled by `SPEED_FACTOR` each tick.
    pub direction: Vec2,
    /// Radius, in [1, 3].
    pub size: f32,
    pub color: Color,
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    StandardUniform.sample(rng)
}

impl Particle {
    pub fn new(position: Vec2, direction: Vec2, size: f32, color: Color) -> Self {
        Self {
            position,
            direction,
            size,
            color,
        }
    }

    /// Random particle kept one diameter away from every edge of `bounds`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2) -> Self {
        let size = unit(rng) * PARTICLE_SIZE_SPREAD + MIN_PARTICLE_SIZE;
        let margin = size * 2.0;
        let x = unit(rng) * ((bounds.x - margin) - margin) + margin;
        let y = unit(rng) * ((bounds.y - margin) - margin) + margin;
        let direction = Vec2::new(unit(rng) * 2.0 - 1.0, unit(rng) * 2.0 - 1.0);
        let pick = (unit(rng) * PALETTE.len() as f32) as usize;
        let color = PALETTE[pick.min(PALETTE.len() - 1)];
        Self::new(Vec2::new(x, y), direction, size, color)
    }

    /// Flip the direction on each axis whose position has left `[0, bounds]`.
    pub fn reflect_at_edges(&mut self, bounds: Vec2) {
        if self.position.x > bounds.x || self.position.x < 0.0 {
            self.direction.x = -self.direction.x;
        }
        if self.position.y > bounds.y || self.position.y < 0.0 {
            self.direction.y = -self.direction.y;
        }
    }

    /// Nudge away from the pointer when inside its influence radius.
    /// Each axis is pushed independently, and never while within
    /// `EDGE_MARGIN_FACTOR * size` of the edge being pushed toward.
    /// Returns true if the particle was inside the radius.
    pub fn repel_from(&mut self, pointer: Vec2, bounds: Vec2) -> bool {
        if self.position.distance(pointer) >= MOUSE_RADIUS + self.size {
            return false;
        }
        let margin = self.size * EDGE_MARGIN_FACTOR;

        if pointer.x < self.position.x && self.position.x < bounds.x - margin {
            self.position.x += PUSH_STEP;
        }
        if pointer.x > self.position.x && self.position.x > margin {
            self.position.x -= PUSH_STEP;
        }
        if pointer.y < self.position.y && self.position.y < bounds.y - margin {
            self.position.y += PUSH_STEP;
        }
        if pointer.y > self.position.y && self.position.y > margin {
            self.position.y -= PUSH_STEP;
        }
        true
    }

    pub fn advance(&mut self) {
        self.position += self.direction * SPEED_FACTOR;
    }

    /// One frame of motion: bounce, optional pointer push, drift.
    pub fn tick(&mut self, pointer: Option<Vec2>, bounds: Vec2) {
        self.reflect_at_edges(bounds);
        if let Some(pointer) = pointer {
            self.repel_from(pointer, bounds);
        }
        self.advance();
    }
}
