use bevy::prelude::*;
use rand::Rng;

use super::particle::Particle;
use crate::config::{AREA_PER_PARTICLE, LINK_DIVISOR, LINK_FADE, MAX_PARTICLES};

/// Particle count for a field of `bounds`: one per 10 000 px², capped.
pub fn particle_count(bounds: Vec2) -> usize {
    let area = (bounds.x * bounds.y).max(0.0);
    ((area / AREA_PER_PARTICLE).floor() as usize).min(MAX_PARTICLES)
}

/// A fresh batch of particles for `bounds`. Nothing from any previous batch survives.
pub fn populate<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2) -> Vec<Particle> {
    (0..particle_count(bounds))
        .map(|_| Particle::random(rng, bounds))
        .collect()
}

/// A line between two particles, `opacity` as computed (may be negative).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

/// Squared-distance threshold under which two particles are linked.
pub fn link_threshold(bounds: Vec2) -> f32 {
    (bounds.x / LINK_DIVISOR) * (bounds.y / LINK_DIVISOR)
}

/// Every linked pair `(a, b)` with `b >= a`.
///
/// Self-pairs are part of the sweep: they sit at distance zero and draw a
/// zero-length line.
pub fn links(particles: &[Particle], bounds: Vec2) -> Vec<Link> {
    let threshold = link_threshold(bounds);
    let mut out = Vec::new();
    for a in 0..particles.len() {
        for b in a..particles.len() {
            let d2 = particles[a].position.distance_squared(particles[b].position);
            if d2 < threshold {
                out.push(Link {
                    a,
                    b,
                    opacity: 1.0 - d2 / LINK_FADE,
                });
            }
        }
    }
    out
}
