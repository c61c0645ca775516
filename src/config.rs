use bevy::prelude::*;

pub const WINDOW_TITLE: &str = "Kaushik Reddy | Portfolio";

/// Height of the hero container the field is confined to.
/// `None` means the field spans the whole viewport height.
pub const HERO_HEIGHT: Option<f32> = None;

/// Particle population
pub const MAX_PARTICLES: usize = 150;
pub const AREA_PER_PARTICLE: f32 = 10_000.0;
pub const MIN_PARTICLE_SIZE: f32 = 1.0;
pub const PARTICLE_SIZE_SPREAD: f32 = 2.0;

/// Neo-brutalist palette: cyan, pink, yellow, pure black
pub const PALETTE: [Color; 4] = [
    Color::srgb(0.4, 0.851, 0.937),
    Color::srgb(1.0, 0.475, 0.776),
    Color::srgb(1.0, 0.851, 0.239),
    Color::srgb(0.0, 0.0, 0.0),
];
pub const OUTLINE_COLOR: Color = Color::srgb(0.0, 0.0, 0.0);

/// Motion
pub const SPEED_FACTOR: f32 = 0.5;

/// Pointer repulsion
pub const MOUSE_RADIUS: f32 = 150.0;
pub const PUSH_STEP: f32 = 3.0;
pub const EDGE_MARGIN_FACTOR: f32 = 10.0; // multiples of particle size

/// Network lines: linked while d² < (w / LINK_DIVISOR) * (h / LINK_DIVISOR)
pub const LINK_DIVISOR: f32 = 7.0;
pub const LINK_FADE: f32 = 10_000.0; // opacity = 1 - d² / LINK_FADE

/// Speech
pub const RESUME_TEXT: &str = "Hi, I'm Kaushik Reddy, an Innovative Data Analyst and AI Engineer. \
Welcome to my portfolio. I specialize in high-performance systems and Generative AI, \
building privacy-preserving infrastructure using Rust and Python. \
Let's build something amazing together.";
pub const PREFERRED_VOICES: [&str; 2] = ["Google US English", "Samantha"];
pub const SPEECH_RATE: f32 = 1.0;
pub const SPEECH_PITCH: f32 = 1.1; // slightly raised for a friendly vibe

pub const UNSUPPORTED_NOTICE: &str = "Sorry, your platform doesn't support text to speech!";
