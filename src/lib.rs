//! Neon Dash - A side-scrolling jump-and-shoot arcade runner
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, collisions, spawning, scoring)
//! - `renderer`: Canvas 2D primitive rendering
//! - `session`: Idle/Running/GameOver flow and UI hooks
//! - `platform`: Browser/native input and clock abstraction
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::{Session, SessionUi};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Display refresh the frame loop is paced for
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Points for an obstacle that scrolls past the player
    pub const POINTS_PASS: u64 = 1;
    /// Points for shooting down an obstacle that was not yet passed
    pub const POINTS_SHOT: u64 = 2;
    /// Points for collecting a power-up
    pub const POINTS_POWER_UP: u64 = 10;

    /// Particle physics (per frame)
    pub const PARTICLE_GRAVITY: f32 = 0.1 * 0.2;
    pub const PARTICLE_FADE: f32 = 0.02;
    pub const PARTICLE_SHRINK: f32 = 0.1;

    /// Power-up spin per frame (radians)
    pub const POWER_UP_SPIN: f32 = 0.05;

    /// Shadow blur used for glowing shapes
    pub const GLOW_PLAYER: f32 = 15.0;
    pub const GLOW_OBSTACLE: f32 = 10.0;

    /// Default player name when none is entered
    pub const GUEST_NAME: &str = "Guest";
}

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const CORAL: Color = Color::rgb(0xff, 0x55, 0x55);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GROUND: Color = Color::rgb(0x33, 0x33, 0x33);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form (`#rrggbb`)
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Uniform sample in `[min, max)`; returns `min` for an empty range
#[inline]
pub fn uniform(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min).max(0.0)
}

/// Uniform sample in `[-half, half)`
#[inline]
pub fn jitter(rng: &mut impl Rng, half: f32) -> f32 {
    uniform(rng, -half, half)
}
