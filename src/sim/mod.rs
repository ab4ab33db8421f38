//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod particles;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounded, collides};
pub use entities::{Entity, FrameCtx, Obstacle, Player, PowerUp, Projectile, Star};
pub use particles::{Burst, MAX_PARTICLES, Particle, ParticleSystem};
pub use score::Scoreboard;
pub use spawn::{SpawnRoll, spawn_entities};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
