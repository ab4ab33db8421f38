//! Scripted player for headless runs
//!
//! Looks only at the nearest obstacle still ahead of the player: shoot it
//! when in range and the gun is ready, otherwise jump just before it arrives.

use super::Command;
use crate::sim::{GameState, Obstacle};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Shoot obstacles closer than this (px ahead of the leading edge)
    pub fire_range: f32,
    /// Jump this many frames before an obstacle reaches the player
    pub jump_lead_frames: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_range: 250.0,
            jump_lead_frames: 8.0,
        }
    }
}

impl Autopilot {
    /// Closest obstacle whose trailing edge has not passed the player
    pub fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
        let x = state.player.pos.x;
        state
            .obstacles
            .iter()
            .filter(|o| !o.is_behind(x))
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
    }

    pub fn decide(&self, state: &GameState) -> Option<Command> {
        let obstacle = Self::next_obstacle(state)?;
        let gap = obstacle.pos.x - state.player.leading_edge();

        if gap > 0.0 && gap < self.fire_range && state.fire_cooldown == 0 {
            return Some(Command::Fire);
        }
        let grounded = !state.player.jumping;
        if grounded && gap < state.speed() * self.jump_lead_frames {
            return Some(Command::Jump);
        }
        None
    }
}
