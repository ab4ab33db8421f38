//! Score and difficulty
//!
//! Score only grows within a run, and so does scroll speed: every obstacle
//! that scrolls past the player nudges it up by a fixed step.

use serde::{Deserialize, Serialize};

use crate::consts::{POINTS_PASS, POINTS_POWER_UP, POINTS_SHOT};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    speed: f32,
    speed_step: f32,
}

impl Scoreboard {
    /// Fresh run: zero score at the baseline speed
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            speed: tuning.base_speed,
            speed_step: tuning.speed_step,
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current scroll speed (px/frame)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// An obstacle scrolled past unharmed
    pub fn obstacle_passed(&mut self) -> u64 {
        self.score += POINTS_PASS;
        self.speed += self.speed_step;
        POINTS_PASS
    }

    /// A shot destroyed an obstacle; already-passed obstacles are worth nothing
    pub fn obstacle_destroyed(&mut self, counted: bool) -> u64 {
        if counted {
            return 0;
        }
        self.score += POINTS_SHOT;
        POINTS_SHOT
    }

    pub fn power_up_collected(&mut self) -> u64 {
        self.score += POINTS_POWER_UP;
        POINTS_POWER_UP
    }
}
