//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be reproduced (or a test
//! can switch spawning off) without touching simulation code. Values are
//! per frame at the 60 Hz display refresh.

use serde::{Deserialize, Serialize};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Surface ===
    /// Drawing surface width (px)
    pub width: f32,
    /// Drawing surface height (px)
    pub height: f32,
    /// Height of the ground strip at the bottom of the surface
    pub ground_height: f32,

    // === Player ===
    pub player_x: f32,
    pub player_size: f32,
    /// Downward acceleration (px/frame²)
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_force: f32,
    /// Frames between trail particles
    pub trail_interval: u32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_size: f32,
    /// Frames between shots
    pub fire_cooldown: u32,

    // === Scrolling ===
    /// Scroll speed at the start of every run
    pub base_speed: f32,
    /// Speed added each time an obstacle is passed
    pub speed_step: f32,

    // === Spawning ===
    /// Per-frame obstacle spawn probability
    pub obstacle_chance: f32,
    /// Per-frame power-up spawn probability
    pub power_up_chance: f32,
    pub obstacle_min_size: f32,
    pub obstacle_max_size: f32,
    pub power_up_size: f32,
    /// Keep power-ups this far below the top edge
    pub power_up_top_margin: f32,
    /// Keep power-ups this far above the bottom edge
    pub power_up_bottom_margin: f32,

    // === Background ===
    pub star_count: usize,
    pub star_min_size: f32,
    pub star_max_size: f32,
    pub star_min_speed: f32,
    pub star_max_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ground_height: 50.0,

            player_x: 100.0,
            player_size: 30.0,
            gravity: 0.5,
            jump_force: -12.0,
            trail_interval: 3,

            projectile_speed: 15.0,
            projectile_size: 10.0,
            fire_cooldown: 20,

            base_speed: 5.0,
            speed_step: 0.05,

            obstacle_chance: 0.02,
            power_up_chance: 0.005,
            obstacle_min_size: 20.0,
            obstacle_max_size: 70.0,
            power_up_size: 20.0,
            power_up_top_margin: 50.0,
            power_up_bottom_margin: 100.0,

            star_count: 100,
            star_min_size: 0.2,
            star_max_size: 2.0,
            star_min_speed: 0.1,
            star_max_speed: 0.6,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Tuning with spawning disabled (scripted scenarios)
    pub fn without_spawns() -> Self {
        Self {
            obstacle_chance: 0.0,
            power_up_chance: 0.0,
            ..Self::default()
        }
    }

    /// Clamp values into ranges the simulation can rely on
    pub fn sanitized(mut self) -> Self {
        self.obstacle_chance = self.obstacle_chance.clamp(0.0, 1.0);
        self.power_up_chance = self.power_up_chance.clamp(0.0, 1.0);
        self.player_size = self.player_size.max(1.0);
        self.projectile_size = self.projectile_size.max(1.0);
        self.power_up_size = self.power_up_size.max(1.0);
        self.obstacle_min_size = self.obstacle_min_size.max(1.0);
        self.obstacle_max_size = self.obstacle_max_size.max(self.obstacle_min_size);
        self.star_min_size = self.star_min_size.max(0.1);
        self.star_max_size = self.star_max_size.max(self.star_min_size);
        self.trail_interval = self.trail_interval.max(1);
        self.speed_step = self.speed_step.max(0.0);
        self
    }

    /// Y of the ground line (top edge of the ground strip)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Lowest top-left Y for a square of `size` resting on the ground
    #[inline]
    pub fn rest_y(&self, size: f32) -> f32 {
        self.ground_y() - size
    }
}
