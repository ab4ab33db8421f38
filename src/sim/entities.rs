//! Entity kinds and their per-frame kinematics
//!
//! Each kind is its own type behind the `Entity` capability; the game state
//! owns plain `Vec`s of them and no entity refers back to the state.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounded};
use super::particles::{Burst, Particle, ParticleSystem};
use crate::consts::POWER_UP_SPIN;
use crate::tuning::Tuning;
use crate::{Color, jitter, uniform};

/// Everything an entity may touch while updating
pub struct FrameCtx<'a> {
    pub tuning: &'a Tuning,
    /// Current scroll speed (px/frame)
    pub speed: f32,
    pub particles: &'a mut ParticleSystem,
    pub rng: &'a mut Pcg32,
}

impl FrameCtx<'_> {
    /// Emit one trail particle with probability `chance`
    fn maybe_trail(&mut self, chance: f32, pos: Vec2, size: (f32, f32), vel: Vec2, color: Color) {
        if self.rng.random::<f32>() < chance {
            let size = uniform(self.rng, size.0, size.1);
            self.particles.emit(Particle::new(pos, size, color, vel));
        }
    }
}

/// Per-frame behavior shared by every entity kind
pub trait Entity: Bounded {
    fn update(&mut self, ctx: &mut FrameCtx<'_>);

    /// True once the entity has left the playfield for good
    fn is_offscreen(&self, tuning: &Tuning) -> bool;
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub vel_y: f32,
    /// Airborne since the last jump
    pub jumping: bool,
    pub color: Color,
    trail_timer: u32,
}

impl Player {
    /// Spawn standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.rest_y(tuning.player_size)),
            size: tuning.player_size,
            vel_y: 0.0,
            jumping: false,
            color: Color::CYAN,
            trail_timer: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// X of the front (right) edge
    #[inline]
    pub fn leading_edge(&self) -> f32 {
        self.pos.x + self.size
    }

    pub fn is_grounded(&self, tuning: &Tuning) -> bool {
        self.pos.y >= tuning.rest_y(self.size)
    }

    /// Launch upward; ignored while airborne. Returns whether a jump happened.
    pub fn jump(&mut self, ctx: &mut FrameCtx<'_>) -> bool {
        if self.jumping {
            return false;
        }
        self.vel_y = ctx.tuning.jump_force;
        self.jumping = true;
        let feet = Vec2::new(self.pos.x + self.size / 2.0, self.pos.y + self.size);
        ctx.particles.burst(Burst::Jump, feet, self.color, ctx.rng);
        true
    }

    /// Shoot from the leading edge unless the shared cooldown is still running
    pub fn fire(&self, cooldown: &mut u32, id: u32, ctx: &mut FrameCtx<'_>) -> Option<Projectile> {
        if *cooldown > 0 {
            return None;
        }
        let muzzle = Vec2::new(self.leading_edge(), self.pos.y + self.size / 2.0);
        *cooldown = ctx.tuning.fire_cooldown;
        ctx.particles.burst(Burst::Muzzle, muzzle, self.color, ctx.rng);
        Some(Projectile::new(id, muzzle, ctx.tuning))
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

impl Entity for Player {
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        self.vel_y += ctx.tuning.gravity;
        self.pos.y += self.vel_y;

        let floor = ctx.tuning.rest_y(self.size);
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel_y = 0.0;
            self.jumping = false;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = 0.0;
        }

        self.trail_timer += 1;
        if self.trail_timer >= ctx.tuning.trail_interval {
            self.trail_timer = 0;
            let vel = Vec2::new(-2.0, jitter(ctx.rng, 1.0));
            ctx.maybe_trail(1.0, self.center(), (2.0, 7.0), vel, self.color);
        }
    }

    fn is_offscreen(&self, _tuning: &Tuning) -> bool {
        false
    }
}

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    /// Already scored as passed
    pub counted: bool,
    pub color: Color,
}

impl Obstacle {
    /// Spawn at the right edge, resting on the ground, with a random size
    pub fn spawn(id: u32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let size = uniform(rng, tuning.obstacle_min_size, tuning.obstacle_max_size);
        Self::with_geometry(id, Vec2::new(tuning.width, tuning.rest_y(size)), size)
    }

    /// Obstacle at an explicit position (scripted scenarios)
    pub fn with_geometry(id: u32, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            size,
            health: 1,
            counted: false,
            color: Color::CORAL,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Trailing edge is behind `x`
    #[inline]
    pub fn is_behind(&self, x: f32) -> bool {
        self.pos.x + self.size < x
    }

    /// Take one hit. Returns true when health is gone; removal and scoring
    /// are up to the caller.
    pub fn hit(&mut self, particles: &mut ParticleSystem, rng: &mut impl Rng) -> bool {
        self.health = self.health.saturating_sub(1);
        particles.burst(Burst::Explosion, self.center(), self.color, rng);
        self.health == 0
    }
}

impl Bounded for Obstacle {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

impl Entity for Obstacle {
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        self.pos.x -= ctx.speed;
        let vel = Vec2::new(-1.0, jitter(ctx.rng, 1.0));
        ctx.maybe_trail(0.3, self.center(), (2.0, 7.0), vel, self.color);
    }

    fn is_offscreen(&self, _tuning: &Tuning) -> bool {
        self.is_behind(0.0)
    }
}

/// A floating pickup worth bonus points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    /// Top-left corner of the unrotated square
    pub pos: Vec2,
    pub size: f32,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    pub color: Color,
}

impl PowerUp {
    /// Spawn at the right edge somewhere in the safe band above the ground
    pub fn spawn(id: u32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let y = uniform(
            rng,
            tuning.power_up_top_margin,
            tuning.height - tuning.power_up_bottom_margin,
        );
        Self::with_geometry(id, Vec2::new(tuning.width, y), tuning.power_up_size)
    }

    pub fn with_geometry(id: u32, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            size,
            rotation: 0.0,
            color: Color::YELLOW,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

impl Entity for PowerUp {
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        self.pos.x -= ctx.speed;
        self.rotation += POWER_UP_SPIN;
        let vel = Vec2::new(jitter(ctx.rng, 1.0), jitter(ctx.rng, 1.0));
        ctx.maybe_trail(0.3, self.center(), (1.0, 4.0), vel, self.color);
    }

    fn is_offscreen(&self, _tuning: &Tuning) -> bool {
        self.pos.x + self.size < 0.0
    }
}

/// A shot travelling right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Center (shots are round)
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub color: Color,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            size: tuning.projectile_size,
            speed: tuning.projectile_speed,
            color: Color::CYAN,
        }
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }
}

impl Entity for Projectile {
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        self.pos.x += self.speed;
        let vel = Vec2::new(-3.0, jitter(ctx.rng, 1.0));
        ctx.maybe_trail(0.5, self.pos, (1.0, 4.0), vel, self.color);
    }

    fn is_offscreen(&self, tuning: &Tuning) -> bool {
        self.pos.x - self.size > tuning.width
    }
}

/// Parallax star; wraps around instead of despawning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    /// Center
    pub pos: Vec2,
    /// Radius
    pub size: f32,
    pub speed: f32,
}

impl Star {
    pub fn spawn(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(uniform(rng, 0.0, tuning.width), uniform(rng, 0.0, tuning.height)),
            size: uniform(rng, tuning.star_min_size, tuning.star_max_size),
            speed: uniform(rng, tuning.star_min_speed, tuning.star_max_speed),
        }
    }
}

impl Bounded for Star {
    fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, self.size * 2.0)
    }
}

impl Entity for Star {
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        self.pos.x -= self.speed;
        if self.pos.x < 0.0 {
            self.pos.x = ctx.tuning.width;
            self.pos.y = uniform(ctx.rng, 0.0, ctx.tuning.height);
        }
    }

    fn is_offscreen(&self, _tuning: &Tuning) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    struct Fixture {
        tuning: Tuning,
        particles: ParticleSystem,
        rng: Pcg32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tuning: Tuning::default(),
                particles: ParticleSystem::default(),
                rng: Pcg32::seed_from_u64(42),
            }
        }

        fn ctx(&mut self, speed: f32) -> FrameCtx<'_> {
            FrameCtx {
                tuning: &self.tuning,
                speed,
                particles: &mut self.particles,
                rng: &mut self.rng,
            }
        }
    }

    #[test]
    fn test_player_starts_grounded() {
        let fx = Fixture::new();
        let player = Player::new(&fx.tuning);
        assert_eq!(player.pos, Vec2::new(100.0, 320.0));
        assert!(player.is_grounded(&fx.tuning));
        assert!(!player.jumping);
    }

    #[test]
    fn test_jump_then_land() {
        let mut fx = Fixture::new();
        let mut player = Player::new(&fx.tuning);
        assert!(player.jump(&mut fx.ctx(5.0)));
        assert_eq!(player.vel_y, -12.0);
        assert!(player.jumping);
        assert_eq!(fx.particles.len(), Burst::Jump.count());

        let mut peak = player.pos.y;
        for _ in 0..100 {
            player.update(&mut fx.ctx(5.0));
            peak = peak.min(player.pos.y);
        }
        assert!(peak < 320.0 - 100.0);
        assert!(player.is_grounded(&fx.tuning));
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.jumping);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let mut fx = Fixture::new();
        let mut player = Player::new(&fx.tuning);
        player.jump(&mut fx.ctx(5.0));
        player.update(&mut fx.ctx(5.0));
        let (vel, particles) = (player.vel_y, fx.particles.len());

        assert!(!player.jump(&mut fx.ctx(5.0)));
        assert_eq!(player.vel_y, vel);
        assert!(player.jumping);
        assert_eq!(fx.particles.len(), particles);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut fx = Fixture::new();
        fx.tuning.jump_force = -500.0;
        let mut player = Player::new(&fx.tuning);
        player.jump(&mut fx.ctx(5.0));
        player.update(&mut fx.ctx(5.0));
        assert_eq!(player.pos.y, 0.0);
        assert_eq!(player.vel_y, 0.0);
        assert!(player.jumping);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut fx = Fixture::new();
        let player = Player::new(&fx.tuning);
        let mut cooldown = 0;

        let shot = player.fire(&mut cooldown, 1, &mut fx.ctx(5.0)).unwrap();
        assert_eq!(cooldown, 20);
        assert_eq!(shot.pos, Vec2::new(130.0, 335.0));
        assert!(player.fire(&mut cooldown, 2, &mut fx.ctx(5.0)).is_none());
        assert_eq!(fx.particles.len(), Burst::Muzzle.count());
    }

    #[test]
    fn test_player_trail_cadence() {
        let mut fx = Fixture::new();
        let mut player = Player::new(&fx.tuning);
        for _ in 0..9 {
            player.update(&mut fx.ctx(5.0));
        }
        assert_eq!(fx.particles.len(), 3);
    }

    #[test]
    fn test_obstacle_spawn_geometry() {
        let mut fx = Fixture::new();
        for id in 0..200 {
            let o = Obstacle::spawn(id, &fx.tuning, &mut fx.rng);
            assert!((20.0..70.0).contains(&o.size));
            assert_eq!(o.pos.x, 800.0);
            assert!((o.pos.y + o.size - fx.tuning.ground_y()).abs() < 1e-3);
            assert_eq!(o.health, 1);
            assert!(!o.counted);
        }
    }

    #[test]
    fn test_obstacle_scrolls_and_dies_on_hit() {
        let mut fx = Fixture::new();
        let mut o = Obstacle::with_geometry(1, Vec2::new(400.0, 300.0), 50.0);
        o.update(&mut fx.ctx(5.5));
        assert_eq!(o.pos.x, 394.5);

        fx.particles.clear();
        assert!(o.hit(&mut fx.particles, &mut fx.rng));
        assert_eq!(o.health, 0);
        assert_eq!(fx.particles.len(), Burst::Explosion.count());
        // Health never wraps below zero
        assert!(o.hit(&mut fx.particles, &mut fx.rng));
        assert_eq!(o.health, 0);
    }

    #[test]
    fn test_power_up_band() {
        let mut fx = Fixture::new();
        for id in 0..200 {
            let p = PowerUp::spawn(id, &fx.tuning, &mut fx.rng);
            assert!(p.pos.y >= 50.0 && p.pos.y < 300.0);
            assert_eq!(p.size, 20.0);
        }
        let mut p = PowerUp::with_geometry(1, Vec2::new(10.0, 100.0), 20.0);
        p.update(&mut fx.ctx(5.0));
        assert!((p.rotation - POWER_UP_SPIN).abs() < 1e-6);
        assert!(!p.is_offscreen(&fx.tuning));
        for _ in 0..6 {
            p.update(&mut fx.ctx(5.0));
        }
        assert!(p.is_offscreen(&fx.tuning));
    }

    #[test]
    fn test_projectile_leaves_right_edge() {
        let mut fx = Fixture::new();
        let mut shot = Projectile::new(1, Vec2::new(790.0, 100.0), &fx.tuning);
        shot.update(&mut fx.ctx(5.0));
        assert_eq!(shot.pos.x, 805.0);
        assert!(!shot.is_offscreen(&fx.tuning));
        shot.update(&mut fx.ctx(5.0));
        assert!(shot.is_offscreen(&fx.tuning));
    }

    #[test]
    fn test_star_wraps() {
        let mut fx = Fixture::new();
        let mut star = Star {
            pos: Vec2::new(0.05, 10.0),
            size: 1.0,
            speed: 0.1,
        };
        star.update(&mut fx.ctx(5.0));
        assert_eq!(star.pos.x, 800.0);
        assert!((0.0..400.0).contains(&star.pos.y));
        assert!(!star.is_offscreen(&fx.tuning));
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(presses in proptest::collection::vec(any::<bool>(), 1..300)) {
            let mut fx = Fixture::new();
            let mut player = Player::new(&fx.tuning);
            let floor = fx.tuning.rest_y(player.size);
            for press in presses {
                if press {
                    player.jump(&mut fx.ctx(5.0));
                }
                player.update(&mut fx.ctx(5.0));
                prop_assert!(player.pos.y >= 0.0 && player.pos.y <= floor);
                // Landing (or resting) zeroes velocity and clears the airborne flag
                if player.pos.y == floor && !player.jumping {
                    prop_assert_eq!(player.vel_y, 0.0);
                }
            }
        }
    }
}
