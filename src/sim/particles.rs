//! Cosmetic particles (trails, bursts, explosions)
//!
//! Particles never touch gameplay: they drift, fall slightly, fade and
//! shrink, and are pruned as soon as either alpha or size reaches zero.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_FADE, PARTICLE_GRAVITY, PARTICLE_SHRINK};
use crate::{Color, jitter, uniform};

/// A single particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius
    pub size: f32,
    /// Opacity, 1 = opaque
    pub alpha: f32,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: Vec2, size: f32, color: Color, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size,
            alpha: 1.0,
            color,
        }
    }

    /// Integrate one frame
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.alpha -= PARTICLE_FADE;
        self.size -= PARTICLE_SHRINK;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0 && self.size > 0.0
    }
}

/// Effect bursts triggered by gameplay moments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// Dust kicked down from the player's feet
    Jump,
    /// Flash forward from the player's leading edge
    Muzzle,
    /// Debris in every direction (obstacle hit, pickup, death)
    Explosion,
}

impl Burst {
    pub fn count(self) -> usize {
        match self {
            Burst::Jump => 10,
            Burst::Muzzle => 15,
            Burst::Explosion => 30,
        }
    }

    fn sample(self, rng: &mut impl Rng) -> (f32, Vec2) {
        match self {
            Burst::Jump => (
                uniform(rng, 2.0, 7.0),
                Vec2::new(jitter(rng, 3.0), uniform(rng, 2.0, 6.0)),
            ),
            Burst::Muzzle => (
                uniform(rng, 1.0, 5.0),
                Vec2::new(uniform(rng, 3.0, 8.0), jitter(rng, 2.0)),
            ),
            Burst::Explosion => (
                uniform(rng, 3.0, 8.0),
                Vec2::new(jitter(rng, 4.0), jitter(rng, 4.0)),
            ),
        }
    }
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 2000;

/// Owning collection of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    cap: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap.min(256)),
            cap,
        }
    }

    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.particles.truncate(cap);
    }

    /// Add a particle; dropped silently once the cap is reached
    pub fn emit(&mut self, particle: Particle) {
        if self.particles.len() < self.cap {
            self.particles.push(particle);
        }
    }

    /// Emit a full burst around `origin`
    pub fn burst(&mut self, kind: Burst, origin: Vec2, color: Color, rng: &mut impl Rng) {
        for _ in 0..kind.count() {
            let (size, vel) = kind.sample(rng);
            self.emit(Particle::new(origin, size, color, vel));
        }
    }

    /// Advance every particle one frame and drop the dead ones
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_motion() {
        let mut p = Particle::new(Vec2::new(10.0, 10.0), 5.0, Color::CYAN, Vec2::new(-2.0, 0.0));
        p.update();
        assert_eq!(p.pos, Vec2::new(8.0, 10.0));
        assert!((p.vel.y - PARTICLE_GRAVITY).abs() < 1e-6);
        assert!((p.alpha - 0.98).abs() < 1e-6);
        assert!((p.size - 4.9).abs() < 1e-6);
    }

    #[test]
    fn test_faded_particle_pruned() {
        let mut system = ParticleSystem::default();
        // Large size so alpha is what runs out
        system.emit(Particle::new(Vec2::ZERO, 100.0, Color::WHITE, Vec2::ZERO));
        let mut updates = 0;
        while !system.is_empty() {
            system.update();
            updates += 1;
            assert!(updates <= 60, "particle outlived its alpha");
        }
        // 1.0 / 0.02 = 50 frames, give or take float rounding
        assert!((49..=51).contains(&updates));
        assert!(system.iter().all(Particle::is_alive));
    }

    #[test]
    fn test_shrunk_particle_pruned() {
        let mut system = ParticleSystem::default();
        system.emit(Particle::new(Vec2::ZERO, 0.25, Color::WHITE, Vec2::ZERO));
        system.update();
        system.update();
        assert_eq!(system.len(), 1);
        system.update();
        assert!(system.is_empty());
    }

    #[test]
    fn test_burst_counts() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::default();
        system.burst(Burst::Jump, Vec2::ZERO, Color::CYAN, &mut rng);
        system.burst(Burst::Muzzle, Vec2::ZERO, Color::CYAN, &mut rng);
        system.burst(Burst::Explosion, Vec2::ZERO, Color::CORAL, &mut rng);
        assert_eq!(system.len(), 10 + 15 + 30);
    }

    #[test]
    fn test_jump_dust_falls_and_muzzle_flies_forward() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::default();
        system.burst(Burst::Jump, Vec2::ZERO, Color::CYAN, &mut rng);
        assert!(system.iter().all(|p| p.vel.y >= 2.0));
        system.clear();
        system.burst(Burst::Muzzle, Vec2::ZERO, Color::CYAN, &mut rng);
        assert!(system.iter().all(|p| p.vel.x >= 3.0));
    }

    #[test]
    fn test_cap_limits_emission() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new(12);
        system.burst(Burst::Explosion, Vec2::ZERO, Color::CORAL, &mut rng);
        assert_eq!(system.len(), 12);
        system.set_cap(0);
        assert!(system.is_empty());
    }
}
