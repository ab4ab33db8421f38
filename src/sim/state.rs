//! Game state and run lifecycle
//!
//! One `GameState` is one run: every collection the frame loop mutates lives
//! here, created fresh when a run starts and dropped when the next begins.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{FrameCtx, Obstacle, Player, PowerUp, Projectile, Star};
use super::particles::{Burst, ParticleSystem};
use super::score::Scoreboard;
use crate::tuning::Tuning;

/// Current phase of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not simulating (menu / name entry)
    Idle,
    /// Active gameplay, the loop reschedules itself
    Running,
    /// Run ended; the loop stops rescheduling
    GameOver,
}

/// Things that happened during a tick, for the session and UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Fired { projectile: u32 },
    ObstaclePassed { obstacle: u32 },
    ObstacleDestroyed { obstacle: u32, points: u64 },
    PowerUpCollected { power_up: u32 },
    GameOver { score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub scoreboard: Scoreboard,
    /// Frames until the next shot is allowed. Shared rather than per-player;
    /// there is only ever one player.
    pub fire_cooldown: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Background starfield (wraps, never despawns)
    pub stars: Vec<Star>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..tuning.star_count)
            .map(|_| Star::spawn(&tuning, &mut rng))
            .collect();

        Self {
            seed,
            rng,
            phase: GamePhase::Idle,
            time_ticks: 0,
            scoreboard: Scoreboard::new(&tuning),
            fire_cooldown: 0,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            projectiles: Vec::new(),
            particles: ParticleSystem::default(),
            stars,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Limit live particles (0 disables them)
    pub fn with_particle_cap(mut self, cap: usize) -> Self {
        self.particles.set_cap(cap);
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.scoreboard.speed()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Idle → Running
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Running;
            log::debug!("Run started (seed {})", self.seed);
        }
    }

    /// Cancel a run without a game over. The in-flight tick, if any, has
    /// already finished; nothing further is simulated.
    pub fn stop(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Idle;
        }
    }

    /// Running → GameOver: the player explodes and the score is frozen
    pub fn end_run(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        let center = self.player.center();
        let color = self.player.color;
        self.particles
            .burst(Burst::Explosion, center, color, &mut self.rng);
        log::debug!("Run over at tick {} with score {}", self.time_ticks, self.score());
    }

    /// Player jump intent
    pub fn jump(&mut self) -> bool {
        let mut ctx = FrameCtx {
            tuning: &self.tuning,
            speed: self.scoreboard.speed(),
            particles: &mut self.particles,
            rng: &mut self.rng,
        };
        let jumped = self.player.jump(&mut ctx);
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    /// Player fire intent, gated by the shared cooldown
    pub fn fire(&mut self) -> bool {
        let id = self.next_id;
        let mut ctx = FrameCtx {
            tuning: &self.tuning,
            speed: self.scoreboard.speed(),
            particles: &mut self.particles,
            rng: &mut self.rng,
        };
        match self.player.fire(&mut self.fire_cooldown, id, &mut ctx) {
            Some(projectile) => {
                self.next_id += 1;
                self.projectiles.push(projectile);
                self.events.push(GameEvent::Fired { projectile: id });
                true
            }
            None => false,
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_is_idle_at_baseline() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.speed(), 5.0);
        assert_eq!(state.stars.len(), 100);
        assert!(state.stars.iter().all(|s| s.size > 0.0));
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(7, Tuning::default());
        state.end_run();
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        assert!(state.is_running());
        state.stop();
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        state.end_run();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), Burst::Explosion.count());

        // GameOver is terminal for this run
        state.start();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_fire_twice_in_window_yields_one_projectile() {
        let mut state = GameState::new(7, Tuning::default());
        assert!(state.fire());
        assert!(!state.fire());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.fire_cooldown, 20);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Fired {
                projectile: state.projectiles[0].id
            }]
        );
    }

    #[test]
    fn test_same_seed_same_stars() {
        let a = GameState::new(99, Tuning::default());
        let b = GameState::new(99, Tuning::default());
        assert!(a.stars.iter().zip(&b.stars).all(|(x, y)| x.pos == y.pos));
    }
}
