//! Probabilistic spawning
//!
//! Each frame rolls independently for an obstacle and for a power-up. There
//! is no spacing rule beyond the odds, so back-to-back spawns can happen.

use rand::Rng;

use super::entities::{Obstacle, PowerUp};
use super::state::GameState;

/// What a single frame's rolls produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnRoll {
    pub obstacle: bool,
    pub power_up: bool,
}

/// Roll this frame's spawns and append the new entities at the right edge
pub fn spawn_entities(state: &mut GameState) -> SpawnRoll {
    let roll = SpawnRoll {
        obstacle: state.rng.random::<f32>() < state.tuning.obstacle_chance,
        power_up: state.rng.random::<f32>() < state.tuning.power_up_chance,
    };

    if roll.obstacle {
        let id = state.next_entity_id();
        let obstacle = Obstacle::spawn(id, &state.tuning, &mut state.rng);
        log::trace!("Spawned obstacle {} (size {:.1})", id, obstacle.size);
        state.obstacles.push(obstacle);
    }

    if roll.power_up {
        let id = state.next_entity_id();
        let power_up = PowerUp::spawn(id, &state.tuning, &mut state.rng);
        log::trace!("Spawned power-up {} at y {:.1}", id, power_up.pos.y);
        state.power_ups.push(power_up);
    }

    roll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_no_spawns_at_zero_odds() {
        let mut state = GameState::new(1, Tuning::without_spawns());
        for _ in 0..1000 {
            assert_eq!(spawn_entities(&mut state), SpawnRoll::default());
        }
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_certain_odds_spawn_every_frame() {
        let tuning = Tuning {
            obstacle_chance: 1.0,
            power_up_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(1, tuning);
        for _ in 0..3 {
            spawn_entities(&mut state);
        }
        assert_eq!(state.obstacles.len(), 3);
        assert_eq!(state.power_ups.len(), 3);
        assert!(state.obstacles.iter().all(|o| o.pos.x == state.tuning.width));

        // IDs stay unique across kinds
        let mut ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        ids.extend(state.power_ups.iter().map(|p| p.id));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_default_odds_roughly_match() {
        let mut state = GameState::new(2024, Tuning::default());
        let mut obstacles = 0;
        let mut power_ups = 0;
        for _ in 0..20_000 {
            let roll = spawn_entities(&mut state);
            obstacles += roll.obstacle as u32;
            power_ups += roll.power_up as u32;
        }
        // Expected 400 and 100
        assert!((250..550).contains(&obstacles), "obstacles: {}", obstacles);
        assert!((40..180).contains(&power_ups), "power-ups: {}", power_ups);
    }
}
