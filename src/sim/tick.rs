//! Per-frame simulation tick
//!
//! One call advances a running game by exactly one display frame. Phases run
//! in a fixed order: background, cooldown, player, spawns, projectiles vs
//! obstacles, obstacles vs player, power-ups vs player, particles.
//!
//! Removal never happens mid-iteration: each phase marks dead entities and
//! compacts its collection once at the end.

use super::collision::{Bounded, collides};
use super::entities::{Entity, FrameCtx};
use super::particles::Burst;
use super::spawn::spawn_entities;
use super::state::{GameEvent, GamePhase, GameState};

/// Commands latched since the previous tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub fire: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    if input.jump {
        state.jump();
    }
    if input.fire {
        state.fire();
    }

    advance_background(state);

    if state.fire_cooldown > 0 {
        state.fire_cooldown -= 1;
    }

    advance_player(state);
    spawn_entities(state);
    advance_projectiles(state);
    let crashed = advance_obstacles(state);
    advance_power_ups(state);
    state.particles.update();

    if crashed {
        state.end_run();
        let score = state.score();
        state.events.push(GameEvent::GameOver { score });
    }
}

fn advance_background(state: &mut GameState) {
    let GameState {
        stars,
        tuning,
        particles,
        rng,
        scoreboard,
        ..
    } = state;
    let tuning = &*tuning;
    let mut ctx = FrameCtx {
        tuning,
        speed: scoreboard.speed(),
        particles,
        rng,
    };
    for star in stars.iter_mut() {
        star.update(&mut ctx);
    }
}

fn advance_player(state: &mut GameState) {
    let GameState {
        player,
        tuning,
        particles,
        rng,
        scoreboard,
        ..
    } = state;
    let tuning = &*tuning;
    let mut ctx = FrameCtx {
        tuning,
        speed: scoreboard.speed(),
        particles,
        rng,
    };
    player.update(&mut ctx);
}

/// Move shots and resolve hits. A shot is spent on the first obstacle it
/// touches; an obstacle whose health runs out is removed and scored once.
fn advance_projectiles(state: &mut GameState) {
    let GameState {
        projectiles,
        obstacles,
        tuning,
        particles,
        rng,
        scoreboard,
        events,
        ..
    } = state;
    let tuning = &*tuning;

    let mut destroyed = vec![false; obstacles.len()];

    projectiles.retain_mut(|projectile| {
        let mut ctx = FrameCtx {
            tuning,
            speed: scoreboard.speed(),
            particles: &mut *particles,
            rng: &mut *rng,
        };
        projectile.update(&mut ctx);

        let target = obstacles
            .iter_mut()
            .enumerate()
            .find(|(i, obstacle)| !destroyed[*i] && collides(&*projectile, &**obstacle));

        if let Some((i, obstacle)) = target {
            if obstacle.hit(&mut *particles, &mut *rng) {
                destroyed[i] = true;
                let points = scoreboard.obstacle_destroyed(obstacle.counted);
                events.push(GameEvent::ObstacleDestroyed {
                    obstacle: obstacle.id,
                    points,
                });
            }
            return false;
        }

        !projectile.is_offscreen(tuning)
    });

    let mut index = 0;
    obstacles.retain(|_| {
        let keep = !destroyed[index];
        index += 1;
        keep
    });
}

/// Scroll obstacles, detect the crash, and score the ones left behind.
/// Returns whether the player was hit.
fn advance_obstacles(state: &mut GameState) -> bool {
    let player_bounds = state.player.bounds();
    let player_x = state.player.pos.x;

    let GameState {
        obstacles,
        tuning,
        particles,
        rng,
        scoreboard,
        events,
        ..
    } = state;
    let tuning = &*tuning;

    let mut crashed = false;
    for obstacle in obstacles.iter_mut() {
        let mut ctx = FrameCtx {
            tuning,
            speed: scoreboard.speed(),
            particles: &mut *particles,
            rng: &mut *rng,
        };
        obstacle.update(&mut ctx);

        if obstacle.bounds().overlaps(&player_bounds) {
            crashed = true;
        }

        if !obstacle.counted && obstacle.is_behind(player_x) {
            obstacle.counted = true;
            scoreboard.obstacle_passed();
            events.push(GameEvent::ObstaclePassed {
                obstacle: obstacle.id,
            });
        }
    }

    obstacles.retain(|obstacle| !obstacle.is_offscreen(tuning));
    crashed
}

/// Scroll power-ups and collect the ones the player touches
fn advance_power_ups(state: &mut GameState) {
    let GameState {
        power_ups,
        player,
        tuning,
        particles,
        rng,
        scoreboard,
        events,
        ..
    } = state;
    let tuning = &*tuning;

    power_ups.retain_mut(|power_up| {
        let mut ctx = FrameCtx {
            tuning,
            speed: scoreboard.speed(),
            particles: &mut *particles,
            rng: &mut *rng,
        };
        power_up.update(&mut ctx);

        if collides(&*player, &*power_up) {
            scoreboard.power_up_collected();
            particles.burst(Burst::Explosion, power_up.center(), power_up.color, &mut *rng);
            events.push(GameEvent::PowerUpCollected {
                power_up: power_up.id,
            });
            return false;
        }

        !power_up.is_offscreen(tuning)
    });
}
