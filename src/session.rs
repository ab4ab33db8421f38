//! Session controller
//!
//! Owns the run, the leaderboard and the player's name, and drives the UI
//! through `SessionUi` hooks. Screens follow the player's path:
//! name form → playfield (idle) → running → game over → play again / new player.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::GUEST_NAME;
use crate::highscores::HighScores;
use crate::persistence::Storage;
use crate::platform::{Clock, Command, InputQueue};
use crate::renderer::{Canvas, draw_frame};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState};
use crate::tuning::Tuning;

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NameForm,
    Playfield,
    GameOver,
}

/// Callbacks into whatever shows menus and labels. Every hook defaults to a
/// no-op so a frontend only implements what it displays.
pub trait SessionUi {
    fn show_name_form(&mut self) {}
    fn show_playfield(&mut self) {}
    fn show_game_over(&mut self, _score: u64, _scores: &HighScores) {}
    fn hide_game_over(&mut self) {}
    fn set_score(&mut self, _score: u64) {}
    fn set_player_name(&mut self, _name: &str) {}
    fn set_high_scores(&mut self, _scores: &HighScores) {}
    fn set_start_visible(&mut self, _visible: bool) {}
}

/// UI that shows nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullUi;

impl SessionUi for NullUi {}

/// Normalize a submitted name: trimmed, `Guest` when blank
pub fn player_name_or_guest(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        GUEST_NAME.to_string()
    } else {
        name.to_string()
    }
}

pub struct Session<S: Storage, U: SessionUi> {
    storage: S,
    ui: U,
    clock: Box<dyn Clock>,
    /// Seeds for successive runs
    seeds: Pcg32,
    tuning: Tuning,
    settings: Settings,
    player_name: String,
    high_scores: HighScores,
    state: GameState,
    input: InputQueue,
    screen: Screen,
}

impl<S: Storage, U: SessionUi> Session<S, U> {
    /// Load the leaderboard and settings, then show the name form
    pub fn new(storage: S, ui: U, clock: Box<dyn Clock>, seed: u64, tuning: Tuning) -> Self {
        let high_scores = HighScores::load(&storage);
        let settings = Settings::load(&storage);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let state = GameState::new(seeds.random(), tuning.clone())
            .with_particle_cap(settings.max_particles());

        let mut session = Self {
            storage,
            ui,
            clock,
            seeds,
            tuning,
            settings,
            player_name: GUEST_NAME.to_string(),
            high_scores,
            state,
            input: InputQueue::new(),
            screen: Screen::NameForm,
        };
        session.ui.set_high_scores(&session.high_scores);
        session.ui.show_name_form();
        session
    }

    fn fresh_state(&mut self) -> GameState {
        GameState::new(self.seeds.random(), self.tuning.clone())
            .with_particle_cap(self.settings.max_particles())
    }

    /// Accept the player's name and show the idle playfield
    pub fn submit_name(&mut self, raw: &str) {
        self.player_name = player_name_or_guest(raw);
        log::info!("Player: {}", self.player_name);
        self.ui.set_player_name(&self.player_name);

        self.state = self.fresh_state();
        self.input.clear();
        self.screen = Screen::Playfield;
        self.ui.show_playfield();
        self.ui.set_start_visible(true);
        self.ui.set_score(0);
    }

    /// Begin a fresh run: new world, baseline speed, score zero
    pub fn start_run(&mut self) {
        self.state = self.fresh_state();
        self.state.start();
        self.input.clear();
        self.screen = Screen::Playfield;
        self.ui.hide_game_over();
        self.ui.set_start_visible(false);
        self.ui.set_score(0);
        log::info!("Run started for {}", self.player_name);
    }

    pub fn play_again(&mut self) {
        self.start_run();
    }

    /// Abandon the current run and go back to the name form
    pub fn new_player(&mut self) {
        self.state.stop();
        self.input.clear();
        self.screen = Screen::NameForm;
        self.ui.hide_game_over();
        self.ui.show_name_form();
    }

    /// Route a player command. While idle on the playfield any command
    /// starts a run; on the game-over screen commands are ignored.
    pub fn handle_command(&mut self, command: Command) {
        if self.state.is_running() {
            self.input.push(command);
        } else if self.screen == Screen::Playfield {
            self.start_run();
        }
    }

    /// Advance one frame. Returns whether the loop should schedule another.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let input = self.input.take();
        sim::tick(&mut self.state, &input);

        let mut score_changed = false;
        for event in self.state.drain_events() {
            match event {
                GameEvent::ObstaclePassed { .. }
                | GameEvent::ObstacleDestroyed { .. }
                | GameEvent::PowerUpCollected { .. } => score_changed = true,
                GameEvent::GameOver { score } => self.record_game_over(score),
                GameEvent::Jumped | GameEvent::Fired { .. } => {}
            }
        }
        if score_changed {
            self.ui.set_score(self.state.score());
        }

        self.state.is_running()
    }

    fn record_game_over(&mut self, score: u64) {
        let timestamp = self.clock.now_iso8601();
        let rank = self.high_scores.add_score(&self.player_name, score, timestamp);
        self.high_scores.save(&mut self.storage);

        match rank {
            Some(rank) => log::info!("Game over: {} scored {} (rank {})", self.player_name, score, rank),
            None => log::info!("Game over: {} scored {}", self.player_name, score),
        }

        self.screen = Screen::GameOver;
        self.ui.set_score(score);
        self.ui.set_high_scores(&self.high_scores);
        self.ui.show_game_over(score, &self.high_scores);
    }

    /// Cancel the run. The last tick already completed; nothing is recorded.
    pub fn stop(&mut self) {
        self.state.stop();
        self.input.clear();
    }

    /// Replace settings, persist them and apply the particle cap
    pub fn set_settings(&mut self, settings: Settings) {
        self.state.particles.set_cap(settings.max_particles());
        settings.save(&mut self.storage);
        self.settings = settings;
    }

    /// Paint the current frame
    pub fn render(&self, canvas: &mut dyn Canvas) {
        draw_frame(&self.state, &self.settings, canvas);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
