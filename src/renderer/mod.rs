//! Canvas 2D rendering module
//!
//! The simulation never draws. After each tick the frame is rebuilt from the
//! game state through a handful of primitives, so any surface that can fill
//! rectangles, circles and text can host the game.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod recording;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use recording::{DrawCmd, RecordingCanvas};
pub use shapes::Draw;

use glam::Vec2;

use crate::Color;
use crate::settings::Settings;
use crate::sim::GameState;

/// Font for the key bindings hint
pub const HINT_FONT: &str = "14px Arial";
/// Key bindings hint, one line each
pub const HINT_LINES: [(&str, Vec2); 2] = [
    ("\u{2191} or W: Jump", Vec2::new(10.0, 20.0)),
    ("Space: Fire", Vec2::new(10.0, 40.0)),
];

/// Drawing primitives the game needs from a 2D surface
pub trait Canvas {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color);
    /// Global opacity for subsequent fills
    fn set_alpha(&mut self, alpha: f32);
    /// Shadow blur around subsequent fills; a blur of 0 turns it off
    fn set_glow(&mut self, blur: f32, color: Color);
    fn save(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    fn restore(&mut self);
}

/// Draw one complete frame: background, ground, player, shots, obstacles,
/// power-ups, particles, then the controls hint on top.
pub fn draw_frame(state: &GameState, settings: &Settings, canvas: &mut dyn Canvas) {
    let tuning = &state.tuning;
    canvas.clear(tuning.width, tuning.height);

    for star in &state.stars {
        star.draw(canvas, settings);
    }

    canvas.fill_rect(
        Vec2::new(0.0, tuning.ground_y()),
        Vec2::new(tuning.width, tuning.ground_height),
        Color::GROUND,
    );

    state.player.draw(canvas, settings);
    for projectile in &state.projectiles {
        projectile.draw(canvas, settings);
    }
    for obstacle in &state.obstacles {
        obstacle.draw(canvas, settings);
    }
    for power_up in &state.power_ups {
        power_up.draw(canvas, settings);
    }
    for particle in state.particles.iter() {
        particle.draw(canvas, settings);
    }

    if settings.show_controls {
        for (text, pos) in HINT_LINES {
            canvas.fill_text(text, pos, HINT_FONT, Color::WHITE);
        }
    }
}
