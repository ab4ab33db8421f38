//! Per-kind drawing for every entity
//!
//! Drawing reads entity state only. Glowing shapes switch the shadow blur
//! back off before returning so it never leaks into the next fill.

use glam::Vec2;

use super::Canvas;
use crate::Color;
use crate::consts::{GLOW_OBSTACLE, GLOW_PLAYER};
use crate::settings::Settings;
use crate::sim::{Obstacle, Particle, Player, PowerUp, Projectile, Star};

/// Something that can paint itself onto a canvas
pub trait Draw {
    fn draw(&self, canvas: &mut dyn Canvas, settings: &Settings);
}

/// Run `fill` with a glow around it (skipped when glow is disabled)
fn glowing(
    canvas: &mut dyn Canvas,
    settings: &Settings,
    blur: f32,
    color: Color,
    fill: impl FnOnce(&mut dyn Canvas),
) {
    if settings.glow {
        canvas.set_glow(blur, color);
        fill(canvas);
        canvas.set_glow(0.0, color);
    } else {
        fill(canvas);
    }
}

impl Draw for Player {
    fn draw(&self, canvas: &mut dyn Canvas, settings: &Settings) {
        glowing(canvas, settings, GLOW_PLAYER, self.color, |c| {
            c.fill_rect(self.pos, Vec2::splat(self.size), self.color)
        });
    }
}

impl Draw for Projectile {
    fn draw(&self, canvas: &mut dyn Canvas, settings: &Settings) {
        glowing(canvas, settings, GLOW_PLAYER, self.color, |c| {
            c.fill_circle(self.pos, self.size / 2.0, self.color)
        });
    }
}

impl Draw for Obstacle {
    fn draw(&self, canvas: &mut dyn Canvas, settings: &Settings) {
        glowing(canvas, settings, GLOW_OBSTACLE, self.color, |c| {
            c.fill_rect(self.pos, Vec2::splat(self.size), self.color)
        });
    }
}

impl Draw for PowerUp {
    fn draw(&self, canvas: &mut dyn Canvas, settings: &Settings) {
        let half = self.size / 2.0;
        canvas.save();
        canvas.translate(self.pos + Vec2::splat(half));
        canvas.rotate(self.rotation);
        glowing(canvas, settings, GLOW_PLAYER, self.color, |c| {
            c.fill_rect(Vec2::splat(-half), Vec2::splat(self.size), self.color)
        });
        canvas.restore();
    }
}

impl Draw for Particle {
    fn draw(&self, canvas: &mut dyn Canvas, _settings: &Settings) {
        canvas.save();
        canvas.set_alpha(self.alpha);
        canvas.fill_circle(self.pos, self.size, self.color);
        canvas.restore();
    }
}

impl Draw for Star {
    fn draw(&self, canvas: &mut dyn Canvas, _settings: &Settings) {
        canvas.fill_circle(self.pos, self.size, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, RecordingCanvas};
    use crate::tuning::Tuning;

    #[test]
    fn test_player_glow_is_reset() {
        let player = Player::new(&Tuning::default());
        let mut canvas = RecordingCanvas::default();
        player.draw(&mut canvas, &Settings::default());
        assert_eq!(
            canvas.commands(),
            &[
                DrawCmd::Glow {
                    blur: 15.0,
                    color: Color::CYAN
                },
                DrawCmd::Rect {
                    pos: Vec2::new(100.0, 320.0),
                    size: Vec2::splat(30.0),
                    color: Color::CYAN
                },
                DrawCmd::Glow {
                    blur: 0.0,
                    color: Color::CYAN
                },
            ]
        );
    }

    #[test]
    fn test_glow_disabled() {
        let obstacle = Obstacle::with_geometry(1, Vec2::new(10.0, 20.0), 40.0);
        let settings = Settings {
            glow: false,
            ..Settings::default()
        };
        let mut canvas = RecordingCanvas::default();
        obstacle.draw(&mut canvas, &settings);
        assert_eq!(canvas.commands().len(), 1);
    }

    #[test]
    fn test_power_up_rotates_about_center() {
        let mut power_up = PowerUp::with_geometry(1, Vec2::new(100.0, 100.0), 20.0);
        power_up.rotation = 0.5;
        let mut canvas = RecordingCanvas::default();
        power_up.draw(&mut canvas, &Settings::default());
        let cmds = canvas.commands();
        assert_eq!(cmds[0], DrawCmd::Save);
        assert_eq!(cmds[1], DrawCmd::Translate(Vec2::new(110.0, 110.0)));
        assert_eq!(cmds[2], DrawCmd::Rotate(0.5));
        assert!(cmds.contains(&DrawCmd::Rect {
            pos: Vec2::new(-10.0, -10.0),
            size: Vec2::splat(20.0),
            color: Color::YELLOW
        }));
        assert_eq!(cmds.last(), Some(&DrawCmd::Restore));
    }

    #[test]
    fn test_projectile_radius_is_half_size() {
        let shot = Projectile::new(1, Vec2::new(50.0, 60.0), &Tuning::default());
        let mut canvas = RecordingCanvas::default();
        shot.draw(&mut canvas, &Settings::default());
        assert!(canvas.commands().contains(&DrawCmd::Circle {
            center: Vec2::new(50.0, 60.0),
            radius: 5.0,
            color: Color::CYAN
        }));
    }

    #[test]
    fn test_particle_alpha_scoped() {
        let mut particle = Particle::new(Vec2::ZERO, 3.0, Color::CORAL, Vec2::ZERO);
        particle.alpha = 0.4;
        let mut canvas = RecordingCanvas::default();
        particle.draw(&mut canvas, &Settings::default());
        assert_eq!(canvas.commands()[1], DrawCmd::Alpha(0.4));
        assert_eq!(canvas.commands().last(), Some(&DrawCmd::Restore));
    }
}
