//! Canvas that records primitive calls instead of drawing
//!
//! Used by tests and by the headless native run.

use glam::Vec2;

use super::Canvas;
use crate::Color;

/// One recorded primitive call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear { width: f32, height: f32 },
    Rect { pos: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, pos: Vec2, font: String, color: Color },
    Alpha(f32),
    Glow { blur: f32, color: Color },
    Save,
    Translate(Vec2),
    Rotate(f32),
    Restore,
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCmd>,
    frames: u64,
}

impl RecordingCanvas {
    /// Calls recorded since the last clear
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Number of frames started (clears) so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Filled shapes in the current frame
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Rect { .. } | DrawCmd::Circle { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        // Keep only the frame being built
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCmd::Clear { width, height });
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCmd::Rect { pos, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCmd::Alpha(alpha));
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.commands.push(DrawCmd::Glow { blur, color });
    }

    fn save(&mut self) {
        self.commands.push(DrawCmd::Save);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCmd::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCmd::Rotate(radians));
    }

    fn restore(&mut self) {
        self.commands.push(DrawCmd::Restore);
    }
}
