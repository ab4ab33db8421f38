//! Input mapping
//!
//! Raw device events become one of two logical commands. The queue only
//! latches them until the next tick; debouncing is the player's job
//! (airborne flag, fire cooldown).

use crate::sim::TickInput;

/// Logical player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    Fire,
}

impl Command {
    /// Map a `KeyboardEvent.code` to a command
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Command::Jump),
            "Space" => Some(Command::Fire),
            _ => None,
        }
    }

    /// Pointer clicks on the playfield always jump
    pub fn from_click() -> Self {
        Command::Jump
    }
}

/// Commands received since the last tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: TickInput,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        match command {
            Command::Jump => self.pending.jump = true,
            Command::Fire => self.pending.fire = true,
        }
    }

    /// Hand the latched commands to the next tick and reset
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending = TickInput::default();
    }
}
