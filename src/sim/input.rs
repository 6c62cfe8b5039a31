//! Typed input commands and the per-tick input snapshot
//!
//! Movement is level-triggered (held state sampled every tick). Fire, start,
//! pause and render-mode toggles are edge-triggered: each event acts exactly
//! once, however long the key stays down.

use serde::{Deserialize, Serialize};

/// Event produced by the input collaborator between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    TurnLeft(bool),
    TurnRight(bool),
    Thrust(bool),
    Brake(bool),
    Fire,
    StartGame,
    TogglePause,
    ToggleAsteroidRenderMode,
}

/// One-shot command consumed by exactly one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Fire,
    StartGame,
    TogglePause,
    ToggleAsteroidRenderMode,
}

/// Level-triggered controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldControls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub brake: bool,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: HeldControls,
    /// One-shot commands in arrival order
    pub commands: Vec<Command>,
}

impl TickInput {
    /// Input with a single one-shot command and nothing held
    pub fn command(command: Command) -> Self {
        Self {
            held: HeldControls::default(),
            commands: vec![command],
        }
    }
}

/// Latches input events between ticks
///
/// Held flags persist until released; queued commands are handed to exactly
/// one tick by [`InputLatch::take`].
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held: HeldControls,
    queued: Vec<Command>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::TurnLeft(on) => self.held.turn_left = on,
            InputEvent::TurnRight(on) => self.held.turn_right = on,
            InputEvent::Thrust(on) => self.held.thrust = on,
            InputEvent::Brake(on) => self.held.brake = on,
            InputEvent::Fire => self.queued.push(Command::Fire),
            InputEvent::StartGame => self.queued.push(Command::StartGame),
            InputEvent::TogglePause => self.queued.push(Command::TogglePause),
            InputEvent::ToggleAsteroidRenderMode => {
                self.queued.push(Command::ToggleAsteroidRenderMode)
            }
        }
    }

    /// Sample held state and drain queued commands for the next tick
    pub fn take(&mut self) -> TickInput {
        TickInput {
            held: self.held,
            commands: std::mem::take(&mut self.queued),
        }
    }

    /// Release all held controls and drop queued commands
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
