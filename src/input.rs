//! Keyboard model, key bindings and input sources
//!
//! Input is edge-triggered: a press starts a paddle moving, a release of
//! either key in that paddle's pair stops it.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::sim::Side;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    Z,
    Up,
    Down,
}

/// Raw input transition delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
    Quit,
}

/// What a paddle should do in response to input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleAction {
    Up,
    Down,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleCommand {
    pub side: Side,
    pub action: PaddleAction,
}

/// Up/down key pair for each paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left_up: Key,
    pub left_down: Key,
    pub right_up: Key,
    pub right_down: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: Key::A,
            left_down: Key::Z,
            right_up: Key::Up,
            right_down: Key::Down,
        }
    }
}

impl KeyBindings {
    fn lookup(&self, key: Key) -> Option<(Side, PaddleAction)> {
        if key == self.left_up {
            Some((Side::Left, PaddleAction::Up))
        } else if key == self.left_down {
            Some((Side::Left, PaddleAction::Down))
        } else if key == self.right_up {
            Some((Side::Right, PaddleAction::Up))
        } else if key == self.right_down {
            Some((Side::Right, PaddleAction::Down))
        } else {
            None
        }
    }

    /// Map a key transition to a paddle command. `Quit` and unbound keys map to nothing.
    pub fn translate(&self, event: InputEvent) -> Option<PaddleCommand> {
        match event {
            InputEvent::Pressed(key) => self
                .lookup(key)
                .map(|(side, action)| PaddleCommand { side, action }),
            InputEvent::Released(key) => self.lookup(key).map(|(side, _)| PaddleCommand {
                side,
                action: PaddleAction::Stop,
            }),
            InputEvent::Quit => None,
        }
    }
}

/// Non-blocking source of input events, polled once per tick
pub trait InputSource {
    /// Events that arrived before simulation tick `tick`
    fn poll(&mut self, tick: u64) -> Vec<InputEvent>;
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent> {
        (**self).poll(tick)
    }
}

/// Source that never produces input
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _tick: u64) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// One entry of an input script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub tick: u64,
    pub event: InputEvent,
}

/// Replays a fixed list of timed events
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<ScriptedEvent>,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by_key(|e| e.tick);
        Self {
            events: events.into(),
        }
    }

    /// Parse a JSON array of `{ "tick": n, "event": ... }` entries
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let events: Vec<ScriptedEvent> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse {
                what: "input script",
                message: e.to_string(),
            })?;
        log::info!("Loaded input script with {} events", events.len());
        Ok(Self::new(events))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut due = Vec::new();
        while let Some(next) = self.events.front() {
            if next.tick > tick {
                break;
            }
            if let Some(e) = self.events.pop_front() {
                due.push(e.event);
            }
        }
        due
    }
}
