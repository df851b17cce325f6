//! Input capture
//!
//! Backends report raw key transitions ([`KeyEvent`]). [`InputState`] folds
//! them into the per-tick [`TickInput`]: movement is sampled as "currently
//! held", while fire and quit only count on a fresh press. Holding fire (or
//! OS key auto-repeat) never produces more than one shot.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Fire,
    Quit,
}

/// A key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Held keys plus presses not yet handed to the simulation
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pending_fire: u32,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: KeyEvent) {
        if !event.pressed {
            self.held.remove(&event.key);
            return;
        }

        // Repeated downs while already held are not new presses
        if !self.held.insert(event.key) {
            return;
        }
        match event.key {
            Key::Fire => self.pending_fire += 1,
            Key::Quit => self.quit = true,
            Key::Left | Key::Right => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Sample held keys and take the queued presses; each press is returned once
    pub fn drain(&mut self) -> TickInput {
        TickInput {
            quit: self.quit,
            move_left: self.is_held(Key::Left),
            move_right: self.is_held(Key::Right),
            fire_presses: std::mem::take(&mut self.pending_fire),
        }
    }
}

/// Produces one [`TickInput`] per tick
pub trait InputSource {
    fn poll(&mut self) -> Result<TickInput, InputError>;
}

/// Replays recorded key events, one batch per tick.
///
/// Asks to quit once the recording runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<KeyEvent>>,
    state: InputState,
}

/// On-disk form of a [`ScriptedInput`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputScript {
    /// Key events for each tick, in order
    pub frames: Vec<Vec<KeyEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<KeyEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            state: InputState::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let script: InputScript =
            serde_json::from_str(json).map_err(|e| InputError::Script(e.to_string()))?;
        Ok(Self::new(script.frames))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let input = Self::from_json(&json)?;
        log::info!(
            "Loaded input script {} ({} frames)",
            path.as_ref().display(),
            input.remaining()
        );
        Ok(input)
    }

    /// Frames not yet replayed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<TickInput, InputError> {
        match self.frames.pop_front() {
            Some(events) => {
                for event in events {
                    self.state.handle(event);
                }
            }
            None => self.state.handle(KeyEvent::down(Key::Quit)),
        }
        Ok(self.state.drain())
    }
}

/// Attract-mode pilot: sweeps side to side and taps fire on a fixed cadence
#[derive(Debug, Clone)]
pub struct DemoInput {
    tick: u64,
    max_ticks: u64,
    state: InputState,
}

impl DemoInput {
    /// Ticks spent sweeping in one direction
    const SWEEP_TICKS: u64 = 90;
    /// Ticks between fire presses
    const FIRE_EVERY: u64 = 12;

    /// Plays for `max_ticks` ticks, then presses quit
    pub fn new(max_ticks: u64) -> Self {
        Self {
            tick: 0,
            max_ticks,
            state: InputState::new(),
        }
    }

    fn events_for(&self, tick: u64) -> Vec<KeyEvent> {
        let mut events = Vec::new();

        if tick % Self::SWEEP_TICKS == 0 {
            let (release, hold) = if (tick / Self::SWEEP_TICKS) % 2 == 0 {
                (Key::Left, Key::Right)
            } else {
                (Key::Right, Key::Left)
            };
            events.push(KeyEvent::up(release));
            events.push(KeyEvent::down(hold));
        }

        match tick % Self::FIRE_EVERY {
            0 => events.push(KeyEvent::down(Key::Fire)),
            // Auto-repeat while held; must not fire again
            3 => events.push(KeyEvent::down(Key::Fire)),
            6 => events.push(KeyEvent::up(Key::Fire)),
            _ => {}
        }

        if tick >= self.max_ticks {
            events.push(KeyEvent::down(Key::Quit));
        }

        events
    }
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> Result<TickInput, InputError> {
        for event in self.events_for(self.tick) {
            self.state.handle(event);
        }
        self.tick += 1;
        Ok(self.state.drain())
    }
}
