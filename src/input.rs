//! Keyboard input mapping
//!
//! Presentation surfaces report a [`KeyboardSnapshot`] each frame. Discrete
//! actions (map moves, explore, land, back, inventory, quit) are taken from
//! the keys *pressed* this frame, so holding a key fires once. Flight and
//! surface movement read the *held* set every tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::physics::{FlightControls, WalkControls};

/// Logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    E,
    L,
    B,
    I,
    X,
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map step for numpad keys (5 is a no-op step)
    pub fn map_direction(&self) -> Option<(i64, i64)> {
        match self {
            Key::Numpad1 => Some((-1, 1)),
            Key::Numpad2 => Some((0, 1)),
            Key::Numpad3 => Some((1, 1)),
            Key::Numpad4 => Some((-1, 0)),
            Key::Numpad5 => Some((0, 0)),
            Key::Numpad6 => Some((1, 0)),
            Key::Numpad7 => Some((-1, -1)),
            Key::Numpad8 => Some((0, -1)),
            Key::Numpad9 => Some((1, -1)),
            _ => None,
        }
    }
}

/// One frame of keyboard state from the presentation surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    /// Keys that went down this frame, in arrival order
    pub pressed: Vec<Key>,
    /// Keys currently held
    pub held: HashSet<Key>,
    /// Window close button or equivalent
    pub close_requested: bool,
}

impl KeyboardSnapshot {
    fn is_held(&self, a: Key, b: Key) -> bool {
        self.held.contains(&a) || self.held.contains(&b)
    }
}

/// Derives pressed keys for surfaces that only report held keys
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: HashSet<Key>,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot whose `pressed` list holds the keys that were not
    /// down last frame. `order` fixes the pressed order for keys that went
    /// down together.
    pub fn snapshot(&mut self, held: HashSet<Key>, order: &[Key]) -> KeyboardSnapshot {
        let mut pressed: Vec<Key> = order
            .iter()
            .copied()
            .filter(|k| held.contains(k) && !self.previous.contains(k))
            .collect();
        // Anything not covered by `order` goes last, in a stable order
        let mut rest: Vec<Key> = held
            .iter()
            .copied()
            .filter(|k| !self.previous.contains(k) && !pressed.contains(k))
            .collect();
        rest.sort_by_key(|k| *k as u8);
        pressed.extend(rest);

        self.previous = held.clone();
        KeyboardSnapshot {
            pressed,
            held,
            close_requested: false,
        }
    }
}

/// Edge-triggered actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Map sector step (dx, dy); (0, 0) is accepted and does nothing
    Move { dx: i64, dy: i64 },
    Explore,
    Land,
    Back,
    Inventory,
    Quit,
}

impl Command {
    /// Command bound to a key, if any
    pub fn from_key(key: Key) -> Option<Self> {
        if let Some((dx, dy)) = key.map_direction() {
            return Some(Command::Move { dx, dy });
        }
        match key {
            Key::E => Some(Command::Explore),
            Key::L => Some(Command::Land),
            Key::B => Some(Command::Back),
            Key::I => Some(Command::Inventory),
            Key::X => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Discrete actions in arrival order
    pub commands: Vec<Command>,
    /// Level-triggered ship controls
    pub flight: FlightControls,
    /// Level-triggered surface movement
    pub walk: WalkControls,
}

impl TickInput {
    /// Input carrying only discrete commands
    pub fn commands(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl From<&KeyboardSnapshot> for TickInput {
    fn from(snapshot: &KeyboardSnapshot) -> Self {
        let mut commands: Vec<Command> = snapshot
            .pressed
            .iter()
            .filter_map(|&k| Command::from_key(k))
            .collect();
        if snapshot.close_requested {
            commands.push(Command::Quit);
        }

        let left = snapshot.is_held(Key::Left, Key::A);
        let right = snapshot.is_held(Key::Right, Key::D);
        let up = snapshot.is_held(Key::Up, Key::W);
        let down = snapshot.is_held(Key::Down, Key::S);

        // Right wins over left, down wins over up
        let dx = if right {
            1
        } else if left {
            -1
        } else {
            0
        };
        let dy = if down {
            1
        } else if up {
            -1
        } else {
            0
        };

        TickInput {
            commands,
            flight: FlightControls {
                rotate: dx,
                thrust: up,
            },
            walk: WalkControls { dx, dy },
        }
    }
}
