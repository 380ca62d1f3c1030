use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical keys understood by the game. The platform layer maps physical
/// keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    RotateLeft,
    RotateRight,
    ToggleCamera,
    Fire,
    Exit,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::Forward,
        Key::Back,
        Key::Left,
        Key::Right,
        Key::RotateLeft,
        Key::RotateRight,
        Key::ToggleCamera,
        Key::Fire,
        Key::Exit,
    ];
}

/// "Is held" map over the canonical keys. Keys never reported are up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: BTreeMap<Key, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        self.held.insert(key, held);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }

    /// Held keys in canonical order.
    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.held
            .iter()
            .filter_map(|(key, held)| held.then_some(*key))
    }
}
