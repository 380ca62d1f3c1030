//! Input: abstract key state captured by the platform layer, converted into
//! simulation actions.
//!
//! # Invariants
//! - The world consumes [`Action`]s, never raw key codes.
//! - A snapshot is immutable once handed to the tick.

pub mod action;
pub mod key;
pub mod snapshot;

pub use action::{Action, MoveDirection};
pub use key::{Key, KeyState};
pub use snapshot::InputSnapshot;

pub fn crate_info() -> &'static str {
    "cubefire-input v0.1.0"
}
