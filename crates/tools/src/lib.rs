//! Developer tooling: world inspector and event tallies.
//!
//! # Invariants
//! - Tools only read the world; nothing here mutates simulation state.

mod inspector;

pub use inspector::{EventTally, ObjectInfo, WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "cubefire-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
