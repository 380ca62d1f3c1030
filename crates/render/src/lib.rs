//! Rendering adapter: renderer-agnostic frame drawing.
//!
//! # Invariants
//! - Rendering never mutates the world.
//! - Everything drawn derives from world state and a [`RenderView`].
//!
//! The crate emits [`DrawCall`](cubefire_common::DrawCall)s into any
//! [`DrawSurface`](cubefire_common::DrawSurface); a GPU backend only has to
//! implement that trait. [`DebugTextRenderer`] prints the same information
//! for headless runs.

mod frame;
mod renderer;

pub use frame::{FrameStats, RecordingSurface, draw_frame};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "cubefire-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
