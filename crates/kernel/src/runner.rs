//! Frame driver: feeds input into the world at the pace set by a [`TickClock`].

use crate::clock::TickClock;
use crate::world::World;
use cubefire_input::{Action, InputSnapshot};
use serde::Serialize;
use std::time::Duration;

/// What one call to [`Simulation::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Ticks run during this frame.
    pub ticks: u32,
    /// World tick after the frame.
    pub tick: u64,
    pub objects: usize,
    pub exit_requested: bool,
}

/// Owns the world and its clock and turns per-frame input into ticks.
///
/// Held keys act on every tick. One-shot actions (fire, camera, exit, look)
/// are queued and applied on the next tick that actually runs, so a frame
/// that runs zero ticks does not lose them and a frame that runs several
/// does not repeat them.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    clock: TickClock,
    pending: Vec<Action>,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        let clock = TickClock::from_config(world.config());
        Self::with_clock(world, clock)
    }

    pub fn with_clock(world: World, clock: TickClock) -> Self {
        Self {
            world,
            clock,
            pending: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// One-shot actions waiting for the next tick.
    pub fn pending(&self) -> &[Action] {
        &self.pending
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Account for `elapsed` wall time and run the ticks it pays for.
    /// Stops early once the world has been asked to exit.
    pub fn frame(&mut self, elapsed: Duration, input: &InputSnapshot) -> FrameReport {
        let _span = tracing::debug_span!("frame", tick = self.world.tick()).entered();
        self.pending.extend(input.one_shot_actions());

        let due = self.clock.advance(elapsed);
        let held = input.held_actions();
        let mut ticks = 0;
        for _ in 0..due {
            if self.world.exit_requested() {
                break;
            }
            let mut actions = held.clone();
            actions.append(&mut self.pending);
            self.world.step(&actions);
            ticks += 1;
        }

        FrameReport {
            ticks,
            tick: self.world.tick(),
            objects: self.world.object_count(),
            exit_requested: self.world.exit_requested(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use crate::object::ObjectKind;
    use crate::testing::{quiet_config, world_with};
    use crate::triangle::TerrainSurface;
    use cubefire_input::Key;

    fn sim(pacing: Pacing) -> Simulation {
        let mut config = quiet_config();
        config.fps = 100.0;
        config.pacing = pacing;
        Simulation::new(world_with(config, TerrainSurface::empty()))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fire_survives_a_frame_without_ticks() {
        let mut sim = sim(Pacing::FixedStep);
        let mut input = InputSnapshot::new();
        input.key_event(Key::Fire, true);

        let report = sim.frame(ms(3), &input);
        assert_eq!(report.ticks, 0);
        assert_eq!(sim.pending(), &[Action::Fire]);
        assert_eq!(sim.world().count_of(ObjectKind::Bullet), 0);

        input.next_frame();
        let report = sim.frame(ms(10), &input);
        assert_eq!(report.ticks, 1);
        assert!(sim.pending().is_empty());
        assert_eq!(sim.world().count_of(ObjectKind::Bullet), 1);
    }

    #[test]
    fn one_shots_apply_once_held_keys_every_tick() {
        let mut sim = sim(Pacing::FixedStep);
        let mut input = InputSnapshot::new();
        input.key_event(Key::Fire, true);
        input.key_event(Key::Forward, true);

        let report = sim.frame(ms(30), &input);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.tick, 3);
        assert_eq!(sim.world().count_of(ObjectKind::Bullet), 1);

        // Three pushes of 0.01 with damping 1.2 between them.
        let expected = -(0.01 + (0.01 + 0.01 / 1.2) + (0.01 + (0.01 + 0.01 / 1.2) / 1.2));
        let z = sim.world().player().unwrap().position().z;
        approx::assert_relative_eq!(z, expected, epsilon = 1e-6);
    }

    #[test]
    fn exit_stops_ticking() {
        let mut sim = sim(Pacing::FixedStep);
        let mut input = InputSnapshot::new();
        input.key_event(Key::Exit, true);

        let report = sim.frame(ms(40), &input);
        assert_eq!(report.ticks, 1);
        assert!(report.exit_requested);

        input.next_frame();
        let report = sim.frame(ms(40), &input);
        assert_eq!(report.ticks, 0);
        assert_eq!(report.tick, 1);
    }

    #[test]
    fn frame_coupled_runs_one_tick_per_frame() {
        let mut sim = sim(Pacing::FrameCoupled);
        let input = InputSnapshot::new();
        assert_eq!(sim.frame(ms(50), &input).ticks, 1);
        assert_eq!(sim.frame(ms(5), &input).ticks, 0);
        assert_eq!(sim.frame(ms(10), &input).ticks, 1);
        assert_eq!(sim.world().tick(), 2);
    }
}
