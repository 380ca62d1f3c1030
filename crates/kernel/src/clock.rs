//! Turns wall-clock frame time into whole simulation ticks.

use crate::config::{Pacing, WorldConfig};
use std::time::Duration;

/// Tick pacing state. Pure arithmetic over [`Duration`]s; the caller measures
/// frame time however it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickClock {
    pacing: Pacing,
    interval: Duration,
    max_ticks_per_frame: u32,
    accumulated: Duration,
    dropped: u64,
}

impl TickClock {
    pub fn new(pacing: Pacing, fps: f64, max_ticks_per_frame: u32) -> Self {
        let nanos = (1e9 / fps).round().max(1.0) as u64;
        Self {
            pacing,
            interval: Duration::from_nanos(nanos),
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulated: Duration::ZERO,
            dropped: 0,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.pacing, config.fps, config.max_ticks_per_frame)
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Length of one tick.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time carried over towards the next tick.
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Ticks discarded so far because a frame fell too far behind.
    pub fn dropped_ticks(&self) -> u64 {
        self.dropped
    }

    /// Account for `elapsed` frame time and return how many ticks to run now.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let interval = self.interval.as_nanos();
        let due = self.accumulated.as_nanos() / interval;

        match self.pacing {
            Pacing::FrameCoupled => {
                if due == 0 {
                    return 0;
                }
                self.accumulated = Duration::ZERO;
                1
            }
            Pacing::FixedStep => {
                let cap = u128::from(self.max_ticks_per_frame);
                let remainder = self.accumulated.as_nanos() % interval;
                self.accumulated = Duration::from_nanos(remainder as u64);
                if due > cap {
                    let dropped = (due - cap) as u64;
                    self.dropped += dropped;
                    tracing::warn!(
                        dropped,
                        cap = self.max_ticks_per_frame,
                        "simulation falling behind, dropping ticks"
                    );
                    return self.max_ticks_per_frame;
                }
                due as u32
            }
        }
    }
}
