//! Fixed rate driving of a [GameEngine]
//!
//! The host owns the clock. It hands the driver however much wall time passed since it last
//! asked, and the driver runs as many whole frames as fit, carrying the remainder over.
use std::time::Duration;

use tracing::{debug, instrument, trace};

use crate::config::GameConfig;
use crate::engine::{GameEngine, Phase, TickOutcome};
use crate::types::TickInstruments;

/// Owns the "ticker is running" flag and feeds frames in to an engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDriver {
    frame_interval: Duration,
    running: bool,
    frames: u64,
    accumulator: Duration,
}

impl TickDriver {
    /// a stopped driver running `frame_rate` frames a second once started
    pub fn new(frame_rate: u32) -> Self {
        TickDriver {
            frame_interval: Duration::from_secs(1) / frame_rate.max(1),
            running: false,
            frames: 0,
            accumulator: Duration::ZERO,
        }
    }

    #[allow(missing_docs)]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.frame_rate)
    }

    /// Starts a session on the engine and begins ticking it.
    pub fn start(&mut self, engine: &mut GameEngine) -> Phase {
        let phase = engine.start();
        self.running = true;
        self.frames = 0;
        self.accumulator = Duration::ZERO;
        debug!(interval = ?self.frame_interval, "driver started");
        phase
    }

    /// Stops ticking. Stopping a stopped driver does nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.accumulator = Duration::ZERO;
        debug!(frames = self.frames, "driver stopped");
    }

    /// stops the driver and sends the engine back to the menu
    pub fn show_menu(&mut self, engine: &mut GameEngine) -> Phase {
        self.stop();
        engine.show_menu()
    }

    /// stops the driver and leaves the game, which also forgets the best score
    pub fn exit(&mut self, engine: &mut GameEngine) -> Phase {
        self.stop();
        engine.exit()
    }

    #[allow(missing_docs)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// frames run since the last start
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[allow(missing_docs)]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Runs one frame. A stopped driver does not touch the engine, and a frame that ends the
    /// game stops the driver.
    pub fn frame(&mut self, engine: &mut GameEngine) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        let outcome = engine.tick();
        self.after_frame(outcome)
    }

    /// [TickDriver::frame], with the tick timed and reported to `instruments`
    pub fn frame_with<T: TickInstruments>(
        &mut self,
        engine: &mut GameEngine,
        instruments: &T,
    ) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        let outcome = engine.tick_with(instruments);
        self.after_frame(outcome)
    }

    /// Accounts for `elapsed` wall time, running every whole frame that fits in it. Returns how
    /// many frames ran.
    #[instrument(level = "trace", skip_all)]
    pub fn advance(&mut self, engine: &mut GameEngine, elapsed: Duration) -> usize {
        if !self.running {
            return 0;
        }
        self.accumulator = self.accumulator.saturating_add(elapsed);
        let mut ran = 0;
        while self.running && self.accumulator >= self.frame_interval {
            self.accumulator = self.accumulator.saturating_sub(self.frame_interval);
            self.frame(engine);
            ran += 1;
        }
        trace!(ran, carried = ?self.accumulator, "advanced");
        ran
    }

    fn after_frame(&mut self, outcome: TickOutcome) -> TickOutcome {
        self.frames += 1;
        match outcome {
            TickOutcome::GameOver(_) | TickOutcome::Idle => self.stop(),
            TickOutcome::Waiting { .. } | TickOutcome::Moved { .. } => {}
        }
        outcome
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
