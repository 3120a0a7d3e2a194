//! External cycle trigger.
//!
//! The engine itself never decides when a notification cycle starts; some
//! environment-provided trigger calls [`Scheduler::run_cycle`] once per
//! display-update tick. [`TickDriver`] is the crate's stock trigger for
//! terminal hosts: it fires cycles on a fixed cadence, runs an extra cycle
//! immediately when the terminal reports a resize, and exits on any key
//! press. Headless embedders can skip it entirely and call
//! [`Scheduler::run_cycle`] from their own loop, or use
//! [`TickDriver::drive`] for scripted runs.

use std::time::Duration;

use crossterm::event::{self, Event};

use crate::error::Result;
use crate::scheduler::{CycleStats, Scheduler};

/// Configuration for the stock terminal trigger.
#[derive(Debug, Clone)]
pub struct TickDriverConfig {
    /// Interval between notification cycles.
    pub tick_interval: Duration,
    /// Stop after this many cycles; `None` runs until a key press.
    pub max_cycles: Option<u64>,
}

impl Default for TickDriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            max_cycles: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickAction {
    Exit,
    Cycle,
    Skip,
}

/// Cadence driver that owns the trigger loop for one scheduler.
pub struct TickDriver {
    scheduler: Scheduler,
    config: TickDriverConfig,
}

impl TickDriver {
    pub fn new(scheduler: Scheduler) -> Self {
        Self::with_config(scheduler, TickDriverConfig::default())
    }

    pub fn with_config(scheduler: Scheduler, config: TickDriverConfig) -> Self {
        Self { scheduler, config }
    }

    /// Run the trigger loop against the live terminal. Uses
    /// `crossterm::event::poll` as the wait primitive so resize events
    /// interrupt the cadence instead of waiting out the tick.
    pub fn run(&mut self) -> Result<()> {
        let mut cycles = 0u64;
        loop {
            let event = if event::poll(self.config.tick_interval)? {
                Some(event::read()?)
            } else {
                None
            };
            match Self::action_for(event) {
                TickAction::Exit => break,
                TickAction::Skip => continue,
                TickAction::Cycle => {}
            }

            self.scheduler.run_cycle();
            cycles += 1;
            if let Some(max) = self.config.max_cycles {
                if cycles >= max {
                    break;
                }
            }
        }
        Ok(())
    }

    /// A resize shares the tick body with the timed-out poll: it cuts the
    /// wait short but still fires exactly one cycle for that tick.
    fn action_for(event: Option<Event>) -> TickAction {
        match event {
            Some(Event::Key(_)) => TickAction::Exit,
            Some(Event::Resize(_, _)) | None => TickAction::Cycle,
            Some(_) => TickAction::Skip,
        }
    }

    /// Fire `cycles` notification cycles back to back, with no terminal
    /// involvement. Returns the aggregated stats.
    pub fn drive(&mut self, cycles: usize) -> CycleStats {
        let mut total = CycleStats::default();
        for _ in 0..cycles {
            let stats = self.scheduler.run_cycle();
            total.passes += stats.passes;
            total.broadcasts += stats.broadcasts;
            total.entries += stats.entries;
            total.loop_limit_hit |= stats.loop_limit_hit;
        }
        total
    }
}
