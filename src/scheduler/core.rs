use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use serde_json::json;

use crate::error::{Result, WatchError};
use crate::host::{Host, TargetId};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::SchedulerMetrics;
use crate::observer::{ObserverCallback, ObserverCell, ObserverId, Removal, ResizeObserver};

const LOG_TARGET: &str = "sizewatch::scheduler";

/// Upper bound on gather/broadcast passes within one notification cycle.
/// Keeps notify/reflow feedback loops from spinning forever; a cycle that
/// hits the bound is abandoned with a diagnostic instead of an error.
pub const DEFAULT_LOOP_LIMIT: usize = 16;

/// Configuration knobs for the shared scheduler.
#[derive(Clone, Default)]
pub struct SchedulerConfig {
    /// Maximum broadcast passes per cycle. Zero falls back to
    /// [`DEFAULT_LOOP_LIMIT`].
    pub loop_limit: usize,
    /// Optional structured logger for lifecycle and cycle events.
    pub logger: Option<Logger>,
    /// Counter accumulator shared with diagnostics code.
    pub metrics: Option<Rc<RefCell<SchedulerMetrics>>>,
}

impl SchedulerConfig {
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Rc::new(RefCell::new(SchedulerMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Rc<RefCell<SchedulerMetrics>>> {
        self.metrics.as_ref().map(Rc::clone)
    }

    fn effective_loop_limit(&self) -> usize {
        if self.loop_limit == 0 {
            DEFAULT_LOOP_LIMIT
        } else {
            self.loop_limit
        }
    }
}

/// Summary of one notification cycle, returned by [`Scheduler::run_cycle`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    /// Completed gather/broadcast passes.
    pub passes: usize,
    /// Callback invocations across all passes.
    pub broadcasts: usize,
    /// Entries delivered across all broadcasts.
    pub entries: usize,
    /// True when the cycle was abandoned at the loop limit.
    pub loop_limit_hit: bool,
}

struct SchedulerCore {
    host: Rc<dyn Host>,
    cells: Vec<ObserverCell>,
    /// Connection order; doubles as the broadcast order within a pass.
    connected: Vec<ObserverId>,
    config: SchedulerConfig,
    in_cycle: bool,
}

impl SchedulerCore {
    fn is_connected(&self, id: ObserverId) -> bool {
        self.connected.contains(&id)
    }

    fn connect(&mut self, id: ObserverId) {
        if !self.connected.contains(&id) {
            self.connected.push(id);
            self.log(
                LogLevel::Debug,
                "observer_connected",
                [json_kv("observer", json!(id.0))],
            );
        }
    }

    fn disconnect(&mut self, id: ObserverId) {
        if let Some(cell) = self.cells.get_mut(id.0) {
            cell.clear();
        }
        if self.connected.contains(&id) {
            self.connected.retain(|c| *c != id);
            self.log(
                LogLevel::Debug,
                "observer_disconnected",
                [json_kv("observer", json!(id.0))],
            );
        }
    }

    /// Abandon the in-flight cycle: pending activity is dropped without
    /// broadcasting so no stale entries leak into the next cycle.
    fn abandon_cycle(&mut self) {
        for id in self.connected.clone() {
            self.cells[id.0].clear_active();
        }
        self.log(
            LogLevel::Warn,
            "loop_limit_exceeded",
            [json_kv("limit", json!(self.config.effective_loop_limit()))],
        );
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

/// Shared, process-scoped controller that drives every observer's
/// gather/broadcast protocol.
///
/// Cheap to clone; every [`ResizeObserver`] holds one. The external
/// display trigger calls [`run_cycle`](Self::run_cycle) roughly once per
/// update tick; `observe` requests the same refresh internally so a new
/// target's first size is reported promptly.
#[derive(Clone)]
pub struct Scheduler {
    core: Rc<RefCell<SchedulerCore>>,
}

impl Scheduler {
    pub fn new(host: Rc<dyn Host>) -> Self {
        Self::with_config(host, SchedulerConfig::default())
    }

    pub fn with_config(host: Rc<dyn Host>, config: SchedulerConfig) -> Self {
        Self {
            core: Rc::new(RefCell::new(SchedulerCore {
                host,
                cells: Vec::new(),
                connected: Vec::new(),
                config,
                in_cycle: false,
            })),
        }
    }

    /// Observers currently on the notification hot path.
    pub fn connected_count(&self) -> usize {
        self.core.borrow().connected.len()
    }

    pub fn is_connected(&self, id: ObserverId) -> bool {
        self.core.borrow().is_connected(id)
    }

    pub(crate) fn register(&self, callback: Rc<RefCell<ObserverCallback>>) -> ResizeObserver {
        let mut core = self.core.borrow_mut();
        let id = ObserverId(core.cells.len());
        let handle = ResizeObserver::from_parts(self.clone(), id);
        core.cells.push(ObserverCell::new(callback, handle.clone()));
        handle
    }

    pub(crate) fn observe_target(&self, id: ObserverId, target: TargetId) -> Result<()> {
        let newly_registered = {
            let mut core = self.core.borrow_mut();
            if !core.host.elements_supported() {
                return Ok(());
            }
            if !core.host.is_element(target) {
                return Err(WatchError::InvalidTarget(target));
            }
            let newly = core.cells[id.0].observe(target);
            if newly {
                core.connect(id);
            }
            newly
        };
        if newly_registered {
            // Prompt first report instead of waiting for the next tick.
            // No-op when already inside a cycle; the in-flight loop will
            // pick the target up on its next pass.
            self.run_cycle();
        }
        Ok(())
    }

    pub(crate) fn unobserve_target(&self, id: ObserverId, target: TargetId) -> Result<()> {
        let mut core = self.core.borrow_mut();
        if !core.host.elements_supported() {
            return Ok(());
        }
        if !core.host.is_element(target) {
            return Err(WatchError::InvalidTarget(target));
        }
        match core.cells[id.0].unobserve(target) {
            Removal::NotRegistered | Removal::Removed => {}
            // An observer with nothing left to watch must not stay on the
            // scheduler's hot path.
            Removal::RemovedLast => core.disconnect(id),
        }
        Ok(())
    }

    pub(crate) fn disconnect_observer(&self, id: ObserverId) {
        self.core.borrow_mut().disconnect(id);
    }

    #[cfg(test)]
    pub(crate) fn target_count(&self, id: ObserverId) -> usize {
        self.core.borrow().cells[id.0].target_count()
    }

    /// Run one notification cycle: repeat gather/broadcast passes until no
    /// observer reports activity or the loop limit is reached.
    ///
    /// Re-entrant calls (a callback poking the scheduler mid-cycle) return
    /// immediately with empty stats; the outer loop's next pass observes
    /// whatever the callback changed.
    pub fn run_cycle(&self) -> CycleStats {
        {
            let mut core = self.core.borrow_mut();
            if core.in_cycle {
                return CycleStats::default();
            }
            core.in_cycle = true;
        }
        let stats = self.converge();
        {
            let mut core = self.core.borrow_mut();
            core.in_cycle = false;
            if let Some(metrics) = core.config.metrics.as_ref() {
                metrics
                    .borrow_mut()
                    .record_cycle(stats.passes, stats.loop_limit_hit);
            }
            core.log(
                LogLevel::Debug,
                "cycle_completed",
                [
                    json_kv("passes", json!(stats.passes)),
                    json_kv("broadcasts", json!(stats.broadcasts)),
                    json_kv("entries", json!(stats.entries)),
                    json_kv("loop_limit_hit", json!(stats.loop_limit_hit)),
                ],
            );
        }
        stats
    }

    fn converge(&self) -> CycleStats {
        let mut stats = CycleStats::default();
        let loop_limit = self.core.borrow().config.effective_loop_limit();

        loop {
            // Gather pass over a fresh snapshot of the connected roster, so
            // observers connected or disconnected by the previous pass's
            // callbacks are included or excluded from here on.
            let active: Vec<ObserverId> = {
                let mut core = self.core.borrow_mut();
                let roster = core.connected.clone();
                let host = Rc::clone(&core.host);
                let mut active = Vec::new();
                for id in roster {
                    let cell = &mut core.cells[id.0];
                    cell.gather_active(host.as_ref());
                    if cell.has_active() {
                        active.push(id);
                    }
                }
                active
            };

            if active.is_empty() {
                break;
            }

            if stats.passes == loop_limit {
                stats.loop_limit_hit = true;
                self.core.borrow_mut().abandon_cycle();
                break;
            }
            stats.passes += 1;

            for id in active {
                // A callback earlier in this pass may have disconnected
                // this observer; its pending activity was dropped with it.
                let prepared = {
                    let mut core = self.core.borrow_mut();
                    if !core.is_connected(id) {
                        None
                    } else {
                        let cell = &mut core.cells[id.0];
                        if cell.has_active() {
                            Some((cell.take_broadcast(), cell.callback(), cell.handle()))
                        } else {
                            None
                        }
                    }
                };
                let Some((entries, callback, handle)) = prepared else {
                    continue;
                };

                stats.broadcasts += 1;
                stats.entries += entries.len();
                {
                    let core = self.core.borrow();
                    if let Some(metrics) = core.config.metrics.as_ref() {
                        metrics.borrow_mut().record_broadcast(entries.len());
                    }
                }

                // The buffer is already drained, so a panicking callback
                // cannot leave stale activity behind, and the remaining
                // observers in this pass still run.
                let outcome = catch_unwind(AssertUnwindSafe(|| {
                    (&mut *callback.borrow_mut())(&entries, &handle);
                }));
                if outcome.is_err() {
                    self.core.borrow().log(
                        LogLevel::Error,
                        "observer_callback_panicked",
                        [json_kv("observer", json!(handle.id().0))],
                    );
                }
            }
        }

        stats
    }
}
