//! Observer state machine and the public handle consumed by host code.

mod core;

pub use self::core::ObserverCallback;
pub(crate) use self::core::{ObserverCell, Removal};

use std::cell::RefCell;
use std::rc::Rc;

use crate::entry::ResizeEntry;
use crate::error::Result;
use crate::host::TargetId;
use crate::scheduler::Scheduler;

/// Stable identity of an observer within its scheduler's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) usize);

/// Public observer handle.
///
/// Cheap to clone; all state lives in the shared scheduler. An observer
/// joins the scheduler's connected set on its first `observe` and leaves
/// it when its last target is unobserved or on `disconnect`.
#[derive(Clone)]
pub struct ResizeObserver {
    scheduler: Scheduler,
    id: ObserverId,
}

impl ResizeObserver {
    /// Create an observer bound to `scheduler`. The callback receives the
    /// batched resize entries plus this observer's own handle.
    pub fn new<F>(scheduler: &Scheduler, callback: F) -> Self
    where
        F: FnMut(&[ResizeEntry], &ResizeObserver) + 'static,
    {
        let callback: Rc<RefCell<ObserverCallback>> = Rc::new(RefCell::new(callback));
        scheduler.register(callback)
    }

    pub(crate) fn from_parts(scheduler: Scheduler, id: ObserverId) -> Self {
        Self { scheduler, id }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Start watching `target`.
    ///
    /// Idempotent for an already-registered target. Fails with
    /// [`crate::WatchError::InvalidTarget`] when the host does not
    /// recognise the handle; silently no-ops when the host has no element
    /// support at all. A newly registered target triggers an immediate
    /// refresh so its initial size is reported without waiting for the
    /// next external tick.
    pub fn observe(&self, target: TargetId) -> Result<()> {
        self.scheduler.observe_target(self.id, target)
    }

    /// Stop watching `target`. No-op when the target is not registered.
    /// Disconnects the observer when its last target is removed.
    pub fn unobserve(&self, target: TargetId) -> Result<()> {
        self.scheduler.unobserve_target(self.id, target)
    }

    /// Drop every observation and leave the scheduler's connected set.
    /// Safe to call repeatedly.
    pub fn disconnect(&self) {
        self.scheduler.disconnect_observer(self.id);
    }

    /// Whether this observer currently has registered targets and is on
    /// the scheduler's hot path.
    pub fn is_connected(&self) -> bool {
        self.scheduler.is_connected(self.id)
    }

    #[cfg(test)]
    pub(crate) fn target_count(&self) -> usize {
        self.scheduler.target_count(self.id)
    }
}
