use std::cell::RefCell;
use std::rc::Rc;

use crate::entry::ResizeEntry;
use crate::host::{Host, TargetId};
use crate::observation::Observation;

use super::ResizeObserver;

/// Callback signature: the batched entries plus the public observer
/// handle, so a callback can unobserve or disconnect from inside itself.
pub type ObserverCallback = dyn FnMut(&[ResizeEntry], &ResizeObserver);

/// Outcome of removing a target from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Removal {
    NotRegistered,
    Removed,
    /// The registry is now empty; the owner must disconnect.
    RemovedLast,
}

/// Per-observer state: the insertion-ordered registry of observations,
/// the transient active buffer, and the callback.
///
/// The active buffer holds target ids, not registry positions: a sibling
/// observer's callback may call `unobserve` on this observer between its
/// gather and its broadcast in the same pass, and removals must not shift
/// what the pending buffer refers to. `take_broadcast` resolves the ids
/// against the registry and silently skips any that were unregistered in
/// the meantime.
pub(crate) struct ObserverCell {
    callback: Rc<RefCell<ObserverCallback>>,
    handle: ResizeObserver,
    registry: Vec<Observation>,
    active: Vec<TargetId>,
}

impl ObserverCell {
    pub(crate) fn new(callback: Rc<RefCell<ObserverCallback>>, handle: ResizeObserver) -> Self {
        Self {
            callback,
            handle,
            registry: Vec::new(),
            active: Vec::new(),
        }
    }

    pub(crate) fn callback(&self) -> Rc<RefCell<ObserverCallback>> {
        Rc::clone(&self.callback)
    }

    pub(crate) fn handle(&self) -> ResizeObserver {
        self.handle.clone()
    }

    pub(crate) fn target_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Register a target. Idempotent: returns false when the target is
    /// already in the registry.
    pub(crate) fn observe(&mut self, target: TargetId) -> bool {
        if self.registry.iter().any(|obs| obs.target() == target) {
            return false;
        }
        self.registry.push(Observation::new(target));
        true
    }

    pub(crate) fn unobserve(&mut self, target: TargetId) -> Removal {
        let Some(idx) = self.registry.iter().position(|obs| obs.target() == target) else {
            return Removal::NotRegistered;
        };
        self.registry.remove(idx);
        if self.registry.is_empty() {
            Removal::RemovedLast
        } else {
            Removal::Removed
        }
    }

    /// Drop every observation and any pending activity.
    pub(crate) fn clear(&mut self) {
        self.active.clear();
        self.registry.clear();
    }

    /// Re-measure every registered target, collecting the changed ones
    /// into the active buffer in registry (insertion) order.
    pub(crate) fn gather_active(&mut self, host: &dyn Host) {
        self.active.clear();
        for obs in self.registry.iter_mut() {
            if obs.is_active(host) {
                self.active.push(obs.target());
            }
        }
    }

    pub(crate) fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub(crate) fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Drain the active buffer into broadcast entries, advancing each
    /// observation's baseline. Targets unregistered since the gather are
    /// skipped; their observations are gone and must not be reported. The
    /// buffer is emptied before the caller invokes the callback, so
    /// reentrant registry mutation is safe.
    pub(crate) fn take_broadcast(&mut self) -> Vec<ResizeEntry> {
        let mut entries = Vec::with_capacity(self.active.len());
        for target in self.active.drain(..) {
            if let Some(obs) = self.registry.iter_mut().find(|obs| obs.target() == target) {
                entries.push(ResizeEntry::new(target, obs.broadcast_rect()));
            }
        }
        entries
    }
}
