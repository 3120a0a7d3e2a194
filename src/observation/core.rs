use crate::geometry::{Rect, Size};
use crate::host::{Host, TargetId};

/// Per-(observer, target) dirty detector.
///
/// Tracks the size last handed to the observer's callback and caches the
/// most recent measurement so the gather and broadcast steps of one pass
/// share a single host measurement.
#[derive(Debug)]
pub(crate) struct Observation {
    target: TargetId,
    last_broadcast: Size,
    measured: Rect,
}

impl Observation {
    /// A fresh observation baselines at `{0,0}` so the first measurement
    /// of any non-empty element registers as a change.
    pub(crate) fn new(target: TargetId) -> Self {
        Self {
            target,
            last_broadcast: Size::ZERO,
            measured: Rect::ZERO,
        }
    }

    pub(crate) fn target(&self) -> TargetId {
        self.target
    }

    /// Measure the target now and report whether its content box differs
    /// from the last broadcast size. The measurement is cached for the
    /// following `broadcast_rect` call.
    pub(crate) fn is_active(&mut self, host: &dyn Host) -> bool {
        self.measured = host.content_box(self.target);
        self.measured.size() != self.last_broadcast
    }

    /// Return the rect cached by the preceding `is_active` call and
    /// advance the baseline to it. At most once per activation.
    pub(crate) fn broadcast_rect(&mut self) -> Rect {
        self.last_broadcast = self.measured.size();
        self.measured
    }
}
