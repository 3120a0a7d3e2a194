use crate::geometry::Rect;
use crate::host::TargetId;

/// Immutable snapshot delivered to an observer callback: one observed
/// target paired with the content box it was measured at when the current
/// broadcast was assembled.
///
/// Entries are built fresh for every broadcast and never retained by the
/// engine afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEntry {
    pub target: TargetId,
    pub content_rect: Rect,
}

impl ResizeEntry {
    pub(crate) fn new(target: TargetId, content_rect: Rect) -> Self {
        Self {
            target,
            content_rect,
        }
    }
}
