//! Host environment boundary: element handles, the capability probe, and
//! content-box measurement.
//!
//! The engine never owns or mutates elements. It sees them only as opaque
//! [`TargetId`] handles and asks the host to measure them. A host that
//! reports no element support at all (a headless test runner, a server
//! process) degrades the engine to a set of no-ops instead of errors.

use crate::geometry::Rect;

/// Opaque, identity-comparable handle to a renderable element.
///
/// The host environment allocates these and keeps the mapping back to its
/// real element objects; the engine only stores and compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// Measurement and capability collaborator implemented by the embedding
/// environment.
pub trait Host {
    /// Whether this environment has a usable element type at all. When
    /// false, `observe`/`unobserve` become silent no-ops.
    fn elements_supported(&self) -> bool {
        true
    }

    /// Whether `target` resolves to a live element handle.
    fn is_element(&self, target: TargetId) -> bool;

    /// Measure the current content box of `target`. Must be synchronous
    /// and must not itself perturb layout. Unresolvable targets measure
    /// as [`Rect::ZERO`].
    fn content_box(&self, target: TargetId) -> Rect;
}

/// Host for environments with no renderable elements. Every capability
/// probe fails, so observers constructed against it degrade gracefully.
#[derive(Debug, Default)]
pub struct HeadlessHost;

impl Host for HeadlessHost {
    fn elements_supported(&self) -> bool {
        false
    }

    fn is_element(&self, _target: TargetId) -> bool {
        false
    }

    fn content_box(&self, _target: TargetId) -> Rect {
        Rect::ZERO
    }
}
