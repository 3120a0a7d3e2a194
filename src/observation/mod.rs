//! Dirty detection for a single (observer, target) pair.

mod core;

pub(crate) use self::core::Observation;
