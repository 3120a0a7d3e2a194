//! Shared scheduler: the process-wide controller that drives every
//! observer's gather/broadcast protocol once per notification cycle.

mod core;

pub use self::core::{CycleStats, DEFAULT_LOOP_LIMIT, Scheduler, SchedulerConfig};
