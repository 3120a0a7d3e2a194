//! Resize observation engine: batched content-box change notifications
//! for externally-owned renderable elements.
//!
//! Any number of [`ResizeObserver`] instances share one [`Scheduler`].
//! Each observer tracks its own set of targets; the scheduler runs one
//! notification cycle per external trigger, repeating gather/broadcast
//! passes until no observer reports a size change or the loop limit is
//! reached. Measurement and element validation are delegated to a [`Host`]
//! implemented by the embedding environment.

pub mod driver;
pub mod entry;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod metrics;
mod observation;
pub mod observer;
pub mod scheduler;

pub use driver::{TickDriver, TickDriverConfig};
pub use entry::ResizeEntry;
pub use error::{Result, WatchError};
pub use geometry::{Rect, Size};
pub use host::{HeadlessHost, Host, TargetId};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, SchedulerMetrics};
pub use observer::{ObserverCallback, ObserverId, ResizeObserver};
pub use scheduler::{CycleStats, DEFAULT_LOOP_LIMIT, Scheduler, SchedulerConfig};
