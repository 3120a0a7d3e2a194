use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Saturating counters accumulated across notification cycles.
#[derive(Debug, Default, Clone)]
pub struct SchedulerMetrics {
    cycles: u64,
    passes: u64,
    broadcasts: u64,
    entries: u64,
    loop_limit_hits: u64,
}

impl SchedulerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle(&mut self, passes: usize, loop_limit_hit: bool) {
        self.cycles = self.cycles.saturating_add(1);
        self.passes = self.passes.saturating_add(passes as u64);
        if loop_limit_hit {
            self.loop_limit_hits = self.loop_limit_hits.saturating_add(1);
        }
    }

    pub fn record_broadcast(&mut self, entry_count: usize) {
        self.broadcasts = self.broadcasts.saturating_add(1);
        self.entries = self.entries.saturating_add(entry_count as u64);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            cycles: self.cycles,
            passes: self.passes,
            broadcasts: self.broadcasts,
            entries: self.entries,
            loop_limit_hits: self.loop_limit_hits,
        }
    }
}

/// Point-in-time copy of the scheduler counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub cycles: u64,
    pub passes: u64,
    pub broadcasts: u64,
    pub entries: u64,
    pub loop_limit_hits: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "scheduler_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("cycles".to_string(), json!(self.cycles));
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("broadcasts".to_string(), json!(self.broadcasts));
        map.insert("entries".to_string(), json!(self.entries));
        map.insert("loop_limit_hits".to_string(), json!(self.loop_limit_hits));
        map
    }
}
