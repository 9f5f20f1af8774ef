use super::MetricsSink;
use hashbrown::HashMap as FastHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// In-memory recording sink for tests. Clones share the same storage, so a
/// test can keep a handle while handing another to the processor.
#[derive(Debug, Clone, Default)]
pub struct MockMetrics {
    measures: Arc<Mutex<FastHashMap<String, Vec<Duration>>>>,
}

impl MockMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measures<F>(&self, f: F)
    where
        F: FnOnce(&FastHashMap<String, Vec<Duration>>),
    {
        f(&self.measures.lock());
    }

    pub fn measure_count(&self, name: &str) -> usize {
        self.measures.lock().get(name).map_or(0, Vec::len)
    }
}

impl MetricsSink for MockMetrics {
    fn measure_since(&self, name: &str, start: SystemTime) {
        // A start in the future clamps to zero elapsed.
        let elapsed = SystemTime::now()
            .duration_since(start)
            .unwrap_or_default();
        self.measures
            .lock()
            .entry(name.to_string())
            .or_default()
            .push(elapsed);
    }
}
