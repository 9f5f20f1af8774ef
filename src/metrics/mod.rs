mod mock;

pub use mock::MockMetrics;

use std::time::SystemTime;

/// Sink side of the metrics backend: records the wall-clock time elapsed
/// between `start` and the call under `name`. Implementations are expected
/// to be cheap; the processor calls this once per resolved start time.
pub trait MetricsSink {
    fn measure_since(&self, name: &str, start: SystemTime);
}
