pub mod cache;
pub mod descriptor;
pub mod metrics;
pub mod processor;
pub mod route;

pub use cache::{Age, DEFAULT_MAX_AGE, DedupCache};
pub use descriptor::{ConfigDescriptor, Filter};
pub use metrics::{MetricsSink, MockMetrics};
pub use processor::{
    CreationMetricsOptions, DEFAULT_TRACKING_KEY, FilterCreationMetrics, METRICS_PREFIX,
};
pub use route::{Route, RouteFilter};
