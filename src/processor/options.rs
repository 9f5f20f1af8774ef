use crate::cache::{Age, DEFAULT_MAX_AGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationMetricsOptions {
    /// Number of pruning passes a cached config id survives after its most
    /// recent sighting before it becomes reportable again.
    pub max_age: Age,
}

impl Default for CreationMetricsOptions {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
        }
    }
}
