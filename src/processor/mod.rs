mod options;

pub use options::CreationMetricsOptions;

use crate::cache::DedupCache;
use crate::descriptor::ConfigDescriptor;
use crate::metrics::MetricsSink;
use crate::route::{Route, RouteFilter};
use hashbrown::HashMap as FastHashMap;
use std::time::SystemTime;
use tracing::trace;

pub const METRICS_PREFIX: &str = "routeCreationTime.";
pub const DEFAULT_TRACKING_KEY: &str = "default";

/// Post-processing hook that reports how long each filter configuration took
/// to become active in the routing table. Observation-only: the batch passes
/// through unmodified, and nothing here can fail.
///
/// One instance owns one dedup cache for its whole lifetime; the `&mut self`
/// receiver leaves serialization of `process` calls to the caller.
#[derive(Debug)]
pub struct FilterCreationMetrics<M> {
    sink: M,
    cache: DedupCache,
}

impl<M: MetricsSink> FilterCreationMetrics<M> {
    pub fn new(sink: M, options: Option<CreationMetricsOptions>) -> Self {
        let options = options.unwrap_or_default();

        Self {
            sink,
            cache: DedupCache::new(options.max_age),
        }
    }

    #[tracing::instrument(level = "trace", skip(self, routes), fields(batch_len = routes.len() as u64))]
    pub fn process(&mut self, routes: Vec<Route>) -> Vec<Route> {
        for route in &routes {
            for (name, start) in self.start_times(route) {
                let metric = format!("{METRICS_PREFIX}{name}");
                trace!(metric = metric.as_str(), "reporting config creation time");
                self.sink.measure_since(&metric, start);
            }
        }

        self.cache.prune();

        routes
    }

    fn start_times(&mut self, route: &Route) -> FastHashMap<String, SystemTime> {
        let mut starts = FastHashMap::new();

        if let Some(start) =
            self.descriptor_start_time(route.descriptor.as_ref(), DEFAULT_TRACKING_KEY)
        {
            starts.insert(DEFAULT_TRACKING_KEY.to_string(), start);
        }

        for filter in &route.filters {
            let Some(start) = self.filter_start_time(filter) else {
                continue;
            };

            // Among same-named filters the earliest creation time wins.
            let earlier = starts
                .get(filter.name.as_str())
                .is_none_or(|existing| start < *existing);
            if earlier {
                starts.insert(filter.name.clone(), start);
            }
        }

        starts
    }

    fn filter_start_time(&mut self, filter: &RouteFilter) -> Option<SystemTime> {
        self.descriptor_start_time(filter.filter.config_descriptor(), &filter.name)
    }

    /// Yields the descriptor's creation time only on the first sighting of
    /// its id under `key`. Repeat sightings yield nothing but still refresh
    /// the cache entry.
    fn descriptor_start_time(
        &mut self,
        descriptor: Option<&ConfigDescriptor>,
        key: &str,
    ) -> Option<SystemTime> {
        let descriptor = descriptor?;
        if descriptor.id.is_empty() {
            return None;
        }
        let created = descriptor.created_at?;

        if self.cache.observe(key, &descriptor.id) {
            Some(created)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Filter;
    use crate::metrics::MockMetrics;
    use std::time::Duration;

    #[derive(Debug)]
    struct ConfigSourcedFilter {
        descriptor: ConfigDescriptor,
    }

    impl ConfigSourcedFilter {
        fn boxed(id: &str, created_at: SystemTime) -> Box<dyn Filter> {
            Box::new(Self {
                descriptor: ConfigDescriptor::new(id, created_at),
            })
        }
    }

    impl Filter for ConfigSourcedFilter {
        fn config_descriptor(&self) -> Option<&ConfigDescriptor> {
            Some(&self.descriptor)
        }
    }

    #[derive(Debug)]
    struct PlainFilter;

    impl Filter for PlainFilter {}

    fn processor() -> FilterCreationMetrics<MockMetrics> {
        FilterCreationMetrics::new(MockMetrics::new(), None)
    }

    #[test]
    fn start_times_when_route_is_bare_then_empty() {
        let mut processor = processor();

        let starts = processor.start_times(&Route::default());

        assert!(starts.is_empty());
    }

    #[test]
    fn start_times_when_route_descriptor_present_then_default_key_recorded() {
        let mut processor = processor();
        let t0 = SystemTime::now();
        let route = Route {
            descriptor: Some(ConfigDescriptor::new("config1", t0)),
            filters: Vec::new(),
        };

        let starts = processor.start_times(&route);

        assert_eq!(starts.len(), 1);
        assert_eq!(starts.get(DEFAULT_TRACKING_KEY), Some(&t0));
    }

    #[test]
    fn start_times_when_same_name_filters_then_earliest_wins_and_both_cached() {
        let mut processor = processor();
        let t0 = SystemTime::now();
        let t1 = t0 + Duration::from_secs(1);
        let route = Route {
            descriptor: None,
            filters: vec![
                RouteFilter::new("filter", ConfigSourcedFilter::boxed("config1", t1)),
                RouteFilter::new("filter", ConfigSourcedFilter::boxed("config0", t0)),
            ],
        };

        let starts = processor.start_times(&route);

        assert_eq!(starts.get("filter"), Some(&t0));
        assert_eq!(processor.cache.age("filter", "config0"), Some(0));
        assert_eq!(processor.cache.age("filter", "config1"), Some(0));
    }

    #[test]
    fn start_times_when_filter_lacks_descriptor_capability_then_skipped() {
        let mut processor = processor();
        let route = Route {
            descriptor: None,
            filters: vec![RouteFilter::new("plain", Box::new(PlainFilter))],
        };

        let starts = processor.start_times(&route);

        assert!(starts.is_empty());
    }

    #[test]
    fn descriptor_start_time_when_id_empty_or_time_unset_then_absent() {
        let mut processor = processor();
        let empty_id = ConfigDescriptor::new("", SystemTime::now());
        let no_time = ConfigDescriptor {
            id: "config1".to_string(),
            created_at: None,
        };

        assert_eq!(processor.descriptor_start_time(None, "filter"), None);
        assert_eq!(
            processor.descriptor_start_time(Some(&empty_id), "filter"),
            None
        );
        assert_eq!(
            processor.descriptor_start_time(Some(&no_time), "filter"),
            None
        );
        assert_eq!(processor.cache.age("filter", "config1"), None);
    }

    #[test]
    fn descriptor_start_time_when_id_already_seen_then_absent_but_refreshed() {
        let mut processor = processor();
        let descriptor = ConfigDescriptor::new("config1", SystemTime::now());

        assert!(
            processor
                .descriptor_start_time(Some(&descriptor), "filter")
                .is_some()
        );
        processor.cache.prune();

        assert_eq!(
            processor.descriptor_start_time(Some(&descriptor), "filter"),
            None
        );
        assert_eq!(processor.cache.age("filter", "config1"), Some(0));
    }
}
