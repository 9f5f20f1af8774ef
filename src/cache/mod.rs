use hashbrown::HashMap as FastHashMap;
use tracing::trace;

pub type Age = u32;

pub const DEFAULT_MAX_AGE: Age = 2;

/// Tracks which configuration ids have already been reported, scoped per
/// tracking key. An entry survives the pass that created it plus `max_age`
/// pruning passes; any re-sighting resets its remaining lifetime.
#[derive(Debug)]
pub struct DedupCache {
    max_age: Age,
    seen: FastHashMap<String, FastHashMap<String, Age>>,
}

impl DedupCache {
    pub fn new(max_age: Age) -> Self {
        Self {
            max_age,
            seen: FastHashMap::new(),
        }
    }

    /// Records a sighting of `id` under `key` and reports whether the id was
    /// previously unseen. The age resets to 0 on every sighting, repeat ones
    /// included.
    pub fn observe(&mut self, key: &str, id: &str) -> bool {
        let ids = self.seen.entry(key.to_string()).or_default();
        ids.insert(id.to_string(), 0).is_none()
    }

    /// Ages every cached id by one pass and evicts those past `max_age`.
    /// Whole-cache sweep, run once per processed batch.
    pub fn prune(&mut self) {
        let max_age = self.max_age;
        let mut evicted = 0usize;

        for ids in self.seen.values_mut() {
            ids.retain(|_, age| {
                *age += 1;
                if *age > max_age {
                    evicted += 1;
                    false
                } else {
                    true
                }
            });
        }

        if evicted > 0 {
            trace!(evicted, "evicted aged-out config ids");
        }
    }

    pub(crate) fn age(&self, key: &str, id: &str) -> Option<Age> {
        self.seen.get(key).and_then(|ids| ids.get(id)).copied()
    }
}
