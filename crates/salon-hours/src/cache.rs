//! Caller-owned cache of tenant schedules.
//!
//! Lookup-or-fetch-and-store keyed by tenant, with explicit invalidation when
//! a tenant's settings change. Nothing expires on its own.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tracing::debug;

use crate::legacy::parse_legacy;
use crate::schedule::WeekSchedule;

#[derive(Debug, Clone)]
pub struct ScheduleCache<K> {
    entries: HashMap<K, Arc<WeekSchedule>>,
}

impl<K> Default for ScheduleCache<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> ScheduleCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<Arc<WeekSchedule>> {
        self.entries.get(key).cloned()
    }

    /// Store `schedule` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: K, schedule: WeekSchedule) -> Arc<WeekSchedule> {
        let schedule = Arc::new(schedule);
        self.entries.insert(key, Arc::clone(&schedule));
        schedule
    }

    /// Return the cached schedule for `key`, fetching and storing it on a miss.
    ///
    /// A failed fetch stores nothing, so the next call fetches again.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        fetch: impl FnOnce() -> Result<WeekSchedule, E>,
    ) -> Result<Arc<WeekSchedule>, E> {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let schedule = Arc::new(fetch()?);
                Ok(Arc::clone(entry.insert(schedule)))
            }
        }
    }

    /// Like [`get_or_try_insert_with`](Self::get_or_try_insert_with), for
    /// tenants that still store legacy text. The text is parsed once and the
    /// structured form is cached.
    ///
    /// Returns `Ok(None)` when the fetched text carries no schedule
    /// information; nothing is cached in that case.
    pub fn get_or_load_legacy<E>(
        &mut self,
        key: K,
        fetch_text: impl FnOnce() -> Result<String, E>,
    ) -> Result<Option<Arc<WeekSchedule>>, E> {
        if let Some(schedule) = self.entries.get(&key) {
            return Ok(Some(Arc::clone(schedule)));
        }

        let text = fetch_text()?;
        match parse_legacy(&text) {
            Some(schedule) => Ok(Some(self.insert(key, schedule))),
            None => {
                debug!("legacy schedule text is empty, not caching");
                Ok(None)
            }
        }
    }

    /// Drop the entry for `key`. Returns whether one was present.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
