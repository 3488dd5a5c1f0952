use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::WorldError;
use crate::model::EntityKind;

/// Thread-safe keyed collection of one entity type.
///
/// Backed by a sharded `DashMap`, so parallel readers and writers touching
/// different keys never contend on an application-level lock. Values are
/// handed out as clones; mutation goes through [`Repository::update`].
#[derive(Debug)]
pub struct Repository<V> {
    kind: EntityKind,
    entries: DashMap<String, V>,
}

impl<V: Clone> Repository<V> {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: DashMap::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Insert or replace.
    pub fn insert(&self, id: impl Into<String>, value: V) {
        self.entries.insert(id.into(), value);
    }

    /// Insert only if `id` is free. Returns whether the value was stored.
    /// Atomic with respect to concurrent inserts of the same key.
    pub fn insert_if_absent(&self, id: impl Into<String>, value: V) -> bool {
        match self.entries.entry(id.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<V> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Like [`get`](Self::get) but a missing id is an error.
    pub fn require(&self, id: &str) -> Result<V, WorldError> {
        self.get(id)
            .ok_or_else(|| WorldError::not_found(self.kind, id))
    }

    /// Mutate the value stored under `id` in place.
    ///
    /// The shard stays locked while `f` runs: `f` must not touch this
    /// repository again.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut V) -> R) -> Result<R, WorldError> {
        let mut entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| WorldError::not_found(self.kind, id))?;
        Ok(f(entry.value_mut()))
    }

    /// Apply `f` to every value. Returns how many values `f` reported as changed.
    pub fn update_all(&self, mut f: impl FnMut(&mut V) -> bool) -> usize {
        self.entries
            .iter_mut()
            .filter_map(|mut entry| f(entry.value_mut()).then_some(()))
            .count()
    }

    /// Every value, sorted by id so callers see a stable order.
    pub fn values(&self) -> Vec<V> {
        self.filter(|_| true)
    }

    /// Values matching `predicate`, sorted by id.
    pub fn filter(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
        let mut matches: Vec<(String, V)> = self
            .entries
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0));
        matches.into_iter().map(|(_, v)| v).collect()
    }

    /// Whether any value matches `predicate`.
    pub fn any(&self, predicate: impl Fn(&V) -> bool) -> bool {
        self.entries.iter().any(|entry| predicate(entry.value()))
    }

    /// Sorted ids.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}
