//! Process-wide cache of employee records used as manager targets.
//!
//! Entries are only ever inserted or replaced by a fresher copy of the same
//! id; nothing is evicted. Each operation takes the lock briefly and never
//! across an await point, so readers always see whole records and concurrent
//! requests may race to upsert the same id (last write wins).

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use roster_core::{manager_id, record_id, EmployeeId, Record};

/// Cloneable handle to a shared manager table.
#[derive(Clone, Default)]
pub struct ManagerCache {
    entries: Arc<RwLock<HashMap<EmployeeId, Record>>>,
}

impl ManagerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: EmployeeId) -> Option<Record> {
        let entries = self.entries.read().expect("manager cache lock");
        entries.get(&id).cloned()
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        let entries = self.entries.read().expect("manager cache lock");
        entries.contains_key(&id)
    }

    /// Insert or replace a record under its own id. Records without an
    /// integer id are ignored and reported as `false`.
    pub fn upsert(&self, record: Record) -> bool {
        let Some(id) = record_id(&record) else {
            return false;
        };
        let mut entries = self.entries.write().expect("manager cache lock");
        entries.insert(id, record);
        true
    }

    /// Upsert many records under one lock. Returns how many were stored.
    pub fn upsert_all(&self, records: impl IntoIterator<Item = Record>) -> usize {
        let mut entries = self.entries.write().expect("manager cache lock");
        let mut stored = 0;
        for record in records {
            if let Some(id) = record_id(&record) {
                entries.insert(id, record);
                stored += 1;
            }
        }
        stored
    }

    /// Of `ids`, those with no cached record.
    pub fn missing(&self, ids: &BTreeSet<EmployeeId>) -> Vec<EmployeeId> {
        let entries = self.entries.read().expect("manager cache lock");
        ids.iter()
            .copied()
            .filter(|id| !entries.contains_key(id))
            .collect()
    }

    /// Manager ids of the cached records among `ids`.
    pub fn managers_of(&self, ids: &BTreeSet<EmployeeId>) -> BTreeSet<EmployeeId> {
        let entries = self.entries.read().expect("manager cache lock");
        ids.iter()
            .filter_map(|id| entries.get(id))
            .filter_map(manager_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("manager cache lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
