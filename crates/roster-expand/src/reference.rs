//! Static reference tables for offices and departments.
//!
//! Built once at startup from the JSON datasets and shared read-only for the
//! lifetime of the process. `superdepartment` ids live in the same identity
//! space as `department` ids, so both resolve against one table.

use std::collections::HashMap;
use std::path::Path;

use roster_core::{record_id, EmployeeId, Record};
use tracing::debug;

use crate::error::LoadError;
use crate::paths::Relation;

#[derive(Debug, Default)]
pub struct ReferenceStore {
    offices: HashMap<EmployeeId, Record>,
    departments: HashMap<EmployeeId, Record>,
}

impl ReferenceStore {
    /// Build the store from in-memory records. Every record needs an
    /// integer `id`.
    pub fn from_records(offices: Vec<Record>, departments: Vec<Record>) -> Result<Self, LoadError> {
        Ok(Self {
            offices: index("offices", offices)?,
            departments: index("departments", departments)?,
        })
    }

    /// Load both datasets from JSON array files.
    pub fn load(offices: &Path, departments: &Path) -> Result<Self, LoadError> {
        let store = Self::from_records(
            read_dataset("offices", offices)?,
            read_dataset("departments", departments)?,
        )?;
        debug!(
            offices = store.offices.len(),
            departments = store.departments.len(),
            "reference store loaded"
        );
        Ok(store)
    }

    /// Look up a statically known record. Managers are never found here.
    pub fn lookup(&self, relation: Relation, id: EmployeeId) -> Option<&Record> {
        match relation {
            Relation::Office => self.offices.get(&id),
            Relation::Department | Relation::Superdepartment => self.departments.get(&id),
            Relation::Manager => None,
        }
    }

    pub fn office_count(&self) -> usize {
        self.offices.len()
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }
}

fn read_dataset(dataset: &'static str, path: &Path) -> Result<Vec<Record>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        dataset,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse { dataset, source })
}

fn index(
    dataset: &'static str,
    records: Vec<Record>,
) -> Result<HashMap<EmployeeId, Record>, LoadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record_id(&record) {
            Some(id) => Ok((id, record)),
            None => Err(LoadError::MissingId { dataset, index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    fn store() -> ReferenceStore {
        ReferenceStore::from_records(
            records(json!([{"id": 10, "city": "San Francisco"}])),
            records(json!([
                {"id": 1, "name": "Engineering", "superdepartment": null},
                {"id": 2, "name": "Platform", "superdepartment": 1}
            ])),
        )
        .unwrap()
    }

    #[test]
    fn lookup_by_relation() {
        let store = store();
        assert_eq!(store.lookup(Relation::Office, 10).unwrap()["city"], "San Francisco");
        assert_eq!(store.lookup(Relation::Department, 2).unwrap()["name"], "Platform");
        assert!(store.lookup(Relation::Office, 2).is_none());
        assert!(store.lookup(Relation::Manager, 10).is_none());
    }

    #[test]
    fn superdepartment_shares_department_table() {
        let store = store();
        assert_eq!(
            store.lookup(Relation::Superdepartment, 1),
            store.lookup(Relation::Department, 1)
        );
    }

    #[test]
    fn record_without_id_is_rejected() {
        let err = ReferenceStore::from_records(records(json!([{"city": "Nowhere"}])), vec![])
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingId { dataset: "offices", index: 0 }));
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let offices = dir.path().join("offices.json");
        let departments = dir.path().join("departments.json");
        std::fs::write(&offices, r#"[{"id": 1, "city": "London"}]"#).unwrap();
        std::fs::write(&departments, r#"[{"id": 5, "name": "Sales", "superdepartment": null}]"#)
            .unwrap();

        let store = ReferenceStore::load(&offices, &departments).unwrap();
        assert_eq!(store.office_count(), 1);
        assert_eq!(store.department_count(), 1);
    }

    #[test]
    fn malformed_dataset_is_fatal() {
        let mut offices = tempfile::NamedTempFile::new().unwrap();
        write!(offices, r#"{{"id": 1}}"#).unwrap();
        let departments = tempfile::NamedTempFile::new().unwrap();

        let err = ReferenceStore::load(offices.path(), departments.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { dataset: "offices", .. }));
    }

    #[test]
    fn missing_dataset_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceStore::load(&dir.path().join("nope.json"), &dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Read { dataset: "offices", .. }));
    }
}
