//! Shared record types used across Roster crates.
//!
//! Upstream records are kept as loosely-typed JSON objects: the engine only
//! cares about `id` and the foreign-key fields, everything else is passed
//! through untouched.

use serde_json::{Map, Value};

/// Identifier of an employee, office, or department.
pub type EmployeeId = i64;

/// A record as returned by the directory or loaded from a dataset.
pub type Record = Map<String, Value>;

/// Classification of a foreign-key field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKey {
    /// Null or missing. Nothing to resolve.
    Absent,
    /// A bare id that still needs to be looked up.
    Id(EmployeeId),
    /// A record that was already inlined; carries its `id`.
    Expanded(EmployeeId),
    /// Any other shape (string, float, record without id, ...).
    Invalid,
}

impl ForeignKey {
    /// The id to look up, if the value carries one.
    pub fn id(self) -> Option<EmployeeId> {
        match self {
            ForeignKey::Id(id) | ForeignKey::Expanded(id) => Some(id),
            ForeignKey::Absent | ForeignKey::Invalid => None,
        }
    }
}

/// Read the integer `id` of a record.
pub fn record_id(record: &Record) -> Option<EmployeeId> {
    record.get("id").and_then(Value::as_i64)
}

/// Classify a foreign-key field value.
pub fn foreign_key(value: Option<&Value>) -> ForeignKey {
    match value {
        None | Some(Value::Null) => ForeignKey::Absent,
        Some(Value::Number(n)) => n.as_i64().map_or(ForeignKey::Invalid, ForeignKey::Id),
        Some(Value::Object(record)) => {
            record_id(record).map_or(ForeignKey::Invalid, ForeignKey::Expanded)
        }
        Some(_) => ForeignKey::Invalid,
    }
}

/// The `manager` foreign key of an employee record, if set.
pub fn manager_id(record: &Record) -> Option<EmployeeId> {
    foreign_key(record.get("manager")).id()
}
