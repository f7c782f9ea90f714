//! In-place expansion of foreign keys along compiled paths.

use std::sync::Arc;

use roster_core::{foreign_key, EmployeeId, ForeignKey, Record};
use serde_json::Value;

use crate::cache::ManagerCache;
use crate::error::{ExpandError, ExpandResult};
use crate::paths::{ExpansionPath, ExpansionPlan, Relation};
use crate::reference::ReferenceStore;

/// Replaces foreign keys with the records they point to.
///
/// Reads offices and departments from the [`ReferenceStore`] and managers
/// from the [`ManagerCache`]. Managers must already be cached; the expander
/// never calls the directory.
#[derive(Clone)]
pub struct Expander {
    references: Arc<ReferenceStore>,
    managers: ManagerCache,
}

impl Expander {
    pub fn new(references: Arc<ReferenceStore>, managers: ManagerCache) -> Self {
        Self {
            references,
            managers,
        }
    }

    /// Expand a copy of `employee` along every path of `plan`, in order.
    ///
    /// A path whose value is null or missing is skipped. A path whose value
    /// cannot be resolved aborts the expansion with [`ExpandError::Unresolved`].
    /// The input record is never modified.
    pub fn expand(&self, employee: &Record, plan: &ExpansionPlan) -> ExpandResult<Record> {
        let mut expanded = employee.clone();

        for path in plan.paths() {
            let Some(slot) = slot_mut(&mut expanded, path.segments()) else {
                continue;
            };
            let id = match foreign_key(Some(&*slot)) {
                ForeignKey::Absent => continue,
                ForeignKey::Id(id) | ForeignKey::Expanded(id) => id,
                ForeignKey::Invalid => return Err(unresolved(path)),
            };
            let record = self.resolve(path.relation(), id).ok_or_else(|| unresolved(path))?;
            *slot = Value::Object(record);
        }

        Ok(expanded)
    }

    fn resolve(&self, relation: Option<Relation>, id: EmployeeId) -> Option<Record> {
        match relation? {
            Relation::Manager => self.managers.get(id),
            relation => self.references.lookup(relation, id).cloned(),
        }
    }
}

fn unresolved(path: &ExpansionPath) -> ExpandError {
    ExpandError::Unresolved {
        path: path.to_string(),
    }
}

/// Mutable reference to the value at `segments`, if every parent along the
/// way is an object and the final field exists.
fn slot_mut<'a>(record: &'a mut Record, segments: &[String]) -> Option<&'a mut Value> {
    let (last, parents) = segments.split_last()?;
    let mut current = record;
    for segment in parents {
        current = current.get_mut(segment)?.as_object_mut()?;
    }
    current.get_mut(last)
}
