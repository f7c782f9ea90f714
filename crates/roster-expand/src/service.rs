//! Per-request orchestration: fetch, compile, resolve, expand.

use std::sync::Arc;

use roster_core::{record_id, EmployeeId, Record};
use roster_directory::{EmployeeDirectory, Window};
use tracing::debug;

use crate::cache::ManagerCache;
use crate::error::ExpandResult;
use crate::expander::Expander;
use crate::paths::ExpansionPlan;
use crate::reference::ReferenceStore;
use crate::resolver::ManagerResolver;

/// Serves expanded employee records.
///
/// Cheap to clone; all clones share the directory, the reference tables and
/// the manager cache.
#[derive(Clone)]
pub struct EmployeeService {
    directory: Arc<dyn EmployeeDirectory>,
    resolver: ManagerResolver,
    expander: Expander,
}

impl EmployeeService {
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        references: Arc<ReferenceStore>,
        managers: ManagerCache,
    ) -> Self {
        Self {
            resolver: ManagerResolver::new(managers.clone(), directory.clone()),
            expander: Expander::new(references, managers),
            directory,
        }
    }

    pub fn managers(&self) -> &ManagerCache {
        self.resolver.cache()
    }

    /// One page of employees, expanded.
    pub async fn list_employees(
        &self,
        window: Window,
        expand: &[String],
    ) -> ExpandResult<Vec<Record>> {
        let employees = self.directory.list(window).await?;
        self.expand_all(employees, expand).await
    }

    /// A single employee, expanded. `None` when the directory has no such id.
    pub async fn get_employee(
        &self,
        id: EmployeeId,
        expand: &[String],
    ) -> ExpandResult<Option<Record>> {
        let employees: Vec<Record> = self
            .directory
            .fetch_by_ids(&[id])
            .await?
            .into_iter()
            .filter(|employee| record_id(employee) == Some(id))
            .take(1)
            .collect();
        Ok(self.expand_all(employees, expand).await?.pop())
    }

    /// Expand a batch. The first failure aborts the whole batch.
    pub async fn expand_all(
        &self,
        employees: Vec<Record>,
        expand: &[String],
    ) -> ExpandResult<Vec<Record>> {
        let plan = ExpansionPlan::compile(expand);
        if plan.is_empty() {
            return Ok(employees);
        }

        let depth = plan.manager_depth();
        if depth > 0 {
            self.resolver.ensure_manager_depth(&employees, depth).await?;
        }
        debug!(
            employees = employees.len(),
            paths = plan.paths().len(),
            depth,
            "expanding batch"
        );

        employees
            .iter()
            .map(|employee| self.expander.expand(employee, &plan))
            .collect()
    }
}
