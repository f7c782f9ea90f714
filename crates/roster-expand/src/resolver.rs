//! Manager dependency resolution.
//!
//! Before a batch of employees can be expanded along `manager` chains, every
//! manager reachable within the requested number of hops must be in the
//! [`ManagerCache`]. The resolver walks the chain one hop per level and issues
//! at most one batched directory call per level, so the number of round-trips
//! is bounded by the depth rather than by the number of employees.

use std::collections::BTreeSet;
use std::sync::Arc;

use roster_core::{manager_id, Record};
use roster_directory::{DirectoryResult, EmployeeDirectory};
use tracing::debug;

use crate::cache::ManagerCache;

#[derive(Clone)]
pub struct ManagerResolver {
    cache: ManagerCache,
    directory: Arc<dyn EmployeeDirectory>,
}

impl ManagerResolver {
    pub fn new(cache: ManagerCache, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { cache, directory }
    }

    pub fn cache(&self) -> &ManagerCache {
        &self.cache
    }

    /// Make every manager within `depth` hops of `employees` resolvable from
    /// the cache.
    ///
    /// The employees themselves are cached first, so they can serve as each
    /// other's managers without a remote call. Ids the directory does not
    /// return are left missing; expanding them later fails. Directory errors
    /// are returned unchanged.
    ///
    /// Returns the number of records fetched from the directory.
    pub async fn ensure_manager_depth(
        &self,
        employees: &[Record],
        depth: usize,
    ) -> DirectoryResult<usize> {
        self.cache.upsert_all(employees.iter().cloned());

        let mut fetched = 0;
        let mut frontier: BTreeSet<_> = employees.iter().filter_map(manager_id).collect();

        for level in 1..=depth {
            if frontier.is_empty() {
                break;
            }

            let missing = self.cache.missing(&frontier);
            if !missing.is_empty() {
                let records = self.directory.fetch_by_ids(&missing).await?;
                debug!(
                    level,
                    requested = missing.len(),
                    returned = records.len(),
                    "fetched missing managers"
                );
                fetched += records.len();
                self.cache.upsert_all(records);
            }

            if level < depth {
                frontier = self.cache.managers_of(&frontier);
            }
        }

        Ok(fetched)
    }
}
