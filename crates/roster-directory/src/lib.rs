//! roster-directory — client for the upstream employee directory.
//!
//! The directory is the only source of employee records. It accepts a
//! pagination window or a list of ids and returns a JSON array of records.
//! Id lookups are capped by the provider at [`DEFAULT_BATCH_SIZE`] ids per
//! request, so longer lists are split into sequential batches.
//!
//! [`EmployeeDirectory`] is the injectable seam: the daemon uses
//! [`HttpDirectory`], tests use `MemoryDirectory` from the `test-util`
//! feature.
//!
//! [`DEFAULT_BATCH_SIZE`]: roster_core::config::DEFAULT_BATCH_SIZE

pub mod client;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

use std::future::Future;
use std::pin::Pin;

use roster_core::{EmployeeId, Record};

pub use client::HttpDirectory;
pub use error::{DirectoryError, DirectoryResult};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryDirectory;

/// Boxed future alias for directory calls.
pub type DirectoryFuture<'a> =
    Pin<Box<dyn Future<Output = DirectoryResult<Vec<Record>>> + Send + 'a>>;

/// Pagination window for listing employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u32,
    pub offset: u32,
}

/// Read access to the upstream employee directory.
pub trait EmployeeDirectory: Send + Sync {
    /// Fetch one page of employees.
    fn list(&self, window: Window) -> DirectoryFuture<'_>;

    /// Fetch employees by id, in any order.
    ///
    /// Accepts arbitrarily many ids. Unknown ids are dropped silently, so the
    /// result may be shorter than `ids`.
    fn fetch_by_ids<'a>(&'a self, ids: &'a [EmployeeId]) -> DirectoryFuture<'a>;
}
