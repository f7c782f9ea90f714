//! In-memory directory backed by a fixed set of records.
//!
//! Honours the same contract as [`HttpDirectory`](crate::HttpDirectory):
//! windowed listing, batch chunking, and silently dropped unknown ids. Every
//! batch that would have been an upstream request is counted and logged so
//! callers can assert how many round-trips a code path costs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use roster_core::config::DEFAULT_BATCH_SIZE;
use roster_core::{record_id, EmployeeId, Record};

use crate::error::DirectoryError;
use crate::{DirectoryFuture, EmployeeDirectory, Window};

pub struct MemoryDirectory {
    /// Records in listing order.
    records: Vec<Record>,
    by_id: HashMap<EmployeeId, usize>,
    batch_size: usize,
    calls: AtomicUsize,
    requested: Mutex<Vec<Vec<EmployeeId>>>,
    unavailable: AtomicBool,
}

impl MemoryDirectory {
    /// Build a directory from records. Records without an integer `id` are
    /// listable but cannot be fetched by id.
    pub fn new(records: Vec<Record>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .filter_map(|(idx, r)| record_id(r).map(|id| (id, idx)))
            .collect();
        Self {
            records,
            by_id,
            batch_size: DEFAULT_BATCH_SIZE,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Number of upstream requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Ids of every `fetch_by_ids` batch, in call order.
    pub fn requested_batches(&self) -> Vec<Vec<EmployeeId>> {
        self.requested.lock().expect("requested lock").clone()
    }

    /// Make every subsequent call fail with a 503 status.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn begin_call(&self) -> Result<(), DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DirectoryError::Status(503));
        }
        Ok(())
    }
}

impl EmployeeDirectory for MemoryDirectory {
    fn list(&self, window: Window) -> DirectoryFuture<'_> {
        Box::pin(async move {
            self.begin_call()?;
            Ok(self
                .records
                .iter()
                .skip(window.offset as usize)
                .take(window.limit as usize)
                .cloned()
                .collect())
        })
    }

    fn fetch_by_ids<'a>(&'a self, ids: &'a [EmployeeId]) -> DirectoryFuture<'a> {
        Box::pin(async move {
            let mut employees = Vec::new();
            for batch in ids.chunks(self.batch_size) {
                self.begin_call()?;
                self.requested
                    .lock()
                    .expect("requested lock")
                    .push(batch.to_vec());
                employees.extend(
                    batch
                        .iter()
                        .filter_map(|id| self.by_id.get(id))
                        .map(|&idx| self.records[idx].clone()),
                );
            }
            Ok(employees)
        })
    }
}
