//! roster-expand — relationship expansion for employee records.
//!
//! Employees arrive from the directory with bare foreign keys (`office`,
//! `department`, `manager`). A request names dotted paths to inline, e.g.
//! `manager.manager.office`, and this crate replaces each key along those
//! paths with the referenced record.
//!
//! # Architecture
//!
//! ```text
//! expand=[...] ──► ExpansionPlan::compile ──► prefix-ordered paths
//!                                              │
//!                         manager depth > 0 ───┤
//!                                              ▼
//!                 ManagerResolver::ensure_manager_depth
//!                   (one batched directory call per hop)
//!                                              │
//!                                              ▼
//!                 Expander::expand per employee
//!                   ├── ReferenceStore  (office, department, superdepartment)
//!                   └── ManagerCache    (manager)
//! ```
//!
//! Offices and departments are loaded once at startup and never change.
//! Managers are employees, so they are fetched on demand and accumulated in
//! a shared [`ManagerCache`] that only grows.

pub mod cache;
pub mod error;
pub mod expander;
pub mod paths;
pub mod reference;
pub mod resolver;
pub mod service;

pub use cache::ManagerCache;
pub use error::{ExpandError, ExpandResult, LoadError};
pub use expander::Expander;
pub use paths::{ExpansionPath, ExpansionPlan, Relation};
pub use reference::ReferenceStore;
pub use resolver::ManagerResolver;
pub use service::EmployeeService;
