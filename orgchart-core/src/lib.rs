//! Core of OrgChart: employee models and the reporting-structure resolver.
//!
//! This crate knows nothing about storage or transport. Anything that can look
//! up an employee by id implements [`store::EmployeeStore`] and can be handed to
//! [`hierarchy::HierarchyResolver`].

pub mod hierarchy;
pub mod models;
pub mod store;

pub use hierarchy::{HierarchyError, HierarchyResolver};
pub use store::EmployeeStore;
