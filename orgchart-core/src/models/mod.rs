//! Domain models for OrgChart.
//!
//! # Core Concepts
//!
//! ## Persistent Entities
//!
//! - [`Employee`]: A person in the organization. Employees reference the people
//!   reporting to them through an ordered list of [`DirectReport`]s, which makes
//!   the organization a self-referential graph rather than a strict tree.
//! - [`Compensation`]: Salary records attached to an employee, one per effective date.
//!
//! ## Projections
//!
//! - [`ReportingStructure`]: A request-scoped view of an employee together with the
//!   number of people reporting to them, directly or indirectly. Never stored.

mod compensation;
mod employee;
mod reporting;

pub use compensation::*;
pub use employee::*;
pub use reporting::*;
