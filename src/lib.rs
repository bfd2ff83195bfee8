//! OrgChart: employee records, compensation, and reporting structures.
//!
//! The resolution algorithm lives in the `orgchart-core` crate; this crate wires
//! it to a SQLite store ([`db`]), an HTTP API ([`api`]), and an HTTP client used
//! by the command line ([`client`]).

pub mod api;
pub mod client;
pub mod db;
pub mod tree_render;

pub use orgchart_core::{hierarchy, models, store};
