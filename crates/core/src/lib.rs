//! Domain logic for the university timetable service.
//!
//! This crate has zero internal deps so the repository layer, the HTTP
//! server and any future tooling can share the same rules.

pub mod academic;
pub mod error;
pub mod permissions;
pub mod timetable;
pub mod types;
