//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` row struct and, where
//! rows are inserted through the API or tests, a create DTO.

pub mod course;
pub mod department;
pub mod faculty;
pub mod student;
pub mod timetable;
