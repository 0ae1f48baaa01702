//! Request handlers.
//!
//! Handlers delegate to the repositories in `ums_db` and map errors via
//! [`AppError`](crate::error::AppError). Authorization is enforced by the
//! route-level capability gate before a handler runs.

pub mod academic;
pub mod timetable;
