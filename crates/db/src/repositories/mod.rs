//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or any Postgres executor) as the first argument.

pub mod course_repo;
pub mod department_repo;
pub mod faculty_repo;
pub mod student_repo;
pub mod timetable_repo;

pub use course_repo::CourseRepo;
pub use department_repo::DepartmentRepo;
pub use faculty_repo::FacultyRepo;
pub use student_repo::StudentRepo;
pub use timetable_repo::{TimetableRepo, TimetableWriteError};
