//! # Gradebook Models
//!
//! Domain models and DTOs for the Gradebook API.
//!
//! - [`ids`]: Strongly-typed UUID newtypes for every entity
//! - [`grade_scales`]: Grade scales and their ordered entries
//! - [`assessments`]: Assessment records and student marks
//! - [`attendance`]: Attendance logs and summaries
//! - [`periods`]: School timetable period definitions
//! - [`reports`]: Report-card response shapes

pub mod assessments;
pub mod attendance;
pub mod grade_scales;
pub mod ids;
pub mod periods;
pub mod reports;
pub mod students;
