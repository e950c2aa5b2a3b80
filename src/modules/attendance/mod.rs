//! Attendance module.
//!
//! Daily per-student attendance logs scoped to an academic year and term.
//! Unmarked days are simply missing rows; they never count toward the
//! attendance percentage.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
