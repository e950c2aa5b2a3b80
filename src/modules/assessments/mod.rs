//! Assessments module.
//!
//! Assessment records define the denominator for gradable events within a
//! class/subject/year/term; student marks are recorded against them in bulk
//! and validated to `[0, max_marks]` before anything is written.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
