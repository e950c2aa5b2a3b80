//! Attendance data models and DTOs.
//!
//! Re-exports attendance models from the `gradebook-models` crate.

pub use gradebook_models::attendance::*;
