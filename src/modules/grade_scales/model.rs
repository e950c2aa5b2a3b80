//! Grade scale data models and DTOs.
//!
//! Re-exports grade scale models from the `gradebook-models` crate.

pub use gradebook_models::grade_scales::*;
