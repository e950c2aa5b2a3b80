//! Assessment data models and DTOs.
//!
//! Re-exports assessment models from the `gradebook-models` crate.

pub use gradebook_models::assessments::*;
