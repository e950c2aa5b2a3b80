//! Period data models and DTOs.
//!
//! Re-exports period models from the `gradebook-models` crate.

pub use gradebook_models::periods::*;
