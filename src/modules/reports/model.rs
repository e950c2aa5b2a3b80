//! Report-card response shapes.
//!
//! Re-exports report models from the `gradebook-models` crate.

pub use gradebook_models::reports::*;
