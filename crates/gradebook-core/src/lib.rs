//! # Gradebook Core
//!
//! Core types, errors, and utilities for the Gradebook API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`pagination`]: Pagination utilities for API responses
//! - [`rounding`]: Explicit 2-decimal-place rounding applied to every
//!   percentage and GPA the service returns

pub mod errors;
pub mod pagination;
pub mod rounding;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use rounding::round_2dp;
