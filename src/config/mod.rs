//! Configuration modules for the Gradebook API.
//!
//! Each submodule handles a specific aspect of configuration, loaded from
//! environment variables.
//!
//! # Modules
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization

pub mod cors;
pub mod database;
