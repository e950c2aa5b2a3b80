//! Grade scales module.
//!
//! Manages per-school grade scales: ordered, non-overlapping percentage
//! brackets mapping to letter grades and grade points. One scale per school
//! may be active; report-card generation resolves grades against it.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
