//! Reports module.
//!
//! Report cards are assembled on demand from the stored assessments, marks,
//! and the active grade scale; nothing derived is ever persisted. Rendering
//! (PDF, print layouts) lives outside this service.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
