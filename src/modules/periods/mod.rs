//! Timetable periods module.
//!
//! School-wide period definitions with `"HH:MM"` times. A new or edited
//! period that collides with any other period of the same school is
//! rejected before it is written.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
