//! The grade and attendance aggregation engine.
//!
//! Everything in this module is pure: it operates on rows already fetched
//! into memory for one request and never touches the database. Services
//! under [`crate::modules`] are responsible for loading inputs, enforcing
//! preconditions (an active grade scale, at least one assessment), and
//! mapping engine output into HTTP responses.
//!
//! - [`scale`]: percentage-to-grade lookup against an ordered scale
//! - [`aggregate`]: per-subject and overall aggregation, report assembly
//! - [`attendance`]: per-status counting and attendance percentage
//! - [`timetable`]: `"HH:MM"` interval parsing and overlap detection

pub mod aggregate;
pub mod attendance;
pub mod scale;
pub mod timetable;

pub use aggregate::{ReportInputs, build_report_card, build_report_cards};
pub use attendance::summarize_attendance;
pub use scale::{GradeSlot, lookup_grade, sort_scale_for_lookup};
pub use timetable::{TimeRange, find_conflict, parse_time_range};
