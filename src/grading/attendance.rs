//! Attendance summarization.

use gradebook_core::round_2dp;
use gradebook_models::attendance::{AttendanceStatus, AttendanceSummary};

/// Count statuses and derive the attendance percentage.
///
/// Only `Present` credits the numerator; `Late` and `Excused` count toward
/// the denominator as "marked but not present". Days with no entry at all
/// are simply not in the input and never inflate the denominator. An empty
/// log yields a percentage of `0.0` rather than null; tests pin that policy.
pub fn summarize_attendance(statuses: &[AttendanceStatus]) -> AttendanceSummary {
    let mut summary = AttendanceSummary {
        days_present: 0,
        days_absent: 0,
        days_late: 0,
        days_excused: 0,
        total_marked_days: 0,
        attendance_percentage: 0.0,
    };

    for status in statuses {
        match status {
            AttendanceStatus::Present => summary.days_present += 1,
            AttendanceStatus::Absent => summary.days_absent += 1,
            AttendanceStatus::Late => summary.days_late += 1,
            AttendanceStatus::Excused => summary.days_excused += 1,
        }
    }

    summary.total_marked_days =
        summary.days_present + summary.days_absent + summary.days_late + summary.days_excused;

    if summary.total_marked_days > 0 {
        summary.attendance_percentage = round_2dp(
            summary.days_present as f64 / summary.total_marked_days as f64 * 100.0,
        );
    }

    summary
}
