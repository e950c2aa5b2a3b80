//! Attendance domain models and DTOs.

use gradebook_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{AttendanceLogId, SchoolId, StudentId};

/// Status recorded for one student on one calendar day.
///
/// A day with no entry at all is "unmarked" and is excluded from every
/// attendance calculation; it is not the same as `Absent`.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

/// One attendance log row.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct AttendanceLog {
    pub id: AttendanceLogId,
    pub school_id: SchoolId,
    pub student_id: StudentId,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub academic_year: String,
    pub term: i32,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for recording one attendance entry.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct RecordAttendanceDto {
    pub student_id: StudentId,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    #[validate(length(min = 4, max = 20))]
    pub academic_year: String,
    #[validate(range(min = 1, max = 4))]
    pub term: i32,
    #[validate(length(max = 200))]
    pub remarks: Option<String>,
}

/// Per-status counts and the derived attendance percentage for one student
/// within one academic year and term.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AttendanceSummary {
    pub days_present: i64,
    pub days_absent: i64,
    pub days_late: i64,
    pub days_excused: i64,
    /// Sum of all counted statuses; unmarked days never appear here.
    pub total_marked_days: i64,
    /// `days_present / total_marked_days * 100`, rounded to 2 dp.
    /// `0.0` when nothing has been marked yet.
    pub attendance_percentage: f64,
}

/// Response for the attendance summary endpoint.
#[derive(Serialize, Debug, ToSchema)]
pub struct AttendanceReportResponse {
    pub summary: AttendanceSummary,
    pub attendance_log: Vec<AttendanceLog>,
}

/// Query parameters for the attendance summary endpoint.
#[derive(Deserialize, Debug, IntoParams)]
pub struct AttendanceSummaryParams {
    pub student_id: StudentId,
    pub academic_year: String,
    pub term: i32,
}

/// Query parameters for listing attendance logs.
#[derive(Deserialize, Debug, IntoParams)]
pub struct AttendanceFilterParams {
    pub student_id: Option<StudentId>,
    pub academic_year: Option<String>,
    pub term: Option<i32>,
    #[serde(flatten)]
    pub pagination: gradebook_core::PaginationParams,
}

/// Paginated response containing attendance logs.
#[derive(Serialize, ToSchema)]
pub struct PaginatedAttendanceResponse {
    pub data: Vec<AttendanceLog>,
    pub meta: PaginationMeta,
}
