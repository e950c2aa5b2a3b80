use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;
use validator::Validate;

use gradebook_core::AppError;

use crate::middleware::context::TenantContext;
use crate::modules::attendance::model::{
    AttendanceFilterParams, AttendanceLog, AttendanceReportResponse, AttendanceSummaryParams,
    PaginatedAttendanceResponse, RecordAttendanceDto,
};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = RecordAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded", body = AttendanceLog),
        (status = 401, description = "Missing tenant context"),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn record_attendance(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(dto): Json<RecordAttendanceDto>,
) -> Result<Json<AttendanceLog>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let log = AttendanceService::record_attendance(&state.db, ctx.school_id, dto).await?;
    Ok(Json(log))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilterParams),
    responses(
        (status = 200, description = "List of attendance logs", body = PaginatedAttendanceResponse),
        (status = 401, description = "Missing tenant context")
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(filters): Query<AttendanceFilterParams>,
) -> Result<Json<PaginatedAttendanceResponse>, AppError> {
    let response = AttendanceService::get_attendance(&state.db, ctx.school_id, filters).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    params(AttendanceSummaryParams),
    responses(
        (status = 200, description = "Attendance summary for one student", body = AttendanceReportResponse),
        (status = 401, description = "Missing tenant context"),
        (status = 404, description = "Student not found")
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance_summary(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<AttendanceSummaryParams>,
) -> Result<Json<AttendanceReportResponse>, AppError> {
    let report = AttendanceService::get_summary(
        &state.db,
        ctx.school_id,
        params.student_id,
        &params.academic_year,
        params.term,
    )
    .await?;
    Ok(Json(report))
}
