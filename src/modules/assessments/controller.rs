use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use gradebook_core::AppError;
use gradebook_models::ids::AssessmentId;

use crate::middleware::context::TenantContext;
use crate::modules::assessments::model::{
    Assessment, AssessmentFilterParams, CreateAssessmentDto, PaginatedAssessmentsResponse,
    RecordMarksDto, StudentMark, UpdateAssessmentDto,
};
use crate::modules::assessments::service::AssessmentService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/assessments",
    request_body = CreateAssessmentDto,
    responses(
        (status = 200, description = "Assessment created", body = Assessment),
        (status = 401, description = "Missing tenant context"),
        (status = 404, description = "Class or subject not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Assessments"
)]
#[instrument(skip(state, dto))]
pub async fn create_assessment(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(dto): Json<CreateAssessmentDto>,
) -> Result<Json<Assessment>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let assessment = AssessmentService::create_assessment(&state.db, ctx.school_id, dto).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    get,
    path = "/api/assessments",
    params(AssessmentFilterParams),
    responses(
        (status = 200, description = "List of assessments", body = PaginatedAssessmentsResponse),
        (status = 401, description = "Missing tenant context")
    ),
    tag = "Assessments"
)]
#[instrument(skip(state))]
pub async fn get_assessments(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(filters): Query<AssessmentFilterParams>,
) -> Result<Json<PaginatedAssessmentsResponse>, AppError> {
    let response = AssessmentService::get_assessments(&state.db, ctx.school_id, filters).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{id}",
    params(("id" = AssessmentId, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Assessment details", body = Assessment),
        (status = 404, description = "Assessment not found")
    ),
    tag = "Assessments"
)]
#[instrument(skip(state))]
pub async fn get_assessment(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<AssessmentId>,
) -> Result<Json<Assessment>, AppError> {
    let assessment = AssessmentService::get_assessment(&state.db, ctx.school_id, id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    put,
    path = "/api/assessments/{id}",
    params(("id" = AssessmentId, Path, description = "Assessment ID")),
    request_body = UpdateAssessmentDto,
    responses(
        (status = 200, description = "Assessment updated", body = Assessment),
        (status = 400, description = "max_marks below an already recorded mark"),
        (status = 404, description = "Assessment not found")
    ),
    tag = "Assessments"
)]
#[instrument(skip(state, dto))]
pub async fn update_assessment(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<AssessmentId>,
    Json(dto): Json<UpdateAssessmentDto>,
) -> Result<Json<Assessment>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let assessment = AssessmentService::update_assessment(&state.db, ctx.school_id, id, dto).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    delete,
    path = "/api/assessments/{id}",
    params(("id" = AssessmentId, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Assessment deleted"),
        (status = 404, description = "Assessment not found")
    ),
    tag = "Assessments"
)]
#[instrument(skip(state))]
pub async fn delete_assessment(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<AssessmentId>,
) -> Result<Json<serde_json::Value>, AppError> {
    AssessmentService::delete_assessment(&state.db, ctx.school_id, id).await?;
    Ok(Json(json!({"message": "Assessment deleted successfully"})))
}

#[utoipa::path(
    put,
    path = "/api/assessments/{id}/marks",
    params(("id" = AssessmentId, Path, description = "Assessment ID")),
    request_body = RecordMarksDto,
    responses(
        (status = 200, description = "Marks recorded", body = Vec<StudentMark>),
        (status = 400, description = "Mark out of range or student not in class"),
        (status = 404, description = "Assessment not found")
    ),
    tag = "Assessments"
)]
#[instrument(skip(state, dto))]
pub async fn record_marks(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<AssessmentId>,
    Json(dto): Json<RecordMarksDto>,
) -> Result<Json<Vec<StudentMark>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let marks = AssessmentService::record_marks(&state.db, ctx.school_id, id, dto).await?;
    Ok(Json(marks))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{id}/marks",
    params(("id" = AssessmentId, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Marks for the assessment", body = Vec<StudentMark>),
        (status = 404, description = "Assessment not found")
    ),
    tag = "Assessments"
)]
#[instrument(skip(state))]
pub async fn get_marks(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<AssessmentId>,
) -> Result<Json<Vec<StudentMark>>, AppError> {
    let marks = AssessmentService::get_marks(&state.db, ctx.school_id, id).await?;
    Ok(Json(marks))
}
