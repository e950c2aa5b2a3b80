use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use gradebook_core::{AppError, PaginationParams};
use gradebook_models::ids::GradeScaleId;

use crate::middleware::context::TenantContext;
use crate::modules::grade_scales::model::{
    CreateGradeScaleDto, GradeScale, GradeScaleWithEntries, PaginatedGradeScalesResponse,
    UpdateGradeScaleDto,
};
use crate::modules::grade_scales::service::GradeScaleService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/grade-scales",
    request_body = CreateGradeScaleDto,
    responses(
        (status = 200, description = "Grade scale created", body = GradeScaleWithEntries),
        (status = 400, description = "Invalid or overlapping entries"),
        (status = 401, description = "Missing tenant context"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Grade Scales"
)]
#[instrument(skip(state, dto))]
pub async fn create_grade_scale(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(dto): Json<CreateGradeScaleDto>,
) -> Result<Json<GradeScaleWithEntries>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let scale = GradeScaleService::create_grade_scale(&state.db, ctx.school_id, dto).await?;
    Ok(Json(scale))
}

#[utoipa::path(
    get,
    path = "/api/grade-scales",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of grade scales", body = PaginatedGradeScalesResponse),
        (status = 401, description = "Missing tenant context")
    ),
    tag = "Grade Scales"
)]
#[instrument(skip(state))]
pub async fn get_grade_scales(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedGradeScalesResponse>, AppError> {
    let response = GradeScaleService::get_grade_scales(&state.db, ctx.school_id, pagination).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/grade-scales/{id}",
    params(("id" = GradeScaleId, Path, description = "Grade scale ID")),
    responses(
        (status = 200, description = "Grade scale with entries", body = GradeScaleWithEntries),
        (status = 404, description = "Grade scale not found")
    ),
    tag = "Grade Scales"
)]
#[instrument(skip(state))]
pub async fn get_grade_scale(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<GradeScaleId>,
) -> Result<Json<GradeScaleWithEntries>, AppError> {
    let scale = GradeScaleService::get_grade_scale(&state.db, ctx.school_id, id).await?;
    Ok(Json(scale))
}

#[utoipa::path(
    put,
    path = "/api/grade-scales/{id}",
    params(("id" = GradeScaleId, Path, description = "Grade scale ID")),
    request_body = UpdateGradeScaleDto,
    responses(
        (status = 200, description = "Grade scale updated", body = GradeScaleWithEntries),
        (status = 400, description = "Invalid or overlapping entries"),
        (status = 404, description = "Grade scale not found")
    ),
    tag = "Grade Scales"
)]
#[instrument(skip(state, dto))]
pub async fn update_grade_scale(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<GradeScaleId>,
    Json(dto): Json<UpdateGradeScaleDto>,
) -> Result<Json<GradeScaleWithEntries>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let scale = GradeScaleService::update_grade_scale(&state.db, ctx.school_id, id, dto).await?;
    Ok(Json(scale))
}

#[utoipa::path(
    delete,
    path = "/api/grade-scales/{id}",
    params(("id" = GradeScaleId, Path, description = "Grade scale ID")),
    responses(
        (status = 200, description = "Grade scale deleted"),
        (status = 404, description = "Grade scale not found")
    ),
    tag = "Grade Scales"
)]
#[instrument(skip(state))]
pub async fn delete_grade_scale(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<GradeScaleId>,
) -> Result<Json<serde_json::Value>, AppError> {
    GradeScaleService::delete_grade_scale(&state.db, ctx.school_id, id).await?;
    Ok(Json(json!({"message": "Grade scale deleted successfully"})))
}

#[utoipa::path(
    post,
    path = "/api/grade-scales/{id}/activate",
    params(("id" = GradeScaleId, Path, description = "Grade scale ID")),
    responses(
        (status = 200, description = "Grade scale activated", body = GradeScale),
        (status = 404, description = "Grade scale not found"),
        (status = 409, description = "Scale has no entries")
    ),
    tag = "Grade Scales"
)]
#[instrument(skip(state))]
pub async fn activate_grade_scale(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<GradeScaleId>,
) -> Result<Json<GradeScale>, AppError> {
    let scale = GradeScaleService::activate_grade_scale(&state.db, ctx.school_id, id).await?;
    Ok(Json(scale))
}
