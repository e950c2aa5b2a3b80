use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use gradebook_core::AppError;
use gradebook_models::ids::PeriodId;

use crate::middleware::context::TenantContext;
use crate::modules::periods::model::{CreatePeriodDto, SchoolPeriod, UpdatePeriodDto};
use crate::modules::periods::service::PeriodService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/periods",
    request_body = CreatePeriodDto,
    responses(
        (status = 200, description = "Period created", body = SchoolPeriod),
        (status = 400, description = "Invalid time range or overlap with existing period"),
        (status = 401, description = "Missing tenant context")
    ),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn create_period(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(dto): Json<CreatePeriodDto>,
) -> Result<Json<SchoolPeriod>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let period = PeriodService::create_period(&state.db, ctx.school_id, dto).await?;
    Ok(Json(period))
}

#[utoipa::path(
    get,
    path = "/api/periods",
    responses(
        (status = 200, description = "List of periods ordered by start time", body = Vec<SchoolPeriod>),
        (status = 401, description = "Missing tenant context")
    ),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn get_periods(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<Json<Vec<SchoolPeriod>>, AppError> {
    let periods = PeriodService::get_periods(&state.db, ctx.school_id).await?;
    Ok(Json(periods))
}

#[utoipa::path(
    get,
    path = "/api/periods/{id}",
    params(("id" = PeriodId, Path, description = "Period ID")),
    responses(
        (status = 200, description = "Period details", body = SchoolPeriod),
        (status = 404, description = "Period not found")
    ),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn get_period(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<PeriodId>,
) -> Result<Json<SchoolPeriod>, AppError> {
    let period = PeriodService::get_period(&state.db, ctx.school_id, id).await?;
    Ok(Json(period))
}

#[utoipa::path(
    put,
    path = "/api/periods/{id}",
    params(("id" = PeriodId, Path, description = "Period ID")),
    request_body = UpdatePeriodDto,
    responses(
        (status = 200, description = "Period updated", body = SchoolPeriod),
        (status = 400, description = "Invalid time range or overlap with existing period"),
        (status = 404, description = "Period not found")
    ),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn update_period(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<PeriodId>,
    Json(dto): Json<UpdatePeriodDto>,
) -> Result<Json<SchoolPeriod>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let period = PeriodService::update_period(&state.db, ctx.school_id, id, dto).await?;
    Ok(Json(period))
}

#[utoipa::path(
    delete,
    path = "/api/periods/{id}",
    params(("id" = PeriodId, Path, description = "Period ID")),
    responses(
        (status = 200, description = "Period deleted"),
        (status = 404, description = "Period not found")
    ),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn delete_period(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<PeriodId>,
) -> Result<Json<serde_json::Value>, AppError> {
    PeriodService::delete_period(&state.db, ctx.school_id, id).await?;
    Ok(Json(json!({"message": "Period deleted successfully"})))
}
