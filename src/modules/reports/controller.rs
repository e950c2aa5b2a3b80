use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use gradebook_core::AppError;

use crate::middleware::context::TenantContext;
use crate::modules::reports::model::{ReportCardParams, ReportCardsResponse};
use crate::modules::reports::service::ReportService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/reports/report-cards",
    params(ReportCardParams),
    responses(
        (status = 200, description = "Report cards with the grade scale used", body = ReportCardsResponse),
        (status = 401, description = "Missing tenant context"),
        (status = 404, description = "Class, student, or assessments not found"),
        (status = 409, description = "No usable active grade scale configured")
    ),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_report_cards(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<ReportCardParams>,
) -> Result<Json<ReportCardsResponse>, AppError> {
    let response = ReportService::get_report_cards(
        &state.db,
        ctx.school_id,
        params.class_id,
        &params.academic_year,
        params.term,
        &params.student_id,
    )
    .await?;
    Ok(Json(response))
}
