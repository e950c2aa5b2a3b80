use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_report_cards;

/// Routes: GET /report-cards
pub fn init_reports_router() -> Router<AppState> {
    Router::new().route("/report-cards", get(get_report_cards))
}
