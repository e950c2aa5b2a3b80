use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{get_attendance, get_attendance_summary, record_attendance};

/// Routes: POST /, GET /, GET /summary
pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_attendance).get(get_attendance))
        .route("/summary", get(get_attendance_summary))
}
