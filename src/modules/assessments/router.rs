use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_assessment, delete_assessment, get_assessment, get_assessments, get_marks,
    record_marks, update_assessment,
};

/// Routes: POST /, GET /, GET /{id}, PUT /{id}, DELETE /{id},
/// PUT /{id}/marks, GET /{id}/marks
pub fn init_assessments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assessment).get(get_assessments))
        .route(
            "/{id}",
            get(get_assessment)
                .put(update_assessment)
                .delete(delete_assessment),
        )
        .route("/{id}/marks", put(record_marks).get(get_marks))
}
