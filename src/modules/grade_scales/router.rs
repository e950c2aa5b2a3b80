use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    activate_grade_scale, create_grade_scale, delete_grade_scale, get_grade_scale,
    get_grade_scales, update_grade_scale,
};

/// Routes: POST /, GET /, GET /{id}, PUT /{id}, DELETE /{id}, POST /{id}/activate
pub fn init_grade_scales_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_grade_scale).get(get_grade_scales))
        .route(
            "/{id}",
            get(get_grade_scale)
                .put(update_grade_scale)
                .delete(delete_grade_scale),
        )
        .route("/{id}/activate", post(activate_grade_scale))
}
