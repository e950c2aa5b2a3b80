use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::assessments::router::init_assessments_router;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::grade_scales::router::init_grade_scales_router;
use crate::modules::periods::router::init_periods_router;
use crate::modules::reports::router::init_reports_router;
use crate::state::AppState;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/grade-scales", init_grade_scales_router())
                .nest("/periods", init_periods_router())
                .nest("/assessments", init_assessments_router())
                .nest("/attendance", init_attendance_router())
                .nest("/reports", init_reports_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    HeaderName::from_static("x-school-id"),
                    HeaderName::from_static("x-principal-id"),
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
