//! Request-scoped tenant context.
//!
//! Authentication lives in an upstream gateway. Every request this service
//! receives carries an `X-School-Id` header identifying the tenant school
//! (and optionally `X-Principal-Id` identifying the acting user). This
//! extractor parses those once at the boundary; the resulting context is
//! passed as an explicit parameter into every service call. No handler or
//! service reads tenant state ambiently.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use std::str::FromStr;

use gradebook_core::AppError;
use gradebook_models::ids::SchoolId;

pub const SCHOOL_ID_HEADER: &str = "x-school-id";
pub const PRINCIPAL_ID_HEADER: &str = "x-principal-id";

/// The authenticated tenant scope for one request.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext {
    pub school_id: SchoolId,
    pub principal_id: Option<uuid::Uuid>,
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let school_header = parts
            .headers
            .get(SCHOOL_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing X-School-Id header".to_string()))?;

        let school_id = SchoolId::from_str(school_header)
            .map_err(|_| AppError::unauthorized("Invalid X-School-Id header".to_string()))?;

        let principal_id = parts
            .headers
            .get(PRINCIPAL_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| uuid::Uuid::parse_str(value).ok());

        Ok(TenantContext {
            school_id,
            principal_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<TenantContext, AppError> {
        let (mut parts, _) = req.into_parts();
        TenantContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_school_id() {
        let school_id = uuid::Uuid::new_v4();
        let req = Request::builder()
            .header("X-School-Id", school_id.to_string())
            .body(())
            .unwrap();

        let ctx = extract(req).await.unwrap();
        assert_eq!(ctx.school_id.into_inner(), school_id);
        assert_eq!(ctx.principal_id, None);
    }

    #[tokio::test]
    async fn test_extracts_principal_when_present() {
        let school_id = uuid::Uuid::new_v4();
        let principal_id = uuid::Uuid::new_v4();
        let req = Request::builder()
            .header("X-School-Id", school_id.to_string())
            .header("X-Principal-Id", principal_id.to_string())
            .body(())
            .unwrap();

        let ctx = extract(req).await.unwrap();
        assert_eq!(ctx.principal_id, Some(principal_id));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let req = Request::builder().body(()).unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        let req = Request::builder()
            .header("X-School-Id", "not-a-uuid")
            .body(())
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
