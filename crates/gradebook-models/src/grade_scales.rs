//! Grade scale domain models and DTOs.
//!
//! A grade scale is an ordered collection of non-overlapping percentage
//! brackets, each mapping to a letter grade and an optional grade point.
//! Exactly one scale per school may be active at a time; the active scale is
//! what report-card generation resolves grades against.

use gradebook_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{GradeScaleEntryId, GradeScaleId, SchoolId};

/// A grade scale owned by one school.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct GradeScale {
    pub id: GradeScaleId,
    pub school_id: SchoolId,
    pub name: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// One bracket of a grade scale.
///
/// `min_percentage <= p <= max_percentage` (inclusive on both ends) maps a
/// percentage `p` to this bracket. Brackets within one scale never overlap;
/// the service validates that at write time.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct GradeScaleEntry {
    pub id: GradeScaleEntryId,
    pub grade_scale_id: GradeScaleId,
    pub min_percentage: f64,
    pub max_percentage: f64,
    pub grade_letter: String,
    pub grade_point: Option<f64>,
    pub remark: Option<String>,
}

/// A grade scale together with its entries, sorted descending by
/// `min_percentage` (the order grade lookup consumes them in).
#[derive(Serialize, Debug, ToSchema)]
pub struct GradeScaleWithEntries {
    #[serde(flatten)]
    pub scale: GradeScale,
    pub entries: Vec<GradeScaleEntry>,
}

/// DTO for one entry when creating or replacing a scale.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct GradeScaleEntryDto {
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_percentage: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_percentage: f64,
    #[validate(length(min = 1, max = 10))]
    pub grade_letter: String,
    #[validate(range(min = 0.0, max = 10.0))]
    pub grade_point: Option<f64>,
    #[validate(length(max = 100))]
    pub remark: Option<String>,
}

/// DTO for creating a new grade scale with its entries.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateGradeScaleDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1), nested)]
    pub entries: Vec<GradeScaleEntryDto>,
}

/// DTO for updating a grade scale.
///
/// When `entries` is provided the full entry set is replaced; partial entry
/// edits are not supported.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateGradeScaleDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1), nested)]
    pub entries: Option<Vec<GradeScaleEntryDto>>,
}

/// Paginated response containing grade scales.
#[derive(Serialize, ToSchema)]
pub struct PaginatedGradeScalesResponse {
    pub data: Vec<GradeScale>,
    pub meta: PaginationMeta,
}
