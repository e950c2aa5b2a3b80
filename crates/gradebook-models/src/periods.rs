//! School timetable period models and DTOs.
//!
//! Periods are school-wide time slots stored as `"HH:MM"` 24-hour strings.
//! Interval math (parsing, overlap detection) lives in the grading engine;
//! these are just the persisted shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{PeriodId, SchoolId};

/// A school period definition.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct SchoolPeriod {
    pub id: PeriodId,
    pub school_id: SchoolId,
    pub name: String,
    /// `"HH:MM"` 24-hour start time.
    pub start_time: String,
    /// `"HH:MM"` 24-hour end time, strictly after `start_time`.
    pub end_time: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new period.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreatePeriodDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 5, max = 5))]
    pub start_time: String,
    #[validate(length(min = 5, max = 5))]
    pub end_time: String,
}

/// DTO for updating a period. All fields optional.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdatePeriodDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 5, max = 5))]
    pub start_time: Option<String>,
    #[validate(length(min = 5, max = 5))]
    pub end_time: Option<String>,
}
