use sqlx::PgPool;
use tracing::instrument;

use gradebook_core::AppError;
use gradebook_models::ids::{PeriodId, SchoolId};

use crate::grading::timetable::{find_conflict, parse_time_range};
use crate::modules::periods::model::{CreatePeriodDto, SchoolPeriod, UpdatePeriodDto};

pub struct PeriodService;

impl PeriodService {
    /// Reject the candidate range if it collides with any other period of
    /// the school. `exclude` skips the period being updated.
    async fn validate_no_overlap(
        db: &PgPool,
        school_id: SchoolId,
        start_time: &str,
        end_time: &str,
        exclude: Option<PeriodId>,
    ) -> Result<(), AppError> {
        let candidate = parse_time_range(start_time, end_time)?;

        let existing = Self::get_periods(db, school_id).await?;

        if let Some(conflict) = find_conflict(candidate, &existing, exclude) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Period times overlap with existing period: {} ({} to {})",
                conflict.name,
                conflict.start_time,
                conflict.end_time
            )));
        }

        Ok(())
    }

    /// Create a new period.
    #[instrument(skip(db))]
    pub async fn create_period(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreatePeriodDto,
    ) -> Result<SchoolPeriod, AppError> {
        Self::validate_no_overlap(db, school_id, &dto.start_time, &dto.end_time, None).await?;

        let period = sqlx::query_as::<_, SchoolPeriod>(
            r#"INSERT INTO school_periods (school_id, name, start_time, end_time)
               VALUES ($1, $2, $3, $4)
               RETURNING id, school_id, name, start_time, end_time, created_at, updated_at"#,
        )
        .bind(school_id)
        .bind(&dto.name)
        .bind(&dto.start_time)
        .bind(&dto.end_time)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A period named '{}' already exists for this school",
                    dto.name
                ));
            }
            AppError::from(e)
        })?;

        Ok(period)
    }

    /// List a school's periods ordered by start time.
    #[instrument(skip(db))]
    pub async fn get_periods(
        db: &PgPool,
        school_id: SchoolId,
    ) -> Result<Vec<SchoolPeriod>, AppError> {
        let periods = sqlx::query_as::<_, SchoolPeriod>(
            r#"SELECT id, school_id, name, start_time, end_time, created_at, updated_at
               FROM school_periods WHERE school_id = $1
               ORDER BY start_time ASC"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(periods)
    }

    /// Get one period by ID.
    #[instrument(skip(db))]
    pub async fn get_period(
        db: &PgPool,
        school_id: SchoolId,
        period_id: PeriodId,
    ) -> Result<SchoolPeriod, AppError> {
        let period = sqlx::query_as::<_, SchoolPeriod>(
            r#"SELECT id, school_id, name, start_time, end_time, created_at, updated_at
               FROM school_periods WHERE id = $1 AND school_id = $2"#,
        )
        .bind(period_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Period not found")))?;

        Ok(period)
    }

    /// Update a period, re-checking overlap against the school's other
    /// periods with the updated times.
    #[instrument(skip(db))]
    pub async fn update_period(
        db: &PgPool,
        school_id: SchoolId,
        period_id: PeriodId,
        dto: UpdatePeriodDto,
    ) -> Result<SchoolPeriod, AppError> {
        let existing = Self::get_period(db, school_id, period_id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);

        Self::validate_no_overlap(db, school_id, &start_time, &end_time, Some(period_id)).await?;

        let period = sqlx::query_as::<_, SchoolPeriod>(
            r#"UPDATE school_periods
               SET name = $1, start_time = $2, end_time = $3, updated_at = NOW()
               WHERE id = $4 AND school_id = $5
               RETURNING id, school_id, name, start_time, end_time, created_at, updated_at"#,
        )
        .bind(&name)
        .bind(&start_time)
        .bind(&end_time)
        .bind(period_id)
        .bind(school_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A period named '{}' already exists for this school",
                    name
                ));
            }
            AppError::from(e)
        })?;

        Ok(period)
    }

    /// Delete a period.
    #[instrument(skip(db))]
    pub async fn delete_period(
        db: &PgPool,
        school_id: SchoolId,
        period_id: PeriodId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM school_periods WHERE id = $1 AND school_id = $2")
            .bind(period_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Period not found")));
        }

        Ok(())
    }
}
