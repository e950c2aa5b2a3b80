use sqlx::PgPool;
use tracing::instrument;

use gradebook_core::{AppError, PaginationMeta, PaginationParams};
use gradebook_models::ids::{GradeScaleId, SchoolId};

use crate::modules::grade_scales::model::{
    CreateGradeScaleDto, GradeScale, GradeScaleEntry, GradeScaleEntryDto, GradeScaleWithEntries,
    PaginatedGradeScalesResponse, UpdateGradeScaleDto,
};

pub struct GradeScaleService;

impl GradeScaleService {
    /// Two inclusive percentage ranges overlap iff each starts at or before
    /// the other ends.
    fn ranges_overlap(a: &GradeScaleEntryDto, b: &GradeScaleEntryDto) -> bool {
        a.min_percentage <= b.max_percentage && b.min_percentage <= a.max_percentage
    }

    /// Validate an entry set before it is written.
    ///
    /// Overlap between brackets is rejected here rather than silently
    /// resolved at lookup time, so every percentage maps to at most one
    /// bracket by construction.
    fn validate_entries(entries: &[GradeScaleEntryDto]) -> Result<(), AppError> {
        for entry in entries {
            if entry.min_percentage > entry.max_percentage {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Entry '{}': min_percentage ({}) must not exceed max_percentage ({})",
                    entry.grade_letter,
                    entry.min_percentage,
                    entry.max_percentage
                )));
            }
        }

        let mut sorted: Vec<&GradeScaleEntryDto> = entries.iter().collect();
        sorted.sort_by(|a, b| {
            a.min_percentage
                .partial_cmp(&b.min_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for pair in sorted.windows(2) {
            if Self::ranges_overlap(pair[0], pair[1]) {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Entries '{}' and '{}' have overlapping percentage ranges",
                    pair[0].grade_letter,
                    pair[1].grade_letter
                )));
            }
        }

        Ok(())
    }

    async fn insert_entries(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        scale_id: GradeScaleId,
        entries: &[GradeScaleEntryDto],
    ) -> Result<Vec<GradeScaleEntry>, AppError> {
        let mut inserted = Vec::with_capacity(entries.len());
        for entry in entries {
            let row = sqlx::query_as::<_, GradeScaleEntry>(
                r#"INSERT INTO grade_scale_entries
                       (grade_scale_id, min_percentage, max_percentage, grade_letter, grade_point, remark)
                   VALUES ($1, $2, $3, $4, $5, $6)
                   RETURNING id, grade_scale_id, min_percentage, max_percentage, grade_letter, grade_point, remark"#,
            )
            .bind(scale_id)
            .bind(entry.min_percentage)
            .bind(entry.max_percentage)
            .bind(&entry.grade_letter)
            .bind(entry.grade_point)
            .bind(&entry.remark)
            .fetch_one(&mut **tx)
            .await?;
            inserted.push(row);
        }
        inserted.sort_by(|a, b| {
            b.min_percentage
                .partial_cmp(&a.min_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(inserted)
    }

    /// Create a new grade scale with its entries. The new scale starts
    /// inactive; activation is a separate, explicit step.
    #[instrument(skip(db, dto))]
    pub async fn create_grade_scale(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateGradeScaleDto,
    ) -> Result<GradeScaleWithEntries, AppError> {
        Self::validate_entries(&dto.entries)?;

        let mut tx = db.begin().await?;

        let scale = sqlx::query_as::<_, GradeScale>(
            r#"INSERT INTO grade_scales (school_id, name)
               VALUES ($1, $2)
               RETURNING id, school_id, name, is_active, created_at, updated_at"#,
        )
        .bind(school_id)
        .bind(&dto.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A grade scale named '{}' already exists for this school",
                    dto.name
                ));
            }
            AppError::from(e)
        })?;

        let entries = Self::insert_entries(&mut tx, scale.id, &dto.entries).await?;

        tx.commit().await?;

        Ok(GradeScaleWithEntries { scale, entries })
    }

    /// Get paginated list of a school's grade scales.
    #[instrument(skip(db))]
    pub async fn get_grade_scales(
        db: &PgPool,
        school_id: SchoolId,
        pagination: PaginationParams,
    ) -> Result<PaginatedGradeScalesResponse, AppError> {
        let limit = pagination.limit();
        let offset = pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM grade_scales WHERE school_id = $1",
        )
        .bind(school_id)
        .fetch_one(db)
        .await?;

        let scales = sqlx::query_as::<_, GradeScale>(
            r#"SELECT id, school_id, name, is_active, created_at, updated_at
               FROM grade_scales WHERE school_id = $1
               ORDER BY created_at DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(school_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedGradeScalesResponse {
            data: scales,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: pagination.page(),
                has_more,
            },
        })
    }

    /// Get one grade scale with entries in lookup order (descending by
    /// `min_percentage`).
    #[instrument(skip(db))]
    pub async fn get_grade_scale(
        db: &PgPool,
        school_id: SchoolId,
        scale_id: GradeScaleId,
    ) -> Result<GradeScaleWithEntries, AppError> {
        let scale = sqlx::query_as::<_, GradeScale>(
            r#"SELECT id, school_id, name, is_active, created_at, updated_at
               FROM grade_scales WHERE id = $1 AND school_id = $2"#,
        )
        .bind(scale_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade scale not found")))?;

        let entries = Self::get_entries(db, scale.id).await?;

        Ok(GradeScaleWithEntries { scale, entries })
    }

    async fn get_entries(
        db: &PgPool,
        scale_id: GradeScaleId,
    ) -> Result<Vec<GradeScaleEntry>, AppError> {
        let entries = sqlx::query_as::<_, GradeScaleEntry>(
            r#"SELECT id, grade_scale_id, min_percentage, max_percentage, grade_letter, grade_point, remark
               FROM grade_scale_entries WHERE grade_scale_id = $1
               ORDER BY min_percentage DESC"#,
        )
        .bind(scale_id)
        .fetch_all(db)
        .await?;

        Ok(entries)
    }

    /// Update a grade scale. When `entries` is provided the whole entry set
    /// is replaced atomically.
    #[instrument(skip(db, dto))]
    pub async fn update_grade_scale(
        db: &PgPool,
        school_id: SchoolId,
        scale_id: GradeScaleId,
        dto: UpdateGradeScaleDto,
    ) -> Result<GradeScaleWithEntries, AppError> {
        if let Some(entries) = &dto.entries {
            Self::validate_entries(entries)?;
        }

        let existing = Self::get_grade_scale(db, school_id, scale_id).await?;
        let name = dto.name.unwrap_or(existing.scale.name);

        let mut tx = db.begin().await?;

        let scale = sqlx::query_as::<_, GradeScale>(
            r#"UPDATE grade_scales
               SET name = $1, updated_at = NOW()
               WHERE id = $2 AND school_id = $3
               RETURNING id, school_id, name, is_active, created_at, updated_at"#,
        )
        .bind(&name)
        .bind(scale_id)
        .bind(school_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A grade scale named '{}' already exists for this school",
                    name
                ));
            }
            AppError::from(e)
        })?;

        let entries = if let Some(new_entries) = &dto.entries {
            sqlx::query("DELETE FROM grade_scale_entries WHERE grade_scale_id = $1")
                .bind(scale_id)
                .execute(&mut *tx)
                .await?;
            Self::insert_entries(&mut tx, scale_id, new_entries).await?
        } else {
            existing.entries
        };

        tx.commit().await?;

        Ok(GradeScaleWithEntries { scale, entries })
    }

    /// Delete a grade scale and its entries.
    #[instrument(skip(db))]
    pub async fn delete_grade_scale(
        db: &PgPool,
        school_id: SchoolId,
        scale_id: GradeScaleId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grade_scales WHERE id = $1 AND school_id = $2")
            .bind(scale_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Grade scale not found")));
        }

        Ok(())
    }

    /// Activate a grade scale, deactivating any other scale of the school.
    #[instrument(skip(db))]
    pub async fn activate_grade_scale(
        db: &PgPool,
        school_id: SchoolId,
        scale_id: GradeScaleId,
    ) -> Result<GradeScale, AppError> {
        let existing = Self::get_grade_scale(db, school_id, scale_id).await?;

        if existing.entries.is_empty() {
            return Err(AppError::configuration(anyhow::anyhow!(
                "Cannot activate a grade scale with no entries"
            )));
        }

        let mut tx = db.begin().await?;

        sqlx::query(
            "UPDATE grade_scales SET is_active = FALSE, updated_at = NOW() WHERE school_id = $1",
        )
        .bind(school_id)
        .execute(&mut *tx)
        .await?;

        let scale = sqlx::query_as::<_, GradeScale>(
            r#"UPDATE grade_scales
               SET is_active = TRUE, updated_at = NOW()
               WHERE id = $1
               RETURNING id, school_id, name, is_active, created_at, updated_at"#,
        )
        .bind(scale_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(scale)
    }

    /// Fetch the active scale's entries in lookup order.
    ///
    /// A missing or empty active scale is a configuration error the caller
    /// surfaces verbatim; report generation never defaults a scale.
    #[instrument(skip(db))]
    pub async fn get_active_scale_entries(
        db: &PgPool,
        school_id: SchoolId,
    ) -> Result<Vec<GradeScaleEntry>, AppError> {
        let scale = sqlx::query_as::<_, GradeScale>(
            r#"SELECT id, school_id, name, is_active, created_at, updated_at
               FROM grade_scales WHERE school_id = $1 AND is_active = TRUE"#,
        )
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::configuration(anyhow::anyhow!(
                "No active grade scale configured for this school"
            ))
        })?;

        let entries = Self::get_entries(db, scale.id).await?;

        if entries.is_empty() {
            return Err(AppError::configuration(anyhow::anyhow!(
                "The active grade scale has no entries"
            )));
        }

        Ok(entries)
    }
}
