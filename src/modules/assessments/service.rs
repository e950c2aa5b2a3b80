use sqlx::PgPool;
use tracing::instrument;

use gradebook_core::{AppError, PaginationMeta};
use gradebook_models::ids::{AssessmentId, ClassId, SchoolId, SubjectId};

use crate::modules::assessments::model::{
    Assessment, AssessmentFilterParams, CreateAssessmentDto, PaginatedAssessmentsResponse,
    RecordMarksDto, StudentMark, UpdateAssessmentDto,
};

pub struct AssessmentService;

impl AssessmentService {
    async fn verify_class_in_school(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND school_id = $2)",
        )
        .bind(class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }
        Ok(())
    }

    async fn verify_subject_in_school(
        db: &PgPool,
        school_id: SchoolId,
        subject_id: SubjectId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1 AND school_id = $2)",
        )
        .bind(subject_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }
        Ok(())
    }

    /// Create a new assessment.
    #[instrument(skip(db, dto))]
    pub async fn create_assessment(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateAssessmentDto,
    ) -> Result<Assessment, AppError> {
        Self::verify_class_in_school(db, school_id, dto.class_id).await?;
        Self::verify_subject_in_school(db, school_id, dto.subject_id).await?;

        let assessment = sqlx::query_as::<_, Assessment>(
            r#"INSERT INTO assessments (school_id, class_id, subject_id, name, academic_year, term, max_marks)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id, school_id, class_id, subject_id, name, academic_year, term, max_marks, created_at, updated_at"#,
        )
        .bind(school_id)
        .bind(dto.class_id)
        .bind(dto.subject_id)
        .bind(&dto.name)
        .bind(&dto.academic_year)
        .bind(dto.term)
        .bind(dto.max_marks)
        .fetch_one(db)
        .await?;

        Ok(assessment)
    }

    /// Get paginated assessments, optionally filtered by class, subject,
    /// academic year, and term.
    #[instrument(skip(db))]
    pub async fn get_assessments(
        db: &PgPool,
        school_id: SchoolId,
        filters: AssessmentFilterParams,
    ) -> Result<PaginatedAssessmentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM assessments
               WHERE school_id = $1
                 AND ($2::uuid IS NULL OR class_id = $2)
                 AND ($3::uuid IS NULL OR subject_id = $3)
                 AND ($4::text IS NULL OR academic_year = $4)
                 AND ($5::int IS NULL OR term = $5)"#,
        )
        .bind(school_id)
        .bind(filters.class_id)
        .bind(filters.subject_id)
        .bind(&filters.academic_year)
        .bind(filters.term)
        .fetch_one(db)
        .await?;

        let assessments = sqlx::query_as::<_, Assessment>(
            r#"SELECT id, school_id, class_id, subject_id, name, academic_year, term, max_marks, created_at, updated_at
               FROM assessments
               WHERE school_id = $1
                 AND ($2::uuid IS NULL OR class_id = $2)
                 AND ($3::uuid IS NULL OR subject_id = $3)
                 AND ($4::text IS NULL OR academic_year = $4)
                 AND ($5::int IS NULL OR term = $5)
               ORDER BY created_at DESC
               LIMIT $6 OFFSET $7"#,
        )
        .bind(school_id)
        .bind(filters.class_id)
        .bind(filters.subject_id)
        .bind(&filters.academic_year)
        .bind(filters.term)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedAssessmentsResponse {
            data: assessments,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: filters.pagination.page(),
                has_more,
            },
        })
    }

    /// Get one assessment by ID.
    #[instrument(skip(db))]
    pub async fn get_assessment(
        db: &PgPool,
        school_id: SchoolId,
        assessment_id: AssessmentId,
    ) -> Result<Assessment, AppError> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"SELECT id, school_id, class_id, subject_id, name, academic_year, term, max_marks, created_at, updated_at
               FROM assessments WHERE id = $1 AND school_id = $2"#,
        )
        .bind(assessment_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assessment not found")))?;

        Ok(assessment)
    }

    /// Update an assessment's name or maximum marks.
    ///
    /// Lowering `max_marks` below an already-recorded mark is rejected so
    /// existing marks never exceed the denominator.
    #[instrument(skip(db, dto))]
    pub async fn update_assessment(
        db: &PgPool,
        school_id: SchoolId,
        assessment_id: AssessmentId,
        dto: UpdateAssessmentDto,
    ) -> Result<Assessment, AppError> {
        let existing = Self::get_assessment(db, school_id, assessment_id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let max_marks = dto.max_marks.unwrap_or(existing.max_marks);

        let highest = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT MAX(marks_obtained) FROM student_marks WHERE assessment_id = $1",
        )
        .bind(assessment_id)
        .fetch_one(db)
        .await?;

        if let Some(highest) = highest
            && highest > max_marks
        {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "max_marks ({}) cannot be lower than an already recorded mark ({})",
                max_marks,
                highest
            )));
        }

        let assessment = sqlx::query_as::<_, Assessment>(
            r#"UPDATE assessments
               SET name = $1, max_marks = $2, updated_at = NOW()
               WHERE id = $3 AND school_id = $4
               RETURNING id, school_id, class_id, subject_id, name, academic_year, term, max_marks, created_at, updated_at"#,
        )
        .bind(&name)
        .bind(max_marks)
        .bind(assessment_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(assessment)
    }

    /// Delete an assessment and its marks.
    #[instrument(skip(db))]
    pub async fn delete_assessment(
        db: &PgPool,
        school_id: SchoolId,
        assessment_id: AssessmentId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1 AND school_id = $2")
            .bind(assessment_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Assessment not found")));
        }

        Ok(())
    }

    /// Record marks for an assessment in bulk.
    ///
    /// Every entry is validated before anything is written: the student must
    /// belong to the assessment's class and the mark must lie in
    /// `[0, max_marks]`. The offending student is named in the error so the
    /// caller can highlight the row. Re-submitting a student's mark
    /// overwrites the previous value.
    #[instrument(skip(db, dto))]
    pub async fn record_marks(
        db: &PgPool,
        school_id: SchoolId,
        assessment_id: AssessmentId,
        dto: RecordMarksDto,
    ) -> Result<Vec<StudentMark>, AppError> {
        let assessment = Self::get_assessment(db, school_id, assessment_id).await?;

        for entry in &dto.marks {
            if let Some(obtained) = entry.marks_obtained
                && !(0.0..=assessment.max_marks).contains(&obtained)
            {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "marks_obtained for student {} must be between 0 and {}, got {}",
                    entry.student_id,
                    assessment.max_marks,
                    obtained
                )));
            }

            let in_class = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1 AND class_id = $2)",
            )
            .bind(entry.student_id)
            .bind(assessment.class_id)
            .fetch_one(db)
            .await?;

            if !in_class {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Student {} is not in the assessment's class",
                    entry.student_id
                )));
            }
        }

        let mut tx = db.begin().await?;
        let mut recorded = Vec::with_capacity(dto.marks.len());

        for entry in &dto.marks {
            let mark = sqlx::query_as::<_, StudentMark>(
                r#"INSERT INTO student_marks (assessment_id, student_id, marks_obtained)
                   VALUES ($1, $2, $3)
                   ON CONFLICT (assessment_id, student_id)
                   DO UPDATE SET marks_obtained = EXCLUDED.marks_obtained
                   RETURNING assessment_id, student_id, marks_obtained"#,
            )
            .bind(assessment_id)
            .bind(entry.student_id)
            .bind(entry.marks_obtained)
            .fetch_one(&mut *tx)
            .await?;
            recorded.push(mark);
        }

        tx.commit().await?;

        Ok(recorded)
    }

    /// Get all marks recorded for one assessment.
    #[instrument(skip(db))]
    pub async fn get_marks(
        db: &PgPool,
        school_id: SchoolId,
        assessment_id: AssessmentId,
    ) -> Result<Vec<StudentMark>, AppError> {
        // Scope check before exposing marks
        Self::get_assessment(db, school_id, assessment_id).await?;

        let marks = sqlx::query_as::<_, StudentMark>(
            r#"SELECT assessment_id, student_id, marks_obtained
               FROM student_marks WHERE assessment_id = $1"#,
        )
        .bind(assessment_id)
        .fetch_all(db)
        .await?;

        Ok(marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::assessments::model::MarkEntryDto;
    use axum::http::StatusCode;
    use gradebook_models::ids::StudentId;

    struct Fixture {
        school_id: SchoolId,
        class_id: ClassId,
        subject_id: SubjectId,
        student_id: StudentId,
    }

    async fn fixture(pool: &PgPool) -> Fixture {
        let school_id = sqlx::query_scalar::<_, SchoolId>(
            "INSERT INTO schools (name, address) VALUES ($1, $2) RETURNING id",
        )
        .bind(format!("School {}", uuid::Uuid::new_v4()))
        .bind("Test Address")
        .fetch_one(pool)
        .await
        .unwrap();

        let class_id = sqlx::query_scalar::<_, ClassId>(
            "INSERT INTO classes (school_id, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(school_id)
        .bind("JSS 1A")
        .fetch_one(pool)
        .await
        .unwrap();

        let subject_id = sqlx::query_scalar::<_, SubjectId>(
            "INSERT INTO subjects (school_id, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(school_id)
        .bind("Mathematics")
        .fetch_one(pool)
        .await
        .unwrap();

        let student_id = sqlx::query_scalar::<_, StudentId>(
            r#"INSERT INTO students (school_id, class_id, first_name, last_name)
               VALUES ($1, $2, $3, $4) RETURNING id"#,
        )
        .bind(school_id)
        .bind(class_id)
        .bind("Ada")
        .bind("Obi")
        .fetch_one(pool)
        .await
        .unwrap();

        Fixture {
            school_id,
            class_id,
            subject_id,
            student_id,
        }
    }

    fn create_dto(f: &Fixture, name: &str, max_marks: f64) -> CreateAssessmentDto {
        CreateAssessmentDto {
            class_id: f.class_id,
            subject_id: f.subject_id,
            name: name.to_string(),
            academic_year: "2025/2026".to_string(),
            term: 1,
            max_marks,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_assessment(pool: PgPool) {
        let f = fixture(&pool).await;

        let assessment =
            AssessmentService::create_assessment(&pool, f.school_id, create_dto(&f, "Midterm", 100.0))
                .await
                .unwrap();
        assert_eq!(assessment.name, "Midterm");
        assert_eq!(assessment.max_marks, 100.0);
        assert_eq!(assessment.term, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_assessment_unknown_class(pool: PgPool) {
        let f = fixture(&pool).await;

        let mut dto = create_dto(&f, "Midterm", 100.0);
        dto.class_id = ClassId::new();

        let err = AssessmentService::create_assessment(&pool, f.school_id, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_record_and_overwrite_marks(pool: PgPool) {
        let f = fixture(&pool).await;
        let assessment =
            AssessmentService::create_assessment(&pool, f.school_id, create_dto(&f, "Midterm", 100.0))
                .await
                .unwrap();

        let recorded = AssessmentService::record_marks(
            &pool,
            f.school_id,
            assessment.id,
            RecordMarksDto {
                marks: vec![MarkEntryDto {
                    student_id: f.student_id,
                    marks_obtained: Some(70.0),
                }],
            },
        )
        .await
        .unwrap();
        assert_eq!(recorded[0].marks_obtained, Some(70.0));

        // Re-submitting overwrites
        AssessmentService::record_marks(
            &pool,
            f.school_id,
            assessment.id,
            RecordMarksDto {
                marks: vec![MarkEntryDto {
                    student_id: f.student_id,
                    marks_obtained: Some(85.0),
                }],
            },
        )
        .await
        .unwrap();

        let marks = AssessmentService::get_marks(&pool, f.school_id, assessment.id)
            .await
            .unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].marks_obtained, Some(85.0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_marks_out_of_range_rejected(pool: PgPool) {
        let f = fixture(&pool).await;
        let assessment =
            AssessmentService::create_assessment(&pool, f.school_id, create_dto(&f, "Quiz", 20.0))
                .await
                .unwrap();

        let err = AssessmentService::record_marks(
            &pool,
            f.school_id,
            assessment.id,
            RecordMarksDto {
                marks: vec![MarkEntryDto {
                    student_id: f.student_id,
                    marks_obtained: Some(25.0),
                }],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.error.to_string().contains("between 0 and 20"));

        let err = AssessmentService::record_marks(
            &pool,
            f.school_id,
            assessment.id,
            RecordMarksDto {
                marks: vec![MarkEntryDto {
                    student_id: f.student_id,
                    marks_obtained: Some(-1.0),
                }],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_null_mark_records_unmarked(pool: PgPool) {
        let f = fixture(&pool).await;
        let assessment =
            AssessmentService::create_assessment(&pool, f.school_id, create_dto(&f, "Quiz", 20.0))
                .await
                .unwrap();

        let recorded = AssessmentService::record_marks(
            &pool,
            f.school_id,
            assessment.id,
            RecordMarksDto {
                marks: vec![MarkEntryDto {
                    student_id: f.student_id,
                    marks_obtained: None,
                }],
            },
        )
        .await
        .unwrap();
        assert_eq!(recorded[0].marks_obtained, None);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_marks_for_student_outside_class_rejected(pool: PgPool) {
        let f = fixture(&pool).await;
        let assessment =
            AssessmentService::create_assessment(&pool, f.school_id, create_dto(&f, "Quiz", 20.0))
                .await
                .unwrap();

        let err = AssessmentService::record_marks(
            &pool,
            f.school_id,
            assessment.id,
            RecordMarksDto {
                marks: vec![MarkEntryDto {
                    student_id: StudentId::new(),
                    marks_obtained: Some(10.0),
                }],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.error.to_string().contains("not in the assessment's class"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_cannot_undercut_recorded_marks(pool: PgPool) {
        let f = fixture(&pool).await;
        let assessment =
            AssessmentService::create_assessment(&pool, f.school_id, create_dto(&f, "Exam", 100.0))
                .await
                .unwrap();

        AssessmentService::record_marks(
            &pool,
            f.school_id,
            assessment.id,
            RecordMarksDto {
                marks: vec![MarkEntryDto {
                    student_id: f.student_id,
                    marks_obtained: Some(90.0),
                }],
            },
        )
        .await
        .unwrap();

        let err = AssessmentService::update_assessment(
            &pool,
            f.school_id,
            assessment.id,
            UpdateAssessmentDto {
                name: None,
                max_marks: Some(80.0),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_filter_by_term(pool: PgPool) {
        let f = fixture(&pool).await;

        AssessmentService::create_assessment(&pool, f.school_id, create_dto(&f, "T1 Exam", 100.0))
            .await
            .unwrap();
        let mut dto = create_dto(&f, "T2 Exam", 100.0);
        dto.term = 2;
        AssessmentService::create_assessment(&pool, f.school_id, dto)
            .await
            .unwrap();

        let filters = AssessmentFilterParams {
            class_id: Some(f.class_id),
            subject_id: None,
            academic_year: None,
            term: Some(2),
            pagination: Default::default(),
        };
        let response = AssessmentService::get_assessments(&pool, f.school_id, filters)
            .await
            .unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].name, "T2 Exam");
        assert_eq!(response.meta.total, 1);
    }
}
