use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gradebook_core::AppError;
use gradebook_models::assessments::{Assessment, StudentMark};
use gradebook_models::ids::{ClassId, SchoolId, StudentId};
use gradebook_models::students::{Student, Subject};

use crate::grading::{ReportInputs, build_report_cards};
use crate::modules::grade_scales::service::GradeScaleService;
use crate::modules::reports::model::ReportCardsResponse;

pub struct ReportService;

impl ReportService {
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

    /// Resolve the `student_id` query parameter: a single student by UUID,
    /// or every active student in the class for `"all"`.
    async fn resolve_students(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
        student_id: &str,
    ) -> Result<Vec<Student>, AppError> {
        if student_id == "all" {
            let students = sqlx::query_as::<_, Student>(
                r#"SELECT id, school_id, class_id, first_name, last_name, is_active
                   FROM students
                   WHERE school_id = $1 AND class_id = $2 AND is_active = TRUE
                   ORDER BY last_name, first_name"#,
            )
            .bind(school_id)
            .bind(class_id)
            .fetch_all(db)
            .await?;
            return Ok(students);
        }

        let id: Uuid = student_id.parse().map_err(|_| {
            AppError::bad_request(anyhow::anyhow!(
                "student_id must be a UUID or \"all\", got {}",
                student_id
            ))
        })?;

        let student = sqlx::query_as::<_, Student>(
            r#"SELECT id, school_id, class_id, first_name, last_name, is_active
               FROM students
               WHERE id = $1 AND school_id = $2 AND class_id = $3"#,
        )
        .bind(StudentId::from(id))
        .bind(school_id)
        .bind(class_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found in class")))?;

        Ok(vec![student])
    }

    /// Generate report cards for one class, academic year, and term.
    ///
    /// Fails with 404 when the term has no assessments for the class (a card
    /// of empty subjects would be meaningless) and with 409 when the school
    /// has no usable active grade scale.
    #[instrument(skip(db))]
    pub async fn get_report_cards(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
        academic_year: &str,
        term: i32,
        student_id: &str,
    ) -> Result<ReportCardsResponse, AppError> {
        Self::verify_class_in_school(db, school_id, class_id).await?;

        let assessments = sqlx::query_as::<_, Assessment>(
            r#"SELECT id, school_id, class_id, subject_id, name, academic_year, term, max_marks, created_at, updated_at
               FROM assessments
               WHERE school_id = $1 AND class_id = $2 AND academic_year = $3 AND term = $4"#,
        )
        .bind(school_id)
        .bind(class_id)
        .bind(academic_year)
        .bind(term)
        .fetch_all(db)
        .await?;

        if assessments.is_empty() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "No assessments found for class in {} term {}",
                academic_year,
                term
            )));
        }

        let scale = GradeScaleService::get_active_scale_entries(db, school_id).await?;

        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT DISTINCT s.id, s.school_id, s.name
               FROM subjects s
               JOIN assessments a ON a.subject_id = s.id
               WHERE a.school_id = $1 AND a.class_id = $2 AND a.academic_year = $3 AND a.term = $4"#,
        )
        .bind(school_id)
        .bind(class_id)
        .bind(academic_year)
        .bind(term)
        .fetch_all(db)
        .await?;

        let students = Self::resolve_students(db, school_id, class_id, student_id).await?;

        let marks = sqlx::query_as::<_, StudentMark>(
            r#"SELECT m.assessment_id, m.student_id, m.marks_obtained
               FROM student_marks m
               JOIN assessments a ON a.id = m.assessment_id
               WHERE a.school_id = $1 AND a.class_id = $2 AND a.academic_year = $3 AND a.term = $4"#,
        )
        .bind(school_id)
        .bind(class_id)
        .bind(academic_year)
        .bind(term)
        .fetch_all(db)
        .await?;

        let inputs = ReportInputs {
            class_id,
            academic_year,
            term,
            assessments: &assessments,
            subjects: &subjects,
            marks: &marks,
            scale: &scale,
        };

        let report_cards = build_report_cards(&students, &inputs);

        Ok(ReportCardsResponse {
            report_cards,
            grade_scale_in_use: scale,
        })
    }
}
