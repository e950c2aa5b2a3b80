use sqlx::PgPool;
use tracing::instrument;

use gradebook_core::{AppError, PaginationMeta};
use gradebook_models::ids::{SchoolId, StudentId};

use crate::grading::summarize_attendance;
use crate::modules::attendance::model::{
    AttendanceFilterParams, AttendanceLog, AttendanceReportResponse, PaginatedAttendanceResponse,
    RecordAttendanceDto,
};

pub struct AttendanceService;

impl AttendanceService {
    async fn verify_student_in_school(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1 AND school_id = $2)",
        )
        .bind(student_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }
        Ok(())
    }

    /// Record one attendance entry for a student on a calendar day.
    ///
    /// A second entry for the same student and date overwrites the first, so
    /// a wrongly marked day can be corrected by re-submitting.
    #[instrument(skip(db, dto))]
    pub async fn record_attendance(
        db: &PgPool,
        school_id: SchoolId,
        dto: RecordAttendanceDto,
    ) -> Result<AttendanceLog, AppError> {
        Self::verify_student_in_school(db, school_id, dto.student_id).await?;

        let log = sqlx::query_as::<_, AttendanceLog>(
            r#"INSERT INTO attendance_logs (school_id, student_id, date, status, academic_year, term, remarks)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT (student_id, date)
               DO UPDATE SET status = EXCLUDED.status,
                             academic_year = EXCLUDED.academic_year,
                             term = EXCLUDED.term,
                             remarks = EXCLUDED.remarks
               RETURNING id, school_id, student_id, date, status, academic_year, term, remarks, created_at"#,
        )
        .bind(school_id)
        .bind(dto.student_id)
        .bind(dto.date)
        .bind(dto.status)
        .bind(&dto.academic_year)
        .bind(dto.term)
        .bind(&dto.remarks)
        .fetch_one(db)
        .await?;

        Ok(log)
    }

    /// Get paginated attendance logs, optionally filtered by student,
    /// academic year, and term.
    #[instrument(skip(db))]
    pub async fn get_attendance(
        db: &PgPool,
        school_id: SchoolId,
        filters: AttendanceFilterParams,
    ) -> Result<PaginatedAttendanceResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM attendance_logs
               WHERE school_id = $1
                 AND ($2::uuid IS NULL OR student_id = $2)
                 AND ($3::text IS NULL OR academic_year = $3)
                 AND ($4::int IS NULL OR term = $4)"#,
        )
        .bind(school_id)
        .bind(filters.student_id)
        .bind(&filters.academic_year)
        .bind(filters.term)
        .fetch_one(db)
        .await?;

        let logs = sqlx::query_as::<_, AttendanceLog>(
            r#"SELECT id, school_id, student_id, date, status, academic_year, term, remarks, created_at
               FROM attendance_logs
               WHERE school_id = $1
                 AND ($2::uuid IS NULL OR student_id = $2)
                 AND ($3::text IS NULL OR academic_year = $3)
                 AND ($4::int IS NULL OR term = $4)
               ORDER BY date DESC
               LIMIT $5 OFFSET $6"#,
        )
        .bind(school_id)
        .bind(filters.student_id)
        .bind(&filters.academic_year)
        .bind(filters.term)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedAttendanceResponse {
            data: logs,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: filters.pagination.page(),
                has_more,
            },
        })
    }

    /// Summarize one student's attendance for an academic year and term.
    ///
    /// Returns per-status counts, the derived percentage, and the full log
    /// the summary was computed from, ordered by date ascending.
    #[instrument(skip(db))]
    pub async fn get_summary(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
        academic_year: &str,
        term: i32,
    ) -> Result<AttendanceReportResponse, AppError> {
        Self::verify_student_in_school(db, school_id, student_id).await?;

        let logs = sqlx::query_as::<_, AttendanceLog>(
            r#"SELECT id, school_id, student_id, date, status, academic_year, term, remarks, created_at
               FROM attendance_logs
               WHERE school_id = $1 AND student_id = $2 AND academic_year = $3 AND term = $4
               ORDER BY date ASC"#,
        )
        .bind(school_id)
        .bind(student_id)
        .bind(academic_year)
        .bind(term)
        .fetch_all(db)
        .await?;

        let statuses: Vec<_> = logs.iter().map(|log| log.status).collect();
        let summary = summarize_attendance(&statuses);

        Ok(AttendanceReportResponse {
            summary,
            attendance_log: logs,
        })
    }
}
