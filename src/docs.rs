use utoipa::OpenApi;

use gradebook_core::{PaginationMeta, PaginationParams};
use gradebook_models::assessments::{
    Assessment, CreateAssessmentDto, MarkEntryDto, PaginatedAssessmentsResponse, RecordMarksDto,
    StudentMark, UpdateAssessmentDto,
};
use gradebook_models::attendance::{
    AttendanceLog, AttendanceReportResponse, AttendanceStatus, AttendanceSummary,
    PaginatedAttendanceResponse, RecordAttendanceDto,
};
use gradebook_models::grade_scales::{
    CreateGradeScaleDto, GradeScale, GradeScaleEntry, GradeScaleEntryDto, GradeScaleWithEntries,
    PaginatedGradeScalesResponse, UpdateGradeScaleDto,
};
use gradebook_models::periods::{CreatePeriodDto, SchoolPeriod, UpdatePeriodDto};
use gradebook_models::reports::{
    OverallAggregate, ReportCard, ReportCardsResponse, SubjectAggregate,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::grade_scales::controller::create_grade_scale,
        crate::modules::grade_scales::controller::get_grade_scales,
        crate::modules::grade_scales::controller::get_grade_scale,
        crate::modules::grade_scales::controller::update_grade_scale,
        crate::modules::grade_scales::controller::delete_grade_scale,
        crate::modules::grade_scales::controller::activate_grade_scale,
        crate::modules::periods::controller::create_period,
        crate::modules::periods::controller::get_periods,
        crate::modules::periods::controller::get_period,
        crate::modules::periods::controller::update_period,
        crate::modules::periods::controller::delete_period,
        crate::modules::assessments::controller::create_assessment,
        crate::modules::assessments::controller::get_assessments,
        crate::modules::assessments::controller::get_assessment,
        crate::modules::assessments::controller::update_assessment,
        crate::modules::assessments::controller::delete_assessment,
        crate::modules::assessments::controller::record_marks,
        crate::modules::assessments::controller::get_marks,
        crate::modules::attendance::controller::record_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::get_attendance_summary,
        crate::modules::reports::controller::get_report_cards,
    ),
    components(
        schemas(
            GradeScale,
            GradeScaleEntry,
            GradeScaleWithEntries,
            GradeScaleEntryDto,
            CreateGradeScaleDto,
            UpdateGradeScaleDto,
            PaginatedGradeScalesResponse,
            SchoolPeriod,
            CreatePeriodDto,
            UpdatePeriodDto,
            Assessment,
            StudentMark,
            CreateAssessmentDto,
            UpdateAssessmentDto,
            MarkEntryDto,
            RecordMarksDto,
            PaginatedAssessmentsResponse,
            AttendanceStatus,
            AttendanceLog,
            RecordAttendanceDto,
            AttendanceSummary,
            AttendanceReportResponse,
            PaginatedAttendanceResponse,
            SubjectAggregate,
            OverallAggregate,
            ReportCard,
            ReportCardsResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    tags(
        (name = "Grade Scales", description = "Grade scale configuration and activation"),
        (name = "Periods", description = "School period (timetable slot) management"),
        (name = "Assessments", description = "Assessment and mark recording endpoints"),
        (name = "Attendance", description = "Daily attendance logs and summaries"),
        (name = "Reports", description = "On-demand report card generation")
    ),
    info(
        title = "Gradebook API",
        version = "0.1.0",
        description = "A multi-tenant grade and attendance aggregation REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
