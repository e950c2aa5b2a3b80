//! Report-card response shapes.
//!
//! Everything here is derived on demand by the grading engine and discarded
//! after the response is written; none of these types are persisted.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::grade_scales::GradeScaleEntry;
use crate::ids::{ClassId, StudentId, SubjectId};

/// Marks summed and graded for one subject.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct SubjectAggregate {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub total_marks_obtained: f64,
    pub total_max_marks: f64,
    /// Rounded to 2 dp; `0.0` when the subject has no max marks at all.
    pub percentage: f64,
    pub grade_letter: String,
    pub grade_point: Option<f64>,
    pub remark: Option<String>,
}

/// Totals across every subject for one student, plus the term GPA.
///
/// `grade_letter` grades the overall percentage; `term_gpa` averages the
/// per-subject grade points. The two are computed independently and can
/// legitimately diverge.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct OverallAggregate {
    pub total_marks_obtained: f64,
    pub total_max_marks: f64,
    pub percentage: f64,
    pub grade_letter: String,
    pub grade_point: Option<f64>,
    pub remark: Option<String>,
    /// Mean of non-null subject grade points, rounded to 2 dp.
    /// `None` when no subject carries a grade point.
    pub term_gpa: Option<f64>,
}

/// One student's report card for a class, academic year, and term.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct ReportCard {
    pub student_id: StudentId,
    pub student_name: String,
    pub class_id: ClassId,
    pub academic_year: String,
    pub term: i32,
    pub subjects: Vec<SubjectAggregate>,
    pub overall: OverallAggregate,
}

/// Response for the report-card endpoint.
#[derive(Serialize, Debug, ToSchema)]
pub struct ReportCardsResponse {
    pub report_cards: Vec<ReportCard>,
    /// The active scale the grades were resolved against, descending by
    /// `min_percentage`.
    pub grade_scale_in_use: Vec<GradeScaleEntry>,
}

/// Query parameters for the report-card endpoint.
#[derive(Deserialize, Debug, IntoParams)]
pub struct ReportCardParams {
    pub class_id: ClassId,
    pub academic_year: String,
    pub term: i32,
    /// A student UUID, or `"all"` for every active student in the class.
    pub student_id: String,
}
