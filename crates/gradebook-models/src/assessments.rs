//! Assessment domain models and DTOs.
//!
//! An assessment defines the denominator for one gradable event (a test,
//! exam, or project) within a class, subject, academic year, and term.
//! Student marks are the nullable numerators recorded against it.

use gradebook_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{AssessmentId, ClassId, SchoolId, StudentId, SubjectId};

/// A gradable event within a class/subject/year/term.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Assessment {
    pub id: AssessmentId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub name: String,
    pub academic_year: String,
    pub term: i32,
    pub max_marks: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A student's mark for one assessment.
///
/// `marks_obtained` is nullable: an absent or unmarked student contributes
/// nothing to the numerator while the assessment still counts toward the
/// denominator.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct StudentMark {
    pub assessment_id: AssessmentId,
    pub student_id: StudentId,
    pub marks_obtained: Option<f64>,
}

/// DTO for creating a new assessment.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateAssessmentDto {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 4, max = 20))]
    pub academic_year: String,
    #[validate(range(min = 1, max = 4))]
    pub term: i32,
    #[validate(range(min = 1.0, max = 1000.0))]
    pub max_marks: f64,
}

/// DTO for updating an assessment. All fields optional.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateAssessmentDto {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    #[validate(range(min = 1.0, max = 1000.0))]
    pub max_marks: Option<f64>,
}

/// One student's mark inside a bulk marks submission.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MarkEntryDto {
    pub student_id: StudentId,
    /// `None` records the student as unmarked for this assessment.
    pub marks_obtained: Option<f64>,
}

/// DTO for recording marks for an assessment in bulk.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct RecordMarksDto {
    #[validate(length(min = 1))]
    pub marks: Vec<MarkEntryDto>,
}

/// Query parameters for listing assessments.
#[derive(Deserialize, Debug, IntoParams)]
pub struct AssessmentFilterParams {
    pub class_id: Option<ClassId>,
    pub subject_id: Option<SubjectId>,
    pub academic_year: Option<String>,
    pub term: Option<i32>,
    #[serde(flatten)]
    pub pagination: gradebook_core::PaginationParams,
}

/// Paginated response containing assessments.
#[derive(Serialize, ToSchema)]
pub struct PaginatedAssessmentsResponse {
    pub data: Vec<Assessment>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assessment_dto_validation() {
        let dto = CreateAssessmentDto {
            class_id: ClassId::new(),
            subject_id: SubjectId::new(),
            name: "Midterm Exam".to_string(),
            academic_year: "2025/2026".to_string(),
            term: 1,
            max_marks: 100.0,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_assessment_dto_rejects_zero_max_marks() {
        let dto = CreateAssessmentDto {
            class_id: ClassId::new(),
            subject_id: SubjectId::new(),
            name: "Midterm Exam".to_string(),
            academic_year: "2025/2026".to_string(),
            term: 1,
            max_marks: 0.0,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_assessment_dto_rejects_bad_term() {
        let dto = CreateAssessmentDto {
            class_id: ClassId::new(),
            subject_id: SubjectId::new(),
            name: "Midterm Exam".to_string(),
            academic_year: "2025/2026".to_string(),
            term: 9,
            max_marks: 100.0,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_record_marks_dto_requires_entries() {
        let dto = RecordMarksDto { marks: vec![] };
        assert!(dto.validate().is_err());
    }
}
