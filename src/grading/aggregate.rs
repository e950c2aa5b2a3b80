//! Per-subject and overall aggregation, and report-card assembly.
//!
//! Inputs are plain in-memory rows scoped to one class, academic year, and
//! term. Each student's card is computed independently; there is no shared
//! mutable state between students, so a batch report can be assembled in
//! input order without one student's data affecting another's.

use std::collections::HashMap;

use gradebook_core::round_2dp;
use gradebook_models::assessments::{Assessment, StudentMark};
use gradebook_models::grade_scales::GradeScaleEntry;
use gradebook_models::ids::{AssessmentId, ClassId, SubjectId};
use gradebook_models::reports::{OverallAggregate, ReportCard, SubjectAggregate};
use gradebook_models::students::{Student, Subject};

/// Everything the engine needs to assemble report cards for one
/// class/year/term. The scale must already be in lookup order
/// (see [`super::scale::sort_scale_for_lookup`]).
pub struct ReportInputs<'a> {
    pub class_id: ClassId,
    pub academic_year: &'a str,
    pub term: i32,
    pub assessments: &'a [Assessment],
    pub subjects: &'a [Subject],
    pub marks: &'a [StudentMark],
    pub scale: &'a [GradeScaleEntry],
}

/// Sum one subject's assessments for one student.
///
/// The denominator counts every assessment's `max_marks` whether or not the
/// student has a mark; the numerator only counts recorded marks. An unmarked
/// assessment therefore drags the percentage down without contributing an
/// explicit zero row.
fn aggregate_subject(
    subject_id: SubjectId,
    subject_name: &str,
    assessments: &[&Assessment],
    marks_by_assessment: &HashMap<AssessmentId, f64>,
    scale: &[GradeScaleEntry],
) -> SubjectAggregate {
    let mut total_max = 0.0;
    let mut total_obtained = 0.0;

    for assessment in assessments {
        total_max += assessment.max_marks;
        if let Some(obtained) = marks_by_assessment.get(&assessment.id) {
            total_obtained += obtained;
        }
    }

    let percentage = if total_max > 0.0 {
        round_2dp(total_obtained / total_max * 100.0)
    } else {
        0.0
    };

    let slot = super::scale::lookup_grade(Some(percentage), scale);

    SubjectAggregate {
        subject_id,
        subject_name: subject_name.to_string(),
        total_marks_obtained: total_obtained,
        total_max_marks: total_max,
        percentage,
        grade_letter: slot.grade_letter,
        grade_point: slot.grade_point,
        remark: slot.remark,
    }
}

/// Sum subject aggregates into the overall row.
///
/// The overall letter grade comes from grading the overall percentage; the
/// term GPA is the mean of the non-null per-subject grade points. Both are
/// exposed because they answer different questions and can diverge.
fn aggregate_overall(
    subjects: &[SubjectAggregate],
    scale: &[GradeScaleEntry],
) -> OverallAggregate {
    let total_max: f64 = subjects.iter().map(|s| s.total_max_marks).sum();
    let total_obtained: f64 = subjects.iter().map(|s| s.total_marks_obtained).sum();

    let percentage = if total_max > 0.0 {
        round_2dp(total_obtained / total_max * 100.0)
    } else {
        0.0
    };

    let slot = super::scale::lookup_grade(Some(percentage), scale);

    let points: Vec<f64> = subjects.iter().filter_map(|s| s.grade_point).collect();
    let term_gpa = if points.is_empty() {
        None
    } else {
        Some(round_2dp(points.iter().sum::<f64>() / points.len() as f64))
    };

    OverallAggregate {
        total_marks_obtained: total_obtained,
        total_max_marks: total_max,
        percentage,
        grade_letter: slot.grade_letter,
        grade_point: slot.grade_point,
        remark: slot.remark,
        term_gpa,
    }
}

/// Assemble one student's report card.
///
/// Produces one [`SubjectAggregate`] per distinct subject present in the
/// term's assessments, even when the student has no recorded marks for it
/// (that subject shows as 0%, graded through the scale's 0% bracket).
/// Subjects are emitted in name order for stable output.
pub fn build_report_card(student: &Student, inputs: &ReportInputs<'_>) -> ReportCard {
    let subject_names: HashMap<SubjectId, &str> = inputs
        .subjects
        .iter()
        .map(|s| (s.id, s.name.as_str()))
        .collect();

    let marks_by_assessment: HashMap<AssessmentId, f64> = inputs
        .marks
        .iter()
        .filter(|m| m.student_id == student.id)
        .filter_map(|m| m.marks_obtained.map(|v| (m.assessment_id, v)))
        .collect();

    let mut by_subject: HashMap<SubjectId, Vec<&Assessment>> = HashMap::new();
    for assessment in inputs.assessments {
        by_subject
            .entry(assessment.subject_id)
            .or_default()
            .push(assessment);
    }

    let mut subject_ids: Vec<SubjectId> = by_subject.keys().copied().collect();
    subject_ids.sort_by(|a, b| {
        let name_a = subject_names.get(a).copied().unwrap_or("");
        let name_b = subject_names.get(b).copied().unwrap_or("");
        name_a.cmp(name_b).then_with(|| a.0.cmp(&b.0))
    });

    let subjects: Vec<SubjectAggregate> = subject_ids
        .iter()
        .map(|subject_id| {
            aggregate_subject(
                *subject_id,
                subject_names.get(subject_id).copied().unwrap_or("Unknown"),
                &by_subject[subject_id],
                &marks_by_assessment,
                inputs.scale,
            )
        })
        .collect();

    let overall = aggregate_overall(&subjects, inputs.scale);

    ReportCard {
        student_id: student.id,
        student_name: student.full_name(),
        class_id: inputs.class_id,
        academic_year: inputs.academic_year.to_string(),
        term: inputs.term,
        subjects,
        overall,
    }
}

/// Assemble report cards for a batch of students, preserving input order.
///
/// Callers guarantee `inputs.assessments` and `inputs.scale` are non-empty;
/// the services surface "no assessments" and "no active scale" to the client
/// before reaching the engine.
pub fn build_report_cards(students: &[Student], inputs: &ReportInputs<'_>) -> Vec<ReportCard> {
    students
        .iter()
        .map(|student| build_report_card(student, inputs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_models::ids::{
        GradeScaleEntryId, GradeScaleId, SchoolId, StudentId,
    };

    fn scale_entry(min: f64, max: f64, letter: &str, point: f64) -> GradeScaleEntry {
        GradeScaleEntry {
            id: GradeScaleEntryId::new(),
            grade_scale_id: GradeScaleId::from_u128(1),
            min_percentage: min,
            max_percentage: max,
            grade_letter: letter.to_string(),
            grade_point: Some(point),
            remark: None,
        }
    }

    fn test_scale() -> Vec<GradeScaleEntry> {
        let mut scale = vec![
            scale_entry(90.0, 100.0, "A", 4.0),
            scale_entry(70.0, 89.99, "B", 3.0),
            scale_entry(50.0, 69.99, "C", 2.0),
            scale_entry(0.0, 49.99, "F", 0.0),
        ];
        super::super::scale::sort_scale_for_lookup(&mut scale);
        scale
    }

    fn assessment(id: u128, subject: &Subject, class_id: ClassId, max_marks: f64) -> Assessment {
        Assessment {
            id: AssessmentId::from_u128(id),
            school_id: subject.school_id,
            class_id,
            subject_id: subject.id,
            name: format!("Assessment {}", id),
            academic_year: "2025/2026".to_string(),
            term: 1,
            max_marks,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn subject(id: u128, school_id: SchoolId, name: &str) -> Subject {
        Subject {
            id: SubjectId::from_u128(id),
            school_id,
            name: name.to_string(),
        }
    }

    fn student(id: u128, school_id: SchoolId, class_id: ClassId) -> Student {
        Student {
            id: StudentId::from_u128(id),
            school_id,
            class_id,
            first_name: "Test".to_string(),
            last_name: format!("Student{}", id),
            is_active: true,
        }
    }

    fn mark(assessment: &Assessment, student: &Student, obtained: Option<f64>) -> StudentMark {
        StudentMark {
            assessment_id: assessment.id,
            student_id: student.id,
            marks_obtained: obtained,
        }
    }

    #[test]
    fn test_denominator_counts_unmarked_assessments() {
        let school_id = SchoolId::from_u128(1);
        let class_id = ClassId::from_u128(1);
        let math = subject(1, school_id, "Mathematics");
        let assessments = vec![
            assessment(1, &math, class_id, 100.0),
            assessment(2, &math, class_id, 100.0),
            assessment(3, &math, class_id, 100.0),
        ];
        let s = student(1, school_id, class_id);
        // Only two of three assessments are marked
        let marks = vec![
            mark(&assessments[0], &s, Some(80.0)),
            mark(&assessments[1], &s, Some(70.0)),
        ];
        let scale = test_scale();
        let inputs = ReportInputs {
            class_id,
            academic_year: "2025/2026",
            term: 1,
            assessments: &assessments,
            subjects: std::slice::from_ref(&math),
            marks: &marks,
            scale: &scale,
        };

        let card = build_report_card(&s, &inputs);
        assert_eq!(card.subjects.len(), 1);
        assert_eq!(card.subjects[0].total_max_marks, 300.0);
        assert_eq!(card.subjects[0].total_marks_obtained, 150.0);
        assert_eq!(card.subjects[0].percentage, 50.0);
    }

    #[test]
    fn test_null_mark_row_does_not_contribute() {
        let school_id = SchoolId::from_u128(1);
        let class_id = ClassId::from_u128(1);
        let math = subject(1, school_id, "Mathematics");
        let assessments = vec![assessment(1, &math, class_id, 100.0)];
        let s = student(1, school_id, class_id);
        // A mark row exists but marks_obtained is null (absent/unmarked)
        let marks = vec![mark(&assessments[0], &s, None)];
        let scale = test_scale();
        let inputs = ReportInputs {
            class_id,
            academic_year: "2025/2026",
            term: 1,
            assessments: &assessments,
            subjects: std::slice::from_ref(&math),
            marks: &marks,
            scale: &scale,
        };

        let card = build_report_card(&s, &inputs);
        assert_eq!(card.subjects[0].total_marks_obtained, 0.0);
        assert_eq!(card.subjects[0].total_max_marks, 100.0);
        assert_eq!(card.subjects[0].percentage, 0.0);
        assert_eq!(card.subjects[0].grade_letter, "F");
    }

    #[test]
    fn test_subject_with_no_marks_still_appears() {
        let school_id = SchoolId::from_u128(1);
        let class_id = ClassId::from_u128(1);
        let math = subject(1, school_id, "Mathematics");
        let english = subject(2, school_id, "English");
        let assessments = vec![
            assessment(1, &math, class_id, 100.0),
            assessment(2, &english, class_id, 100.0),
        ];
        let s = student(1, school_id, class_id);
        let marks = vec![mark(&assessments[0], &s, Some(90.0))];
        let scale = test_scale();
        let inputs = ReportInputs {
            class_id,
            academic_year: "2025/2026",
            term: 1,
            assessments: &assessments,
            subjects: &[math, english],
            marks: &marks,
            scale: &scale,
        };

        let card = build_report_card(&s, &inputs);
        assert_eq!(card.subjects.len(), 2);
        // Name-ordered: English before Mathematics
        assert_eq!(card.subjects[0].subject_name, "English");
        assert_eq!(card.subjects[0].percentage, 0.0);
        assert_eq!(card.subjects[0].grade_letter, "F");
        assert_eq!(card.subjects[1].subject_name, "Mathematics");
        assert_eq!(card.subjects[1].grade_letter, "A");
    }

    #[test]
    fn test_term_gpa_excludes_null_points() {
        let subjects = vec![
            SubjectAggregate {
                subject_id: SubjectId::from_u128(1),
                subject_name: "A".to_string(),
                total_marks_obtained: 90.0,
                total_max_marks: 100.0,
                percentage: 90.0,
                grade_letter: "A".to_string(),
                grade_point: Some(4.0),
                remark: None,
            },
            SubjectAggregate {
                subject_id: SubjectId::from_u128(2),
                subject_name: "B".to_string(),
                total_marks_obtained: 75.0,
                total_max_marks: 100.0,
                percentage: 75.0,
                grade_letter: "B".to_string(),
                grade_point: Some(3.0),
                remark: None,
            },
            SubjectAggregate {
                subject_id: SubjectId::from_u128(3),
                subject_name: "C".to_string(),
                total_marks_obtained: 0.0,
                total_max_marks: 0.0,
                percentage: 0.0,
                grade_letter: "N/G".to_string(),
                grade_point: None,
                remark: None,
            },
        ];
        let overall = aggregate_overall(&subjects, &test_scale());
        // Null excluded from both sum and count: (4.0 + 3.0) / 2
        assert_eq!(overall.term_gpa, Some(3.5));
    }

    #[test]
    fn test_term_gpa_null_when_no_points() {
        let subjects = vec![SubjectAggregate {
            subject_id: SubjectId::from_u128(1),
            subject_name: "A".to_string(),
            total_marks_obtained: 0.0,
            total_max_marks: 100.0,
            percentage: 0.0,
            grade_letter: "N/G".to_string(),
            grade_point: None,
            remark: None,
        }];
        let overall = aggregate_overall(&subjects, &test_scale());
        assert_eq!(overall.term_gpa, None);
    }

    #[test]
    fn test_two_subject_end_to_end() {
        // Scale [90-100:A(4), 70-89.99:B(3), 50-69.99:C(2), 0-49.99:F(0)];
        // scores 80 and 60 over two 100-mark assessments.
        let school_id = SchoolId::from_u128(1);
        let class_id = ClassId::from_u128(1);
        let math = subject(1, school_id, "Mathematics");
        let english = subject(2, school_id, "English");
        let assessments = vec![
            assessment(1, &math, class_id, 100.0),
            assessment(2, &english, class_id, 100.0),
        ];
        let s = student(1, school_id, class_id);
        let marks = vec![
            mark(&assessments[0], &s, Some(80.0)),
            mark(&assessments[1], &s, Some(60.0)),
        ];
        let scale = test_scale();
        let inputs = ReportInputs {
            class_id,
            academic_year: "2025/2026",
            term: 1,
            assessments: &assessments,
            subjects: &[math.clone(), english.clone()],
            marks: &marks,
            scale: &scale,
        };

        let card = build_report_card(&s, &inputs);
        let by_name: HashMap<&str, &SubjectAggregate> = card
            .subjects
            .iter()
            .map(|s| (s.subject_name.as_str(), s))
            .collect();
        assert_eq!(by_name["Mathematics"].grade_letter, "B");
        assert_eq!(by_name["Mathematics"].percentage, 80.0);
        assert_eq!(by_name["English"].grade_letter, "C");
        assert_eq!(by_name["English"].percentage, 60.0);

        assert_eq!(card.overall.total_max_marks, 200.0);
        assert_eq!(card.overall.percentage, 70.0);
        assert_eq!(card.overall.grade_letter, "B");
        // Mean of subject points: (3.0 + 2.0) / 2
        assert_eq!(card.overall.term_gpa, Some(2.5));
    }

    #[test]
    fn test_batch_preserves_input_order_and_isolation() {
        let school_id = SchoolId::from_u128(1);
        let class_id = ClassId::from_u128(1);
        let math = subject(1, school_id, "Mathematics");
        let assessments = vec![assessment(1, &math, class_id, 100.0)];
        let s1 = student(1, school_id, class_id);
        let s2 = student(2, school_id, class_id);
        let marks = vec![
            mark(&assessments[0], &s1, Some(95.0)),
            mark(&assessments[0], &s2, Some(40.0)),
        ];
        let scale = test_scale();
        let inputs = ReportInputs {
            class_id,
            academic_year: "2025/2026",
            term: 1,
            assessments: &assessments,
            subjects: std::slice::from_ref(&math),
            marks: &marks,
            scale: &scale,
        };

        let cards = build_report_cards(&[s2.clone(), s1.clone()], &inputs);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].student_id, s2.id);
        assert_eq!(cards[0].overall.grade_letter, "F");
        assert_eq!(cards[1].student_id, s1.id);
        assert_eq!(cards[1].overall.grade_letter, "A");
    }
}
