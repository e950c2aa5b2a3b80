//! Percentage-to-grade lookup against an ordered grade scale.

use gradebook_models::grade_scales::GradeScaleEntry;

/// The result of resolving a percentage against a grade scale.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSlot {
    pub grade_letter: String,
    pub grade_point: Option<f64>,
    pub remark: Option<String>,
}

impl GradeSlot {
    /// Returned for a missing or NaN percentage, or an empty scale.
    pub fn not_graded() -> Self {
        Self {
            grade_letter: "N/A".to_string(),
            grade_point: None,
            remark: Some("Not Graded".to_string()),
        }
    }

    /// Returned when the scale has a coverage gap at the queried percentage.
    pub fn no_matching_grade() -> Self {
        Self {
            grade_letter: "N/G".to_string(),
            grade_point: None,
            remark: Some("No matching grade".to_string()),
        }
    }
}

/// Sort scale entries into lookup order: descending by `min_percentage`.
///
/// [`lookup_grade`] iterates entries in the order given and returns the first
/// match, so with this ordering the highest bracket wins. Entries are
/// validated as non-overlapping at write time, which makes the first match
/// the only match; the ordering still pins down behavior should bad data
/// reach the engine.
pub fn sort_scale_for_lookup(entries: &mut [GradeScaleEntry]) {
    entries.sort_by(|a, b| {
        b.min_percentage
            .partial_cmp(&a.min_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Resolve a percentage to a grade.
///
/// Iterates `scale` in the order given (callers sort with
/// [`sort_scale_for_lookup`]) and returns the first entry whose inclusive
/// `[min_percentage, max_percentage]` range contains the percentage.
///
/// Total over all inputs: `None`/NaN percentages and empty scales yield
/// [`GradeSlot::not_graded`]; a coverage gap yields
/// [`GradeSlot::no_matching_grade`]. Never panics.
pub fn lookup_grade(percentage: Option<f64>, scale: &[GradeScaleEntry]) -> GradeSlot {
    let p = match percentage {
        Some(p) if !p.is_nan() => p,
        _ => return GradeSlot::not_graded(),
    };

    if scale.is_empty() {
        return GradeSlot::not_graded();
    }

    for entry in scale {
        if entry.min_percentage <= p && p <= entry.max_percentage {
            return GradeSlot {
                grade_letter: entry.grade_letter.clone(),
                grade_point: entry.grade_point,
                remark: entry.remark.clone(),
            };
        }
    }

    GradeSlot::no_matching_grade()
}
