//! `"HH:MM"` interval parsing and period overlap detection.

use gradebook_core::AppError;
use gradebook_models::ids::PeriodId;
use gradebook_models::periods::SchoolPeriod;

/// A validated time interval in minutes since midnight, with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    /// Half-open overlap test: an interval ending exactly when another
    /// starts does not overlap it.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}

/// Parse one `"HH:MM"` 24-hour string into minutes since midnight.
///
/// `field` names the offending request field in the error message so the
/// caller can highlight it.
fn parse_hhmm(value: &str, field: &str) -> Result<u32, AppError> {
    let invalid = || {
        AppError::bad_request(anyhow::anyhow!(
            "{} must be a 24-hour HH:MM time, got '{}'",
            field,
            value
        ))
    };

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Parse and validate a period's time range.
///
/// Rejects malformed times and zero-length or inverted ranges before any
/// overlap checking happens.
pub fn parse_time_range(start_time: &str, end_time: &str) -> Result<TimeRange, AppError> {
    let start = parse_hhmm(start_time, "start_time")?;
    let end = parse_hhmm(end_time, "end_time")?;

    if start >= end {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "start_time must be strictly before end_time ({} >= {})",
            start_time,
            end_time
        )));
    }

    Ok(TimeRange { start, end })
}

/// Find the first existing period the candidate range collides with.
///
/// `exclude` skips the period being updated so it does not conflict with
/// itself. Existing rows with malformed times (which should never pass
/// write-time validation) are skipped rather than failing the whole check.
pub fn find_conflict<'a>(
    candidate: TimeRange,
    existing: &'a [SchoolPeriod],
    exclude: Option<PeriodId>,
) -> Option<&'a SchoolPeriod> {
    existing.iter().find(|period| {
        if exclude.is_some_and(|id| id == period.id) {
            return false;
        }
        match parse_time_range(&period.start_time, &period.end_time) {
            Ok(range) => candidate.overlaps(&range),
            Err(_) => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_models::ids::SchoolId;

    fn period(id: u128, start: &str, end: &str) -> SchoolPeriod {
        SchoolPeriod {
            id: PeriodId::from_u128(id),
            school_id: SchoolId::from_u128(1),
            name: format!("Period {}", id),
            start_time: start.to_string(),
            end_time: end.to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_parse_time_range() {
        let range = parse_time_range("09:00", "09:40").unwrap();
        assert_eq!(range.start, 540);
        assert_eq!(range.end, 580);
    }

    #[test]
    fn test_parse_rejects_malformed_times() {
        assert!(parse_time_range("9:00", "10:00").is_err());
        assert!(parse_time_range("09:60", "10:00").is_err());
        assert!(parse_time_range("24:00", "25:00").is_err());
        assert!(parse_time_range("ab:cd", "10:00").is_err());
        assert!(parse_time_range("0900", "1000").is_err());
    }

    #[test]
    fn test_parse_rejects_inverted_and_zero_length() {
        let err = parse_time_range("10:00", "09:00").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(parse_time_range("09:00", "09:00").is_err());
    }

    #[test]
    fn test_boundary_touching_is_legal() {
        // A period ending exactly when another starts does not overlap.
        let existing = vec![period(1, "09:00", "09:40")];
        let candidate = parse_time_range("09:40", "10:20").unwrap();
        assert!(find_conflict(candidate, &existing, None).is_none());
    }

    #[test]
    fn test_overlap_detected() {
        let existing = vec![period(1, "09:00", "09:40")];
        let candidate = parse_time_range("09:30", "10:00").unwrap();
        let conflict = find_conflict(candidate, &existing, None).unwrap();
        assert_eq!(conflict.id, PeriodId::from_u128(1));
    }

    #[test]
    fn test_containment_counts_as_overlap() {
        let existing = vec![period(1, "08:00", "12:00")];
        let candidate = parse_time_range("09:00", "09:30").unwrap();
        assert!(find_conflict(candidate, &existing, None).is_some());
    }

    #[test]
    fn test_exclude_skips_period_being_updated() {
        let existing = vec![period(1, "09:00", "09:40"), period(2, "10:00", "10:40")];
        let candidate = parse_time_range("09:00", "09:45").unwrap();
        // Updating period 1 against itself is fine, still conflicts if it
        // would now run into period 2
        assert!(find_conflict(candidate, &existing, Some(PeriodId::from_u128(1))).is_none());
        let longer = parse_time_range("09:00", "10:10").unwrap();
        let conflict =
            find_conflict(longer, &existing, Some(PeriodId::from_u128(1))).unwrap();
        assert_eq!(conflict.id, PeriodId::from_u128(2));
    }
}
