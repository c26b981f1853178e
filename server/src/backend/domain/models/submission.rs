//! Domain model for a daily step submission.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used everywhere a submission date crosses a boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub participant_name: String,
    pub date: NaiveDate,
    pub step_count: u64,
    pub proof_reference: Option<String>,
    pub paid: bool,
}

/// A validated submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub participant_name: String,
    pub date: NaiveDate,
    pub step_count: u64,
    pub proof_reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Ok,
    Missed,
}

/// Full persisted state of the record store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSnapshot {
    pub submissions: Vec<Submission>,
    pub next_id: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Validation(String),
    #[error("Entry for {participant_name} on {date} already exists")]
    DuplicateEntry {
        participant_name: String,
        date: NaiveDate,
    },
    #[error("Submission not found: {0}")]
    NotFound(u64),
    #[error("Invalid step count '{0}': steps must be a non-negative whole number")]
    InvalidValue(String),
}

/// Parse a required `YYYY-MM-DD` date field.
pub fn parse_date(raw: &str) -> Result<NaiveDate, SubmissionError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        SubmissionError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", raw.trim()))
    })
}

/// Parse the step count of a new submission. Failures are validation errors.
pub fn parse_new_step_count(raw: &str) -> Result<u64, SubmissionError> {
    let steps = raw.trim().parse::<i64>().map_err(|_| {
        SubmissionError::Validation(format!("Steps must be a whole number, got '{}'", raw.trim()))
    })?;
    u64::try_from(steps)
        .map_err(|_| SubmissionError::Validation("Steps cannot be negative".to_string()))
}

/// Parse the step count of an edit. Failures are `InvalidValue`.
pub fn parse_edited_step_count(raw: &str) -> Result<u64, SubmissionError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|steps| u64::try_from(steps).ok())
        .ok_or_else(|| SubmissionError::InvalidValue(raw.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-01-02 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert!(matches!(parse_date("01/02/2024"), Err(SubmissionError::Validation(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(SubmissionError::Validation(_))));
    }

    #[test]
    fn test_parse_new_step_count() {
        assert_eq!(parse_new_step_count("12000").unwrap(), 12000);
        assert_eq!(parse_new_step_count("0").unwrap(), 0);
        assert!(matches!(parse_new_step_count("abc"), Err(SubmissionError::Validation(_))));
        assert!(matches!(parse_new_step_count("-5"), Err(SubmissionError::Validation(_))));
        assert!(matches!(parse_new_step_count("12.5"), Err(SubmissionError::Validation(_))));
    }

    #[test]
    fn test_parse_edited_step_count() {
        assert_eq!(parse_edited_step_count(" 11000 ").unwrap(), 11000);
        assert_eq!(
            parse_edited_step_count("-1"),
            Err(SubmissionError::InvalidValue("-1".to_string()))
        );
        assert_eq!(
            parse_edited_step_count("many"),
            Err(SubmissionError::InvalidValue("many".to_string()))
        );
    }

    #[test]
    fn test_snapshot_uses_camel_case_layout() {
        let snapshot = SubmissionSnapshot {
            submissions: vec![Submission {
                id: 1,
                participant_name: "Joy".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                step_count: 10500,
                proof_reference: None,
                paid: false,
            }],
            next_id: 2,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["nextId"], 2);
        assert_eq!(json["submissions"][0]["participantName"], "Joy");
        assert_eq!(json["submissions"][0]["date"], "2024-01-01");
        assert_eq!(json["submissions"][0]["stepCount"], 10500);
    }
}
