use serde::{Deserialize, Serialize};
use std::fmt;

/// A single day's step log as seen by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Monotonically assigned identifier
    pub id: u64,
    pub participant_name: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    pub step_count: u64,
    /// Opaque handle to the uploaded proof (URL, file name, ...)
    pub proof_reference: Option<String>,
    pub paid: bool,
    /// Derived from the step count and the challenge target
    pub status: StepStatus,
    /// Penalty owed for this day (0 when the target was reached)
    pub amount_owed: u64,
}

/// Whether a day reached the step target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    #[serde(rename = "OK")]
    Ok,
    Missed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Ok => write!(f, "OK"),
            StepStatus::Missed => write!(f, "Missed"),
        }
    }
}

/// A step count as sent by a client: a JSON number or the raw text typed
/// into the form. Both are parsed by the same strict rules on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepsInput {
    Number(serde_json::Number),
    Text(String),
}

impl StepsInput {
    /// The value as text, ready for strict integer parsing
    pub fn into_text(self) -> String {
        match self {
            StepsInput::Number(number) => number.to_string(),
            StepsInput::Text(text) => text,
        }
    }
}

impl From<&str> for StepsInput {
    fn from(text: &str) -> Self {
        StepsInput::Text(text.to_string())
    }
}

/// Form payload for logging steps.
///
/// Every field is optional so that a missing value can be reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmitStepsRequest {
    pub participant_name: Option<String>,
    /// Calendar date (YYYY-MM-DD)
    pub date: Option<String>,
    pub steps: Option<StepsInput>,
    pub proof_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitStepsResponse {
    pub submission: Submission,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditStepsRequest {
    pub steps: StepsInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditStepsResponse {
    pub submission: Submission,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteSubmissionResponse {
    pub deleted_id: u64,
    pub success_message: String,
}

/// Filters for the tracker table. Empty strings are treated as "no filter".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmissionListRequest {
    /// Case-insensitive substring of the participant name
    pub search: Option<String>,
    /// Inclusive lower bound (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<Submission>,
    pub totals: SubmissionTotals,
}

/// Totals shown under the tracker table for the current filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionTotals {
    pub total_entries: usize,
    pub total_missed: usize,
    pub total_owed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub name: String,
    pub total_submissions: usize,
    pub days_missed: usize,
    pub total_owed: u64,
    /// True only when the participant has submissions and all are paid
    pub paid: bool,
    /// Percentage of submitted days that reached the target (0-100)
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// One entry per roster name, in roster order
    pub summaries: Vec<ParticipantSummary>,
    /// Unpaid penalty debt across all participants
    pub grand_total: u64,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeInfoResponse {
    pub participants: Vec<String>,
    pub target_steps: u64,
    pub penalty_amount: u64,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPaidRequest {
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub participant_name: String,
    pub paid: bool,
    /// Number of submissions whose paid flag was written
    pub updated_count: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    pub filename: String,
    pub submission_count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Target directory; the user's Documents folder when absent
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub submission_count: usize,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_wire_format() {
        assert_eq!(serde_json::to_string(&StepStatus::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&StepStatus::Missed).unwrap(), "\"Missed\"");
        let parsed: StepStatus = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(parsed, StepStatus::Ok);
        assert_eq!(StepStatus::Missed.to_string(), "Missed");
    }

    #[test]
    fn test_submit_request_missing_fields_deserialize() {
        let request: SubmitStepsRequest =
            serde_json::from_str(r#"{"participant_name": "Joy"}"#).unwrap();
        assert_eq!(request.participant_name.as_deref(), Some("Joy"));
        assert!(request.date.is_none());
        assert!(request.steps.is_none());
    }

    #[test]
    fn test_steps_accept_number_or_text() {
        let request: SubmitStepsRequest =
            serde_json::from_str(r#"{"participant_name": "Joy", "steps": 12000}"#).unwrap();
        assert_eq!(request.steps.unwrap().into_text(), "12000");

        let request: EditStepsRequest = serde_json::from_str(r#"{"steps": "11000"}"#).unwrap();
        assert_eq!(request.steps, StepsInput::Text("11000".to_string()));

        // Decimals keep their fraction so the server can reject them
        let request: EditStepsRequest = serde_json::from_str(r#"{"steps": 12000.5}"#).unwrap();
        assert_eq!(request.steps.into_text(), "12000.5");

        let request: EditStepsRequest = serde_json::from_str(r#"{"steps": -5}"#).unwrap();
        assert_eq!(request.steps.into_text(), "-5");
    }
}
