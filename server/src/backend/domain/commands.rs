//! Domain-level command and query types.
//!
//! These are used by the services inside the domain layer and are not part
//! of the public API. The REST layer maps the DTOs from the `shared` crate
//! to and from these types.

pub mod submissions {
    use crate::backend::domain::models::participant::SubmissionTotals;
    use crate::backend::domain::models::submission::Submission;

    /// Raw form input for a new submission; every field may be missing.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct SubmitStepsCommand {
        pub participant_name: Option<String>,
        pub date: Option<String>,
        pub steps: Option<String>,
        pub proof_reference: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SubmitStepsResult {
        pub submission: Submission,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct EditStepsCommand {
        pub submission_id: u64,
        pub steps: String,
    }

    #[derive(Debug, Clone)]
    pub struct EditStepsResult {
        pub submission: Submission,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteSubmissionCommand {
        pub submission_id: u64,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteSubmissionResult {
        pub submission: Submission,
        pub success_message: String,
    }

    /// Query parameters for the tracker table.
    #[derive(Debug, Clone, Default)]
    pub struct SubmissionListQuery {
        pub search: Option<String>,
        pub date_from: Option<String>,
        pub date_to: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SubmissionListResult {
        pub submissions: Vec<Submission>,
        pub totals: SubmissionTotals,
    }
}

pub mod payments {
    #[derive(Debug, Clone)]
    pub struct SetPaidCommand {
        pub participant_name: String,
        pub paid: bool,
    }

    #[derive(Debug, Clone)]
    pub struct TogglePaidCommand {
        pub participant_name: String,
    }

    #[derive(Debug, Clone)]
    pub struct PaymentStatusResult {
        pub participant_name: String,
        pub paid: bool,
        pub updated_count: usize,
        pub success_message: String,
    }
}

pub mod summaries {
    use crate::backend::domain::models::participant::ParticipantSummary;

    #[derive(Debug, Clone, PartialEq)]
    pub struct SummaryResult {
        pub summaries: Vec<ParticipantSummary>,
        pub grand_total: u64,
        pub currency_symbol: String,
    }

    #[derive(Debug, Clone)]
    pub struct ChallengeInfoResult {
        pub participants: Vec<String>,
        pub target_steps: u64,
        pub penalty_amount: u64,
        pub currency_symbol: String,
    }
}

pub mod export {
    #[derive(Debug, Clone, Default)]
    pub struct ExportToPathCommand {
        pub custom_path: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ExportDataResult {
        pub csv_content: String,
        pub filename: String,
        pub submission_count: usize,
    }

    #[derive(Debug, Clone)]
    pub struct ExportToPathResult {
        pub success: bool,
        pub message: String,
        pub file_path: String,
        pub submission_count: usize,
    }
}
