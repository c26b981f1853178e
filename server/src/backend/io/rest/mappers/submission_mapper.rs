use crate::backend::domain::aggregator::Aggregator;
use crate::backend::domain::commands::submissions::{
    EditStepsCommand, SubmissionListQuery, SubmissionListResult, SubmitStepsCommand,
};
use crate::backend::domain::models::participant::SubmissionTotals as DomainSubmissionTotals;
use crate::backend::domain::models::submission::{
    StepStatus as DomainStepStatus, Submission as DomainSubmission, DATE_FORMAT,
};
use shared::{
    EditStepsRequest, StepStatus as SharedStepStatus, StepsInput, Submission as SharedSubmission,
    SubmissionListRequest, SubmissionListResponse, SubmissionTotals as SharedSubmissionTotals,
    SubmitStepsRequest,
};

pub struct SubmissionMapper;

impl SubmissionMapper {
    /// Status and amount owed are derived here, never stored.
    pub fn to_dto(domain: DomainSubmission, aggregator: &Aggregator) -> SharedSubmission {
        let status = Self::to_dto_status(aggregator.status_of(&domain));
        let amount_owed = aggregator.amount_owed(&domain);

        SharedSubmission {
            id: domain.id,
            participant_name: domain.participant_name,
            date: domain.date.format(DATE_FORMAT).to_string(),
            step_count: domain.step_count,
            proof_reference: domain.proof_reference,
            paid: domain.paid,
            status,
            amount_owed,
        }
    }

    pub fn to_submit_command(request: SubmitStepsRequest) -> SubmitStepsCommand {
        SubmitStepsCommand {
            participant_name: request.participant_name,
            date: request.date,
            steps: request.steps.map(StepsInput::into_text),
            proof_reference: request.proof_reference,
        }
    }

    pub fn to_edit_command(submission_id: u64, request: EditStepsRequest) -> EditStepsCommand {
        EditStepsCommand {
            submission_id,
            steps: request.steps.into_text(),
        }
    }

    pub fn to_list_query(request: SubmissionListRequest) -> SubmissionListQuery {
        SubmissionListQuery {
            search: request.search,
            date_from: request.date_from,
            date_to: request.date_to,
        }
    }

    pub fn to_list_response(
        result: SubmissionListResult,
        aggregator: &Aggregator,
    ) -> SubmissionListResponse {
        SubmissionListResponse {
            submissions: result
                .submissions
                .into_iter()
                .map(|s| Self::to_dto(s, aggregator))
                .collect(),
            totals: Self::to_dto_totals(result.totals),
        }
    }

    fn to_dto_totals(totals: DomainSubmissionTotals) -> SharedSubmissionTotals {
        SharedSubmissionTotals {
            total_entries: totals.total_entries,
            total_missed: totals.total_missed,
            total_owed: totals.total_owed,
        }
    }

    fn to_dto_status(status: DomainStepStatus) -> SharedStepStatus {
        match status {
            DomainStepStatus::Ok => SharedStepStatus::Ok,
            DomainStepStatus::Missed => SharedStepStatus::Missed,
        }
    }
}
