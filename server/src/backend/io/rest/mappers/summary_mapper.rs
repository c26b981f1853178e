use crate::backend::domain::commands::payments::PaymentStatusResult;
use crate::backend::domain::commands::summaries::{ChallengeInfoResult, SummaryResult};
use crate::backend::domain::models::participant::ParticipantSummary as DomainParticipantSummary;
use shared::{
    ChallengeInfoResponse, ParticipantSummary as SharedParticipantSummary, PaymentStatusResponse,
    SummaryResponse,
};

pub struct SummaryMapper;

impl SummaryMapper {
    pub fn to_dto(domain: DomainParticipantSummary) -> SharedParticipantSummary {
        SharedParticipantSummary {
            name: domain.name,
            total_submissions: domain.total_submissions,
            days_missed: domain.days_missed,
            total_owed: domain.total_owed,
            paid: domain.paid,
            completion_rate: domain.completion_rate,
        }
    }

    pub fn to_summary_response(result: SummaryResult) -> SummaryResponse {
        SummaryResponse {
            summaries: result.summaries.into_iter().map(Self::to_dto).collect(),
            grand_total: result.grand_total,
            currency_symbol: result.currency_symbol,
        }
    }

    pub fn to_challenge_response(result: ChallengeInfoResult) -> ChallengeInfoResponse {
        ChallengeInfoResponse {
            participants: result.participants,
            target_steps: result.target_steps,
            penalty_amount: result.penalty_amount,
            currency_symbol: result.currency_symbol,
        }
    }

    pub fn to_payment_response(result: PaymentStatusResult) -> PaymentStatusResponse {
        PaymentStatusResponse {
            participant_name: result.participant_name,
            paid: result.paid,
            updated_count: result.updated_count,
            success_message: result.success_message,
        }
    }
}
