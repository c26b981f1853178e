use anyhow::Result;
use log::debug;

use crate::backend::domain::aggregator::Aggregator;
use crate::backend::domain::commands::summaries::{ChallengeInfoResult, SummaryResult};
use crate::backend::domain::models::challenge::ChallengeRules;
use crate::backend::domain::models::participant::ParticipantSummary;
use crate::backend::domain::models::submission::Submission;
use crate::backend::domain::record_store::RecordStoreHandle;
use crate::backend::storage::Connection;

/// Read-only views: participant summaries and the challenge rules.
#[derive(Clone)]
pub struct SummaryService<C: Connection> {
    store: RecordStoreHandle<C::SubmissionRepository>,
    rules: ChallengeRules,
    aggregator: Aggregator,
}

impl<C: Connection> SummaryService<C> {
    pub fn new(store: RecordStoreHandle<C::SubmissionRepository>, rules: ChallengeRules) -> Self {
        let aggregator = Aggregator::from_rules(&rules);
        Self {
            store,
            rules,
            aggregator,
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Summaries in roster order plus the unpaid grand total.
    pub fn get_summaries(&self) -> Result<SummaryResult> {
        let aggregator = self.aggregator;
        let summaries = self
            .store
            .read(|store| aggregator.summarize(store.roster(), store.submissions()))?;
        Ok(self.summary_result(summaries))
    }

    /// Summaries together with every submission they were computed from,
    /// taken under a single read so both views describe the same state.
    pub fn summaries_with_submissions(&self) -> Result<(SummaryResult, Vec<Submission>)> {
        let aggregator = self.aggregator;
        let (summaries, submissions) = self.store.read(|store| {
            (
                aggregator.summarize(store.roster(), store.submissions()),
                store.submissions().to_vec(),
            )
        })?;
        Ok((self.summary_result(summaries), submissions))
    }

    fn summary_result(&self, summaries: Vec<ParticipantSummary>) -> SummaryResult {
        let grand_total = self.aggregator.grand_total(&summaries);

        debug!(
            "Computed {} summaries, grand total {}{}",
            summaries.len(),
            self.rules.currency_symbol,
            grand_total
        );

        SummaryResult {
            summaries,
            grand_total,
            currency_symbol: self.rules.currency_symbol.clone(),
        }
    }

    pub fn challenge_info(&self) -> ChallengeInfoResult {
        ChallengeInfoResult {
            participants: self.rules.roster.clone(),
            target_steps: self.rules.target_steps,
            penalty_amount: self.rules.penalty_amount,
            currency_symbol: self.rules.currency_symbol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::submission::NewSubmission;
    use crate::backend::storage::json::test_utils::TestEnvironment;
    use crate::backend::storage::JsonConnection;
    use chrono::NaiveDate;

    fn rules() -> ChallengeRules {
        ChallengeRules {
            roster: vec!["A".to_string(), "B".to_string()],
            ..ChallengeRules::default()
        }
    }

    #[test]
    fn test_summaries_scenario() {
        let env = TestEnvironment::new().unwrap();
        let repo = env.connection.create_submission_repository();
        let store = RecordStoreHandle::load(rules().roster, repo).unwrap();
        let service: SummaryService<JsonConnection> = SummaryService::new(store.clone(), rules());

        for (day, steps) in [(1, 12_000), (2, 5_000)] {
            store
                .mutate(|s| {
                    s.add_submission(NewSubmission {
                        participant_name: "A".to_string(),
                        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                        step_count: steps,
                        proof_reference: None,
                    })
                })
                .unwrap();
        }

        let result = service.get_summaries().unwrap();
        assert_eq!(result.summaries.len(), 2);
        assert_eq!(result.summaries[0].name, "A");
        assert_eq!(result.summaries[0].days_missed, 1);
        assert_eq!(result.summaries[0].total_owed, 50);
        assert_eq!(result.summaries[1].total_submissions, 0);
        assert_eq!(result.grand_total, 50);
        assert_eq!(result.currency_symbol, "₱");

        store.mutate(|s| Ok(s.set_paid("A", true))).unwrap();
        assert_eq!(service.get_summaries().unwrap().grand_total, 0);

        // Editing the missed day to a passing count clears the debt
        let missed_id = store
            .read(|s| s.submissions().iter().find(|sub| sub.step_count == 5_000).map(|sub| sub.id))
            .unwrap()
            .unwrap();
        store
            .mutate(|s| {
                s.set_paid("A", false);
                s.update_steps(missed_id, 11_000)
            })
            .unwrap();
        let a = &service.get_summaries().unwrap().summaries[0];
        assert_eq!(a.days_missed, 0);
        assert_eq!(a.total_owed, 0);
        assert_eq!(a.completion_rate, 100.0);
    }

    #[test]
    fn test_summaries_with_submissions_agree() {
        let env = TestEnvironment::new().unwrap();
        let repo = env.connection.create_submission_repository();
        let store = RecordStoreHandle::load(rules().roster, repo).unwrap();
        let service: SummaryService<JsonConnection> = SummaryService::new(store.clone(), rules());

        for (name, day) in [("A", 1), ("B", 1), ("B", 2)] {
            store
                .mutate(|s| {
                    s.add_submission(NewSubmission {
                        participant_name: name.to_string(),
                        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                        step_count: 100,
                        proof_reference: None,
                    })
                })
                .unwrap();
        }

        let (summary, submissions) = service.summaries_with_submissions().unwrap();
        assert_eq!(submissions.len(), 3);
        let counted: usize = summary.summaries.iter().map(|s| s.total_submissions).sum();
        assert_eq!(counted, submissions.len());
        assert_eq!(summary, service.get_summaries().unwrap());
    }

    #[test]
    fn test_challenge_info() {
        let env = TestEnvironment::new().unwrap();
        let repo = env.connection.create_submission_repository();
        let store = RecordStoreHandle::load(rules().roster, repo).unwrap();
        let service: SummaryService<JsonConnection> = SummaryService::new(store, rules());

        let info = service.challenge_info();
        assert_eq!(info.participants, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(info.target_steps, 10_000);
        assert_eq!(info.penalty_amount, 50);
        assert_eq!(info.currency_symbol, "₱");
    }
}
