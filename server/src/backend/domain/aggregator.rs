//! Aggregator: statistics derived from the record store.
//!
//! Every figure shown to users or exported comes from these functions, so
//! the API and the CSV export always agree.

use crate::backend::domain::models::challenge::ChallengeRules;
use crate::backend::domain::models::participant::{ParticipantSummary, SubmissionTotals};
use crate::backend::domain::models::submission::{StepStatus, Submission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    target_steps: u64,
    penalty_amount: u64,
}

impl Aggregator {
    pub fn new(target_steps: u64, penalty_amount: u64) -> Self {
        Self {
            target_steps,
            penalty_amount,
        }
    }

    pub fn from_rules(rules: &ChallengeRules) -> Self {
        Self::new(rules.target_steps, rules.penalty_amount)
    }

    pub fn target_steps(&self) -> u64 {
        self.target_steps
    }

    pub fn status_of(&self, submission: &Submission) -> StepStatus {
        if submission.step_count >= self.target_steps {
            StepStatus::Ok
        } else {
            StepStatus::Missed
        }
    }

    /// One flat penalty per missed day, regardless of the shortfall
    pub fn amount_owed(&self, submission: &Submission) -> u64 {
        match self.status_of(submission) {
            StepStatus::Ok => 0,
            StepStatus::Missed => self.penalty_amount,
        }
    }

    /// One summary per roster name, in roster order.
    pub fn summarize(&self, roster: &[String], submissions: &[Submission]) -> Vec<ParticipantSummary> {
        roster
            .iter()
            .map(|name| {
                let own: Vec<&Submission> = submissions
                    .iter()
                    .filter(|s| &s.participant_name == name)
                    .collect();
                let total_submissions = own.len();
                let days_missed = own
                    .iter()
                    .filter(|s| self.status_of(s) == StepStatus::Missed)
                    .count();
                let paid = Self::all_paid(&own);
                let completion_rate = if total_submissions > 0 {
                    (total_submissions - days_missed) as f64 / total_submissions as f64 * 100.0
                } else {
                    0.0
                };

                ParticipantSummary {
                    name: name.clone(),
                    total_submissions,
                    days_missed,
                    total_owed: days_missed as u64 * self.penalty_amount,
                    paid,
                    completion_rate,
                }
            })
            .collect()
    }

    /// Whether the participant counts as paid: at least one submission and
    /// every one of them marked paid.
    pub fn participant_paid(&self, name: &str, submissions: &[Submission]) -> bool {
        let own: Vec<&Submission> = submissions
            .iter()
            .filter(|s| s.participant_name == name)
            .collect();
        Self::all_paid(&own)
    }

    fn all_paid(own: &[&Submission]) -> bool {
        !own.is_empty() && own.iter().all(|s| s.paid)
    }

    /// Unpaid debt only: a paid participant contributes nothing.
    pub fn grand_total(&self, summaries: &[ParticipantSummary]) -> u64 {
        summaries
            .iter()
            .filter(|s| !s.paid)
            .map(|s| s.total_owed)
            .sum()
    }

    pub fn totals(&self, submissions: &[Submission]) -> SubmissionTotals {
        let total_missed = submissions
            .iter()
            .filter(|s| self.status_of(s) == StepStatus::Missed)
            .count();
        SubmissionTotals {
            total_entries: submissions.len(),
            total_missed,
            total_owed: total_missed as u64 * self.penalty_amount,
        }
    }
}
