//! Submission commands and the tracker-table query.
use anyhow::Result;
use log::info;

use crate::backend::domain::aggregator::Aggregator;
use crate::backend::domain::commands::submissions::{
    DeleteSubmissionCommand, DeleteSubmissionResult, EditStepsCommand, EditStepsResult,
    SubmissionListQuery, SubmissionListResult, SubmitStepsCommand, SubmitStepsResult,
};
use crate::backend::domain::models::submission::{
    parse_date, parse_edited_step_count, parse_new_step_count, NewSubmission,
    SubmissionError,
};
use crate::backend::domain::record_store::{RecordStoreHandle, SubmissionFilter};
use crate::backend::storage::Connection;

#[derive(Clone)]
pub struct SubmissionService<C: Connection> {
    store: RecordStoreHandle<C::SubmissionRepository>,
    aggregator: Aggregator,
}

impl<C: Connection> SubmissionService<C> {
    pub fn new(store: RecordStoreHandle<C::SubmissionRepository>, aggregator: Aggregator) -> Self {
        Self { store, aggregator }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn submit_steps(&self, command: SubmitStepsCommand) -> Result<SubmitStepsResult> {
        info!("Submitting steps: {:?}", command);

        let new_submission = Self::validate_submit_command(command)?;
        let submission = self
            .store
            .mutate(|store| store.add_submission(new_submission))?;

        info!(
            "Created submission {} for {} on {}: {} steps ({:?})",
            submission.id,
            submission.participant_name,
            submission.date,
            submission.step_count,
            self.aggregator.status_of(&submission)
        );

        Ok(SubmitStepsResult {
            success_message: format!(
                "Steps submitted successfully for {}!",
                submission.participant_name
            ),
            submission,
        })
    }

    pub fn edit_steps(&self, command: EditStepsCommand) -> Result<EditStepsResult> {
        info!("Editing submission {}: steps={}", command.submission_id, command.steps);

        let steps = parse_edited_step_count(&command.steps)?;
        let submission = self
            .store
            .mutate(|store| store.update_steps(command.submission_id, steps))?;

        Ok(EditStepsResult {
            success_message: format!(
                "Updated {}'s steps to {}",
                submission.participant_name, submission.step_count
            ),
            submission,
        })
    }

    pub fn delete_submission(&self, command: DeleteSubmissionCommand) -> Result<DeleteSubmissionResult> {
        info!("Deleting submission {}", command.submission_id);

        let submission = self
            .store
            .mutate(|store| store.delete_submission(command.submission_id))?;

        info!(
            "Deleted {}'s entry for {}",
            submission.participant_name, submission.date
        );

        Ok(DeleteSubmissionResult {
            success_message: "Entry deleted successfully".to_string(),
            submission,
        })
    }

    /// Filtered submissions (most recent first) with the table totals.
    pub fn list_submissions(&self, query: SubmissionListQuery) -> Result<SubmissionListResult> {
        let filter = Self::build_filter(query)?;
        let submissions = self.store.read(|store| store.filter(&filter))?;
        let totals = self.aggregator.totals(&submissions);

        Ok(SubmissionListResult {
            submissions,
            totals,
        })
    }

    fn validate_submit_command(command: SubmitStepsCommand) -> Result<NewSubmission, SubmissionError> {
        let participant_name = Self::required_field(command.participant_name, "participant name")?;
        let date = parse_date(&Self::required_field(command.date, "date")?)?;
        let step_count = parse_new_step_count(&Self::required_field(command.steps, "steps")?)?;
        let proof_reference = command
            .proof_reference
            .map(|proof| proof.trim().to_string())
            .filter(|proof| !proof.is_empty());

        Ok(NewSubmission {
            participant_name,
            date,
            step_count,
            proof_reference,
        })
    }

    fn required_field(value: Option<String>, field: &str) -> Result<String, SubmissionError> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                SubmissionError::Validation(format!(
                    "Please fill in all required fields (missing {})",
                    field
                ))
            })
    }

    fn build_filter(query: SubmissionListQuery) -> Result<SubmissionFilter, SubmissionError> {
        let non_empty = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(SubmissionFilter {
            name_contains: non_empty(query.search),
            date_from: non_empty(query.date_from).map(|d| parse_date(&d)).transpose()?,
            date_to: non_empty(query.date_to).map(|d| parse_date(&d)).transpose()?,
        })
    }
}
