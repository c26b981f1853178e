//! Record store: the single owner of the submission collection.
//!
//! [`RecordStore`] is the pure in-memory collection with identity assignment
//! and duplicate detection. [`RecordStoreHandle`] shares one store between
//! the services and persists a full snapshot after every mutation.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use log::{error, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::domain::models::submission::{
    NewSubmission, Submission, SubmissionError, SubmissionSnapshot,
};
use crate::backend::storage::SubmissionStorage;

/// Predicate for the tracker table. `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionFilter {
    pub name_contains: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl SubmissionFilter {
    pub fn matches(&self, submission: &Submission) -> bool {
        let matches_name = match &self.name_contains {
            Some(search) => submission
                .participant_name
                .to_lowercase()
                .contains(&search.to_lowercase()),
            None => true,
        };
        let matches_from = self.date_from.map_or(true, |from| submission.date >= from);
        let matches_to = self.date_to.map_or(true, |to| submission.date <= to);

        matches_name && matches_from && matches_to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    roster: Vec<String>,
    submissions: Vec<Submission>,
    next_id: u64,
}

impl RecordStore {
    pub fn new(roster: Vec<String>) -> Self {
        Self {
            roster,
            submissions: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from a saved snapshot.
    ///
    /// The id counter never goes below `max(id) + 1`, even if the saved
    /// counter is stale. A snapshot with repeated ids, repeated
    /// (participant, date) entries or no ids left to assign is rejected.
    pub fn from_snapshot(roster: Vec<String>, snapshot: SubmissionSnapshot) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut entries = HashSet::new();
        for submission in &snapshot.submissions {
            if !ids.insert(submission.id) {
                bail!("Snapshot contains submission id {} more than once", submission.id);
            }
            if !entries.insert((submission.participant_name.as_str(), submission.date)) {
                bail!(
                    "Snapshot contains more than one entry for {} on {}",
                    submission.participant_name,
                    submission.date
                );
            }
            if !roster.contains(&submission.participant_name) {
                warn!(
                    "Submission {} belongs to '{}', who is not on the roster",
                    submission.id, submission.participant_name
                );
            }
        }

        let max_id = snapshot.submissions.iter().map(|s| s.id).max().unwrap_or(0);
        let next_id = match max_id.checked_add(1) {
            Some(after_max) => snapshot.next_id.max(after_max),
            None => bail!("Snapshot has no submission ids left to assign"),
        };
        if next_id == u64::MAX {
            bail!("Snapshot has no submission ids left to assign");
        }

        let mut submissions = snapshot.submissions;
        submissions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(Self {
            roster,
            submissions,
            next_id,
        })
    }

    pub fn snapshot(&self) -> SubmissionSnapshot {
        SubmissionSnapshot {
            submissions: self.submissions.clone(),
            next_id: self.next_id,
        }
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn is_on_roster(&self, name: &str) -> bool {
        self.roster.iter().any(|n| n == name)
    }

    /// All submissions, most recent date first
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn add_submission(&mut self, new: NewSubmission) -> Result<Submission, SubmissionError> {
        if !self.is_on_roster(&new.participant_name) {
            return Err(SubmissionError::Validation(format!(
                "Unknown participant: {}",
                new.participant_name
            )));
        }

        let duplicate = self
            .submissions
            .iter()
            .any(|s| s.participant_name == new.participant_name && s.date == new.date);
        if duplicate {
            return Err(SubmissionError::DuplicateEntry {
                participant_name: new.participant_name,
                date: new.date,
            });
        }

        let submission = Submission {
            id: self.next_id,
            participant_name: new.participant_name,
            date: new.date,
            step_count: new.step_count,
            proof_reference: new.proof_reference,
            paid: false,
        };
        self.next_id += 1;

        self.submissions.push(submission.clone());
        // Stable: same-day entries keep insertion order
        self.submissions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(submission)
    }

    pub fn update_steps(&mut self, id: u64, new_steps: u64) -> Result<Submission, SubmissionError> {
        let submission = self
            .submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SubmissionError::NotFound(id))?;
        submission.step_count = new_steps;
        Ok(submission.clone())
    }

    pub fn delete_submission(&mut self, id: u64) -> Result<Submission, SubmissionError> {
        let index = self
            .submissions
            .iter()
            .position(|s| s.id == id)
            .ok_or(SubmissionError::NotFound(id))?;
        Ok(self.submissions.remove(index))
    }

    /// Set `paid` on every submission of the participant. Returns how many
    /// submissions were written.
    pub fn set_paid(&mut self, participant_name: &str, paid: bool) -> usize {
        let mut updated = 0;
        for submission in self
            .submissions
            .iter_mut()
            .filter(|s| s.participant_name == participant_name)
        {
            submission.paid = paid;
            updated += 1;
        }
        updated
    }

    pub fn filter(&self, filter: &SubmissionFilter) -> Vec<Submission> {
        self.submissions
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect()
    }
}

/// Shared, persisted access to one [`RecordStore`].
#[derive(Clone)]
pub struct RecordStoreHandle<R: SubmissionStorage> {
    store: Arc<Mutex<RecordStore>>,
    repository: R,
}

impl<R: SubmissionStorage> RecordStoreHandle<R> {
    pub fn new(store: RecordStore, repository: R) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            repository,
        }
    }

    /// Load the saved snapshot (if any) into a store for `roster`.
    pub fn load(roster: Vec<String>, repository: R) -> Result<Self> {
        let store = match repository.load_snapshot()? {
            Some(snapshot) => RecordStore::from_snapshot(roster, snapshot)?,
            None => RecordStore::new(roster),
        };
        Ok(Self::new(store, repository))
    }

    fn lock(&self) -> Result<MutexGuard<'_, RecordStore>> {
        self.store
            .lock()
            .map_err(|_| anyhow!("Record store lock poisoned"))
    }

    /// Run a query against the current state.
    pub fn read<T>(&self, query: impl FnOnce(&RecordStore) -> T) -> Result<T> {
        let store = self.lock()?;
        Ok(query(&*store))
    }

    /// Apply one mutation and save the resulting snapshot.
    ///
    /// If the mutation fails nothing changes. If saving fails the store is
    /// restored to its previous state, so memory never runs ahead of disk.
    pub fn mutate<T>(
        &self,
        command: impl FnOnce(&mut RecordStore) -> Result<T, SubmissionError>,
    ) -> Result<T> {
        let mut store = self.lock()?;
        let previous = store.clone();

        let outcome = command(&mut *store)?;

        if let Err(e) = self.repository.save_snapshot(&store.snapshot()) {
            error!("Failed to save snapshot, rolling back: {:#}", e);
            *store = previous;
            return Err(e);
        }

        Ok(outcome)
    }
}
