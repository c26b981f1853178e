//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on, so the snapshot can be
//! kept in any backend without touching the services.

use anyhow::Result;

use crate::backend::domain::models::submission::SubmissionSnapshot;

/// Persistence for the full submission collection.
///
/// The record store is small, so it is always saved and loaded as a single
/// snapshot rather than incrementally.
pub trait SubmissionStorage: Send + Sync {
    /// Load the last saved snapshot, or `None` if nothing was saved yet
    fn load_snapshot(&self) -> Result<Option<SubmissionSnapshot>>;

    /// Replace the stored snapshot
    fn save_snapshot(&self, snapshot: &SubmissionSnapshot) -> Result<()>;
}

/// A storage connection that hands out repositories.
pub trait Connection: Send + Sync + Clone {
    type SubmissionRepository: SubmissionStorage + Clone + 'static;

    fn create_submission_repository(&self) -> Self::SubmissionRepository;
}
