use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::submission_repository::SubmissionRepository;
use crate::backend::storage::traits::Connection;

/// JsonConnection owns the data directory that holds the snapshot file
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn submissions_file_path(&self) -> PathBuf {
        self.base_directory.join("submissions.json")
    }
}

impl Connection for JsonConnection {
    type SubmissionRepository = SubmissionRepository;

    fn create_submission_repository(&self) -> Self::SubmissionRepository {
        SubmissionRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let connection = JsonConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(connection.submissions_file_path(), nested.join("submissions.json"));
    }
}
