use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};

use super::connection::JsonConnection;
use crate::backend::domain::models::submission::SubmissionSnapshot;
use crate::backend::storage::traits::SubmissionStorage;

/// JSON-file submission repository
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    connection: JsonConnection,
}

impl SubmissionRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SubmissionStorage for SubmissionRepository {
    fn load_snapshot(&self) -> Result<Option<SubmissionSnapshot>> {
        let file_path = self.connection.submissions_file_path();
        if !file_path.exists() {
            info!("No snapshot at {}, starting empty", file_path.display());
            return Ok(None);
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let snapshot: SubmissionSnapshot = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", file_path.display()))?;

        info!(
            "Loaded {} submissions (next id {}) from {}",
            snapshot.submissions.len(),
            snapshot.next_id,
            file_path.display()
        );
        Ok(Some(snapshot))
    }

    fn save_snapshot(&self, snapshot: &SubmissionSnapshot) -> Result<()> {
        let file_path = self.connection.submissions_file_path();

        // Write next to the target, then rename over it
        let temp_path = file_path.with_extension("tmp");
        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        debug!(
            "Saved {} submissions to {}",
            snapshot.submissions.len(),
            file_path.display()
        );
        Ok(())
    }
}
