//! Temporary-directory test environment, removed when dropped even if a
//! test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;

pub struct TestEnvironment {
    pub connection: JsonConnection,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            _temp_dir: temp_dir,
        })
    }
}
