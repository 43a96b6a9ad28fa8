use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::StorageSlot;
use crate::error::{Result, StudylogError};

const SLOT_FILE: &str = "entries.json";

/// Durable slot backed by a single JSON file in the user's data
/// directory. `STUDYLOG_HOME` overrides the location.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolve the default slot location: `$STUDYLOG_HOME/entries.json`
    /// when set, otherwise the platform data directory.
    pub fn default_location() -> Result<Self> {
        if let Some(home) = env::var_os("STUDYLOG_HOME") {
            return Ok(Self::new(PathBuf::from(home).join(SLOT_FILE)));
        }
        let dirs = ProjectDirs::from("com", "studylog", "studylog").ok_or_else(|| {
            StudylogError::Store("could not determine a data directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().join(SLOT_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_absent_slot() {
        let temp = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(temp.path().join(SLOT_FILE));
        assert!(slot.read().unwrap().is_none());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(temp.path().join("nested").join("dir").join(SLOT_FILE));

        slot.write("[]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(temp.path().join(SLOT_FILE));

        slot.write("first").unwrap();
        slot.write("second").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("second"));
    }
}
