use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};
use crate::usecase::ports::sink::FileSink;

/// Writes exports into one directory, overwriting same-named files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn target_path(&self, file_name: &str) -> PathBuf {
        // Only the final component; a picked name never carries directories.
        let name = Path::new(file_name)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(file_name));
        self.dir.join(name)
    }

    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.target_path(file_name);
        std::fs::create_dir_all(&self.dir).map_err(|source| MergeError::Save {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, bytes).map_err(|source| MergeError::Save {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
