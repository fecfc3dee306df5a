use std::path::PathBuf;

use crate::error::Result;

/// Destination for exported workbooks.
pub trait FileSink {
    /// Where `save` would write `file_name`.
    fn target_path(&self, file_name: &str) -> PathBuf;

    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}
