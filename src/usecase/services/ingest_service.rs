use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::table::Table;
use crate::error::{MergeError, Result};
use crate::usecase::ports::codec::TabularCodec;
use crate::{ACCEPTED_EXTENSIONS, ACCEPTED_MIME_TYPES};

/// A file chosen by the user, before its bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
    /// Size reported by the filesystem, when known ahead of the read.
    pub byte_size: Option<u64>,
    pub mime: Option<String>,
}

impl PickedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let byte_size = std::fs::metadata(&path).ok().map(|meta| meta.len());
        Self {
            name,
            path,
            byte_size,
            mime: None,
        }
    }
}

pub fn is_supported_spreadsheet(name: &str, mime: Option<&str>) -> bool {
    if mime.is_some_and(|mime| ACCEPTED_MIME_TYPES.contains(&mime)) {
        return true;
    }
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

pub struct IngestService {
    codec: Arc<dyn TabularCodec>,
}

impl IngestService {
    pub fn new(codec: Arc<dyn TabularCodec>) -> Self {
        Self { codec }
    }

    pub fn check_file_type(&self, file: &PickedFile) -> Result<()> {
        if is_supported_spreadsheet(&file.name, file.mime.as_deref()) {
            Ok(())
        } else {
            Err(MergeError::UnsupportedFileType {
                name: file.name.clone(),
            })
        }
    }

    pub fn ingest(&self, bytes: &[u8]) -> Result<Table> {
        self.codec.decode(bytes)
    }

    /// Turns the outcome of one read into `(byte_size, table)`.
    pub fn ingest_file(
        &self,
        file: &PickedFile,
        bytes: std::io::Result<Vec<u8>>,
    ) -> Result<(u64, Table)> {
        let bytes = bytes.map_err(|source| MergeError::Read {
            name: file.name.clone(),
            source,
        })?;
        let table = self.ingest(&bytes)?;
        Ok((bytes.len() as u64, table))
    }
}
