use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::table::Table;
use crate::error::Result;
use crate::usecase::ports::codec::TabularCodec;
use crate::usecase::ports::sink::FileSink;
use crate::EXPORT_SHEET_LABEL;

pub struct ExportService {
    codec: Arc<dyn TabularCodec>,
}

impl ExportService {
    pub fn new(codec: Arc<dyn TabularCodec>) -> Self {
        Self { codec }
    }

    /// Encodes `table` as a single sheet and saves it as exactly `file_name`.
    pub fn export(&self, table: &Table, file_name: &str, sink: &dyn FileSink) -> Result<PathBuf> {
        let bytes = self.codec.encode(table, EXPORT_SHEET_LABEL)?;
        sink.save(file_name, &bytes)
    }
}
