use crate::domain::entities::table::Table;
use crate::error::Result;

/// Spreadsheet bytes <-> rows. Decoding reads the first sheet only and keeps
/// every row, header included.
pub trait TabularCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Table>;

    /// Produces a single-sheet workbook whose sheet is named `sheet_label`.
    fn encode(&self, table: &Table, sheet_label: &str) -> Result<Vec<u8>>;
}
