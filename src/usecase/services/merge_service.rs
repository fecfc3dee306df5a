use crate::domain::entities::session::MergeEntry;
use crate::domain::entities::table::{row_is_blank, Table};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Drop appended rows whose cells are all empty or whitespace.
    pub skip_blank_rows: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub original_rows: usize,
    pub added_rows: usize,
    pub skipped_blank_rows: usize,
    pub merged_files: usize,
}

/// Appends every entry's rows after its first (header) row to `main`, in
/// entry order. The main table's own rows are never touched and column
/// counts are not reconciled.
pub fn merge_into(main: &mut Table, entries: &[MergeEntry], options: MergeOptions) -> MergeReport {
    let original_rows = main.len();
    let mut skipped_blank_rows = 0;

    for entry in entries {
        for row in entry.table.data_rows() {
            if options.skip_blank_rows && row_is_blank(row) {
                skipped_blank_rows += 1;
                continue;
            }
            main.push_row(row.clone());
        }
    }

    MergeReport {
        original_rows,
        added_rows: main.len() - original_rows,
        skipped_blank_rows,
        merged_files: entries.len(),
    }
}
