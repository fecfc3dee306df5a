use std::path::PathBuf;

use crate::domain::entities::table::Table;
use crate::error::{MergeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergeEntryId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct MainFile {
    pub name: String,
    pub byte_size: u64,
    pub source_path: Option<PathBuf>,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeEntry {
    pub id: MergeEntryId,
    pub name: String,
    pub byte_size: u64,
    pub table: Table,
}

/// The single main table plus the pending merge entries, in insertion order.
#[derive(Debug, Default)]
pub struct SessionState {
    main: Option<MainFile>,
    pending: Vec<MergeEntry>,
    last_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main(&self) -> Option<&MainFile> {
        self.main.as_ref()
    }

    pub fn pending(&self) -> &[MergeEntry] {
        &self.pending
    }

    /// Replaces any previously loaded main file.
    pub fn set_main(&mut self, main: MainFile) {
        self.main = Some(main);
    }

    pub fn contains_merge_entry(&self, name: &str, byte_size: u64) -> bool {
        self.pending
            .iter()
            .any(|entry| entry.name == name && entry.byte_size == byte_size)
    }

    pub fn add_merge_entry(
        &mut self,
        name: String,
        byte_size: u64,
        table: Table,
    ) -> Result<MergeEntryId> {
        if self.contains_merge_entry(&name, byte_size) {
            return Err(MergeError::DuplicateFile { name, byte_size });
        }

        self.last_id += 1;
        let id = MergeEntryId(self.last_id);
        self.pending.push(MergeEntry {
            id,
            name,
            byte_size,
            table,
        });
        Ok(id)
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_merge_entry(&mut self, index: usize) -> Option<MergeEntry> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    pub fn clear_merge_entries(&mut self) {
        self.pending.clear();
    }

    pub fn can_merge(&self) -> bool {
        self.main.is_some() && !self.pending.is_empty()
    }

    /// Split borrow used by the merge step: the main file mutably, the
    /// pending entries shared. `None` unless `can_merge`.
    pub fn main_and_pending_mut(&mut self) -> Option<(&mut MainFile, &[MergeEntry])> {
        if self.pending.is_empty() {
            return None;
        }
        let main = self.main.as_mut()?;
        Some((main, &self.pending))
    }
}
