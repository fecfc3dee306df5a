use std::sync::Arc;

use dioxus::logger::tracing::{error, info, warn};

use crate::domain::entities::notice::Notice;
use crate::domain::entities::session::{MainFile, MergeEntryId, SessionState};
use crate::error::{MergeError, Result};
use crate::usecase::ports::codec::TabularCodec;
use crate::usecase::ports::sink::FileSink;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::ingest_service::{IngestService, PickedFile};
use crate::usecase::services::merge_service::{merge_into, MergeOptions};

const IDLE_STATUS: &str = "就緒";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ReadingMain { name: String },
    ReadingMerge { total: usize, done: usize, added: usize },
    Merging,
}

#[derive(Debug)]
pub enum MergeFileOutcome {
    Added(MergeEntryId),
    /// Unsupported or duplicate; the remaining files are still processed.
    Skipped(Notice),
    /// Read or decode failure; the remaining files are not processed.
    Failed(Notice),
}

impl MergeFileOutcome {
    /// A failure stops the rest of the batch.
    pub fn is_failure(&self) -> bool {
        matches!(self, MergeFileOutcome::Failed(_))
    }

    pub fn into_notice(self) -> Option<Notice> {
        match self {
            MergeFileOutcome::Added(_) => None,
            MergeFileOutcome::Skipped(notice) | MergeFileOutcome::Failed(notice) => Some(notice),
        }
    }
}

/// Owns the session and enforces one operation at a time: every operation
/// starts from `Phase::Idle` and returns there when it finishes.
pub struct SessionController {
    session: SessionState,
    phase: Phase,
    ingest: IngestService,
    export: ExportService,
    options: MergeOptions,
    last_status: String,
}

impl SessionController {
    pub fn new(codec: Arc<dyn TabularCodec>) -> Self {
        Self {
            session: SessionState::new(),
            phase: Phase::Idle,
            ingest: IngestService::new(codec.clone()),
            export: ExportService::new(codec),
            options: MergeOptions::default(),
            last_status: IDLE_STATUS.to_string(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn can_merge(&self) -> bool {
        !self.is_busy() && self.session.can_merge()
    }

    pub fn options(&self) -> MergeOptions {
        self.options
    }

    pub fn set_options(&mut self, options: MergeOptions) {
        self.options = options;
    }

    pub fn status(&self) -> String {
        match &self.phase {
            Phase::Idle => self.last_status.clone(),
            Phase::ReadingMain { name } => format!("正在讀取主表檔案 {name}..."),
            Phase::ReadingMerge { total, done, .. } => {
                format!("正在讀取 {total} 個檔案（{done}/{total}）...")
            }
            Phase::Merging => "正在合併到主表檔案...".to_string(),
        }
    }

    fn start(&mut self, next: Phase) -> Result<()> {
        if self.is_busy() {
            warn!(current = ?self.phase, requested = ?next, "operation rejected while busy");
            return Err(MergeError::Busy);
        }
        info!(phase = ?next, "operation started");
        self.phase = next;
        Ok(())
    }

    fn finish(&mut self, status: impl Into<String>) {
        self.phase = Phase::Idle;
        self.last_status = status.into();
    }

    pub fn begin_main_read(&mut self, file: &PickedFile) -> std::result::Result<(), Notice> {
        if let Err(err) = self.ingest.check_file_type(file) {
            warn!(file = %file.name, "main file rejected: {err}");
            return Err(Notice::error(format!(
                "只能選擇 Excel 檔案（.xlsx/.xls）：{}",
                file.name
            )));
        }
        self.start(Phase::ReadingMain {
            name: file.name.clone(),
        })
        .map_err(|err| Notice::warning(format!("無法讀取主表：{err}")))
    }

    pub fn finish_main_read(
        &mut self,
        file: &PickedFile,
        bytes: std::io::Result<Vec<u8>>,
    ) -> Notice {
        match self.ingest.ingest_file(file, bytes) {
            Ok((byte_size, table)) => {
                info!(file = %file.name, rows = table.len(), "main file loaded");
                let rows = table.len();
                self.session.set_main(MainFile {
                    name: file.name.clone(),
                    byte_size,
                    source_path: Some(file.path.clone()),
                    table,
                });
                self.finish(format!("已載入主表 {}（{rows} 列）", file.name));
                Notice::success("主表檔案讀取成功！")
            }
            Err(err) => {
                error!(file = %file.name, "failed to load main file: {err}");
                self.finish(format!("讀取主表失敗：{}", file.name));
                Notice::error(format!("讀取主表檔案失敗：{err}"))
            }
        }
    }

    pub fn begin_merge_read(&mut self, total: usize) -> std::result::Result<(), Notice> {
        self.start(Phase::ReadingMerge {
            total,
            done: 0,
            added: 0,
        })
        .map_err(|err| Notice::warning(format!("無法加入檔案：{err}")))
    }

    /// Checks type and (name, size) before any read. `Some` means the file
    /// was skipped and already counted toward batch progress.
    pub fn screen_merge_file(&mut self, file: &PickedFile) -> Option<MergeFileOutcome> {
        let notice = if let Err(err) = self.ingest.check_file_type(file) {
            warn!(file = %file.name, "merge file rejected: {err}");
            Notice::error(format!("只能上傳 Excel 檔案（.xlsx/.xls）：{}", file.name))
        } else {
            let byte_size = file.byte_size?;
            if !self.session.contains_merge_entry(&file.name, byte_size) {
                return None;
            }
            warn!(file = %file.name, byte_size, "merge file already added, skipping");
            Notice::warning(format!("檔案 {} 已存在，略過...", file.name))
        };
        let outcome = MergeFileOutcome::Skipped(notice);
        self.advance_batch(&outcome);
        Some(outcome)
    }

    /// Decodes the bytes of a screened file and adds it to the pending list.
    pub fn accept_merge_file(
        &mut self,
        file: &PickedFile,
        bytes: std::io::Result<Vec<u8>>,
    ) -> MergeFileOutcome {
        let outcome = self.decode_and_add(file, bytes);
        self.advance_batch(&outcome);
        outcome
    }

    fn advance_batch(&mut self, outcome: &MergeFileOutcome) {
        if let Phase::ReadingMerge { done, added, .. } = &mut self.phase {
            *done += 1;
            if matches!(outcome, MergeFileOutcome::Added(_)) {
                *added += 1;
            }
        }
    }

    fn decode_and_add(
        &mut self,
        file: &PickedFile,
        bytes: std::io::Result<Vec<u8>>,
    ) -> MergeFileOutcome {
        let (byte_size, table) = match self.ingest.ingest_file(file, bytes) {
            Ok(ingested) => ingested,
            Err(err) => {
                error!(file = %file.name, "failed to load merge file: {err}");
                return MergeFileOutcome::Failed(Notice::error(format!(
                    "讀取檔案 {} 失敗：{err}",
                    file.name
                )));
            }
        };

        let rows = table.len();
        match self
            .session
            .add_merge_entry(file.name.clone(), byte_size, table)
        {
            Ok(id) => {
                info!(file = %file.name, id = id.0, rows, "merge file added");
                MergeFileOutcome::Added(id)
            }
            Err(err) => {
                warn!(file = %file.name, "{err}");
                MergeFileOutcome::Skipped(Notice::warning(format!(
                    "檔案 {} 已存在，略過...",
                    file.name
                )))
            }
        }
    }

    pub fn finish_merge_read(&mut self) -> Option<Notice> {
        let (total, added) = match self.phase {
            Phase::ReadingMerge { total, added, .. } => (total, added),
            _ => return None,
        };
        let pending = self.session.pending().len();
        self.finish(format!("待合併檔案 {pending} 個"));
        info!(total, added, pending, "merge file batch finished");
        (added > 0).then(|| Notice::success(format!("成功添加 {added} 個檔案！")))
    }

    /// Out-of-range indexes and busy phases are ignored.
    pub fn remove_merge_entry(&mut self, index: usize) -> Option<Notice> {
        if self.is_busy() {
            warn!(index, "remove ignored while busy");
            return None;
        }
        let removed = self.session.remove_merge_entry(index)?;
        info!(file = %removed.name, id = removed.id.0, "merge file removed");
        self.last_status = format!("待合併檔案 {} 個", self.session.pending().len());
        Some(Notice::info(format!("檔案已移除：{}", removed.name)))
    }

    pub fn clear_merge_entries(&mut self) -> Option<Notice> {
        if self.is_busy() || self.session.pending().is_empty() {
            return None;
        }
        let count = self.session.pending().len();
        self.session.clear_merge_entries();
        info!(count, "merge files cleared");
        self.last_status = IDLE_STATUS.to_string();
        Some(Notice::info(format!("已清空 {count} 個待合併檔案")))
    }

    pub fn begin_merge(&mut self) -> std::result::Result<(), Notice> {
        if !self.session.can_merge() {
            return Err(Notice::warning(format!("無法合併：{}", MergeError::NotReady)));
        }
        self.start(Phase::Merging)
            .map_err(|err| Notice::warning(format!("無法合併：{err}")))
    }

    /// Appends pending rows to the main table, then saves it through `sink`
    /// under the main file's name. Pending entries are cleared only after a
    /// successful save; on failure the appended rows stay in the main table.
    pub fn finish_merge(&mut self, sink: &dyn FileSink) -> Vec<Notice> {
        if self.phase != Phase::Merging {
            return vec![Notice::warning(format!("無法合併：{}", MergeError::NotReady))];
        }

        let options = self.options;
        let Some((main, pending)) = self.session.main_and_pending_mut() else {
            self.finish(IDLE_STATUS);
            return vec![Notice::warning(format!("無法合併：{}", MergeError::NotReady))];
        };
        let report = merge_into(&mut main.table, pending, options);
        info!(
            files = report.merged_files,
            original = report.original_rows,
            added = report.added_rows,
            skipped_blank = report.skipped_blank_rows,
            total = main.table.len(),
            "pending rows appended to main table"
        );

        let file_name = main.name.clone();
        match self.export.export(&main.table, &file_name, sink) {
            Ok(path) => {
                info!(path = %path.display(), "main file exported");
                self.session.clear_merge_entries();
                let mut message = format!(
                    "合併完成！已直接添加 {} 行資料到主表檔案中",
                    report.added_rows
                );
                if report.skipped_blank_rows > 0 {
                    message.push_str(&format!(
                        "（略過空白列 {} 行）",
                        report.skipped_blank_rows
                    ));
                }
                self.finish(format!("主表檔案已更新：{}", path.display()));
                let mut notices = vec![
                    Notice::success(format!("主表檔案已更新：{}", path.display())),
                    Notice::success(message),
                ];
                if has_xls_extension(&file_name) {
                    warn!(file = %file_name, "legacy .xls name written with xlsx content");
                    notices.push(Notice::warning(format!(
                        "{file_name} 以 xlsx 格式寫入，Excel 開啟時可能提示副檔名不符"
                    )));
                }
                notices
            }
            Err(err) => {
                error!(file = %file_name, "export failed after merge: {err}");
                self.finish(format!("合併失敗：{file_name}"));
                vec![Notice::error(format!("合併失敗：{err}"))]
            }
        }
    }
}

fn has_xls_extension(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xls"))
}
