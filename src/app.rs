use dioxus::prelude::*;
use rfd::{AsyncFileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::domain::entities::notice::{append_capped, Notice};
use crate::infra::fs::sink::DirectorySink;
use crate::platform::desktop::blocking::read_picked_file;
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::sink::FileSink;
use crate::usecase::services::ingest_service::PickedFile;
use crate::usecase::services::merge_service::MergeOptions;
use crate::usecase::services::session_controller::Phase;
use crate::{default_export_dir, ACCEPTED_EXTENSIONS};

const MAX_NOTICES: usize = 30;

#[derive(Clone, Debug, PartialEq)]
struct MainSummary {
    name: String,
    size: String,
    rows: usize,
    columns: usize,
    header: String,
}

#[derive(Clone, Debug, PartialEq)]
struct PendingSummary {
    id: u64,
    name: String,
    byte_size: u64,
    rows: usize,
}

fn format_byte_size(byte_size: u64) -> String {
    if byte_size >= 1024 * 1024 {
        format!("{:.1} MB", byte_size as f64 / (1024.0 * 1024.0))
    } else if byte_size >= 1024 {
        format!("{:.1} KB", byte_size as f64 / 1024.0)
    } else {
        format!("{byte_size} B")
    }
}

#[component]
fn NoticeList(notices: Vec<Notice>) -> Element {
    rsx! {
        div {
            style: "margin-top: 16px; border-top: 1px solid #ddd; padding-top: 8px; max-height: 240px; overflow-y: auto;",
            {notices.iter().rev().map(|notice| {
                let color = notice.level.color();
                let label = notice.level.label();
                let time = notice.time_label();
                let message = notice.message.clone();
                rsx!(
                    div {
                        style: "display: flex; gap: 8px; padding: 2px 0; font-size: 13px;",
                        span { style: "color: #888;", "{time}" }
                        span { style: "color: {color}; font-weight: 600;", "[{label}]" }
                        span { "{message}" }
                    }
                )
            })}
        }
    }
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut controller,
        mut notices,
    } = AppState::new();

    let (busy, merging, status, can_merge, options, main_summary, pending) = {
        let ctrl = controller.read();
        let session = ctrl.session();
        let main_summary = session.main().map(|main| MainSummary {
            name: main.name.clone(),
            size: format_byte_size(main.byte_size),
            rows: main.table.len(),
            columns: main.table.width(),
            header: main
                .table
                .header()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.to_string())
                        .collect::<Vec<_>>()
                        .join("、")
                })
                .unwrap_or_default(),
        });
        let pending = session
            .pending()
            .iter()
            .map(|entry| PendingSummary {
                id: entry.id.0,
                name: entry.name.clone(),
                byte_size: entry.byte_size,
                rows: entry.table.data_rows().len(),
            })
            .collect::<Vec<_>>();
        (
            ctrl.is_busy(),
            matches!(ctrl.phase(), Phase::Merging),
            ctrl.status(),
            ctrl.can_merge(),
            ctrl.options(),
            main_summary,
            pending,
        )
    };
    let pending_count = pending.len();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px 16px;",
            h2 { "Excel 檔案匯總工具" }

            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button {
                    disabled: busy,
                    onclick: move |_| {
                        if controller.read().is_busy() {
                            return;
                        }
                        spawn(async move {
                            let Some(handle) = AsyncFileDialog::new()
                                .add_filter("Excel", &ACCEPTED_EXTENSIONS)
                                .pick_file()
                                .await
                            else {
                                append_capped(&mut notices.write(), [Notice::info("已取消選擇主表")], MAX_NOTICES);
                                return;
                            };
                            let file = PickedFile::from_path(handle.path().to_path_buf());
                            let begin = controller.write().begin_main_read(&file);
                            if let Err(notice) = begin {
                                append_capped(&mut notices.write(), [notice], MAX_NOTICES);
                                return;
                            }
                            let bytes = read_picked_file(&file).await;
                            let notice = controller.write().finish_main_read(&file, bytes);
                            append_capped(&mut notices.write(), [notice], MAX_NOTICES);
                        });
                    },
                    "選擇主表"
                }
                button {
                    disabled: busy,
                    onclick: move |_| {
                        if controller.read().is_busy() {
                            return;
                        }
                        spawn(async move {
                            let Some(handles) = AsyncFileDialog::new()
                                .add_filter("Excel", &ACCEPTED_EXTENSIONS)
                                .pick_files()
                                .await
                            else {
                                append_capped(&mut notices.write(), [Notice::info("已取消加入檔案")], MAX_NOTICES);
                                return;
                            };
                            let files = handles
                                .iter()
                                .map(|handle| PickedFile::from_path(handle.path().to_path_buf()))
                                .collect::<Vec<_>>();
                            if files.is_empty() {
                                return;
                            }
                            let begin = controller.write().begin_merge_read(files.len());
                            if let Err(notice) = begin {
                                append_capped(&mut notices.write(), [notice], MAX_NOTICES);
                                return;
                            }
                            let mut batch = Vec::new();
                            for file in &files {
                                let screened = controller.write().screen_merge_file(file);
                                let outcome = match screened {
                                    Some(skipped) => skipped,
                                    None => {
                                        let bytes = read_picked_file(file).await;
                                        controller.write().accept_merge_file(file, bytes)
                                    }
                                };
                                let stop = outcome.is_failure();
                                batch.extend(outcome.into_notice());
                                if stop {
                                    break;
                                }
                            }
                            batch.extend(controller.write().finish_merge_read());
                            append_capped(&mut notices.write(), batch, MAX_NOTICES);
                        });
                    },
                    "加入待合併檔案"
                }
                button {
                    disabled: busy || pending_count == 0,
                    onclick: move |_| {
                        let cleared = controller.write().clear_merge_entries();
                        append_capped(&mut notices.write(), cleared, MAX_NOTICES);
                    },
                    "清空待合併檔案"
                }
                label {
                    style: "display: inline-flex; align-items: center; gap: 6px;",
                    input {
                        r#type: "checkbox",
                        checked: options.skip_blank_rows,
                        disabled: busy,
                        onclick: move |_| {
                            controller.write().set_options(MergeOptions {
                                skip_blank_rows: !options.skip_blank_rows,
                            });
                        }
                    }
                    span { "略過空白列" }
                }
                button {
                    disabled: !can_merge,
                    onclick: move |_| {
                        if !controller.read().can_merge() {
                            return;
                        }
                        let main = controller
                            .read()
                            .session()
                            .main()
                            .map(|main| (main.name.clone(), main.source_path.clone()));
                        let Some((main_name, main_path)) = main else {
                            return;
                        };
                        let export_dir = match default_export_dir(main_path.as_deref()) {
                            Ok(dir) => dir,
                            Err(err) => {
                                append_capped(
                                    &mut notices.write(),
                                    [Notice::error(format!("合併失敗：{err}"))],
                                    MAX_NOTICES,
                                );
                                return;
                            }
                        };
                        let sink = DirectorySink::new(export_dir);
                        let target = sink.target_path(&main_name);
                        if target.exists() {
                            let overwrite = MessageDialog::new()
                                .set_level(MessageLevel::Warning)
                                .set_title("檔案已存在")
                                .set_description(format!("{} 已存在，確定要覆蓋？", target.display()))
                                .set_buttons(MessageButtons::YesNo)
                                .show();
                            if overwrite != MessageDialogResult::Yes {
                                append_capped(&mut notices.write(), [Notice::info("已取消合併")], MAX_NOTICES);
                                return;
                            }
                        }
                        let begin = controller.write().begin_merge();
                        if let Err(notice) = begin {
                            append_capped(&mut notices.write(), [notice], MAX_NOTICES);
                            return;
                        }
                        spawn(async move {
                            // Let the merging state render before the work runs.
                            tokio::task::yield_now().await;
                            let merged = controller.write().finish_merge(&sink);
                            append_capped(&mut notices.write(), merged, MAX_NOTICES);
                        });
                    },
                    if merging { "合併中..." } else { "合併並儲存主表" }
                }
            }

            div {
                style: "display: flex; gap: 8px; align-items: center; padding: 4px 0; color: #555;",
                if busy {
                    span { "⏳" }
                }
                span { "{status}" }
            }

            section {
                style: "margin-top: 12px;",
                h3 { "主表" }
                if let Some(MainSummary { name, size, rows, columns, header }) = main_summary {
                    div {
                        p { "{name}（{size}）" }
                        p { "共 {rows} 列，{columns} 欄" }
                        if !header.is_empty() {
                            p { style: "color: #666;", "表頭：{header}" }
                        }
                    }
                } else {
                    p { style: "color: #888;", "尚未選擇主表" }
                }
            }

            section {
                style: "margin-top: 12px;",
                h3 { "待合併檔案（{pending_count}）" }
                if pending.is_empty() {
                    p { style: "color: #888;", "尚未加入檔案" }
                } else {
                    table {
                        style: "border-collapse: collapse; min-width: 480px;",
                        thead {
                            tr {
                                th { style: "text-align: left; padding: 4px 8px;", "#" }
                                th { style: "text-align: left; padding: 4px 8px;", "檔名" }
                                th { style: "text-align: right; padding: 4px 8px;", "大小" }
                                th { style: "text-align: right; padding: 4px 8px;", "資料列" }
                                th {}
                            }
                        }
                        tbody {
                            {pending.iter().enumerate().map(|(index, entry)| {
                                let id = entry.id;
                                let name = entry.name.clone();
                                let size = format_byte_size(entry.byte_size);
                                let rows = entry.rows;
                                rsx!(
                                    tr {
                                        key: "{id}",
                                        td { style: "padding: 4px 8px;", "{id}" }
                                        td { style: "padding: 4px 8px;", "{name}" }
                                        td { style: "padding: 4px 8px; text-align: right;", "{size}" }
                                        td { style: "padding: 4px 8px; text-align: right;", "{rows}" }
                                        td {
                                            button {
                                                disabled: busy,
                                                onclick: move |_| {
                                                    let removed = controller.write().remove_merge_entry(index);
                                                    append_capped(&mut notices.write(), removed, MAX_NOTICES);
                                                },
                                                "移除"
                                            }
                                        }
                                    }
                                )
                            })}
                        }
                    }
                }
            }

            NoticeList { notices: notices() }
        }
    }
}
