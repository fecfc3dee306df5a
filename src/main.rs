use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use dioxus::logger::tracing::Level;
use directories::{ProjectDirs, UserDirs};

mod app;
mod error;

mod domain {
    pub mod entities {
        pub mod notice;
        pub mod session;
        pub mod table;
    }
}

mod usecase {
    pub mod ports {
        pub mod codec;
        pub mod sink;
    }
    pub mod services {
        pub mod export_service;
        pub mod ingest_service;
        pub mod merge_service;
        pub mod session_controller;
    }
}

mod infra {
    pub mod codec {
        pub mod xlsx;
    }
    pub mod fs {
        pub mod sink;
    }
}

mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}

mod ui {
    pub mod state {
        pub mod app_state;
    }
}


const WINDOW_TITLE: &str = "Excel 合併工具";
const EXPORT_SHEET_LABEL: &str = "合併資料";
const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
const ACCEPTED_MIME_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

fn main() {
    dioxus::logger::init(Level::INFO).expect("should initialize logger");

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title(WINDOW_TITLE))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "excel-merge")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// Exports land where a browser download would: the user's download
/// directory, or next to the main file when there is none.
fn default_export_dir(main_file: Option<&Path>) -> Result<PathBuf> {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .or_else(|| {
            main_file
                .and_then(Path::parent)
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .ok_or_else(|| anyhow!("unable to resolve an export directory"))
}
