use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn label(self) -> &'static str {
        match self {
            NoticeLevel::Success => "成功",
            NoticeLevel::Info => "訊息",
            NoticeLevel::Warning => "警告",
            NoticeLevel::Error => "錯誤",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            NoticeLevel::Success => "#1a7f37",
            NoticeLevel::Info => "#0969da",
            NoticeLevel::Warning => "#9a6700",
            NoticeLevel::Error => "#cf222e",
        }
    }
}

/// A user-facing outcome message. Presentation only.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Local::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn time_label(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// Appends `new` and drops the oldest entries beyond `cap`.
pub fn append_capped(list: &mut Vec<Notice>, new: impl IntoIterator<Item = Notice>, cap: usize) {
    list.extend(new);
    if list.len() > cap {
        let excess = list.len() - cap;
        list.drain(..excess);
    }
}
