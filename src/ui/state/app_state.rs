use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::notice::Notice;
use crate::infra::codec::xlsx::XlsxCodec;
use crate::usecase::services::session_controller::SessionController;

pub struct AppState {
    pub controller: Signal<SessionController>,
    pub notices: Signal<Vec<Notice>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            controller: use_signal(|| SessionController::new(Arc::new(XlsxCodec))),
            notices: use_signal(Vec::<Notice>::new),
        }
    }
}
