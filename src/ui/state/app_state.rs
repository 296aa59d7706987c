use std::collections::BTreeSet;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::saved_query::SavedQuery;
use crate::domain::entities::screen::Timeframe;
use crate::domain::pipeline::paginate::PAGE_SIZE;
use crate::usecase::services::query_service::QuerySession;

pub const DEFAULT_RESULT_LIMIT: usize = 100;

pub struct AppState {
    pub session: Signal<QuerySession>,
    pub saved_queries: Signal<Vec<SavedQuery>>,
    pub dataset_label: Signal<Option<String>>,
    pub busy: Signal<bool>,
    pub loading: Signal<bool>,
    pub status: Signal<String>,
    pub search_text: Signal<String>,
    pub timeframe: Signal<Timeframe>,
    pub result_limit: Signal<String>,
    pub show_save_dialog: Signal<bool>,
    pub save_name: Signal<String>,
    pub save_description: Signal<String>,
    pub save_tags: Signal<BTreeSet<String>>,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 { PAGE_SIZE } else { page_size };
        Self {
            session: use_signal(|| QuerySession::new(page_size)),
            saved_queries: use_signal(Vec::<SavedQuery>::new),
            dataset_label: use_signal(|| None::<String>),
            busy: use_signal(|| false),
            loading: use_signal(|| false),
            status: use_signal(|| "就緒".to_string()),
            search_text: use_signal(String::new),
            timeframe: use_signal(|| Timeframe::FiveMin),
            result_limit: use_signal(|| DEFAULT_RESULT_LIMIT.to_string()),
            show_save_dialog: use_signal(|| false),
            save_name: use_signal(String::new),
            save_description: use_signal(String::new),
            save_tags: use_signal(BTreeSet::<String>::new),
        }
    }
}
