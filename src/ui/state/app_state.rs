use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::query::{PageResult, PageSize, SortCriterion};
use crate::ui::state::view_state::ViewState;

pub const STATUS_IDLE: &str = "就緒";

pub struct AppState {
    pub view: Signal<ViewState>,
    pub result: Signal<PageResult>,
    pub keyword: Signal<String>,
    pub sort: Signal<SortCriterion>,
    pub page_size_input: Signal<String>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            view: use_signal(|| ViewState::new(page_size)),
            result: use_signal(PageResult::empty),
            keyword: use_signal(String::new),
            sort: use_signal(SortCriterion::default),
            page_size_input: use_signal(|| page_size.to_string()),
            busy: use_signal(|| false),
            status: use_signal(|| STATUS_IDLE.to_string()),
        }
    }
}
