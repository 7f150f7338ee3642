use tracing::{debug, warn};

use crate::domain::entities::product::Product;
use crate::domain::entities::query::{PageResult, PageSize, SortCriterion};
use crate::usecase::services::query_pipeline::{compute, filter_by_keyword, total_pages};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    InvalidPageSize(String),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::InvalidPageSize(raw) => {
                write!(f, "page size must be a positive integer, got {raw:?}")
            }
        }
    }
}

impl std::error::Error for ViewError {}

/// Session state of the catalog view. Every transition re-runs the pipeline
/// and returns what should be rendered next; `page` is kept within
/// `1..=max(1, ceil(filtered / page_size))` by every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    full_set: Vec<Product>,
    filtered_set: Vec<Product>,
    keyword: String,
    page: usize,
    page_size: PageSize,
    sort: SortCriterion,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            full_set: Vec::new(),
            filtered_set: Vec::new(),
            keyword: String::new(),
            page: 1,
            page_size,
            sort: SortCriterion::Default,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_set.len(), self.page_size)
    }

    /// Installs the loaded catalog. A keyword typed before loading finished
    /// still applies.
    pub fn set_full_set(&mut self, records: Vec<Product>) -> PageResult {
        self.full_set = records;
        self.filtered_set = filter_by_keyword(&self.full_set, &self.keyword);
        self.page = 1;
        debug!(
            total = self.full_set.len(),
            matched = self.filtered_set.len(),
            "catalog installed"
        );
        self.render()
    }

    pub fn set_keyword(&mut self, text: &str) -> PageResult {
        self.keyword = text.to_string();
        self.filtered_set = filter_by_keyword(&self.full_set, &self.keyword);
        self.page = 1;
        debug!(keyword = %self.keyword, matched = self.filtered_set.len(), "keyword changed");
        self.render()
    }

    pub fn set_sort_criterion(&mut self, sort: SortCriterion) -> PageResult {
        self.sort = sort;
        self.page = 1;
        debug!(%sort, "sort criterion changed");
        self.render()
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> PageResult {
        self.page_size = page_size;
        self.page = 1;
        debug!(%page_size, "page size changed");
        self.render()
    }

    /// Raw page-size input from the UI. Anything that is not a positive
    /// integer is rejected and the current page size stays in effect.
    pub fn apply_page_size_input(&mut self, raw: &str) -> Result<PageResult, ViewError> {
        match PageSize::parse(raw) {
            Some(page_size) => Ok(self.set_page_size(page_size)),
            None => {
                warn!(value = %raw, kept = %self.page_size, "rejected page size input");
                Err(ViewError::InvalidPageSize(raw.to_string()))
            }
        }
    }

    pub fn go_to_prev_page(&mut self) -> PageResult {
        if self.page > 1 {
            self.page -= 1;
        }
        self.render()
    }

    pub fn go_to_next_page(&mut self) -> PageResult {
        if self.page < self.total_pages() {
            self.page += 1;
        }
        self.render()
    }

    /// Pipeline output for the current state, without changing anything the
    /// user chose.
    pub fn render(&mut self) -> PageResult {
        let result = compute(
            &self.full_set,
            &self.keyword,
            self.sort,
            self.page,
            self.page_size,
        );
        self.page = result.page;
        result
    }
}

#[allow(dead_code)]
impl ViewState {
    pub fn full_set(&self) -> &[Product] {
        &self.full_set
    }

    pub fn filtered_set(&self) -> &[Product] {
        &self.filtered_set
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn sort_criterion(&self) -> SortCriterion {
        self.sort
    }
}
