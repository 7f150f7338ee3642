use std::fmt;

use crate::domain::entities::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortCriterion {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 5] = [
        SortCriterion::Default,
        SortCriterion::PriceAsc,
        SortCriterion::PriceDesc,
        SortCriterion::NameAsc,
        SortCriterion::NameDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortCriterion::Default => "default",
            SortCriterion::PriceAsc => "price-asc",
            SortCriterion::PriceDesc => "price-desc",
            SortCriterion::NameAsc => "name-asc",
            SortCriterion::NameDesc => "name-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortCriterion::Default => "預設（編號）",
            SortCriterion::PriceAsc => "價格：低到高",
            SortCriterion::PriceDesc => "價格：高到低",
            SortCriterion::NameAsc => "名稱：A-Z",
            SortCriterion::NameDesc => "名稱：Z-A",
        }
    }

    /// Unknown values map to `Default`, the same way an unmatched select
    /// value falls through to ordering by id.
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|criterion| criterion.as_str() == value.trim())
            .unwrap_or_default()
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows per page. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(usize);

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(10);

    pub fn new(value: usize) -> Option<Self> {
        (value > 0).then_some(PageSize(value))
    }

    /// Accepts only a plain positive integer, e.g. the value of a select box.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<usize>().ok().and_then(Self::new)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of one pipeline run, ready for rendering.
///
/// `total_pages` is 0 only when nothing matched; that is the empty-state
/// signal, while `page` stays 1 in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub rows: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageResult {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            page: 1,
            total_pages: 0,
            has_prev: false,
            has_next: false,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        self.rows.is_empty() && self.total_pages == 0
    }
}
