use crate::domain::entities::query::PageResult;
use crate::usecase::services::image_resolver::ImageUrlResolver;

pub const CATEGORY_MISSING: &str = "N/A";
pub const EMPTY_STATE_MESSAGE: &str = "找不到符合的商品";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub key: i64,
    pub id_label: String,
    pub image_url: String,
    pub title: String,
    pub price_label: String,
    pub category_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub rows: Vec<ProductRow>,
    pub page_label: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub is_empty: bool,
}

pub fn present(result: &PageResult, resolver: &ImageUrlResolver, currency: &str) -> PageView {
    if result.is_empty_state() {
        return PageView {
            rows: Vec::new(),
            page_label: "0 / 0".to_string(),
            prev_enabled: false,
            next_enabled: false,
            is_empty: true,
        };
    }

    let rows = result
        .rows
        .iter()
        .map(|product| ProductRow {
            key: product.id.0,
            id_label: format!("#{}", product.id.0),
            image_url: resolver.resolve(product.first_image()),
            title: product.title.clone(),
            price_label: format!("{currency}{}", format_price(product.price)),
            category_label: product
                .category_name()
                .unwrap_or(CATEGORY_MISSING)
                .to_string(),
        })
        .collect();

    PageView {
        rows,
        page_label: format!("{} / {}", result.page, result.total_pages),
        prev_enabled: result.has_prev,
        next_enabled: result.has_next,
        is_empty: false,
    }
}

/// Whole prices print without a fraction ("10", not "10.0").
pub fn format_price(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
