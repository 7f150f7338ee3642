use std::cmp::Ordering;

use crate::domain::entities::product::Product;
use crate::domain::entities::query::{PageResult, PageSize, SortCriterion};

/// Filter, sort and slice `full_set` into the page that should be shown.
///
/// Pure: the same arguments always produce the same result. A `page` past the
/// last page (or 0) falls back to page 1.
pub fn compute(
    full_set: &[Product],
    keyword: &str,
    sort: SortCriterion,
    page: usize,
    page_size: PageSize,
) -> PageResult {
    let filtered = filter_by_keyword(full_set, keyword);
    sort_and_paginate(&filtered, sort, page, page_size)
}

/// Sort and slice an already filtered set. `filtered` itself is left untouched.
pub fn sort_and_paginate(
    filtered: &[Product],
    sort: SortCriterion,
    page: usize,
    page_size: PageSize,
) -> PageResult {
    paginate(sort_records(filtered, sort), page, page_size)
}

/// Case-insensitive substring match on the title, keeping input order.
pub fn filter_by_keyword(records: &[Product], keyword: &str) -> Vec<Product> {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Returns a sorted copy. `sort_by` is stable, so equal keys keep input order.
pub fn sort_records(records: &[Product], sort: SortCriterion) -> Vec<Product> {
    let mut sorted = records.to_vec();
    match sort {
        SortCriterion::PriceAsc => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortCriterion::PriceDesc => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortCriterion::NameAsc => sorted.sort_by(|a, b| locale_compare(&a.title, &b.title)),
        SortCriterion::NameDesc => sorted.sort_by(|a, b| locale_compare(&b.title, &a.title)),
        SortCriterion::Default => sorted.sort_by_key(|product| product.id),
    }
    sorted
}

pub fn total_pages(count: usize, page_size: PageSize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

pub fn paginate(sorted: Vec<Product>, page: usize, page_size: PageSize) -> PageResult {
    let count = sorted.len();
    if count == 0 {
        return PageResult::empty();
    }

    let total_pages = total_pages(count, page_size);
    let page = if page == 0 || page > total_pages {
        1
    } else {
        page
    };
    let start = (page - 1) * page_size.get();
    let rows = sorted
        .into_iter()
        .skip(start)
        .take(page_size.get())
        .collect();

    PageResult {
        rows,
        page,
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}

/// Alphabetic comparison in the spirit of a locale collator: letters compare
/// case-insensitively first, and only when the texts are otherwise equal does
/// case decide, lower case first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);

    folded_a.cmp(folded_b).then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(left, right)| left != right)
            .map_or_else(
                || a.chars().count().cmp(&b.chars().count()),
                |(left, right)| match (left.is_lowercase(), right.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => left.cmp(&right),
                },
            )
    })
}
