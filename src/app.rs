use chrono::Local;
use dioxus::prelude::*;
use tracing::error;

use crate::config::AppConfig;
use crate::domain::entities::query::SortCriterion;
use crate::infra::source::ConfiguredSource;
use crate::ui::presenter::{present, ProductRow, EMPTY_STATE_MESSAGE};
use crate::ui::state::app_state::{AppState, STATUS_IDLE};
use crate::usecase::services::catalog_service::load_catalog;

const CELL_STYLE: &str = "border-bottom: 1px solid #eee; padding: 8px 10px; text-align: left;";
const HEADER_STYLE: &str =
    "border-bottom: 2px solid #ccc; padding: 8px 10px; text-align: left; background: #fafafa;";
const CONTROL_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px;";

#[component]
fn ProductImage(src: String, fallback: String, alt: String) -> Element {
    let mut failed = use_signal(|| false);
    let shown = if failed() { fallback.clone() } else { src.clone() };

    rsx! {
        img {
            src: "{shown}",
            alt: "{alt}",
            "referrerpolicy": "no-referrer",
            style: "width: 56px; height: 56px; object-fit: cover; border-radius: 6px;",
            onerror: move |_| {
                if !failed() {
                    failed.set(true);
                }
            },
        }
    }
}

#[component]
fn ProductTableRow(row: ProductRow, fallback: String) -> Element {
    rsx! {
        tr {
            td { style: CELL_STYLE, "{row.id_label}" }
            td { style: CELL_STYLE,
                ProductImage {
                    src: row.image_url.clone(),
                    fallback: fallback.clone(),
                    alt: row.title.clone(),
                }
            }
            td { style: CELL_STYLE, "{row.title}" }
            td { style: "{CELL_STYLE} color: #c0392b; font-weight: 600;", "{row.price_label}" }
            td { style: CELL_STYLE, "{row.category_label}" }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::load);

    let AppState {
        mut view,
        mut result,
        mut keyword,
        mut sort,
        mut page_size_input,
        mut busy,
        mut status,
    } = AppState::new(config.page_size());

    let resolver = use_hook(|| config.image_resolver());
    let fallback_image = resolver.fallback().to_string();
    let currency = config.currency_symbol.clone();
    let page_size_options = config.page_size_options.clone();

    let config_for_load = config.clone();
    use_future(move || {
        let config = config_for_load.clone();
        async move {
            busy.set(true);
            status.set("正在載入商品資料…".to_string());

            let loaded = match ConfiguredSource::from_config(&config) {
                Ok(source) => load_catalog(&source).await,
                Err(err) => {
                    error!(error = %err, "failed to prepare product source");
                    Err(err)
                }
            };

            match loaded {
                Ok(products) => {
                    let count = products.len();
                    let next = view.write().set_full_set(products);
                    result.set(next);
                    status.set(format!(
                        "已載入 {count} 筆商品（{}）",
                        Local::now().format("%H:%M:%S")
                    ));
                }
                Err(_) => {
                    // Already logged; the table stays in its empty state.
                    status.set(STATUS_IDLE.to_string());
                }
            }
            busy.set(false);
        }
    });

    let page_view = present(&result(), &resolver, &currency);

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 16px;",
            h2 { "商品目錄" }

            div { style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; margin-bottom: 12px;",
                input {
                    style: "{CONTROL_STYLE} min-width: 240px;",
                    r#type: "text",
                    placeholder: "搜尋商品名稱…",
                    value: "{keyword}",
                    oninput: move |event| {
                        let text = event.value();
                        keyword.set(text.clone());
                        let next = view.write().set_keyword(&text);
                        result.set(next);
                    },
                }

                label { style: "display: inline-flex; align-items: center; gap: 6px;",
                    span { "排序" }
                    select {
                        style: CONTROL_STYLE,
                        value: "{sort().as_str()}",
                        onchange: move |event| {
                            let criterion = SortCriterion::parse(&event.value());
                            sort.set(criterion);
                            let next = view.write().set_sort_criterion(criterion);
                            result.set(next);
                        },
                        for criterion in SortCriterion::ALL {
                            option {
                                value: "{criterion.as_str()}",
                                selected: sort() == criterion,
                                "{criterion.label()}"
                            }
                        }
                    }
                }

                label { style: "display: inline-flex; align-items: center; gap: 6px;",
                    span { "每頁筆數" }
                    select {
                        style: CONTROL_STYLE,
                        value: "{page_size_input}",
                        onchange: move |event| {
                            let raw = event.value();
                            let outcome = view.write().apply_page_size_input(&raw);
                            match outcome {
                                Ok(next) => {
                                    page_size_input.set(raw);
                                    result.set(next);
                                }
                                Err(_) => {
                                    let kept = view.read().page_size().to_string();
                                    page_size_input.set(kept);
                                }
                            }
                        },
                        for size in page_size_options.iter().copied() {
                            option {
                                value: "{size}",
                                selected: page_size_input() == size.to_string(),
                                "{size}"
                            }
                        }
                    }
                }

                if busy() {
                    span { style: "color: #888;", "載入中…" }
                }
            }

            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        th { style: HEADER_STYLE, "編號" }
                        th { style: HEADER_STYLE, "圖片" }
                        th { style: HEADER_STYLE, "名稱" }
                        th { style: HEADER_STYLE, "價格" }
                        th { style: HEADER_STYLE, "分類" }
                    }
                }
                tbody {
                    if page_view.is_empty {
                        tr {
                            td {
                                colspan: "5",
                                style: "text-align: center; padding: 24px; color: #888;",
                                "{EMPTY_STATE_MESSAGE}"
                            }
                        }
                    } else {
                        for row in page_view.rows.iter().cloned() {
                            ProductTableRow {
                                key: "{row.key}",
                                row: row,
                                fallback: fallback_image.clone(),
                            }
                        }
                    }
                }
            }

            div { style: "display: flex; gap: 8px; align-items: center; margin-top: 12px;",
                button {
                    disabled: !page_view.prev_enabled,
                    onclick: move |_| {
                        let next = view.write().go_to_prev_page();
                        result.set(next);
                    },
                    "上一頁"
                }
                span { "第 {page_view.page_label} 頁" }
                button {
                    disabled: !page_view.next_enabled,
                    onclick: move |_| {
                        let next = view.write().go_to_next_page();
                        result.set(next);
                    },
                    "下一頁"
                }
            }

            p { style: "color: #666; font-size: 13px;", "{status}" }
        }
    }
}
