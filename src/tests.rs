use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{ensure_webview_data_dir, AppConfig, DEFAULT_API_URL};
use crate::domain::entities::product::{Category, Product, ProductId};
use crate::domain::entities::query::{PageResult, PageSize, SortCriterion};
use crate::infra::source::file::JsonFileSource;
use crate::infra::source::ConfiguredSource;
use crate::ui::presenter::{format_price, present, CATEGORY_MISSING};
use crate::ui::state::view_state::{ViewError, ViewState};
use crate::usecase::ports::source::{ProductSource, SourceError};
use crate::usecase::services::catalog_service::load_catalog;
use crate::usecase::services::image_resolver::{ImageUrlResolver, DEFAULT_FALLBACK_IMAGE};
use crate::usecase::services::query_pipeline::compute;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("catalog-browser-{prefix}-{nanos}"))
}

fn product(id: i64, title: &str, price: f64) -> Product {
    Product {
        id: ProductId(id),
        title: title.to_string(),
        price,
        images: Vec::new(),
        category: None,
    }
}

fn numbered_products(count: i64) -> Vec<Product> {
    (1..=count)
        .map(|id| product(id, &format!("Item {id}"), id as f64))
        .collect()
}

fn ids(result: &PageResult) -> Vec<i64> {
    result.rows.iter().map(|product| product.id.0).collect()
}

fn page_size(value: usize) -> PageSize {
    PageSize::new(value).expect("page size should be positive")
}

struct StaticSource {
    result: Result<Vec<Product>, SourceError>,
    calls: Cell<usize>,
}

impl ProductSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

#[test]
fn view_starts_empty_until_catalog_is_installed() {
    let mut view = ViewState::default();

    let result = view.render();

    assert!(result.is_empty_state());
    assert_eq!(view.page(), 1);
    assert_eq!(view.page_size(), PageSize::DEFAULT);
    assert!(view.full_set().is_empty());
}

#[test]
fn set_full_set_shows_first_page() {
    let mut view = ViewState::new(page_size(10));

    let result = view.set_full_set(numbered_products(25));

    assert_eq!(ids(&result), (1..=10).collect::<Vec<_>>());
    assert_eq!(result.page, 1);
    assert_eq!(result.total_pages, 3);
    assert!(!result.has_prev);
    assert!(result.has_next);
    assert_eq!(view.filtered_set().len(), 25);
}

#[test]
fn keyword_typed_before_load_still_applies() {
    let mut view = ViewState::new(page_size(10));
    view.set_keyword("item 2");

    let result = view.set_full_set(numbered_products(25));

    assert_eq!(ids(&result), vec![2, 20, 21, 22, 23, 24, 25]);
    assert_eq!(view.keyword(), "item 2");
}

#[test]
fn next_and_prev_walk_the_pages() {
    let mut view = ViewState::new(page_size(10));
    view.set_full_set(numbered_products(25));

    let second = view.go_to_next_page();
    assert_eq!(second.page, 2);
    assert_eq!(ids(&second), (11..=20).collect::<Vec<_>>());

    let third = view.go_to_next_page();
    assert_eq!(third.page, 3);
    assert_eq!(ids(&third), (21..=25).collect::<Vec<_>>());
    assert!(!third.has_next);

    let still_third = view.go_to_next_page();
    assert_eq!(still_third.page, 3, "next on last page should be a no-op");

    view.go_to_prev_page();
    view.go_to_prev_page();
    let first = view.go_to_prev_page();
    assert_eq!(first.page, 1, "prev on first page should be a no-op");
    assert!(!first.has_prev);
}

#[test]
fn next_page_on_empty_view_stays_on_first() {
    let mut view = ViewState::default();

    let result = view.go_to_next_page();

    assert_eq!(view.page(), 1);
    assert!(result.is_empty_state());
}

#[test]
fn every_transition_resets_to_first_page() {
    let mut view = ViewState::new(page_size(5));
    view.set_full_set(numbered_products(30));

    view.go_to_next_page();
    view.go_to_next_page();
    assert_eq!(view.page(), 3);
    assert_eq!(view.set_keyword("item").page, 1);

    view.go_to_next_page();
    assert_eq!(view.set_sort_criterion(SortCriterion::PriceDesc).page, 1);
    assert_eq!(view.sort_criterion(), SortCriterion::PriceDesc);

    view.go_to_next_page();
    assert_eq!(view.set_page_size(page_size(20)).page, 1);
    assert_eq!(view.total_pages(), 2);
}

#[test]
fn shrinking_filter_never_leaves_page_out_of_range() {
    let mut view = ViewState::new(page_size(5));
    view.set_full_set(numbered_products(30));
    view.go_to_next_page();
    view.go_to_next_page();

    let result = view.set_keyword("item 3");

    assert_eq!(ids(&result), vec![3, 30]);
    assert_eq!(result.page, 1);
    assert_eq!(result.total_pages, 1);
    assert!(view.page() <= view.total_pages());
}

#[test]
fn sort_does_not_reorder_filtered_set() {
    let mut view = ViewState::new(page_size(10));
    view.set_full_set(vec![
        product(2, "Banana", 5.0),
        product(1, "Apple", 10.0),
    ]);

    let sorted = view.set_sort_criterion(SortCriterion::NameAsc);

    assert_eq!(ids(&sorted), vec![1, 2]);
    let filtered: Vec<i64> = view.filtered_set().iter().map(|p| p.id.0).collect();
    assert_eq!(filtered, vec![2, 1]);

    let by_price = view.set_sort_criterion(SortCriterion::PriceAsc);
    assert_eq!(ids(&by_price), vec![2, 1]);
}

#[test]
fn render_matches_pipeline_for_current_state() {
    let mut view = ViewState::new(page_size(2));
    view.set_full_set(vec![
        product(4, "Blue Mug", 8.0),
        product(1, "Red Mug", 3.0),
        product(3, "Hat", 1.0),
        product(2, "Green Mug", 5.0),
    ]);
    view.set_keyword("mug");
    view.set_sort_criterion(SortCriterion::PriceDesc);
    view.go_to_next_page();

    let expected = compute(
        view.full_set(),
        view.keyword(),
        view.sort_criterion(),
        view.page(),
        view.page_size(),
    );

    assert_eq!(view.render(), expected);
    assert_eq!(ids(&expected), vec![1]);
    assert_eq!(view.page(), 2);
}

#[test]
fn invalid_page_size_input_is_rejected_and_kept() {
    let mut view = ViewState::new(page_size(10));
    view.set_full_set(numbered_products(25));
    view.go_to_next_page();

    for raw in ["0", "-5", "abc", "", "2.5"] {
        let err = view
            .apply_page_size_input(raw)
            .expect_err("invalid page size should be rejected");
        assert_eq!(err, ViewError::InvalidPageSize(raw.to_string()));
    }

    assert_eq!(view.page_size(), page_size(10));
    assert_eq!(view.page(), 2, "rejected input should not move the page");

    let result = view
        .apply_page_size_input(" 20 ")
        .expect("valid page size should be accepted");
    assert_eq!(view.page_size(), page_size(20));
    assert_eq!(result.page, 1);
    assert_eq!(result.rows.len(), 20);
}

#[test]
fn sort_criterion_parses_select_values() {
    for criterion in SortCriterion::ALL {
        assert_eq!(SortCriterion::parse(criterion.as_str()), criterion);
    }
    assert_eq!(SortCriterion::parse("bogus"), SortCriterion::Default);
    assert_eq!(SortCriterion::PriceDesc.to_string(), "price-desc");
}

#[test]
fn present_builds_row_labels() {
    let mut tee = product(7, "Classic Tee", 12.5);
    tee.images = vec![r#"["https://i.imgur.com/tee.jpeg"]"#.to_string()];
    tee.category = Some(Category {
        name: "Clothes".to_string(),
    });
    let mut mug = product(8, "Mug", 10.0);
    mug.images = vec!["https://via.placeholder.com/640".to_string()];

    let mut view = ViewState::new(page_size(10));
    let result = view.set_full_set(vec![tee, mug]);
    let page_view = present(&result, &ImageUrlResolver::default(), "$");

    assert!(!page_view.is_empty);
    assert_eq!(page_view.page_label, "1 / 1");
    assert!(!page_view.prev_enabled);
    assert!(!page_view.next_enabled);

    let tee_row = &page_view.rows[0];
    assert_eq!(tee_row.id_label, "#7");
    assert_eq!(tee_row.image_url, "https://i.imgur.com/tee.jpeg");
    assert_eq!(tee_row.price_label, "$12.5");
    assert_eq!(tee_row.category_label, "Clothes");

    let mug_row = &page_view.rows[1];
    assert_eq!(mug_row.image_url, DEFAULT_FALLBACK_IMAGE);
    assert_eq!(mug_row.price_label, "$10");
    assert_eq!(mug_row.category_label, CATEGORY_MISSING);
}

#[test]
fn present_signals_empty_state() {
    let page_view = present(&PageResult::empty(), &ImageUrlResolver::default(), "$");

    assert!(page_view.is_empty);
    assert!(page_view.rows.is_empty());
    assert_eq!(page_view.page_label, "0 / 0");
    assert!(!page_view.prev_enabled && !page_view.next_enabled);
}

#[test]
fn present_enables_pager_buttons_from_result() {
    let mut view = ViewState::new(page_size(1));
    view.set_full_set(numbered_products(3));
    let result = view.go_to_next_page();

    let page_view = present(&result, &ImageUrlResolver::default(), "NT$");

    assert_eq!(page_view.page_label, "2 / 3");
    assert!(page_view.prev_enabled);
    assert!(page_view.next_enabled);
    assert_eq!(page_view.rows[0].price_label, "NT$2");
}

#[test]
fn format_price_matches_plain_number_display() {
    assert_eq!(format_price(0.0), "0");
    assert_eq!(format_price(687.0), "687");
    assert_eq!(format_price(19.99), "19.99");
}

#[test]
fn config_defaults_point_at_public_api() {
    let config = AppConfig::default();

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.page_size(), PageSize::DEFAULT);
    assert_eq!(config.image_resolver(), ImageUrlResolver::default());
}

#[test]
fn config_parses_partial_toml() {
    let config = AppConfig::parse(
        r#"
        api_url = "https://catalog.example/api/products"
        default_page_size = 25
        page_size_options = [50, 0, 5, 5]
        blocked_image_hosts = ["cdn.bad.example"]
        "#,
    )
    .expect("config should parse");

    assert_eq!(config.api_url, "https://catalog.example/api/products");
    assert_eq!(config.page_size(), page_size(25));
    assert_eq!(config.page_size_options, vec![5, 25, 50]);
    assert_eq!(config.currency_symbol, "$");
    assert_eq!(
        config
            .image_resolver()
            .resolve(Some("https://cdn.bad.example/x.png")),
        DEFAULT_FALLBACK_IMAGE
    );
}

#[test]
fn config_rejects_zero_page_size() {
    let config = AppConfig::parse("default_page_size = 0").expect("config should parse");
    assert_eq!(config.page_size(), PageSize::DEFAULT);
}

#[test]
fn config_reports_malformed_toml() {
    let err = AppConfig::parse("default_page_size = \"ten\"")
        .expect_err("wrong type should be rejected");
    assert!(
        format!("{err:#}").contains("failed to parse config toml"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn config_missing_file_uses_defaults() {
    let temp_dir = unique_test_dir("missing-config");

    let config =
        AppConfig::load_from(&temp_dir.join("config.toml")).expect("missing file is fine");

    assert_eq!(config, AppConfig::default().with_env_overrides(|_| None));
}

#[test]
fn broken_config_file_still_takes_env_overrides() {
    let temp_dir = unique_test_dir("broken-config");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("config.toml");
    fs::write(&path, "default_page_size = [").expect("should write config");

    let config = AppConfig::load_or_default(&path, |key| {
        (key == "CATALOG_API_URL").then(|| "https://mirror.example/products".to_string())
    });

    assert_eq!(config.api_url, "https://mirror.example/products");
    assert_eq!(config.page_size(), PageSize::DEFAULT);
    assert_eq!(config.fallback_image, DEFAULT_FALLBACK_IMAGE);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn env_overrides_replace_file_values() {
    let config = AppConfig::default().with_env_overrides(|key| match key {
        "CATALOG_API_URL" => Some(" https://mirror.example/products ".to_string()),
        "CATALOG_SOURCE_FILE" => Some("/tmp/catalog.json".to_string()),
        "CATALOG_PAGE_SIZE" => Some("20".to_string()),
        _ => None,
    });

    assert_eq!(config.api_url, "https://mirror.example/products");
    assert_eq!(config.source_file, Some(PathBuf::from("/tmp/catalog.json")));
    assert_eq!(config.page_size(), page_size(20));
}

#[test]
fn env_page_size_must_be_positive() {
    let config = AppConfig::default().with_env_overrides(|key| {
        (key == "CATALOG_PAGE_SIZE").then(|| "-1".to_string())
    });
    assert_eq!(config.page_size(), PageSize::DEFAULT);
}

#[test]
fn configured_source_prefers_local_file() {
    let config = AppConfig {
        source_file: Some(PathBuf::from("/tmp/catalog.json")),
        ..AppConfig::default()
    };

    let source = ConfiguredSource::from_config(&config).expect("source should build");

    assert!(matches!(source, ConfiguredSource::File(_)));
    assert_eq!(source.describe(), "/tmp/catalog.json");

    let http = ConfiguredSource::from_config(&AppConfig::default()).expect("source should build");
    assert!(matches!(http, ConfiguredSource::Http(_)));
    assert_eq!(http.describe(), DEFAULT_API_URL);
}

#[test]
fn ensure_webview_data_dir_creates_webview2_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir =
        ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview2"));
    assert!(webview_dir.is_dir(), "webview2 directory should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[tokio::test]
async fn json_file_source_reads_catalog() {
    let temp_dir = unique_test_dir("file-source");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("catalog.json");
    fs::write(
        &path,
        r#"[
            {"id": 2, "title": "Banana", "price": 5, "images": []},
            {"id": 1, "title": "Apple", "price": 10, "images": ["https://a.example/apple.png"],
             "category": {"name": "Fruit"}}
        ]"#,
    )
    .expect("should write fixture");

    let products = load_catalog(&JsonFileSource::new(&path))
        .await
        .expect("file source should load");

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].category_name(), Some("Fruit"));

    let mut view = ViewState::new(page_size(10));
    let result = view.set_full_set(products);
    assert_eq!(ids(&result), vec![1, 2]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[tokio::test]
async fn json_file_source_reports_missing_file() {
    let path = unique_test_dir("no-such-file").join("catalog.json");

    let err = load_catalog(&JsonFileSource::new(&path))
        .await
        .expect_err("missing file should fail");

    assert!(matches!(err, SourceError::Io(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn load_catalog_fetches_once_and_passes_records_through() {
    let source = StaticSource {
        result: Ok(vec![product(1, "Apple", 10.0)]),
        calls: Cell::new(0),
    };

    let products = load_catalog(&source).await.expect("static source should load");

    assert_eq!(products, vec![product(1, "Apple", 10.0)]);
    assert_eq!(source.calls.get(), 1);
}

#[tokio::test]
async fn failed_load_leaves_view_empty() {
    let source = StaticSource {
        result: Err(SourceError::Status(503)),
        calls: Cell::new(0),
    };
    let mut view = ViewState::default();

    let outcome = load_catalog(&source).await;
    if let Ok(products) = outcome.clone() {
        view.set_full_set(products);
    }

    assert_eq!(outcome, Err(SourceError::Status(503)));
    assert_eq!(source.calls.get(), 1, "failures are not retried");
    assert!(view.render().is_empty_state());
    assert_eq!(
        SourceError::Status(503).to_string(),
        "server responded with status 503"
    );
}
