use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::entities::query::PageSize;
use crate::usecase::services::image_resolver::{
    ImageUrlResolver, DEFAULT_BLOCKED_HOSTS, DEFAULT_FALLBACK_IMAGE,
};

pub const DEFAULT_API_URL: &str = "https://api.escuelajs.co/api/v1/products";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const ENV_API_URL: &str = "CATALOG_API_URL";
const ENV_SOURCE_FILE: &str = "CATALOG_SOURCE_FILE";
const ENV_PAGE_SIZE: &str = "CATALOG_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    /// When set, the catalog is read from this JSON file instead of `api_url`.
    pub source_file: Option<PathBuf>,
    pub fallback_image: String,
    pub blocked_image_hosts: Vec<String>,
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub currency_symbol: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            source_file: None,
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
            blocked_image_hosts: DEFAULT_BLOCKED_HOSTS
                .iter()
                .map(|host| host.to_string())
                .collect(),
            default_page_size: PageSize::DEFAULT.get(),
            page_size_options: vec![5, 10, 20, 50],
            currency_symbol: "$".to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` from the app config directory if present,
    /// then environment overrides. A missing or broken config file is logged
    /// and skipped; the environment still applies.
    pub fn load() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        match default_config_path() {
            Ok(path) => Self::load_or_default(&path, lookup),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "config directory unavailable, using defaults");
                Self::default().with_env_overrides(lookup)
            }
        }
    }

    pub fn load_or_default(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "failed to load config, using defaults");
                Self::default()
            }
        };
        config.with_env_overrides(lookup)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default().normalized());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("failed to parse config toml")?;
        Ok(config.normalized())
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|value| !value.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(file) = lookup(ENV_SOURCE_FILE).filter(|value| !value.trim().is_empty()) {
            self.source_file = Some(PathBuf::from(file.trim()));
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match PageSize::parse(&raw) {
                Some(size) => self.default_page_size = size.get(),
                None => warn!(value = %raw, "ignoring invalid {ENV_PAGE_SIZE}"),
            }
        }
        self.normalized()
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.default_page_size).unwrap_or_default()
    }

    pub fn image_resolver(&self) -> ImageUrlResolver {
        ImageUrlResolver::new(
            self.fallback_image.clone(),
            self.blocked_image_hosts.iter().cloned(),
        )
    }

    fn normalized(mut self) -> Self {
        if self.default_page_size == 0 {
            warn!("default_page_size must be positive, using {}", PageSize::DEFAULT);
            self.default_page_size = PageSize::DEFAULT.get();
        }
        if self.fallback_image.trim().is_empty() {
            self.fallback_image = DEFAULT_FALLBACK_IMAGE.to_string();
        }

        self.page_size_options.retain(|size| *size > 0);
        if !self.page_size_options.contains(&self.default_page_size) {
            self.page_size_options.push(self.default_page_size);
        }
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        self
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "catalog-browser")
        .ok_or_else(|| anyhow!("unable to resolve application directories"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
