pub mod file;
pub mod http;
pub mod wire;

use std::time::Duration;

use crate::config::AppConfig;
use crate::domain::entities::product::Product;
use crate::usecase::ports::source::{ProductSource, SourceError};

use self::file::JsonFileSource;
use self::http::HttpProductSource;

/// The source picked from configuration: a local file when one is set,
/// otherwise the remote API.
pub enum ConfiguredSource {
    Http(HttpProductSource),
    File(JsonFileSource),
}

impl ConfiguredSource {
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        match &config.source_file {
            Some(path) => Ok(ConfiguredSource::File(JsonFileSource::new(path.clone()))),
            None => HttpProductSource::new(
                config.api_url.clone(),
                Duration::from_secs(config.request_timeout_secs.max(1)),
            )
            .map(ConfiguredSource::Http),
        }
    }
}

impl ProductSource for ConfiguredSource {
    fn describe(&self) -> String {
        match self {
            ConfiguredSource::Http(source) => source.describe(),
            ConfiguredSource::File(source) => source.describe(),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        match self {
            ConfiguredSource::Http(source) => source.fetch_all().await,
            ConfiguredSource::File(source) => source.fetch_all().await,
        }
    }
}
