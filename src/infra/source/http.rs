use std::time::Duration;

use tracing::debug;

use crate::domain::entities::product::Product;
use crate::infra::source::wire::decode_products;
use crate::usecase::ports::source::{ProductSource, SourceError};

pub struct HttpProductSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpProductSource {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SourceError::Http(err.to_string()))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

impl ProductSource for HttpProductSource {
    fn describe(&self) -> String {
        self.api_url.clone()
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|err| SourceError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SourceError::Http(err.to_string()))?;
        debug!(bytes = body.len(), "catalog response received");
        decode_products(&body)
    }
}
