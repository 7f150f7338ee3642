use std::path::PathBuf;

use crate::domain::entities::product::Product;
use crate::infra::source::wire::decode_products;
use crate::usecase::ports::source::{ProductSource, SourceError};

/// Reads a catalog dump (same JSON shape as the API) from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        // Catalog dumps are small; read them in one call on the UI runtime.
        let bytes = std::fs::read(&self.path)
            .map_err(|err| SourceError::Io(format!("{}: {err}", self.path.display())))?;
        decode_products(&bytes)
    }
}
