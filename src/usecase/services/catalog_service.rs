use tracing::{error, info};

use crate::domain::entities::product::Product;
use crate::usecase::ports::source::{ProductSource, SourceError};

/// Awaits `source` once. Failures are logged here and handed back so the
/// caller can leave the view empty; nothing is retried.
pub async fn load_catalog<S: ProductSource>(source: &S) -> Result<Vec<Product>, SourceError> {
    let origin = source.describe();
    info!(%origin, "fetching product catalog");

    match source.fetch_all().await {
        Ok(products) => {
            info!(%origin, count = products.len(), "product catalog loaded");
            Ok(products)
        }
        Err(err) => {
            error!(%origin, error = %err, "failed to load product catalog");
            Err(err)
        }
    }
}
