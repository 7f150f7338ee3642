use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::entities::product::{Category, Product, ProductId};
use crate::usecase::ports::source::SourceError;

#[derive(Debug, Deserialize)]
struct WireProduct {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    images: Option<Vec<Value>>,
    #[serde(default)]
    category: Option<WireCategory>,
}

#[derive(Debug, Deserialize)]
struct WireCategory {
    #[serde(default)]
    name: Option<String>,
}

impl From<WireProduct> for Product {
    fn from(wire: WireProduct) -> Self {
        let images = wire
            .images
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| match value {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect();
        let price = wire
            .price
            .filter(|price| price.is_finite())
            .unwrap_or(0.0)
            .max(0.0);

        Product {
            id: ProductId(wire.id),
            title: wire.title.unwrap_or_default(),
            price,
            images,
            category: wire.category.map(|category| Category {
                name: category.name.unwrap_or_default(),
            }),
        }
    }
}

/// Decodes a JSON array of product records. Records that cannot be read
/// (not an object, no integer id) are skipped; a payload that is not an
/// array at all is an error.
pub fn decode_products(bytes: &[u8]) -> Result<Vec<Product>, SourceError> {
    let payload: Value =
        serde_json::from_slice(bytes).map_err(|err| SourceError::Decode(err.to_string()))?;
    let Value::Array(items) = payload else {
        return Err(SourceError::Decode(
            "expected a JSON array of products".to_string(),
        ));
    };

    let mut products = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<WireProduct>(item) {
            Ok(wire) => products.push(Product::from(wire)),
            Err(err) => warn!(index = idx, error = %err, "skipping malformed product record"),
        }
    }
    Ok(products)
}
