use std::future::Future;

use crate::domain::entities::product::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    Http(String),
    Status(u16),
    Decode(String),
    Io(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Http(message) => write!(f, "request failed: {message}"),
            SourceError::Status(code) => write!(f, "server responded with status {code}"),
            SourceError::Decode(message) => write!(f, "invalid catalog payload: {message}"),
            SourceError::Io(message) => write!(f, "failed to read catalog: {message}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Supplies the whole catalog in one shot. Called once per session.
pub trait ProductSource {
    fn describe(&self) -> String;

    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, SourceError>>;
}
