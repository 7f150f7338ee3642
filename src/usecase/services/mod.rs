pub mod catalog_service;
pub mod image_resolver;
pub mod query_pipeline;
