// Application layer - use cases and the ports they depend on
pub mod auth_service;
pub mod errors;
pub mod extractor;
pub mod fetch_service;
pub mod metrics_repository;
pub mod normalizer;
pub mod pipeline;
pub mod renderer;
