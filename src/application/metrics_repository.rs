// Repository traits for metric documents, tokens and chart output
use crate::application::errors::ApiError;
use crate::domain::chart::RenderedChart;
use crate::domain::metric::MetricCategory;
use crate::domain::token::TokenSet;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch one category document; `limit` is ignored for non-collections.
    async fn fetch(&self, category: MetricCategory, limit: u32) -> Result<Value, ApiError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored for the category yet.
    async fn load_document(&self, category: MetricCategory) -> anyhow::Result<Option<Value>>;

    async fn save_document(&self, category: MetricCategory, document: &Value) -> anyhow::Result<()>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load_tokens(&self) -> anyhow::Result<TokenSet>;

    /// Replaces the stored token set in full.
    async fn save_tokens(&self, tokens: &TokenSet) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ChartSink: Send + Sync {
    /// Writes the chart and returns where it landed.
    async fn write_chart(&self, chart: &RenderedChart) -> anyhow::Result<PathBuf>;
}
