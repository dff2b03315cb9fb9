use crate::application::metrics_repository::ChartSink;
use crate::domain::chart::RenderedChart;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Writes rendered charts into one output directory, replacing existing files.
#[derive(Debug, Clone)]
pub struct SvgFileSink {
    output_dir: PathBuf,
}

impl SvgFileSink {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

#[async_trait]
impl ChartSink for SvgFileSink {
    async fn write_chart(&self, chart: &RenderedChart) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(&chart.name);
        tokio::fs::write(&path, &chart.markup)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
