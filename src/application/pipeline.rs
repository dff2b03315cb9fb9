// Chart pipeline - stored documents to SVG files
use crate::application::extractor::extract_series;
use crate::application::metrics_repository::{ChartSink, DocumentStore};
use crate::application::renderer::{render_chart, RenderRequest};
use crate::domain::chart::ChartSpec;
use crate::domain::metric::MetricCategory;
use anyhow::Context;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    MissingDocument,
    NoRecords,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Written {
        chart_id: String,
        path: PathBuf,
        /// Human readable mean of the displayed slice.
        average: String,
        days: usize,
    },
    Skipped {
        chart_id: String,
        metric: MetricCategory,
        reason: SkipReason,
    },
}

#[derive(Clone)]
pub struct ChartPipeline {
    documents: Arc<dyn DocumentStore>,
    sink: Arc<dyn ChartSink>,
    charts: Vec<ChartSpec>,
}

impl ChartPipeline {
    pub fn new(documents: Arc<dyn DocumentStore>, sink: Arc<dyn ChartSink>, charts: Vec<ChartSpec>) -> Self {
        Self {
            documents,
            sink,
            charts,
        }
    }

    /// Each metric document is loaded once and feeds every chart drawn from it.
    pub async fn run(&self) -> anyhow::Result<Vec<ChartOutcome>> {
        let mut outcomes = Vec::with_capacity(self.charts.len());

        for metric in self.metrics() {
            let document = self.load(metric).await;

            for spec in self.charts.iter().filter(|c| c.metric == metric) {
                let outcome = match &document {
                    None => ChartOutcome::Skipped {
                        chart_id: spec.id.clone(),
                        metric,
                        reason: SkipReason::MissingDocument,
                    },
                    Some(doc) => self.draw(spec, doc).await?,
                };
                outcomes.push(outcome);
            }
        }

        Ok(outcomes)
    }

    /// Metrics in the order the charts first mention them.
    fn metrics(&self) -> Vec<MetricCategory> {
        let mut metrics: Vec<MetricCategory> = Vec::new();
        for spec in &self.charts {
            if !metrics.contains(&spec.metric) {
                metrics.push(spec.metric);
            }
        }
        metrics
    }

    async fn load(&self, metric: MetricCategory) -> Option<Value> {
        match self.documents.load_document(metric).await {
            Ok(Some(document)) => Some(document),
            Ok(None) => {
                tracing::warn!("{} not found, skipping its charts", metric.file_name());
                None
            }
            Err(e) => {
                tracing::warn!("Unreadable {} ({:#}), skipping its charts", metric.file_name(), e);
                None
            }
        }
    }

    async fn draw(&self, spec: &ChartSpec, document: &Value) -> anyhow::Result<ChartOutcome> {
        let series = extract_series(Some(document), &spec.field, spec.divide_by);
        if series.is_empty() {
            tracing::debug!("No scored records for chart {}", spec.id);
            return Ok(ChartOutcome::Skipped {
                chart_id: spec.id.clone(),
                metric: spec.metric,
                reason: SkipReason::NoRecords,
            });
        }

        let stats = RenderRequest::for_spec(spec, &series).stats();
        let chart = render_chart(spec, &series);
        let path = self
            .sink
            .write_chart(&chart)
            .await
            .with_context(|| format!("Failed to write {}", chart.name))?;

        Ok(ChartOutcome::Written {
            chart_id: spec.id.clone(),
            path,
            average: stats.map(|s| spec.unit.format(s.mean)).unwrap_or_default(),
            days: stats.map(|s| s.count).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartVariant, RenderedChart, ValueKind};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryDocuments(HashMap<MetricCategory, Value>);

    #[async_trait]
    impl DocumentStore for MemoryDocuments {
        async fn load_document(&self, category: MetricCategory) -> anyhow::Result<Option<Value>> {
            if category == MetricCategory::Cycles {
                anyhow::bail!("expected value at line 1 column 1");
            }
            Ok(self.0.get(&category).cloned())
        }

        async fn save_document(&self, _category: MetricCategory, _document: &Value) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemorySink(Mutex<Vec<RenderedChart>>);

    #[async_trait]
    impl ChartSink for MemorySink {
        async fn write_chart(&self, chart: &RenderedChart) -> anyhow::Result<PathBuf> {
            self.0.lock().unwrap().push(chart.clone());
            Ok(PathBuf::from(&chart.name))
        }
    }

    fn charts() -> Vec<ChartSpec> {
        vec![
            ChartSpec::new("recovery_score", "Recovery Score", MetricCategory::Recovery, "recovery_score", ChartVariant::Line),
            ChartSpec::new("recovery_compact", "Recovery", MetricCategory::Recovery, "recovery_score", ChartVariant::Bar)
                .with_ceiling(100.0)
                .with_limit(2),
            ChartSpec::new("strain_compact", "Strain", MetricCategory::Cycles, "strain", ChartVariant::Bar)
                .with_ceiling(21.0),
            ChartSpec::new("sleep_performance", "Sleep Performance", MetricCategory::Sleep, "sleep_performance_percentage", ChartVariant::Line)
                .with_unit(ValueKind::Percentage),
        ]
    }

    fn pipeline(documents: MemoryDocuments, sink: Arc<MemorySink>) -> ChartPipeline {
        ChartPipeline::new(Arc::new(documents), sink, charts())
    }

    #[tokio::test]
    async fn test_writes_every_chart_of_a_present_metric() {
        let mut docs = MemoryDocuments::default();
        docs.0.insert(
            MetricCategory::Recovery,
            json!({"records": [
                {"created_at": "2024-01-01T08:00:00Z", "score": {"recovery_score": 50}},
                {"created_at": "2024-01-02T08:00:00Z", "score": {"recovery_score": 75}},
                {"created_at": "2024-01-03T08:00:00Z", "score": {"recovery_score": 100}}
            ]}),
        );
        let sink = Arc::new(MemorySink::default());

        let outcomes = pipeline(docs, sink.clone()).run().await.unwrap();

        assert_eq!(outcomes.len(), 4);
        assert_eq!(
            outcomes[0],
            ChartOutcome::Written {
                chart_id: "recovery_score".to_string(),
                path: PathBuf::from("recovery_score.svg"),
                average: "75.0".to_string(),
                days: 3,
            }
        );
        // Bar chart limited to the last two days
        assert!(matches!(
            &outcomes[1],
            ChartOutcome::Written { average, days: 2, .. } if average == "87.5"
        ));
        let written: Vec<String> = sink.0.lock().unwrap().iter().map(|c| c.name.clone()).collect();
        assert_eq!(written, vec!["recovery_score.svg", "recovery_compact.svg"]);
    }

    #[tokio::test]
    async fn test_missing_or_malformed_documents_are_skipped() {
        let sink = Arc::new(MemorySink::default());
        let outcomes = pipeline(MemoryDocuments::default(), sink.clone()).run().await.unwrap();

        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|o| matches!(
            o,
            ChartOutcome::Skipped { reason: SkipReason::MissingDocument, .. }
        )));
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_records_produce_no_output() {
        let mut docs = MemoryDocuments::default();
        docs.0.insert(MetricCategory::Sleep, json!({"records": []}));
        let sink = Arc::new(MemorySink::default());

        let outcomes = pipeline(docs, sink.clone()).run().await.unwrap();

        assert!(outcomes.contains(&ChartOutcome::Skipped {
            chart_id: "sleep_performance".to_string(),
            metric: MetricCategory::Sleep,
            reason: SkipReason::NoRecords,
        }));
        assert!(sink.0.lock().unwrap().is_empty());
    }
}
