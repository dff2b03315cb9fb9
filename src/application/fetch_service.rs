// Fetch service - download every category and store it locally
use crate::application::metrics_repository::{DocumentStore, MetricsSource};
use crate::domain::metric::MetricCategory;
use anyhow::Context;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    pub user_id: Option<String>,
    /// Record count per collection category, in fetch order.
    pub counts: Vec<(MetricCategory, usize)>,
}

#[derive(Clone)]
pub struct FetchService {
    source: Arc<dyn MetricsSource>,
    documents: Arc<dyn DocumentStore>,
    record_limit: u32,
}

impl FetchService {
    pub fn new(source: Arc<dyn MetricsSource>, documents: Arc<dyn DocumentStore>, record_limit: u32) -> Self {
        Self {
            source,
            documents,
            record_limit,
        }
    }

    /// Fetch categories one after another; the first API failure aborts the run.
    pub async fn fetch_all(&self) -> anyhow::Result<FetchSummary> {
        let mut user_id = None;
        let mut counts = Vec::new();

        for category in MetricCategory::ALL {
            tracing::info!("Fetching {} (limit {})", category, self.record_limit);
            let document = self
                .source
                .fetch(category, self.record_limit)
                .await
                .with_context(|| format!("Failed to fetch {}", category))?;

            self.documents
                .save_document(category, &document)
                .await
                .with_context(|| format!("Failed to store {}", category))?;

            if category.is_collection() {
                counts.push((category, record_count(&document)));
            } else {
                user_id = document.get("user_id").map(display_id);
            }
        }

        Ok(FetchSummary { user_id, counts })
    }
}

fn record_count(document: &Value) -> usize {
    document
        .get("records")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn display_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::ApiError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeSource {
        fail_on: Option<MetricCategory>,
    }

    #[async_trait]
    impl MetricsSource for FakeSource {
        async fn fetch(&self, category: MetricCategory, limit: u32) -> Result<Value, ApiError> {
            if self.fail_on == Some(category) {
                return Err(ApiError::Status {
                    endpoint: category.endpoint().to_string(),
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(match category {
                MetricCategory::Profile => json!({"user_id": 10129, "first_name": "Sam"}),
                _ => json!({"records": vec![json!({}); limit as usize]}),
            })
        }
    }

    #[derive(Default)]
    struct MemoryDocuments(Mutex<HashMap<MetricCategory, Value>>);

    #[async_trait]
    impl DocumentStore for MemoryDocuments {
        async fn load_document(&self, category: MetricCategory) -> anyhow::Result<Option<Value>> {
            Ok(self.0.lock().unwrap().get(&category).cloned())
        }

        async fn save_document(&self, category: MetricCategory, document: &Value) -> anyhow::Result<()> {
            self.0.lock().unwrap().insert(category, document.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fetch_all_stores_every_category() {
        let documents = Arc::new(MemoryDocuments::default());
        let service = FetchService::new(Arc::new(FakeSource { fail_on: None }), documents.clone(), 3);

        let summary = service.fetch_all().await.unwrap();

        assert_eq!(summary.user_id.as_deref(), Some("10129"));
        assert_eq!(summary.counts.len(), 4);
        assert!(summary.counts.iter().all(|(_, n)| *n == 3));
        assert_eq!(documents.0.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_api_failure_aborts_remaining_categories() {
        let documents = Arc::new(MemoryDocuments::default());
        let source = FakeSource {
            fail_on: Some(MetricCategory::Recovery),
        };
        let service = FetchService::new(Arc::new(source), documents.clone(), 25);

        let err = service.fetch_all().await.unwrap_err();
        assert!(err.to_string().contains("recovery"));

        let stored = documents.0.lock().unwrap();
        assert!(stored.contains_key(&MetricCategory::Cycles));
        assert!(!stored.contains_key(&MetricCategory::Recovery));
        assert!(!stored.contains_key(&MetricCategory::Sleep));
    }
}
