// Local JSON files for fetched documents and the token set
use crate::application::metrics_repository::{DocumentStore, TokenStore};
use crate::domain::metric::MetricCategory;
use crate::domain::token::TokenSet;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    token_file: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: PathBuf, token_file: PathBuf) -> Self {
        Self { data_dir, token_file }
    }

    pub fn document_path(&self, category: MetricCategory) -> PathBuf {
        self.data_dir.join(category.file_name())
    }

    pub fn token_path(&self) -> &Path {
        &self.token_file
    }
}

/// `Ok(None)` when the file does not exist; other I/O failures propagate.
async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

async fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load_document(&self, category: MetricCategory) -> Result<Option<Value>> {
        let path = self.document_path(category);
        let Some(contents) = read_optional(&path).await? else {
            return Ok(None);
        };

        let document = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed JSON in {}", path.display()))?;
        Ok(Some(document))
    }

    async fn save_document(&self, category: MetricCategory, document: &Value) -> Result<()> {
        let path = self.document_path(category);
        write_pretty(&path, document).await?;
        tracing::debug!("Saved {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl TokenStore for JsonFileStore {
    async fn load_tokens(&self) -> Result<TokenSet> {
        let contents = read_optional(&self.token_file).await?.with_context(|| {
            format!(
                "No tokens at {}. Run `auth` first",
                self.token_file.display()
            )
        })?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed token file {}", self.token_file.display()))
    }

    async fn save_tokens(&self, tokens: &TokenSet) -> Result<()> {
        write_pretty(&self.token_file, tokens).await
    }
}
