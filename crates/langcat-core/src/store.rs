//! Catalog Store: the document collection the engine reads from
use crate::data_model::{CatalogDocument, CatalogEntry, QuerySpec};
use crate::error::StoreError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// Read-only equality lookups over catalog documents.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All documents whose bound fields equal the spec's values.
    async fn find_many(&self, spec: &QuerySpec) -> Result<Vec<CatalogDocument>, StoreError>;

    /// Any one document matching the spec.
    async fn find_one(&self, spec: &QuerySpec) -> Result<Option<CatalogDocument>, StoreError>;

    /// Every document in the catalog.
    async fn find_all(&self) -> Result<Vec<CatalogDocument>, StoreError>;
}

/// Seed file row. `_id` is optional; missing ids are generated.
#[derive(Debug, Deserialize)]
struct SeedRow {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(flatten)]
    entry: CatalogEntry,
}

/// In-memory catalog, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<CatalogDocument>,
}

impl MemoryStore {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let documents = entries
            .into_iter()
            .map(|entry| CatalogDocument {
                id: new_id(),
                entry,
            })
            .collect();
        Self { documents }
    }

    pub fn from_documents(documents: Vec<CatalogDocument>) -> Self {
        Self { documents }
    }

    /// Load a JSON array (`.json`) or YAML sequence (`.yaml`, `.yml`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Load(format!("{}: {}", path.display(), e)))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let rows: Vec<SeedRow> = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| StoreError::Load(format!("{}: {}", path.display(), e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| StoreError::Load(format!("{}: {}", path.display(), e)))?
        };

        let documents: Vec<CatalogDocument> = rows
            .into_iter()
            .map(|row| CatalogDocument {
                id: row.id.unwrap_or_else(new_id),
                entry: row.entry,
            })
            .collect();

        tracing::info!(path = %path.display(), documents = documents.len(), "catalog loaded");
        Ok(Self { documents })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_many(&self, spec: &QuerySpec) -> Result<Vec<CatalogDocument>, StoreError> {
        Ok(self
            .documents
            .iter()
            .filter(|doc| spec.matches(&doc.entry))
            .cloned()
            .collect())
    }

    async fn find_one(&self, spec: &QuerySpec) -> Result<Option<CatalogDocument>, StoreError> {
        Ok(self
            .documents
            .iter()
            .find(|doc| spec.matches(&doc.entry))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<CatalogDocument>, StoreError> {
        Ok(self.documents.clone())
    }
}
