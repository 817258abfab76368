//! Document persistence
//!
//! The session saves a finished artifact as a new document version. Versions
//! share a document id and are ordered by creation time.

use crate::error::PersistenceError;
use async_trait::async_trait;
use canvas_artifact::{Artifact, ArtifactKind};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// One saved version of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Document id (shared by all versions)
    pub id: String,
    /// Version timestamp
    pub created_at: DateTime<Utc>,
    /// Title at save time
    pub title: String,
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Full content at save time
    pub content: String,
    /// Owner
    pub user_id: String,
}

impl DocumentRecord {
    /// Snapshot an artifact as a document version
    ///
    /// Returns `None` if the artifact carries no document id.
    #[must_use]
    pub fn from_artifact(artifact: &Artifact, user_id: &str, created_at: DateTime<Utc>) -> Option<Self> {
        let id = artifact.document_id.clone()?;
        Some(Self {
            id,
            created_at,
            title: artifact.title.clone(),
            kind: artifact.kind,
            content: artifact.content.clone(),
            user_id: user_id.to_string(),
        })
    }
}

/// Storage backend for document versions
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Store a new version
    async fn save_document(&self, record: DocumentRecord) -> Result<(), PersistenceError>;

    /// All versions of `id`, oldest first
    async fn documents_by_id(&self, id: &str) -> Result<Vec<DocumentRecord>, PersistenceError>;

    /// Newest version of `id`
    async fn latest_document(&self, id: &str) -> Result<DocumentRecord, PersistenceError>;

    /// Drop versions of `id` created strictly after `timestamp`
    ///
    /// Returns the removed versions.
    async fn delete_documents_after(
        &self,
        id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<DocumentRecord>, PersistenceError>;
}

/// In-process repository
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: DashMap<String, Vec<DocumentRecord>>,
}

impl InMemoryDocumentRepository {
    /// Create empty repository
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored versions
    #[must_use]
    pub fn version_count(&self) -> usize {
        self.documents.iter().map(|entry| entry.value().len()).sum()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save_document(&self, record: DocumentRecord) -> Result<(), PersistenceError> {
        if record.id.is_empty() {
            return Err(PersistenceError::InvalidRecord(
                "document id is empty".to_string(),
            ));
        }

        let mut versions = self.documents.entry(record.id.clone()).or_default();
        // Stable insert keeps equal timestamps in save order
        let position = versions.partition_point(|v| v.created_at <= record.created_at);
        versions.insert(position, record);
        Ok(())
    }

    async fn documents_by_id(&self, id: &str) -> Result<Vec<DocumentRecord>, PersistenceError> {
        Ok(self
            .documents
            .get(id)
            .map(|versions| versions.value().clone())
            .unwrap_or_default())
    }

    async fn latest_document(&self, id: &str) -> Result<DocumentRecord, PersistenceError> {
        self.documents
            .get(id)
            .and_then(|versions| versions.last().cloned())
            .ok_or_else(|| PersistenceError::NotFound {
                entity: "document",
                id: id.to_string(),
            })
    }

    async fn delete_documents_after(
        &self,
        id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<DocumentRecord>, PersistenceError> {
        let Some(mut versions) = self.documents.get_mut(id) else {
            return Ok(Vec::new());
        };
        let keep = versions.partition_point(|v| v.created_at <= timestamp);
        Ok(versions.split_off(keep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn record(id: &str, content: &str, created_at: DateTime<Utc>) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            created_at,
            title: "t".to_string(),
            kind: ArtifactKind::Text,
            content: content.to_string(),
            user_id: "u".to_string(),
        }
    }

    #[test]
    fn record_requires_document_id() {
        let now = Utc::now();
        assert!(DocumentRecord::from_artifact(&Artifact::bootstrap(), "u", now).is_none());

        let artifact = Artifact {
            document_id: Some("d".to_string()),
            content: "body".to_string(),
            ..Artifact::default()
        };
        let record = DocumentRecord::from_artifact(&artifact, "u", now).unwrap();
        assert_eq!(record.id, "d");
        assert_eq!(record.content, "body");
        assert_eq!(record.user_id, "u");
    }

    #[tokio::test]
    async fn versions_ordered_by_created_at() {
        let repo = InMemoryDocumentRepository::new();
        let t0 = Utc::now();
        repo.save_document(record("d", "second", t0 + Duration::seconds(1)))
            .await
            .unwrap();
        repo.save_document(record("d", "first", t0)).await.unwrap();

        let contents: Vec<_> = repo
            .documents_by_id("d")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
        assert_eq!(repo.latest_document("d").await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn latest_missing_is_not_found() {
        let repo = InMemoryDocumentRepository::new();
        let err = repo.latest_document("nope").await.unwrap_err();
        assert_eq!(err.code(), "not_found:database");
        assert!(repo.documents_by_id("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_id_rejected() {
        let repo = InMemoryDocumentRepository::new();
        let err = repo.save_document(record("", "x", Utc::now())).await.unwrap_err();
        assert_eq!(err.code(), "bad_request:database");
        assert_eq!(repo.version_count(), 0);
    }

    #[tokio::test]
    async fn delete_after_timestamp_is_exclusive() {
        let repo = InMemoryDocumentRepository::new();
        let t0 = Utc::now();
        for (i, content) in ["a", "b", "c"].into_iter().enumerate() {
            let offset = Duration::seconds(i64::try_from(i).unwrap());
            repo.save_document(record("d", content, t0 + offset)).await.unwrap();
        }

        let removed = repo
            .delete_documents_after("d", t0 + Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].content, "c");
        assert_eq!(repo.version_count(), 2);
        assert!(repo.delete_documents_after("other", t0).await.unwrap().is_empty());
    }
}
