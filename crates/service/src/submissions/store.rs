use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::domain::{local_timestamp, Submission, SubmissionInput, Upserted};
use super::repository::SubmissionRepository;
use crate::errors::ServiceError;
use crate::storage::json_array_file::{JsonArrayFile, LoadError};

/// File-backed submission store.
///
/// The whole collection lives in one JSON array file which is re-read on
/// every call and rewritten in full on every upsert. Records keep insertion
/// order; an upsert of an existing id replaces it in place.
///
/// Calls through the same store are serialized by an internal lock, so two
/// concurrent upserts cannot lose each other's write. Other processes
/// writing the same file are not coordinated with.
pub struct SubmissionStore {
    file: JsonArrayFile<Submission>,
    lock: RwLock<()>,
}

impl SubmissionStore {
    /// Create a store over `path`. Nothing is touched on disk until the first upsert.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file: JsonArrayFile::new(path), lock: RwLock::new(()) })
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Insert a new record or replace the one with the same id, then persist.
    pub async fn upsert(&self, input: SubmissionInput) -> Result<Upserted, ServiceError> {
        let record = input.into_submission(local_timestamp());
        let _guard = self.lock.write().await;

        let mut submissions = self.load_for_write().await?;
        let replaced = match submissions.iter().position(|s| s.id == record.id) {
            Some(i) => {
                submissions[i] = record.clone();
                true
            }
            None => {
                submissions.push(record.clone());
                false
            }
        };

        self.file.write(&submissions).await.map_err(|e| {
            error!(file = %self.path().display(), error = %e, "failed to write submissions");
            ServiceError::from(e)
        })?;
        info!(id = record.id, replaced, total = submissions.len(), "submission saved");
        Ok(Upserted { submission: record, replaced })
    }

    /// All records in stored order; empty when nothing was ever saved.
    pub async fn list_all(&self) -> Result<Vec<Submission>, ServiceError> {
        let _guard = self.lock.read().await;
        let submissions = self.load_for_read().await?;
        Ok(submissions.unwrap_or_default())
    }

    /// First record with the given id.
    pub async fn get_by_id(&self, id: i64) -> Result<Submission, ServiceError> {
        let _guard = self.lock.read().await;
        self.load_for_read()
            .await?
            .and_then(|all| all.into_iter().find(|s| s.id == id))
            .ok_or_else(|| ServiceError::not_found("submission"))
    }

    // Unparseable JSON is dropped here and replaced by the next successful write.
    // Valid JSON of the wrong shape is an error, so its records are never discarded.
    async fn load_for_write(&self) -> Result<Vec<Submission>, ServiceError> {
        match self.file.read().await {
            Ok(Some(submissions)) => Ok(submissions),
            Ok(None) => {
                debug!(file = %self.path().display(), "no submissions file yet; starting empty");
                Ok(Vec::new())
            }
            Err(LoadError::Malformed(e)) => {
                warn!(file = %self.path().display(), error = %e, "submissions file is malformed; starting from an empty collection");
                Ok(Vec::new())
            }
            Err(e) => {
                error!(file = %self.path().display(), error = %e, "failed to read submissions");
                Err(e.into())
            }
        }
    }

    // Unlike the write path, malformed content is a hard error here.
    async fn load_for_read(&self) -> Result<Option<Vec<Submission>>, ServiceError> {
        self.file.read().await.map_err(|e| {
            error!(file = %self.path().display(), error = %e, "failed to load submissions");
            ServiceError::from(e)
        })
    }
}

#[async_trait]
impl SubmissionRepository for SubmissionStore {
    async fn list_all(&self) -> Result<Vec<Submission>, ServiceError> { self.list_all().await }
    async fn get_by_id(&self, id: i64) -> Result<Submission, ServiceError> { self.get_by_id(id).await }
    async fn upsert(&self, input: SubmissionInput) -> Result<Upserted, ServiceError> { self.upsert(input).await }
}
