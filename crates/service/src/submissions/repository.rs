use async_trait::async_trait;

use super::domain::{Submission, SubmissionInput, Upserted};
use crate::errors::ServiceError;

/// Persistence seam used by the HTTP layer.
/// The file-backed `SubmissionStore` is the production implementation.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Submission>, ServiceError>;
    async fn get_by_id(&self, id: i64) -> Result<Submission, ServiceError>;
    async fn upsert(&self, input: SubmissionInput) -> Result<Upserted, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use crate::submissions::domain::local_timestamp;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockSubmissionRepository {
        items: Mutex<Vec<Submission>>,
        failure: Option<String>,
    }

    impl MockSubmissionRepository {
        /// A repository whose every call fails with `ServiceError::Storage(message)`.
        pub fn failing(message: impl Into<String>) -> Self {
            Self { items: Mutex::default(), failure: Some(message.into()) }
        }

        fn check(&self) -> Result<(), ServiceError> {
            match &self.failure {
                Some(msg) => Err(ServiceError::Storage(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl SubmissionRepository for MockSubmissionRepository {
        async fn list_all(&self) -> Result<Vec<Submission>, ServiceError> {
            self.check()?;
            Ok(self.items.lock().unwrap().clone())
        }

        async fn get_by_id(&self, id: i64) -> Result<Submission, ServiceError> {
            self.check()?;
            let items = self.items.lock().unwrap();
            items
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("submission"))
        }

        async fn upsert(&self, input: SubmissionInput) -> Result<Upserted, ServiceError> {
            self.check()?;
            let record = input.into_submission(local_timestamp());
            let mut items = self.items.lock().unwrap();
            let replaced = match items.iter().position(|s| s.id == record.id) {
                Some(i) => {
                    items[i] = record.clone();
                    true
                }
                None => {
                    items.push(record.clone());
                    false
                }
            };
            Ok(Upserted { submission: record, replaced })
        }
    }
}
