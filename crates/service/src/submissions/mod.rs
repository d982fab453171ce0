//! Question submissions: domain types, the repository seam and the
//! file-backed store behind the HTTP endpoints.

pub mod domain;
pub mod repository;
pub mod store;

pub use domain::{Submission, SubmissionInput, Upserted};
pub use repository::SubmissionRepository;
pub use store::SubmissionStore;
