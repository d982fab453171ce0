//! Service layer for the question bank.
//! - `submissions`: domain types, the repository seam and the file-backed store.
//! - `storage`: the JSON array file codec the store is built on.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod submissions;
