//! Shared building blocks for the question bank workspace:
//! logging initialisation, runtime environment checks and small response types.

pub mod types;
pub mod utils;
pub mod env;
