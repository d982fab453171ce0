//! Storage abstractions for service layer
//!
//! Contains reusable file-backed helpers for services that persist small
//! collections as JSON.

pub mod json_array_file;
