//! AddOnForge domain layer.
//!
//! This crate has no internal dependencies so it can be used by both the
//! db/repository layer and the API crate. It holds the shared ID/timestamp
//! types, the domain error type, and the validation rules and pure
//! projections for requests, comments, profiles, and screenshot uploads.

pub mod comment;
pub mod error;
pub mod news;
pub mod profile;
pub mod request;
pub mod screenshot;
pub mod types;
