//! Custom extractors for Axum handlers.
//!
//! These wrap axum's built-in extractors so that every rejection is
//! rendered through [`AppError`](crate::errors::AppError) and carries
//! the standard error body.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
