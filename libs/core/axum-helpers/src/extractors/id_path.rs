//! Typed path parameter extractor with structured rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Extractor for numeric (or tuple) path parameters.
///
/// Defaults to a single `i64` id. Unparseable segments are rejected with
/// `400 INVALID_PATH_PARAMETER` instead of axum's plain-text body.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// async fn get_option(IdPath((product_id, option_id)): IdPath<(i64, i64)>) -> String {
///     format!("{product_id}/{option_id}")
/// }
///
/// let app = Router::new()
///     .route("/products/{id}", get(get_product))
///     .route("/products/{id}/options/{option_id}", get(get_option));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T = i64>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(IdPath(value))
    }
}
