use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Option {option_id} not found on product {product_id}")]
    OptionNotFound { product_id: i64, option_id: i64 },

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("Option '{0}' already exists on this product")]
    DuplicateOptionName(String),

    #[error("Product {0} must keep at least one option")]
    LastOption(i64),

    #[error("A product needs at least one option")]
    EmptyOptions,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            err @ ProductError::OptionNotFound { .. } => AppError::NotFound(err.to_string()),
            ProductError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            err @ ProductError::DuplicateOptionName(_) => AppError::Conflict(err.to_string()),
            err @ (ProductError::LastOption(_) | ProductError::EmptyOptions) => {
                AppError::BadRequest(err.to_string())
            }
            ProductError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
