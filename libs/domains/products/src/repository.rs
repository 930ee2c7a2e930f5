use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{OptionCreate, OptionUpdate, Product, ProductCreate, ProductUpdate};
use crate::pagination::Pageable;

/// Repository trait for Product persistence
///
/// A product and its options form one aggregate. Each write method checks
/// the aggregate's rules against the stored state and applies the change in
/// the same atomic step. Implementations assign ids to new products and new
/// options.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Check whether a category exists
    async fn category_exists(&self, category_id: i64) -> ProductResult<bool>;

    /// Store a new product with its initial options
    async fn insert(&self, input: ProductCreate) -> ProductResult<Product>;

    /// Get a product (with options) by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Products of one category, ordered and sliced per `pageable`, plus the
    /// total number of products in that category
    async fn find_page(
        &self,
        category_id: i64,
        pageable: &Pageable,
    ) -> ProductResult<(Vec<Product>, u64)>;

    /// Replace a product's own fields, leaving its options as stored
    async fn update(&self, id: i64, input: ProductUpdate) -> ProductResult<Product>;

    /// Append options with fresh ids
    ///
    /// Fails with `DuplicateOptionName` if a name is already taken.
    async fn add_options(
        &self,
        product_id: i64,
        inputs: Vec<OptionCreate>,
    ) -> ProductResult<Product>;

    /// See [`Product::apply_option_update`]
    async fn update_option(
        &self,
        product_id: i64,
        input: OptionUpdate,
    ) -> ProductResult<Product>;

    /// See [`Product::remove_options`]
    async fn delete_options(
        &self,
        product_id: i64,
        option_ids: &[i64],
    ) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Delete all given products, or none of them if any is missing
    async fn delete_many(&self, ids: &[i64]) -> ProductResult<u64>;

    /// Check whether a product exists
    async fn exists(&self, id: i64) -> ProductResult<bool>;
}
