//! Product Service - Business logic layer

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    OptionCreate, OptionUpdate, Product, ProductCreate, ProductSummary, ProductUpdate,
};
use crate::pagination::{Page, Pageable};
use crate::repository::ProductRepository;

/// Operations the HTTP layer delegates to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Product with its full option list
    async fn get_product(&self, id: i64) -> ProductResult<Product>;

    async fn get_products_page(
        &self,
        pageable: Pageable,
        category_id: i64,
    ) -> ProductResult<Page<ProductSummary>>;

    /// Create a product and its options, returning the new product id
    async fn create_product(&self, input: ProductCreate) -> ProductResult<i64>;

    async fn update_product(&self, input: ProductUpdate, id: i64) -> ProductResult<i64>;

    async fn delete_product(&self, id: i64) -> ProductResult<i64>;

    /// Delete every listed product, or none if any id is unknown
    async fn delete_products(&self, ids: Vec<i64>) -> ProductResult<()>;

    async fn add_option(&self, input: OptionCreate, product_id: i64) -> ProductResult<()>;

    /// Batch variant of [`add_option`](Self::add_option). Not exposed over HTTP.
    async fn add_options(&self, inputs: Vec<OptionCreate>, product_id: i64) -> ProductResult<()>;

    async fn update_option(&self, input: OptionUpdate, product_id: i64) -> ProductResult<()>;

    /// Remove the listed options; the product must keep at least one
    async fn delete_options(&self, option_ids: Vec<i64>, product_id: i64) -> ProductResult<()>;
}

/// [`ProductService`] backed by a [`ProductRepository`]
///
/// Inputs are validated again here so the rules hold for callers that do not
/// go through the HTTP extractors. Rules that depend on a product's stored
/// options are enforced by the repository write itself.
pub struct CatalogService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    async fn load(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::ProductNotFound(id))
    }

    async fn ensure_category(&self, category_id: i64) -> ProductResult<()> {
        if self.repository.category_exists(category_id).await? {
            Ok(())
        } else {
            Err(ProductError::CategoryNotFound(category_id))
        }
    }
}

fn ensure_unique_names<'a>(names: impl IntoIterator<Item = &'a str>) -> ProductResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ProductError::DuplicateOptionName(name.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl<R: ProductRepository> ProductService for CatalogService<R> {
    #[instrument(skip(self))]
    async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.load(id).await
    }

    #[instrument(skip(self), fields(sort = %pageable.sort))]
    async fn get_products_page(
        &self,
        pageable: Pageable,
        category_id: i64,
    ) -> ProductResult<Page<ProductSummary>> {
        self.ensure_category(category_id).await?;

        let (products, total) = self.repository.find_page(category_id, &pageable).await?;
        Ok(Page::new(products, &pageable, total).map(|p| ProductSummary::from(&p)))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create_product(&self, input: ProductCreate) -> ProductResult<i64> {
        input.validate()?;
        if input.options.is_empty() {
            return Err(ProductError::EmptyOptions);
        }
        ensure_unique_names(input.options.iter().map(|o| o.name.as_str()))?;
        self.ensure_category(input.category_id).await?;

        let product = self.repository.insert(input).await?;
        Ok(product.id)
    }

    #[instrument(skip(self, input))]
    async fn update_product(&self, input: ProductUpdate, id: i64) -> ProductResult<i64> {
        input.validate()?;

        if !self.repository.exists(id).await? {
            return Err(ProductError::ProductNotFound(id));
        }
        self.ensure_category(input.category_id).await?;

        let product = self.repository.update(id, input).await?;
        Ok(product.id)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: i64) -> ProductResult<i64> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::ProductNotFound(id));
        }
        Ok(id)
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn delete_products(&self, ids: Vec<i64>) -> ProductResult<()> {
        if ids.is_empty() {
            return Err(ProductError::InvalidArgument(
                "productIds must not be empty".to_string(),
            ));
        }
        self.repository.delete_many(&ids).await?;
        Ok(())
    }

    #[instrument(skip(self, input), fields(option_name = %input.name))]
    async fn add_option(&self, input: OptionCreate, product_id: i64) -> ProductResult<()> {
        self.add_options(vec![input], product_id).await
    }

    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    async fn add_options(&self, inputs: Vec<OptionCreate>, product_id: i64) -> ProductResult<()> {
        if inputs.is_empty() {
            return Err(ProductError::EmptyOptions);
        }
        for input in &inputs {
            input.validate()?;
        }
        ensure_unique_names(inputs.iter().map(|o| o.name.as_str()))?;

        self.repository.add_options(product_id, inputs).await?;
        Ok(())
    }

    #[instrument(skip(self, input), fields(option_id = input.id))]
    async fn update_option(&self, input: OptionUpdate, product_id: i64) -> ProductResult<()> {
        input.validate()?;
        self.repository.update_option(product_id, input).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(count = option_ids.len()))]
    async fn delete_options(&self, option_ids: Vec<i64>, product_id: i64) -> ProductResult<()> {
        self.repository
            .delete_options(product_id, &option_ids)
            .await?;
        Ok(())
    }
}
