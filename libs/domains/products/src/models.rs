use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Catalog category a product belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Purchasable variant of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
}

/// Product entity together with its full option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Price in the smallest currency unit
    pub price: i64,
    pub image_url: String,
    pub category_id: i64,
    pub options: Vec<ProductOption>,
}

/// Product as it appears in a page listing (options omitted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub category_id: i64,
}

/// DTO for creating a product with its initial options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 15, message = "name must be 1 to 15 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    #[validate(length(min = 1, max = 255, message = "imageUrl must be 1 to 255 characters"))]
    pub image_url: String,
    #[validate(range(min = 1, message = "categoryId must be positive"))]
    pub category_id: i64,
    #[validate(length(min = 1, message = "at least one option is required"), nested)]
    pub options: Vec<OptionCreate>,
}

/// DTO for replacing a product's own fields (options are managed separately)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 15, message = "name must be 1 to 15 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    #[validate(length(min = 1, max = 255, message = "imageUrl must be 1 to 255 characters"))]
    pub image_url: String,
    #[validate(range(min = 1, message = "categoryId must be positive"))]
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionCreate {
    #[validate(length(min = 1, max = 50, message = "option name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(range(
        min = 1,
        max = 100_000_000,
        message = "quantity must be between 1 and 100000000"
    ))]
    pub quantity: i64,
}

/// Request body for updating one option; the option id comes from the path
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionUpdateRequest {
    #[validate(length(min = 1, max = 50, message = "option name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(range(
        min = 1,
        max = 100_000_000,
        message = "quantity must be between 1 and 100000000"
    ))]
    pub quantity: i64,
}

/// Option update addressed by id, as handed to the service
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct OptionUpdate {
    pub id: i64,
    #[validate(length(min = 1, max = 50, message = "option name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(range(
        min = 1,
        max = 100_000_000,
        message = "quantity must be between 1 and 100000000"
    ))]
    pub quantity: i64,
}

/// Bulk product delete request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdsRequest {
    #[validate(length(min = 1, message = "productIds must not be empty"))]
    pub product_ids: Vec<i64>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            category_id: product.category_id,
        }
    }
}

impl OptionUpdateRequest {
    /// Bind this body to the option id taken from the request path
    pub fn into_update(self, option_id: i64) -> OptionUpdate {
        OptionUpdate {
            id: option_id,
            name: self.name,
            quantity: self.quantity,
        }
    }
}

impl Product {
    /// Apply a full update of the product's own fields
    pub fn apply_update(&mut self, update: ProductUpdate) {
        self.name = update.name;
        self.price = update.price;
        self.image_url = update.image_url;
        self.category_id = update.category_id;
    }

    pub fn option(&self, option_id: i64) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Fails if a name is already used by one of this product's options or
    /// appears twice in `names`.
    pub fn ensure_names_available<'a>(
        &'a self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> ProductResult<()> {
        let mut taken: HashSet<&str> = self.options.iter().map(|o| o.name.as_str()).collect();
        for name in names {
            if !taken.insert(name) {
                return Err(ProductError::DuplicateOptionName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Overwrite one option's name and quantity.
    ///
    /// The option must belong to this product and the new name must not be
    /// taken by a sibling. On error the product is left untouched.
    pub fn apply_option_update(&mut self, update: OptionUpdate) -> ProductResult<()> {
        if self.option(update.id).is_none() {
            return Err(ProductError::OptionNotFound {
                product_id: self.id,
                option_id: update.id,
            });
        }
        if self
            .options
            .iter()
            .any(|o| o.id != update.id && o.name == update.name)
        {
            return Err(ProductError::DuplicateOptionName(update.name));
        }

        if let Some(option) = self.options.iter_mut().find(|o| o.id == update.id) {
            option.name = update.name;
            option.quantity = update.quantity;
        }
        Ok(())
    }

    /// Remove the listed options, keeping at least one. On error the product
    /// is left untouched.
    pub fn remove_options(&mut self, option_ids: &[i64]) -> ProductResult<()> {
        if let Some(&missing) = option_ids.iter().find(|id| self.option(**id).is_none()) {
            return Err(ProductError::OptionNotFound {
                product_id: self.id,
                option_id: missing,
            });
        }

        let doomed: HashSet<i64> = option_ids.iter().copied().collect();
        if self.options.iter().all(|o| doomed.contains(&o.id)) {
            return Err(ProductError::LastOption(self.id));
        }
        self.options.retain(|o| !doomed.contains(&o.id));
        Ok(())
    }
}
