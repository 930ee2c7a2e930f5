use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    Category, OptionCreate, OptionUpdate, Product, ProductCreate, ProductOption, ProductUpdate,
};
use crate::pagination::{Direction, Pageable, SortProperty};
use crate::repository::ProductRepository;

#[derive(Debug)]
struct CatalogStore {
    categories: HashMap<i64, Category>,
    products: HashMap<i64, Product>,
    next_category_id: i64,
    next_product_id: i64,
    next_option_id: i64,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            categories: HashMap::new(),
            products: HashMap::new(),
            next_category_id: 1,
            next_product_id: 1,
            next_option_id: 1,
        }
    }
}

fn new_option(next_option_id: &mut i64, input: OptionCreate) -> ProductOption {
    let id = *next_option_id;
    *next_option_id += 1;
    ProductOption {
        id,
        name: input.name,
        quantity: input.quantity,
    }
}

impl CatalogStore {
    fn product_mut(&mut self, id: i64) -> ProductResult<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or(ProductError::ProductNotFound(id))
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids are sequential per kind, starting at 1. Each call holds the lock for
/// its whole duration, so every call is atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<CatalogStore>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category and return it with its assigned id
    pub async fn insert_category(&self, name: impl Into<String>) -> Category {
        let mut store = self.store.write().await;
        let category = Category {
            id: store.next_category_id,
            name: name.into(),
        };
        store.next_category_id += 1;
        store.categories.insert(category.id, category.clone());

        tracing::info!(category_id = category.id, name = %category.name, "Created category");
        category
    }

    pub async fn categories(&self) -> Vec<Category> {
        let store = self.store.read().await;
        let mut categories: Vec<Category> = store.categories.values().cloned().collect();
        categories.sort_by_key(|c| c.id);
        categories
    }
}

fn compare(a: &Product, b: &Product, property: SortProperty) -> Ordering {
    let primary = match property {
        SortProperty::Id => a.id.cmp(&b.id),
        SortProperty::Name => a.name.cmp(&b.name),
        SortProperty::Price => a.price.cmp(&b.price),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn category_exists(&self, category_id: i64) -> ProductResult<bool> {
        let store = self.store.read().await;
        Ok(store.categories.contains_key(&category_id))
    }

    async fn insert(&self, input: ProductCreate) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store.next_product_id;
        store.next_product_id += 1;
        let options = input
            .options
            .into_iter()
            .map(|o| new_option(&mut store.next_option_id, o))
            .collect();

        let product = Product {
            id,
            name: input.name,
            price: input.price,
            image_url: input.image_url,
            category_id: input.category_id,
            options,
        };
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, name = %product.name, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn find_page(
        &self,
        category_id: i64,
        pageable: &Pageable,
    ) -> ProductResult<(Vec<Product>, u64)> {
        let store = self.store.read().await;

        let mut matching: Vec<&Product> = store
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .collect();
        let total = matching.len() as u64;

        let property = pageable.sort.property;
        match pageable.sort.direction {
            Direction::Asc => matching.sort_by(|a, b| compare(a, b, property)),
            Direction::Desc => matching.sort_by(|a, b| compare(b, a, property)),
        }

        let content = matching
            .into_iter()
            .skip(pageable.offset())
            .take(pageable.size as usize)
            .cloned()
            .collect();

        Ok((content, total))
    }

    async fn update(&self, id: i64, input: ProductUpdate) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store.product_mut(id)?;
        product.apply_update(input);

        tracing::debug!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn add_options(
        &self,
        product_id: i64,
        inputs: Vec<OptionCreate>,
    ) -> ProductResult<Product> {
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        let product = store
            .products
            .get_mut(&product_id)
            .ok_or(ProductError::ProductNotFound(product_id))?;

        product.ensure_names_available(inputs.iter().map(|o| o.name.as_str()))?;
        for input in inputs {
            product
                .options
                .push(new_option(&mut store.next_option_id, input));
        }

        tracing::debug!(product_id, options = product.options.len(), "Added options");
        Ok(product.clone())
    }

    async fn update_option(
        &self,
        product_id: i64,
        input: OptionUpdate,
    ) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store.product_mut(product_id)?;
        product.apply_option_update(input)?;

        tracing::debug!(product_id, "Updated option");
        Ok(product.clone())
    }

    async fn delete_options(
        &self,
        product_id: i64,
        option_ids: &[i64],
    ) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store.product_mut(product_id)?;
        product.remove_options(option_ids)?;

        tracing::debug!(product_id, removed = option_ids.len(), "Deleted options");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let existed = store.products.remove(&id).is_some();
        if existed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(existed)
    }

    async fn delete_many(&self, ids: &[i64]) -> ProductResult<u64> {
        let mut store = self.store.write().await;

        if let Some(missing) = ids.iter().find(|id| !store.products.contains_key(*id)) {
            return Err(ProductError::ProductNotFound(*missing));
        }

        let mut deleted = 0;
        for id in ids {
            if store.products.remove(id).is_some() {
                deleted += 1;
            }
        }

        tracing::info!(count = deleted, "Deleted products");
        Ok(deleted)
    }

    async fn exists(&self, id: i64) -> ProductResult<bool> {
        let store = self.store.read().await;
        Ok(store.products.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Sort;

    fn create(name: &str, price: i64, category_id: i64) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            price,
            image_url: "https://img.example.com/p.png".to_string(),
            category_id,
            options: vec![OptionCreate {
                name: "Default".to_string(),
                quantity: 1,
            }],
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemoryProductRepository::new();
        let a = repo.insert(create("A", 1, 1)).await.unwrap();
        let b = repo.insert(create("B", 1, 1)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.options[0].id, 1);
        assert_eq!(b.options[0].id, 2);
    }

    #[tokio::test]
    async fn test_categories() {
        let repo = InMemoryProductRepository::new();
        let gifts = repo.insert_category("Gifts").await;
        assert_eq!(gifts.id, 1);
        assert!(repo.category_exists(1).await.unwrap());
        assert!(!repo.category_exists(2).await.unwrap());
        assert_eq!(repo.categories().await, vec![gifts]);
    }

    #[tokio::test]
    async fn test_find_page_filters_sorts_and_slices() {
        let repo = InMemoryProductRepository::new();
        repo.insert(create("Cake", 300, 1)).await.unwrap();
        repo.insert(create("Apple", 100, 1)).await.unwrap();
        repo.insert(create("Bread", 200, 1)).await.unwrap();
        repo.insert(create("Other", 50, 2)).await.unwrap();

        let (items, total) = repo
            .find_page(1, &Pageable::new(0, 2, Sort::default()))
            .await
            .unwrap();
        assert_eq!(total, 3);
        let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Bread"]);

        let (items, _) = repo
            .find_page(
                1,
                &Pageable::new(1, 2, Sort::new(SortProperty::Price, Direction::Desc)),
            )
            .await
            .unwrap();
        let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple"]);
    }

    #[tokio::test]
    async fn test_add_options_assigns_ids_and_rejects_duplicates() {
        let repo = InMemoryProductRepository::new();
        let product = repo.insert(create("Mug", 1, 1)).await.unwrap();

        let updated = repo
            .add_options(
                product.id,
                vec![OptionCreate {
                    name: "Blue".to_string(),
                    quantity: 2,
                }],
            )
            .await
            .unwrap();
        assert_eq!(updated.options.len(), 2);
        assert_eq!(updated.options[1].id, 2);

        let err = repo
            .add_options(
                product.id,
                vec![OptionCreate {
                    name: "Blue".to_string(),
                    quantity: 1,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::DuplicateOptionName(name) if name == "Blue"));

        let stored = repo.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored.options.len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_stored_options() {
        let repo = InMemoryProductRepository::new();
        let product = repo.insert(create("Mug", 1, 1)).await.unwrap();
        repo.add_options(
            product.id,
            vec![OptionCreate {
                name: "Blue".to_string(),
                quantity: 2,
            }],
        )
        .await
        .unwrap();

        let updated = repo
            .update(
                product.id,
                ProductUpdate {
                    name: "Cup".to_string(),
                    price: 5,
                    image_url: "https://img.example.com/cup.png".to_string(),
                    category_id: 2,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Cup");
        assert_eq!(updated.category_id, 2);
        assert_eq!(updated.options.len(), 2);
    }

    #[tokio::test]
    async fn test_writes_to_missing_product() {
        let repo = InMemoryProductRepository::new();
        let update = ProductUpdate {
            name: "Ghost".to_string(),
            price: 0,
            image_url: "x".to_string(),
            category_id: 1,
        };
        assert!(matches!(
            repo.update(99, update).await,
            Err(ProductError::ProductNotFound(99))
        ));
        assert!(matches!(
            repo.add_options(99, vec![]).await,
            Err(ProductError::ProductNotFound(99))
        ));
        assert!(matches!(
            repo.delete_options(99, &[1]).await,
            Err(ProductError::ProductNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_options_apply_to_stored_state() {
        let repo = InMemoryProductRepository::new();
        let product = repo.insert(create("Mug", 1, 1)).await.unwrap();
        let default_id = product.options[0].id;
        let added = repo
            .add_options(
                product.id,
                vec![OptionCreate {
                    name: "Blue".to_string(),
                    quantity: 2,
                }],
            )
            .await
            .unwrap();
        let blue_id = added.options[1].id;

        repo.update_option(
            product.id,
            OptionUpdate {
                id: blue_id,
                name: "Navy".to_string(),
                quantity: 9,
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            repo.delete_options(product.id, &[default_id, blue_id]).await,
            Err(ProductError::LastOption(_))
        ));

        let remaining = repo.delete_options(product.id, &[default_id]).await.unwrap();
        assert_eq!(remaining.options.len(), 1);
        assert_eq!(remaining.options[0].name, "Navy");
        assert_eq!(remaining.options[0].quantity, 9);

        let stored = repo.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored, remaining);
    }

    #[tokio::test]
    async fn test_delete_many_is_all_or_nothing() {
        let repo = InMemoryProductRepository::new();
        repo.insert(create("A", 1, 1)).await.unwrap();
        repo.insert(create("B", 1, 1)).await.unwrap();

        let err = repo.delete_many(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, ProductError::ProductNotFound(3)));
        assert!(repo.exists(1).await.unwrap());
        assert!(repo.exists(2).await.unwrap());

        assert_eq!(repo.delete_many(&[1, 2]).await.unwrap(), 2);
        assert!(!repo.exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = InMemoryProductRepository::new();
        repo.insert(create("A", 1, 1)).await.unwrap();
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }
}
