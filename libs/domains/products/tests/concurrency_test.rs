//! Concurrent option writes on one product
//!
//! The repository is wrapped so every call yields to the scheduler before it
//! reaches the store, letting the service calls of concurrent requests
//! interleave the way they would against a networked backend.

use async_trait::async_trait;
use domain_products::*;
use std::sync::Arc;

struct YieldingRepository(InMemoryProductRepository);

#[async_trait]
impl ProductRepository for YieldingRepository {
    async fn category_exists(&self, category_id: i64) -> ProductResult<bool> {
        tokio::task::yield_now().await;
        self.0.category_exists(category_id).await
    }

    async fn insert(&self, input: ProductCreate) -> ProductResult<Product> {
        tokio::task::yield_now().await;
        self.0.insert(input).await
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        tokio::task::yield_now().await;
        self.0.get_by_id(id).await
    }

    async fn find_page(
        &self,
        category_id: i64,
        pageable: &Pageable,
    ) -> ProductResult<(Vec<Product>, u64)> {
        tokio::task::yield_now().await;
        self.0.find_page(category_id, pageable).await
    }

    async fn update(&self, id: i64, input: ProductUpdate) -> ProductResult<Product> {
        tokio::task::yield_now().await;
        self.0.update(id, input).await
    }

    async fn add_options(
        &self,
        product_id: i64,
        inputs: Vec<OptionCreate>,
    ) -> ProductResult<Product> {
        tokio::task::yield_now().await;
        self.0.add_options(product_id, inputs).await
    }

    async fn update_option(
        &self,
        product_id: i64,
        input: OptionUpdate,
    ) -> ProductResult<Product> {
        tokio::task::yield_now().await;
        self.0.update_option(product_id, input).await
    }

    async fn delete_options(
        &self,
        product_id: i64,
        option_ids: &[i64],
    ) -> ProductResult<Product> {
        tokio::task::yield_now().await;
        self.0.delete_options(product_id, option_ids).await
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        tokio::task::yield_now().await;
        self.0.delete(id).await
    }

    async fn delete_many(&self, ids: &[i64]) -> ProductResult<u64> {
        tokio::task::yield_now().await;
        self.0.delete_many(ids).await
    }

    async fn exists(&self, id: i64) -> ProductResult<bool> {
        tokio::task::yield_now().await;
        self.0.exists(id).await
    }
}

fn option(name: &str) -> OptionCreate {
    OptionCreate {
        name: name.to_string(),
        quantity: 1,
    }
}

/// Catalog with one product carrying options "A" and "B"
async fn setup() -> (CatalogService<YieldingRepository>, InMemoryProductRepository, Product) {
    let store = InMemoryProductRepository::new();
    let category = store.insert_category("Birthday").await;
    let product = store
        .insert(ProductCreate {
            name: "Mug".to_string(),
            price: 1500,
            image_url: "https://img.example.com/mug.png".to_string(),
            category_id: category.id,
            options: vec![option("A"), option("B")],
        })
        .await
        .unwrap();

    let service = CatalogService::new(YieldingRepository(store.clone()));
    (service, store, product)
}

async fn option_names(store: &InMemoryProductRepository, product_id: i64) -> Vec<String> {
    let product = store.get_by_id(product_id).await.unwrap().unwrap();
    let mut names: Vec<String> = product.options.into_iter().map(|o| o.name).collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_interleaved_add_and_delete_keep_every_confirmed_write() {
    let (service, store, product) = setup().await;
    let option_a = product.options[0].id;

    let (add_c, add_d, delete_a) = tokio::join!(
        service.add_option(option("C"), product.id),
        service.add_option(option("D"), product.id),
        service.delete_options(vec![option_a], product.id),
    );
    add_c.unwrap();
    add_d.unwrap();
    delete_a.unwrap();

    assert_eq!(option_names(&store, product.id).await, vec!["B", "C", "D"]);
}

#[tokio::test]
async fn test_interleaved_rename_and_add_keep_both() {
    let (service, store, product) = setup().await;
    let option_b = product.options[1].id;

    let (rename, add) = tokio::join!(
        service.update_option(
            OptionUpdate {
                id: option_b,
                name: "Blue".to_string(),
                quantity: 3,
            },
            product.id,
        ),
        service.add_option(option("C"), product.id),
    );
    rename.unwrap();
    add.unwrap();

    assert_eq!(option_names(&store, product.id).await, vec!["A", "Blue", "C"]);
}

#[tokio::test]
async fn test_interleaved_product_update_keeps_new_option() {
    let (service, store, product) = setup().await;

    let (update, add) = tokio::join!(
        service.update_product(
            ProductUpdate {
                name: "Big Mug".to_string(),
                price: 2500,
                image_url: "https://img.example.com/big.png".to_string(),
                category_id: product.category_id,
            },
            product.id,
        ),
        service.add_option(option("C"), product.id),
    );
    update.unwrap();
    add.unwrap();

    let stored = store.get_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Big Mug");
    assert_eq!(option_names(&store, product.id).await, vec!["A", "B", "C"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_adds_of_same_name_admit_exactly_one() {
    let (service, store, product) = setup().await;
    let service = Arc::new(service);
    let product_id = product.id;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.add_option(option("C"), product_id).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => admitted += 1,
            Err(err) => assert!(matches!(err, ProductError::DuplicateOptionName(_))),
        }
    }

    assert_eq!(admitted, 1);
    assert_eq!(option_names(&store, product_id).await, vec!["A", "B", "C"]);
}
