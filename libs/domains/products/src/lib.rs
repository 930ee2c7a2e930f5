//! Products Domain
//!
//! Products of the gift catalog and their options (purchasable variants).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, page-size bounds check
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← ProductService trait + CatalogService rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, pagination
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, CatalogService, InMemoryProductRepository};
//!
//! # async fn example() {
//! let repository = InMemoryProductRepository::new();
//! repository.insert_category("Birthday").await;
//!
//! let service = CatalogService::new(repository);
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{
    Category, OptionCreate, OptionUpdate, OptionUpdateRequest, Product, ProductCreate,
    ProductIdsRequest, ProductOption, ProductSummary, ProductUpdate,
};
pub use pagination::{Direction, Page, PageParams, Pageable, Sort, SortProperty};
pub use repository::ProductRepository;
pub use service::{CatalogService, ProductService};
