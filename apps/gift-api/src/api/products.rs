//! Products API routes

use axum::Router;
use domain_products::{CatalogService, handlers};
use tracing::info;

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let service = CatalogService::new(state.repository.clone());
    handlers::router(service)
}

/// Register the configured categories so products can reference them
pub async fn seed_categories(state: &AppState) {
    for name in &state.config.seed_categories {
        let category = state.repository.insert_category(name.as_str()).await;
        info!(category_id = category.id, name = %category.name, "Seeded category");
    }
}
