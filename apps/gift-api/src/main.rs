//! Gift API - REST server for the gift catalog

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::InMemoryProductRepository;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState {
        config,
        repository: InMemoryProductRepository::new(),
    };
    api::products::seed_categories(&state).await;

    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server).await?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on {}",
        state.config.app.name,
        state.config.app.version,
        state.config.server.address()
    );

    let repository = state.repository.clone();
    create_production_app(app, &state.config.server, async move {
        let categories = repository.categories().await;
        info!(categories = categories.len(), "Discarding in-memory catalog");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Gift API shutdown complete");
    Ok(())
}
