//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Gift API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gift API",
        version = "0.1.0",
        description = "Gift catalog: products and their options"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(axum_helpers::server::health::health_handler),
    components(schemas(axum_helpers::HealthResponse)),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Products and their options"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
