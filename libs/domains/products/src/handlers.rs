//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AppError, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestArgumentResponse, BadRequestPathResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    OptionCreate, OptionUpdateRequest, Product, ProductCreate, ProductIdsRequest, ProductOption,
    ProductSummary, ProductUpdate,
};
use crate::pagination::{Page, PageParams};
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        delete_products,
        add_option,
        update_option,
        delete_options,
    ),
    components(
        schemas(
            Product, ProductOption, ProductSummary, Page<ProductSummary>,
            ProductCreate, ProductUpdate, ProductIdsRequest,
            OptionCreate, OptionUpdateRequest
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestArgumentResponse,
            BadRequestPathResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Products and their options")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
///
/// No route exposes [`ProductService::add_options`]; options are added one
/// at a time.
pub fn router<S: ProductService + 'static>(service: S) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products::<S>)
                .post(create_product::<S>)
                .delete(delete_products::<S>),
        )
        .route(
            "/{id}",
            get(get_product::<S>)
                .put(update_product::<S>)
                .delete(delete_product::<S>),
        )
        .route(
            "/{id}/options",
            post(add_option::<S>).delete(delete_options::<S>),
        )
        .route("/{id}/options/{option_id}", put(update_option::<S>))
        .with_state(shared_service)
}

/// List one page of a category's products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(PageParams),
    responses(
        (status = 200, description = "Page of products", body = Page<ProductSummary>),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: ProductService>(
    State(service): State<Arc<S>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<ProductSummary>>, AppError> {
    let Query(params) = query.map_err(|e| AppError::InvalidArgument(e.body_text()))?;
    let pageable = params.to_pageable()?;

    let page = service
        .get_products_page(pageable, params.category_id)
        .await?;
    Ok(Json(page))
}

/// Create a product with its initial options
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Id of the created product", body = i64),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: ProductService>(
    State(service): State<Arc<S>>,
    ValidatedJson(input): ValidatedJson<ProductCreate>,
) -> ProductResult<impl IntoResponse> {
    let id = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

/// Get a product with all of its options
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: ProductService>(
    State(service): State<Arc<S>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product's own fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Id of the updated product", body = i64),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: ProductService>(
    State(service): State<Arc<S>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductUpdate>,
) -> ProductResult<Json<i64>> {
    let id = service.update_product(input, id).await?;
    Ok(Json(id))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Id of the deleted product", body = i64),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: ProductService>(
    State(service): State<Arc<S>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<i64>> {
    let id = service.delete_product(id).await?;
    Ok(Json(id))
}

/// Delete several products at once (all or nothing)
#[utoipa::path(
    delete,
    path = "",
    tag = "Products",
    request_body = ProductIdsRequest,
    responses(
        (status = 200, description = "Products deleted"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_products<S: ProductService>(
    State(service): State<Arc<S>>,
    ValidatedJson(input): ValidatedJson<ProductIdsRequest>,
) -> ProductResult<StatusCode> {
    service.delete_products(input.product_ids).await?;
    Ok(StatusCode::OK)
}

/// Add one option to a product
#[utoipa::path(
    post,
    path = "/{id}/options",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = OptionCreate,
    responses(
        (status = 200, description = "Option added"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_option<S: ProductService>(
    State(service): State<Arc<S>>,
    IdPath(product_id): IdPath,
    ValidatedJson(input): ValidatedJson<OptionCreate>,
) -> ProductResult<StatusCode> {
    service.add_option(input, product_id).await?;
    Ok(StatusCode::OK)
}

/// Update one option of a product
#[utoipa::path(
    put,
    path = "/{id}/options/{option_id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID"),
        ("option_id" = i64, Path, description = "Option ID")
    ),
    request_body = OptionUpdateRequest,
    responses(
        (status = 200, description = "Option updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_option<S: ProductService>(
    State(service): State<Arc<S>>,
    IdPath((product_id, option_id)): IdPath<(i64, i64)>,
    ValidatedJson(input): ValidatedJson<OptionUpdateRequest>,
) -> ProductResult<StatusCode> {
    service
        .update_option(input.into_update(option_id), product_id)
        .await?;
    Ok(StatusCode::OK)
}

/// Delete options of a product; echoes the requested ids
#[utoipa::path(
    delete,
    path = "/{id}/options",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = Vec<i64>,
    responses(
        (status = 200, description = "Ids of the deleted options", body = Vec<i64>),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_options<S: ProductService>(
    State(service): State<Arc<S>>,
    IdPath(product_id): IdPath,
    body: Result<Json<Vec<i64>>, JsonRejection>,
) -> Result<Json<Vec<i64>>, AppError> {
    let Json(option_ids) = body?;

    service
        .delete_options(option_ids.clone(), product_id)
        .await?;
    Ok(Json(option_ids))
}
