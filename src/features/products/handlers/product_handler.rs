use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::features::products::dtos::{ProductDetailDto, ProductDto};
use crate::features::products::models::Product;
use crate::features::products::services::ProductService;
use crate::shared::types::MessageResponse;

/// List all products
#[utoipa::path(
    get,
    path = "/api/produk",
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<Vec<Product>>> {
    let products = service.list().await?;

    Ok(Json(products))
}

/// Get a product by id, with its category attached when resolvable
#[utoipa::path(
    get,
    path = "/api/produk/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDetailDto),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetailDto>> {
    let product = service.get_by_id(id).await?;

    Ok(Json(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/produk",
    request_body = ProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Malformed request body")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    Json(dto): Json<ProductDto>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = service.create(dto).await?;

    tracing::info!("Product {} created: {}", product.id, product.nama);

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/api/produk/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i32>,
    Json(dto): Json<ProductDto>,
) -> Result<Json<Product>> {
    let product = service.update(id, dto).await?;

    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/produk/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    service.delete(id).await?;

    tracing::info!("Product {} deleted", id);

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
