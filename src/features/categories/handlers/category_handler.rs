use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryDto;
use crate::features::categories::models::Category;
use crate::features::categories::services::CategoryService;
use crate::shared::types::MessageResponse;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<Vec<Category>>> {
    let categories = service.list().await?;

    Ok(Json(categories))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
) -> Result<Json<Category>> {
    let category = service.get_by_id(id).await?;

    Ok(Json(category))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Malformed request body")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    Json(dto): Json<CategoryDto>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = service.create(dto).await?;

    tracing::info!("Category {} created: {}", category.id, category.name);

    Ok((StatusCode::CREATED, Json(category)))
}

/// Replace a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
    Json(dto): Json<CategoryDto>,
) -> Result<Json<Category>> {
    let category = service.update(id, dto).await?;

    Ok(Json(category))
}

/// Delete a category
///
/// Products referencing the category survive with their reference cleared
/// (ON DELETE SET NULL), so deletion is never blocked.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    service.delete(id).await?;

    tracing::info!("Category {} deleted", id);

    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
