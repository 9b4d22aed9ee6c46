use utoipa::OpenApi;

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::categories::models as categories_models;
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::products::models as products_models;
use crate::shared::types::{ErrorBody, HealthResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Health
        crate::health_check,
    ),
    components(schemas(
        categories_models::Category,
        categories_dtos::CategoryDto,
        products_models::Product,
        products_dtos::ProductDto,
        products_dtos::ProductDetailDto,
        MessageResponse,
        HealthResponse,
        ErrorBody,
    )),
    tags(
        (name = "categories", description = "Category CRUD"),
        (name = "products", description = "Product CRUD with category enrichment"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "kasir-api",
        description = "Layered CRUD service for categories and products",
    )
)]
pub struct ApiDoc;
