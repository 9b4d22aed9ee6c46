mod core;
mod features;
mod shared;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{Config, StorageBackend};
use crate::core::openapi::ApiDoc;
use crate::core::{middleware, seed};
use crate::features::categories::{
    routes as categories_routes, CategoryRepository, CategoryService, MemoryCategoryRepository,
    PgCategoryRepository,
};
use crate::features::products::{
    routes as products_routes, MemoryProductRepository, PgProductRepository, ProductRepository,
    ProductService,
};
use crate::shared::types::HealthResponse;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "kasir-api is running".to_string(),
    })
}

/// Assemble the API router from the feature routers. Middleware layers are
/// applied by the caller.
fn app_router(
    category_service: Arc<CategoryService>,
    product_service: Arc<ProductService>,
) -> Router {
    Router::new()
        .merge(categories_routes::routes(category_service))
        .merge(products_routes::routes(product_service))
        .route("/health", get(health_check))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    // Select the repository implementations once, at startup
    let (category_repo, product_repo): (Arc<dyn CategoryRepository>, Arc<dyn ProductRepository>) =
        match config.storage.backend {
            StorageBackend::Postgres => {
                let db_config = config
                    .database
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

                let pool = db_config.create_pool().await?;
                tracing::info!("Database connection pool created");

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
                tracing::info!("Database migrations completed");

                if config.storage.seed {
                    seed::run(&pool)
                        .await
                        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;
                }

                let category_repo: Arc<dyn CategoryRepository> =
                    Arc::new(PgCategoryRepository::new(pool.clone()));
                let product_repo: Arc<dyn ProductRepository> =
                    Arc::new(PgProductRepository::new(pool));
                (category_repo, product_repo)
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage backend");

                let category_repo: Arc<dyn CategoryRepository> =
                    Arc::new(MemoryCategoryRepository::new());
                let product_repo: Arc<dyn ProductRepository> =
                    Arc::new(MemoryProductRepository::new());

                if config.storage.seed {
                    seed::run_memory(category_repo.as_ref(), product_repo.as_ref())
                        .await
                        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;
                }

                (category_repo, product_repo)
            }
        };

    let category_service = Arc::new(CategoryService::new(Arc::clone(&category_repo)));
    let product_service = Arc::new(ProductService::new(product_repo, category_repo));
    tracing::info!("Services initialized");

    let swagger = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    let app = Router::new()
        .merge(swagger)
        .merge(app_router(category_service, product_service))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn test_server() -> TestServer {
        let category_repo: Arc<dyn CategoryRepository> = Arc::new(MemoryCategoryRepository::new());
        let product_repo: Arc<dyn ProductRepository> = Arc::new(MemoryProductRepository::new());

        let category_service = Arc::new(CategoryService::new(Arc::clone(&category_repo)));
        let product_service = Arc::new(ProductService::new(product_repo, category_repo));

        TestServer::new(app_router(category_service, product_service)).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn create_category_returns_201_with_assigned_id() {
        let server = test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Minuman", "description": "drinks"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Minuman");
    }

    #[tokio::test]
    async fn product_detail_contains_referenced_category() {
        let server = test_server();

        let category: Value = server
            .post("/api/categories")
            .json(&json!({"name": "Minuman", "description": "drinks"}))
            .await
            .json();

        let product = server
            .post("/api/produk")
            .json(&json!({"nama": "Es Teh", "harga": 5000, "category_id": category["id"]}))
            .await;
        product.assert_status(StatusCode::CREATED);
        let product: Value = product.json();

        let response = server
            .get(&format!("/api/produk/{}", product["id"]))
            .await;
        response.assert_status_ok();

        let detail: Value = response.json();
        assert_eq!(detail["category"]["name"], "Minuman");
        assert_eq!(detail["harga"], 5000);
    }

    #[tokio::test]
    async fn missing_product_detail_is_404() {
        let server = test_server();

        let response = server.get("/api/produk/9999").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unparseable_id_is_400() {
        let server = test_server();

        let response = server.get("/api/produk/not-a-number").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_referenced_category_leaves_product_unenriched() {
        let server = test_server();

        let category: Value = server
            .post("/api/categories")
            .json(&json!({"name": "Snack", "description": "cemilan"}))
            .await
            .json();
        let product: Value = server
            .post("/api/produk")
            .json(&json!({"nama": "Keripik", "harga": 8000, "category_id": category["id"]}))
            .await
            .json();

        let deleted = server
            .delete(&format!("/api/categories/{}", category["id"]))
            .await;
        deleted.assert_status_ok();
        let deleted: Value = deleted.json();
        assert_eq!(deleted["message"], "Category deleted successfully");

        let detail = server.get(&format!("/api/produk/{}", product["id"])).await;
        detail.assert_status_ok();
        let detail: Value = detail.json();
        assert!(detail.get("category").is_none());
    }

    #[tokio::test]
    async fn update_missing_category_is_404() {
        let server = test_server();

        let response = server
            .put("/api/categories/42")
            .json(&json!({"name": "x", "description": "y"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_get_category_is_404() {
        let server = test_server();

        let category: Value = server
            .post("/api/categories")
            .json(&json!({"name": "Elektronik", "description": "gadget"}))
            .await
            .json();

        server
            .delete(&format!("/api/categories/{}", category["id"]))
            .await
            .assert_status_ok();

        let response = server
            .get(&format!("/api/categories/{}", category["id"]))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_categories_returns_bare_array() {
        let server = test_server();

        server
            .post("/api/categories")
            .json(&json!({"name": "Minuman", "description": ""}))
            .await;
        server
            .post("/api/categories")
            .json(&json!({"name": "Makanan", "description": ""}))
            .await;

        let response = server.get("/api/categories").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body.as_array().map(|a| a.len()), Some(2));
    }

    #[tokio::test]
    async fn update_product_fixes_id_to_path() {
        let server = test_server();

        let product: Value = server
            .post("/api/produk")
            .json(&json!({"nama": "Kopi", "harga": 8000}))
            .await
            .json();

        let response = server
            .put(&format!("/api/produk/{}", product["id"]))
            .json(&json!({"id": 99, "nama": "Kopi Hitam", "harga": 9000}))
            .await;
        response.assert_status_ok();

        let updated: Value = response.json();
        assert_eq!(updated["id"], product["id"]);
        assert_eq!(updated["nama"], "Kopi Hitam");
    }
}
