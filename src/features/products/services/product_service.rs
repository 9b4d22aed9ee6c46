use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::products::dtos::{ProductDetailDto, ProductDto};
use crate::features::products::models::Product;
use crate::features::products::repositories::ProductRepository;

/// Service for product operations.
///
/// Pass-through over the product repository, except `get_by_id`, which
/// enriches the product with its category via a second lookup.
pub struct ProductService {
    product_repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.product_repo.get_all().await
    }

    /// Fetch a product and best-effort attach its category.
    ///
    /// The join is two sequential reads with no transaction tying them
    /// together; a category deleted in between simply yields a product
    /// without `category`. A missing or dangling `category_id` is not an
    /// error.
    pub async fn get_by_id(&self, id: i32) -> Result<ProductDetailDto> {
        let product = self.product_repo.get_by_id(id).await?;

        let category = match product.category_id {
            Some(category_id) => match self.category_repo.get_by_id(category_id).await {
                Ok(category) => Some(category),
                Err(AppError::NotFound(_)) => None,
                Err(e) => {
                    tracing::warn!(
                        "Category lookup for product {} failed, returning without category: {}",
                        id,
                        e
                    );
                    None
                }
            },
            None => None,
        };

        Ok(ProductDetailDto::new(product, category))
    }

    pub async fn create(&self, data: ProductDto) -> Result<Product> {
        self.product_repo.create(data).await
    }

    pub async fn update(&self, id: i32, data: ProductDto) -> Result<Product> {
        self.product_repo.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        self.product_repo.delete(id).await
    }
}
