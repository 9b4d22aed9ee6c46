use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryDto;
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;

/// Service for category operations.
///
/// Pure pass-through over the repository; the layer exists as a seam for
/// future business rules.
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.repo.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Category> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, data: CategoryDto) -> Result<Category> {
        self.repo.create(data).await
    }

    pub async fn update(&self, id: i32, data: CategoryDto) -> Result<Category> {
        self.repo.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        self.repo.delete(id).await
    }
}
