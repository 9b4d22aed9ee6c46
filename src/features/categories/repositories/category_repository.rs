use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryDto;
use crate::features::categories::models::Category;

/// Data-access contract for categories.
///
/// Both implementations share the same error semantics: `get_by_id`,
/// `update` and `delete` fail with `AppError::NotFound` when no row matches,
/// and `update` never creates a row.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Category>>;
    async fn get_by_id(&self, id: i32) -> Result<Category>;
    async fn create(&self, data: CategoryDto) -> Result<Category>;
    async fn update(&self, id: i32, data: CategoryDto) -> Result<Category>;
    async fn delete(&self, id: i32) -> Result<()>;
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Category {} not found", id))
}

/// PostgreSQL-backed repository; ids come from the table's SERIAL sequence
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn get_all(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    async fn get_by_id(&self, id: i32) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: CategoryDto) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) \
             RETURNING id, name, description",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn update(&self, id: i32, data: CategoryDto) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1, description = $2 WHERE id = $3 \
             RETURNING id, name, description",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

/// In-memory repository backed by a linear-scanned vector.
///
/// Ids are assigned as `len + 1`: after a deletion the next create can reuse
/// an existing id. The Postgres variant never reuses ids. The divergence is
/// intentional (see DESIGN.md).
pub struct MemoryCategoryRepository {
    items: Mutex<Vec<Category>>,
}

impl MemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn get_all(&self) -> Result<Vec<Category>> {
        Ok(self.items.lock().await.clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Category> {
        self.items
            .lock()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: CategoryDto) -> Result<Category> {
        let mut items = self.items.lock().await;
        let category = Category {
            id: (items.len() + 1) as i32,
            name: data.name,
            description: data.description,
        };
        items.push(category.clone());

        Ok(category)
    }

    async fn update(&self, id: i32, data: CategoryDto) -> Result<Category> {
        let mut items = self.items.lock().await;
        let category = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;

        category.name = data.name;
        category.description = data.description;

        Ok(category.clone())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut items = self.items.lock().await;
        let position = items
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;

        items.remove(position);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, description: &str) -> CategoryDto {
        CategoryDto {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = MemoryCategoryRepository::new();

        let first = repo.create(dto("Minuman", "Segala jenis minuman")).await.unwrap();
        let second = repo.create(dto("Makanan", "Segala jenis makanan")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn get_by_id_returns_created_category() {
        let repo = MemoryCategoryRepository::new();

        let created = repo.create(dto("Snack", "Makanan ringan")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let repo = MemoryCategoryRepository::new();

        let err = repo.get_by_id(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let repo = MemoryCategoryRepository::new();

        let created = repo.create(dto("Minuman", "old")).await.unwrap();
        let updated = repo
            .update(created.id, dto("Minuman Dingin", "new"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Minuman Dingin");
        assert_eq!(updated.description, "new");
    }

    #[tokio::test]
    async fn update_missing_is_not_found_and_creates_nothing() {
        let repo = MemoryCategoryRepository::new();

        let err = repo.update(7, dto("x", "y")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let repo = MemoryCategoryRepository::new();

        let created = repo.create(dto("Elektronik", "gadget")).await.unwrap();
        repo.delete(created.id).await.unwrap();

        let err = repo.get_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = MemoryCategoryRepository::new();

        let err = repo.delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // Pins the len+1 assignment rule: deleting from the middle makes the next
    // create collide with an id that is still in use. The Postgres variant
    // does not behave this way.
    #[tokio::test]
    async fn len_plus_one_reuses_ids_after_deletion() {
        let repo = MemoryCategoryRepository::new();

        repo.create(dto("a", "")).await.unwrap();
        let second = repo.create(dto("b", "")).await.unwrap();
        repo.delete(1).await.unwrap();

        let third = repo.create(dto("c", "")).await.unwrap();
        assert_eq!(third.id, second.id);
    }
}
