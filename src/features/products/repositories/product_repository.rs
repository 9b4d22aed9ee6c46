use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::ProductDto;
use crate::features::products::models::Product;

/// Data-access contract for products.
///
/// Same shape and error semantics as the category repository, scoped to
/// products. Only `nama`, `harga` and `category_id` are persisted.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>>;
    async fn get_by_id(&self, id: i32) -> Result<Product>;
    async fn create(&self, data: ProductDto) -> Result<Product>;
    async fn update(&self, id: i32, data: ProductDto) -> Result<Product>;
    async fn delete(&self, id: i32) -> Result<()>;
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Product {} not found", id))
}

/// PostgreSQL-backed repository; ids come from the table's SERIAL sequence
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>> {
        let products =
            sqlx::query_as::<_, Product>("SELECT id, nama, harga, category_id FROM products")
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    async fn get_by_id(&self, id: i32) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, nama, harga, category_id FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: ProductDto) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (nama, harga, category_id) VALUES ($1, $2, $3) \
             RETURNING id, nama, harga, category_id",
        )
        .bind(&data.nama)
        .bind(data.harga)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, id: i32, data: ProductDto) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET nama = $1, harga = $2, category_id = $3 WHERE id = $4 \
             RETURNING id, nama, harga, category_id",
        )
        .bind(&data.nama)
        .bind(data.harga)
        .bind(data.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
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
/// Shares the `len + 1` id assignment rule, and its id-reuse divergence from
/// the Postgres variant, with `MemoryCategoryRepository`.
pub struct MemoryProductRepository {
    items: Mutex<Vec<Product>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>> {
        Ok(self.items.lock().await.clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Product> {
        self.items
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: ProductDto) -> Result<Product> {
        let mut items = self.items.lock().await;
        let product = Product {
            id: (items.len() + 1) as i32,
            nama: data.nama,
            harga: data.harga,
            category_id: data.category_id,
        };
        items.push(product.clone());

        Ok(product)
    }

    async fn update(&self, id: i32, data: ProductDto) -> Result<Product> {
        let mut items = self.items.lock().await;
        let product = items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        product.nama = data.nama;
        product.harga = data.harga;
        product.category_id = data.category_id;

        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut items = self.items.lock().await;
        let position = items
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        items.remove(position);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(nama: &str, harga: i32, category_id: Option<i32>) -> ProductDto {
        ProductDto {
            nama: nama.to_string(),
            harga,
            category_id,
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let repo = MemoryProductRepository::new();

        let created = repo.create(dto("Es Teh Manis", 5000, Some(1))).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_keeps_path_id() {
        let repo = MemoryProductRepository::new();

        let created = repo.create(dto("Kopi", 8000, None)).await.unwrap();
        let updated = repo
            .update(created.id, dto("Kopi Hitam", 9000, Some(2)))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.harga, 9000);
        assert_eq!(updated.category_id, Some(2));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = MemoryProductRepository::new();

        let err = repo.update(5, dto("x", 1, None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let repo = MemoryProductRepository::new();

        let created = repo.create(dto("Mie Ayam", 12000, Some(2))).await.unwrap();
        repo.delete(created.id).await.unwrap();

        let err = repo.get_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
