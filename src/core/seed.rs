use std::collections::HashMap;

use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryDto;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::products::dtos::ProductDto;
use crate::features::products::repositories::ProductRepository;

/// Default categories inserted on first boot: (name, description)
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Minuman", "Segala jenis minuman"),
    ("Makanan", "Segala jenis makanan"),
    ("Snack", "Makanan ringan dan cemilan"),
    ("Elektronik", "Barang elektronik dan gadget"),
];

/// Default products inserted on first boot: (nama, harga, category name)
pub const DEFAULT_PRODUCTS: &[(&str, i32, &str)] = &[
    ("Es Teh Manis", 5000, "Minuman"),
    ("Kopi Hitam", 8000, "Minuman"),
    ("Nasi Goreng", 15000, "Makanan"),
    ("Mie Ayam", 12000, "Makanan"),
    ("Keripik Kentang", 8000, "Snack"),
    ("Chocolatos", 2000, "Snack"),
];

/// Run all seeders against the database. Idempotent: each seeder skips when
/// its table already has rows.
pub async fn run(pool: &PgPool) -> Result<()> {
    seed_categories(pool).await?;
    seed_products(pool).await?;

    Ok(())
}

async fn seed_categories(pool: &PgPool) -> Result<()> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        tracing::info!("Categories already seeded ({} rows exist)", count);
        return Ok(());
    }

    for (name, description) in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO categories (name, description) VALUES ($1, $2)")
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;
    }

    tracing::info!("Seeded {} categories", DEFAULT_CATEGORIES.len());

    Ok(())
}

/// Products are seeded by category-name lookup so they stay correct even if
/// category ids drift; rows whose category is missing are skipped.
async fn seed_products(pool: &PgPool) -> Result<()> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        tracing::info!("Products already seeded ({} rows exist)", count);
        return Ok(());
    }

    let mut seeded = 0;
    for (nama, harga, category_name) in DEFAULT_PRODUCTS {
        let category_id =
            sqlx::query_scalar::<_, i32>("SELECT id FROM categories WHERE name = $1")
                .bind(category_name)
                .fetch_optional(pool)
                .await?;

        let Some(category_id) = category_id else {
            tracing::warn!(
                "Skipping product '{}': category '{}' not found",
                nama,
                category_name
            );
            continue;
        };

        sqlx::query("INSERT INTO products (nama, harga, category_id) VALUES ($1, $2, $3)")
            .bind(nama)
            .bind(harga)
            .bind(category_id)
            .execute(pool)
            .await?;
        seeded += 1;
    }

    tracing::info!("Seeded {} products", seeded);

    Ok(())
}

/// Seed the in-memory repositories through the repository traits, mirroring
/// the database seeders.
pub async fn run_memory(
    categories: &dyn CategoryRepository,
    products: &dyn ProductRepository,
) -> Result<()> {
    if !categories.get_all().await?.is_empty() {
        return Ok(());
    }

    let mut ids = HashMap::new();
    for (name, description) in DEFAULT_CATEGORIES {
        let category = categories
            .create(CategoryDto {
                name: (*name).to_string(),
                description: (*description).to_string(),
            })
            .await?;
        ids.insert(*name, category.id);
    }

    for (nama, harga, category_name) in DEFAULT_PRODUCTS {
        let Some(category_id) = ids.get(category_name).copied() else {
            tracing::warn!(
                "Skipping product '{}': category '{}' not found",
                nama,
                category_name
            );
            continue;
        };

        products
            .create(ProductDto {
                nama: (*nama).to_string(),
                harga: *harga,
                category_id: Some(category_id),
            })
            .await?;
    }

    tracing::info!(
        "Seeded in-memory store with {} categories and {} products",
        DEFAULT_CATEGORIES.len(),
        DEFAULT_PRODUCTS.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::repositories::MemoryCategoryRepository;
    use crate::features::products::repositories::MemoryProductRepository;

    #[tokio::test]
    async fn memory_seeding_links_products_to_categories() {
        let categories = MemoryCategoryRepository::new();
        let products = MemoryProductRepository::new();

        run_memory(&categories, &products).await.unwrap();

        let all_categories = categories.get_all().await.unwrap();
        let all_products = products.get_all().await.unwrap();
        assert_eq!(all_categories.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(all_products.len(), DEFAULT_PRODUCTS.len());

        let minuman = all_categories.iter().find(|c| c.name == "Minuman").unwrap();
        let es_teh = all_products
            .iter()
            .find(|p| p.nama == "Es Teh Manis")
            .unwrap();
        assert_eq!(es_teh.category_id, Some(minuman.id));
    }

    #[tokio::test]
    async fn memory_seeding_is_idempotent() {
        let categories = MemoryCategoryRepository::new();
        let products = MemoryProductRepository::new();

        run_memory(&categories, &products).await.unwrap();
        run_memory(&categories, &products).await.unwrap();

        assert_eq!(
            categories.get_all().await.unwrap().len(),
            DEFAULT_CATEGORIES.len()
        );
        assert_eq!(
            products.get_all().await.unwrap().len(),
            DEFAULT_PRODUCTS.len()
        );
    }
}
