use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::Category;
use crate::features::products::models::Product;

/// Request DTO for creating or replacing a product.
///
/// Fields default so partial bodies decode leniently. Any `id` in the body is
/// ignored; ids are assigned by the store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductDto {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub harga: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
}

/// Detail response for a single product.
///
/// `category` is computed at read time from `category_id` and never
/// persisted; it is omitted from the JSON when the lookup resolves nothing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetailDto {
    pub id: i32,
    pub nama: String,
    pub harga: i32,
    pub category_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ProductDetailDto {
    pub fn new(product: Product, category: Option<Category>) -> Self {
        Self {
            id: product.id,
            nama: product.nama,
            harga: product.harga,
            category_id: product.category_id,
            category,
        }
    }
}
