mod product_repository;

pub use product_repository::{MemoryProductRepository, PgProductRepository, ProductRepository};
