//! Product CRUD feature.
//!
//! The detail endpoint attaches the referenced category to the response when
//! it resolves (application-level join performed by the service).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/produk` | List all products |
//! | POST | `/api/produk` | Create product |
//! | GET | `/api/produk/{id}` | Get product by id (+category) |
//! | PUT | `/api/produk/{id}` | Replace product |
//! | DELETE | `/api/produk/{id}` | Delete product |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{MemoryProductRepository, PgProductRepository, ProductRepository};
pub use services::ProductService;
