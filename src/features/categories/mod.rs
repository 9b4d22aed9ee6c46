//! Category CRUD feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List all categories |
//! | POST | `/api/categories` | Create category |
//! | GET | `/api/categories/{id}` | Get category by id |
//! | PUT | `/api/categories/{id}` | Replace category |
//! | DELETE | `/api/categories/{id}` | Delete category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, MemoryCategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
