//! # latt-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `latt-app::ports`
//! - Manage the `SQLite` connection pool lifecycle with bounded timeouts
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Classify database failures into the domain error taxonomy
//!   (unique violation → conflict,FK violation → foreign key, everything
//!   else → storage)
//!
//! ## Dependency rule
//! Depends on `latt-app` (for port traits) and `latt-domain` (for domain
//! types). The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod service_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use service_repo::SqliteServiceRepository;
pub use subscription_repo::SqliteSubscriptionRepository;
pub use user_repo::SqliteUserRepository;
