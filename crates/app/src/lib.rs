//! # latt-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ServiceRepository` — lookup and creation of catalog services
//!   - `SubscriptionRepository` — insert, joined listing, deletion
//!   - `UserRepository` — minimal identity persistence
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CatalogService` — resolve a service name to a stable identifier
//!     (find-or-create with a single bounded retry on a lost insert race)
//!   - `SubscriptionService` — add, list, total spend, delete
//!   - `UserService` — register
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `latt-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
