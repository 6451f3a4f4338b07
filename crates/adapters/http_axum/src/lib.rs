//! # latt-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST-ish JSON API** for programmatic access
//!   (`/api/users`, `/api/services`, `/api/subscriptions`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses, translating the error
//!   taxonomy into status codes without interpreting domain semantics
//!
//! ## Dependency rule
//! Depends on `latt-app` (for port traits and services) and `latt-domain`
//! (for domain types used in request/response mapping). Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
