//! # latt-domain
//!
//! Pure domain model for the latt subscription tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Services** (catalog entries for subscribable products, keyed by name)
//! - Define **Subscriptions** (a user's recurring commitment to a service)
//! - Define **Users** (minimal identity records referenced by subscriptions)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod service;
pub mod subscription;
pub mod user;
