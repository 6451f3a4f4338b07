//! Subscription port — persistence for subscriptions.

use std::future::Future;

use latt_domain::error::LattError;
use latt_domain::id::{SubscriptionId, UserId};
use latt_domain::subscription::{Subscription, SubscriptionLine};

/// Repository for persisting and querying [`Subscription`]s.
///
/// Implementations must back `Subscription::user_id` and
/// `Subscription::service_id` with foreign-key constraints and report a
/// violation as [`LattError::ForeignKey`] — a dangling reference fails
/// loudly, never silently.
pub trait SubscriptionRepository {
    /// Insert a new subscription. Exactly one row on success, none on failure.
    fn create(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Subscription, LattError>> + Send;

    /// Get a subscription by its unique identifier.
    fn get_by_id(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<Option<Subscription>, LattError>> + Send;

    /// List a user's subscriptions joined to their service, ascending by
    /// renewal date.
    fn list_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<SubscriptionLine>, LattError>> + Send;

    /// Delete a subscription. Returns `true` when a row was removed.
    fn delete(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<bool, LattError>> + Send;
}
