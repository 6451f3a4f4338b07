//! Subscription service — add, list, total spend, and delete.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use latt_domain::error::{LattError, NotFoundError};
use latt_domain::id::{ServiceId, SubscriptionId, UserId};
use latt_domain::subscription::{BillingCycle, Subscription, SubscriptionLine};

use crate::ports::SubscriptionRepository;

/// Input for [`SubscriptionService::add`]. The service identifier comes from
/// a prior catalog resolution; the user identifier from the caller.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub plan_name: Option<String>,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub renewal_date: NaiveDate,
}

/// Application service for subscription writes and the dashboard read-side.
pub struct SubscriptionService<R> {
    repo: R,
}

impl<R: SubscriptionRepository> SubscriptionService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Insert one subscription row with status `active`.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] when the price is negative (nothing
    /// reaches the store), [`LattError::ForeignKey`] when `user_id` or
    /// `service_id` does not reference an existing row, or a storage error
    /// from the repository.
    pub async fn add(&self, new: NewSubscription) -> Result<Subscription, LattError> {
        let subscription = Subscription::builder()
            .user_id(new.user_id)
            .service_id(new.service_id)
            .maybe_plan_name(new.plan_name)
            .price(new.price)
            .billing_cycle(new.billing_cycle)
            .renewal_date(new.renewal_date)
            .build()?;

        let created = self.repo.create(subscription).await?;
        tracing::debug!(
            subscription = %created.id,
            user = %created.user_id,
            "added subscription"
        );
        Ok(created)
    }

    /// List a user's subscriptions joined to their service, ascending by
    /// renewal date.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<SubscriptionLine>, LattError> {
        self.repo.list_for_user(user_id).await
    }

    /// Fetch a user's dashboard in one store round-trip: the joined lines
    /// ascending by renewal date plus their exact total.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn overview(
        &self,
        user_id: UserId,
    ) -> Result<(Vec<SubscriptionLine>, Decimal), LattError> {
        let lines = self.repo.list_for_user(user_id).await?;
        let total = lines.iter().map(|line| line.price).sum();
        Ok((lines, total))
    }

    /// Sum the price of all of a user's subscriptions with exact decimal
    /// arithmetic.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn total_spend(&self, user_id: UserId) -> Result<Decimal, LattError> {
        let (_, total) = self.overview(user_id).await?;
        Ok(total)
    }

    /// Delete a subscription by id.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::NotFound`] when no row with `id` exists — a
    /// repeat deletion reports the same, so callers can tell "already gone"
    /// from "just removed".
    pub async fn delete(&self, id: SubscriptionId) -> Result<(), LattError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError {
                entity: "Subscription",
                id: id.to_string(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latt_domain::error::{ForeignKeyError, ValidationError};
    use latt_domain::subscription::SubscriptionStatus;
    use std::collections::{HashMap, HashSet};
    use std::future::Future;
    use std::sync::Mutex;

    /// In-memory repository with a known set of valid service ids, so a
    /// dangling reference fails the way a foreign-key constraint would.
    struct InMemorySubscriptionRepo {
        known_services: HashSet<ServiceId>,
        store: Mutex<HashMap<SubscriptionId, Subscription>>,
    }

    impl InMemorySubscriptionRepo {
        fn with_services(ids: impl IntoIterator<Item = ServiceId>) -> Self {
            Self {
                known_services: ids.into_iter().collect(),
                store: Mutex::new(HashMap::new()),
            }
        }
    }

    impl SubscriptionRepository for InMemorySubscriptionRepo {
        fn create(
            &self,
            subscription: Subscription,
        ) -> impl Future<Output = Result<Subscription, LattError>> + Send {
            let result = if self.known_services.contains(&subscription.service_id) {
                let mut store = self.store.lock().unwrap();
                store.insert(subscription.id, subscription.clone());
                Ok(subscription)
            } else {
                Err(ForeignKeyError {
                    relation: "subscriptions",
                }
                .into())
            };
            async { result }
        }

        fn get_by_id(
            &self,
            id: SubscriptionId,
        ) -> impl Future<Output = Result<Option<Subscription>, LattError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn list_for_user(
            &self,
            user_id: UserId,
        ) -> impl Future<Output = Result<Vec<SubscriptionLine>, LattError>> + Send {
            let store = self.store.lock().unwrap();
            let mut lines: Vec<SubscriptionLine> = store
                .values()
                .filter(|sub| sub.user_id == user_id)
                .map(|sub| SubscriptionLine {
                    id: sub.id,
                    service_name: "stub".to_string(),
                    logo_url: "stub".to_string(),
                    plan_name: sub.plan_name.clone(),
                    price: sub.price,
                    billing_cycle: sub.billing_cycle,
                    renewal_date: sub.renewal_date,
                    status: sub.status,
                })
                .collect();
            lines.sort_by_key(|line| line.renewal_date);
            async { Ok(lines) }
        }

        fn delete(
            &self,
            id: SubscriptionId,
        ) -> impl Future<Output = Result<bool, LattError>> + Send {
            let mut store = self.store.lock().unwrap();
            let removed = store.remove(&id).is_some();
            async move { Ok(removed) }
        }
    }

    fn date(text: &str) -> NaiveDate {
        text.parse().unwrap()
    }

    fn price(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn new_subscription(user_id: UserId, service_id: ServiceId, amount: &str) -> NewSubscription {
        NewSubscription {
            user_id,
            service_id,
            plan_name: Some("Standard".to_string()),
            price: price(amount),
            billing_cycle: BillingCycle::Monthly,
            renewal_date: date("2024-06-01"),
        }
    }

    #[tokio::test]
    async fn should_add_active_subscription() {
        let service_id = ServiceId::new();
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([service_id]));
        let user = UserId::new();

        let created = svc.add(new_subscription(user, service_id, "15.49")).await.unwrap();

        assert_eq!(created.status, SubscriptionStatus::Active);
        assert_eq!(created.price, price("15.49"));

        let lines = svc.list_for_user(user).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, created.id);
    }

    #[tokio::test]
    async fn should_reject_negative_price_before_store() {
        let service_id = ServiceId::new();
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([service_id]));
        let user = UserId::new();

        let result = svc.add(new_subscription(user, service_id, "-5")).await;
        assert!(matches!(
            result,
            Err(LattError::Validation(ValidationError::NegativePrice))
        ));
        assert!(svc.list_for_user(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_surface_foreign_key_violation_for_unknown_service() {
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([]));
        let user = UserId::new();

        let result = svc.add(new_subscription(user, ServiceId::new(), "9.99")).await;
        assert!(matches!(result, Err(LattError::ForeignKey(_))));
        assert!(svc.list_for_user(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_sum_prices_exactly() {
        let service_id = ServiceId::new();
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([service_id]));
        let user = UserId::new();

        for amount in ["9.99", "15.00", "4.01"] {
            svc.add(new_subscription(user, service_id, amount)).await.unwrap();
        }

        let total = svc.total_spend(user).await.unwrap();
        assert_eq!(total, price("29.00"));
    }

    #[tokio::test]
    async fn should_return_lines_and_matching_total_from_overview() {
        let service_id = ServiceId::new();
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([service_id]));
        let user = UserId::new();

        for amount in ["9.99", "15.00", "4.01"] {
            svc.add(new_subscription(user, service_id, amount)).await.unwrap();
        }

        let (lines, total) = svc.overview(user).await.unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(total, price("29.00"));
        assert_eq!(total, svc.total_spend(user).await.unwrap());
    }

    #[tokio::test]
    async fn should_scope_total_to_the_given_user() {
        let service_id = ServiceId::new();
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([service_id]));
        let alice = UserId::new();
        let bob = UserId::new();

        svc.add(new_subscription(alice, service_id, "9.99")).await.unwrap();
        svc.add(new_subscription(bob, service_id, "100.00")).await.unwrap();

        assert_eq!(svc.total_spend(alice).await.unwrap(), price("9.99"));
    }

    #[tokio::test]
    async fn should_delete_existing_subscription_once() {
        let service_id = ServiceId::new();
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([service_id]));
        let user = UserId::new();

        let created = svc.add(new_subscription(user, service_id, "9.99")).await.unwrap();

        svc.delete(created.id).await.unwrap();

        let repeat = svc.delete(created.id).await;
        assert!(matches!(repeat, Err(LattError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_report_not_found_for_never_created_id() {
        let svc = SubscriptionService::new(InMemorySubscriptionRepo::with_services([]));
        let result = svc.delete(SubscriptionId::new()).await;
        assert!(matches!(result, Err(LattError::NotFound(_))));
    }
}
