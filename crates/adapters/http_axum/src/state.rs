//! Shared application state for axum handlers.

use std::sync::Arc;

use latt_app::ports::{ServiceRepository, SubscriptionRepository, UserRepository};
use latt_app::services::catalog_service::CatalogService;
use latt_app::services::subscription_service::SubscriptionService;
use latt_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying types themselves do not need to be
/// `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<CR, SR, UR> {
    /// Catalog resolution service.
    pub catalog_service: Arc<CatalogService<CR>>,
    /// Subscription write/read service.
    pub subscription_service: Arc<SubscriptionService<SR>>,
    /// User registration service.
    pub user_service: Arc<UserService<UR>>,
}

impl<CR, SR, UR> Clone for AppState<CR, SR, UR> {
    fn clone(&self) -> Self {
        Self {
            catalog_service: Arc::clone(&self.catalog_service),
            subscription_service: Arc::clone(&self.subscription_service),
            user_service: Arc::clone(&self.user_service),
        }
    }
}

impl<CR, SR, UR> AppState<CR, SR, UR>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        catalog_service: CatalogService<CR>,
        subscription_service: SubscriptionService<SR>,
        user_service: UserService<UR>,
    ) -> Self {
        Self {
            catalog_service: Arc::new(catalog_service),
            subscription_service: Arc::new(subscription_service),
            user_service: Arc::new(user_service),
        }
    }
}
