//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod services;
#[allow(clippy::missing_errors_doc)]
pub mod subscriptions;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{delete, get, post};

use latt_app::ports::{ServiceRepository, SubscriptionRepository, UserRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<CR, SR, UR>() -> Router<AppState<CR, SR, UR>>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    Router::new()
        // Users
        .route("/users", post(users::create::<CR, SR, UR>))
        .route("/users/{id}", get(users::get::<CR, SR, UR>))
        // Services
        .route("/services", get(services::list::<CR, SR, UR>))
        .route("/services/resolve", post(services::resolve::<CR, SR, UR>))
        // Subscriptions
        .route(
            "/users/{user_id}/subscriptions",
            get(subscriptions::list::<CR, SR, UR>).post(subscriptions::create::<CR, SR, UR>),
        )
        .route(
            "/subscriptions/{id}",
            delete(subscriptions::delete::<CR, SR, UR>),
        )
}
