//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod catalog;
pub mod subscriptions;
pub mod users;

pub use catalog::ServiceRepository;
pub use subscriptions::SubscriptionRepository;
pub use users::UserRepository;
