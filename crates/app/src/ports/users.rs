//! User port — persistence for identity records.

use std::future::Future;

use latt_domain::error::LattError;
use latt_domain::id::UserId;
use latt_domain::user::User;

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Insert a new user. A duplicate email is reported as
    /// [`LattError::Conflict`].
    fn create(&self, user: User) -> impl Future<Output = Result<User, LattError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, LattError>> + Send;
}
