//! User service — minimal registration.
//!
//! Kept deliberately thin: authentication lives outside this core, so
//! registration only persists the identity row that subscriptions point at.

use latt_domain::error::{LattError, NotFoundError};
use latt_domain::id::UserId;
use latt_domain::user::User;

use crate::ports::UserRepository;

/// Application service for user identity records.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] when the email is malformed,
    /// [`LattError::Conflict`] when the email is already taken, or a
    /// storage error from the repository.
    pub async fn register(&self, email: &str) -> Result<User, LattError> {
        let user = User::new(email.trim())?;
        self.repo.create(user).await
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_user(&self, id: UserId) -> Result<User, LattError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }
}
