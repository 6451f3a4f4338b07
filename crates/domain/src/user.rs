//! User — a minimal identity record referenced by subscriptions.
//!
//! Authentication (passwords, sessions) lives outside this core; the user
//! here is little more than the identifier foreign keys point at.

use serde::{Deserialize, Serialize};

use crate::error::{LattError, ValidationError};
use crate::id::UserId;

/// An account that owns subscriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
}

impl User {
    /// Construct a user with a fresh identifier after validating the email.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] when the email is empty or has no `@`.
    pub fn new(email: impl Into<String>) -> Result<Self, LattError> {
        let user = Self {
            id: UserId::new(),
            email: email.into(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] when the email is empty or has no `@`.
    pub fn validate(&self) -> Result<(), LattError> {
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_user_with_valid_email() {
        let user = User::new("ada@example.com").unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn should_reject_email_without_at_sign() {
        let result = User::new("not-an-email");
        assert!(matches!(
            result,
            Err(LattError::Validation(ValidationError::InvalidEmail))
        ));
    }

    #[test]
    fn should_reject_empty_email() {
        let result = User::new("");
        assert!(matches!(
            result,
            Err(LattError::Validation(ValidationError::InvalidEmail))
        ));
    }
}
