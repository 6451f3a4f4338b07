//! Service — a catalog entry for a subscribable product, keyed by name.

use serde::{Deserialize, Serialize};

use crate::error::{LattError, ValidationError};
use crate::id::ServiceId;

/// Logo shown for services created without one of their own.
pub const PLACEHOLDER_LOGO: &str = "/static/logos/placeholder.svg";

/// A catalog entry representing a subscribable product, e.g. a streaming
/// provider. At most one row exists per distinct name; rows are created on
/// first reference and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub category: Option<String>,
    pub logo_url: String,
}

impl Service {
    /// Create a builder for constructing a [`Service`].
    #[must_use]
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), LattError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Service`].
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    id: Option<ServiceId>,
    name: Option<String>,
    category: Option<String>,
    logo_url: Option<String>,
}

impl ServiceBuilder {
    #[must_use]
    pub fn id(mut self, id: ServiceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the category only when one is provided.
    #[must_use]
    pub fn maybe_category(mut self, category: Option<impl Into<String>>) -> Self {
        self.category = category.map(Into::into);
        self
    }

    #[must_use]
    pub fn logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    /// Consume the builder, validate, and return a [`Service`].
    ///
    /// The logo falls back to [`PLACEHOLDER_LOGO`] when unset.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Service, LattError> {
        let service = Service {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            category: self.category,
            logo_url: self
                .logo_url
                .unwrap_or_else(|| PLACEHOLDER_LOGO.to_string()),
        };
        service.validate()?;
        Ok(service)
    }
}
