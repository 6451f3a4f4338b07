//! Catalog port — persistence for services.

use std::future::Future;

use latt_domain::error::LattError;
use latt_domain::id::ServiceId;
use latt_domain::service::Service;

/// Repository for persisting and querying catalog [`Service`]s.
///
/// Implementations must enforce uniqueness of `Service::name` at the store
/// level and report a collision as [`LattError::Conflict`] so the resolver
/// can recover from a lost insert race.
pub trait ServiceRepository {
    /// Insert a new service.
    fn create(&self, service: Service) -> impl Future<Output = Result<Service, LattError>> + Send;

    /// Get a service by its unique identifier.
    fn get_by_id(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send;

    /// Find a service by exact name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send;

    /// Get all services.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, LattError>> + Send;
}
