//! Catalog service — resolve a service name to a stable catalog entry.

use latt_domain::error::{ConflictError, LattError, ValidationError};
use latt_domain::id::ServiceId;
use latt_domain::service::Service;

use crate::ports::ServiceRepository;

/// Application service for the find-or-create resolution of catalog services.
///
/// The same input name always resolves to the same row: the name is trimmed
/// once here and matched case-sensitively, and a repeat resolution never
/// touches the stored category or logo.
pub struct CatalogService<R> {
    repo: R,
}

impl<R: ServiceRepository> CatalogService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Resolve a service name to its catalog entry, creating the entry on
    /// first reference.
    ///
    /// When two callers race on the same unseen name, the store's uniqueness
    /// constraint rejects the losing insert; the loser retries the lookup
    /// exactly once and returns the winner's row, so at most one row per
    /// name ever survives.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] when the trimmed name is empty,
    /// [`LattError::Conflict`] when the post-conflict lookup misses too
    /// (a non-transient inconsistency), or a storage error from the
    /// repository.
    pub async fn resolve(
        &self,
        name: &str,
        category: Option<&str>,
    ) -> Result<Service, LattError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        if let Some(existing) = self.repo.find_by_name(name).await? {
            return Ok(existing);
        }

        let candidate = Service::builder()
            .name(name)
            .maybe_category(category)
            .build()?;

        match self.repo.create(candidate).await {
            Ok(created) => {
                tracing::debug!(service = %created.id, name, "created catalog service");
                Ok(created)
            }
            Err(LattError::Conflict(_)) => {
                // Lost the insert race; the winner's row must be visible now.
                tracing::debug!(name, "lost service insert race, retrying lookup");
                self.repo.find_by_name(name).await?.ok_or_else(|| {
                    ConflictError {
                        entity: "Service",
                        key: name.to_string(),
                    }
                    .into()
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Look up a service by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::NotFound`] when no service with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_service(&self, id: ServiceId) -> Result<Service, LattError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            latt_domain::error::NotFoundError {
                entity: "Service",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all catalog services.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_services(&self) -> Result<Vec<Service>, LattError> {
        self.repo.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Uniqueness-enforcing in-memory repository: the check-and-insert is
    /// atomic under the mutex, so racing creates behave like a store with a
    /// UNIQUE constraint.
    #[derive(Default)]
    struct InMemoryServiceRepo {
        store: Mutex<HashMap<ServiceId, Service>>,
    }

    impl ServiceRepository for InMemoryServiceRepo {
        fn create(&self, service: Service) -> impl Future<Output = Result<Service, LattError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = if store.values().any(|s| s.name == service.name) {
                Err(ConflictError {
                    entity: "Service",
                    key: service.name.clone(),
                }
                .into())
            } else {
                store.insert(service.id, service.clone());
                Ok(service)
            };
            async { result }
        }

        fn get_by_id(
            &self,
            id: ServiceId,
        ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn find_by_name(
            &self,
            name: &str,
        ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.values().find(|s| s.name == name).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, LattError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Service> = store.values().cloned().collect();
            async { Ok(result) }
        }
    }

    fn make_service() -> CatalogService<InMemoryServiceRepo> {
        CatalogService::new(InMemoryServiceRepo::default())
    }

    #[tokio::test]
    async fn should_create_service_on_first_resolution() {
        let svc = make_service();

        let resolved = svc.resolve("Netflix", Some("Streaming")).await.unwrap();
        assert_eq!(resolved.name, "Netflix");
        assert_eq!(resolved.category.as_deref(), Some("Streaming"));
    }

    #[tokio::test]
    async fn should_return_same_id_on_repeat_resolution() {
        let svc = make_service();

        let first = svc.resolve("Netflix", Some("Streaming")).await.unwrap();
        let second = svc.resolve("Netflix", Some("Streaming")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(svc.list_services().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_not_mutate_category_on_repeat_resolution() {
        let svc = make_service();

        let first = svc.resolve("Netflix", Some("Streaming")).await.unwrap();
        let second = svc.resolve("Netflix", Some("Movies")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.category.as_deref(), Some("Streaming"));
    }

    #[tokio::test]
    async fn should_resolve_trimmed_name_to_same_row() {
        let svc = make_service();

        let first = svc.resolve("Netflix", None).await.unwrap();
        let second = svc.resolve("  Netflix  ", None).await.unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn should_reject_blank_name() {
        let svc = make_service();
        let result = svc.resolve("   ", None).await;
        assert!(matches!(
            result,
            Err(LattError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_keep_single_row_under_concurrent_first_resolution() {
        let svc = std::sync::Arc::new(make_service());

        let a = {
            let svc = std::sync::Arc::clone(&svc);
            tokio::spawn(async move { svc.resolve("Netflix", Some("Streaming")).await })
        };
        let b = {
            let svc = std::sync::Arc::clone(&svc);
            tokio::spawn(async move { svc.resolve("Netflix", Some("Streaming")).await })
        };

        let first = a.await.unwrap().unwrap();
        let second = b.await.unwrap().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(svc.list_services().await.unwrap().len(), 1);
    }

    /// Repository that simulates losing the race: the first lookup misses,
    /// the insert conflicts, and only then does the winner's row appear.
    struct LosingRaceRepo {
        lookups: AtomicUsize,
        winner: Service,
    }

    impl ServiceRepository for LosingRaceRepo {
        fn create(&self, service: Service) -> impl Future<Output = Result<Service, LattError>> + Send {
            let result = Err(ConflictError {
                entity: "Service",
                key: service.name,
            }
            .into());
            async { result }
        }

        fn get_by_id(
            &self,
            _id: ServiceId,
        ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send {
            async { Ok(None) }
        }

        fn find_by_name(
            &self,
            _name: &str,
        ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send {
            let result = if self.lookups.fetch_add(1, Ordering::SeqCst) == 0 {
                None
            } else {
                Some(self.winner.clone())
            };
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, LattError>> + Send {
            async { Ok(vec![]) }
        }
    }

    #[tokio::test]
    async fn should_return_winner_row_after_losing_insert_race() {
        let winner = Service::builder().name("Netflix").build().unwrap();
        let winner_id = winner.id;
        let svc = CatalogService::new(LosingRaceRepo {
            lookups: AtomicUsize::new(0),
            winner,
        });

        let resolved = svc.resolve("Netflix", None).await.unwrap();
        assert_eq!(resolved.id, winner_id);
    }

    /// Repository where the conflict persists and the retry lookup misses.
    struct BrokenRepo;

    impl ServiceRepository for BrokenRepo {
        fn create(&self, service: Service) -> impl Future<Output = Result<Service, LattError>> + Send {
            let result = Err(ConflictError {
                entity: "Service",
                key: service.name,
            }
            .into());
            async { result }
        }

        fn get_by_id(
            &self,
            _id: ServiceId,
        ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send {
            async { Ok(None) }
        }

        fn find_by_name(
            &self,
            _name: &str,
        ) -> impl Future<Output = Result<Option<Service>, LattError>> + Send {
            async { Ok(None) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, LattError>> + Send {
            async { Ok(vec![]) }
        }
    }

    #[tokio::test]
    async fn should_surface_conflict_when_retry_lookup_also_misses() {
        let svc = CatalogService::new(BrokenRepo);
        let result = svc.resolve("Netflix", None).await;
        assert!(matches!(result, Err(LattError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_service_missing() {
        let svc = make_service();
        let result = svc.get_service(ServiceId::new()).await;
        assert!(matches!(result, Err(LattError::NotFound(_))));
    }
}
