//! JSON REST handlers for the service catalog.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use latt_app::ports::{ServiceRepository, SubscriptionRepository, UserRepository};
use latt_domain::service::Service;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for resolving a service by name.
#[derive(Deserialize)]
pub struct ResolveServiceRequest {
    pub name: String,
    pub category: Option<String>,
}

/// Possible responses from the resolve endpoint. Resolution is idempotent,
/// so the status is `OK` whether the row was found or just created.
pub enum ResolveResponse {
    Ok(Json<Service>),
}

impl IntoResponse for ResolveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => (StatusCode::OK, json).into_response(),
        }
    }
}

/// `GET /api/services`
pub async fn list<CR, SR, UR>(
    State(state): State<AppState<CR, SR, UR>>,
) -> Result<Json<Vec<Service>>, ApiError>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let services = state.catalog_service.list_services().await?;
    Ok(Json(services))
}

/// `POST /api/services/resolve`
pub async fn resolve<CR, SR, UR>(
    State(state): State<AppState<CR, SR, UR>>,
    Json(req): Json<ResolveServiceRequest>,
) -> Result<ResolveResponse, ApiError>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let service = state
        .catalog_service
        .resolve(&req.name, req.category.as_deref())
        .await?;
    Ok(ResolveResponse::Ok(Json(service)))
}
