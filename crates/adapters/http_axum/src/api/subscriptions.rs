//! JSON REST handlers for subscriptions — the add workflow and dashboard
//! read-side.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use latt_app::ports::{ServiceRepository, SubscriptionRepository, UserRepository};
use latt_app::services::subscription_service::NewSubscription;
use latt_domain::error::{LattError, ValidationError};
use latt_domain::id::{SubscriptionId, UserId};
use latt_domain::subscription::{BillingCycle, Subscription, SubscriptionLine};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the add-subscription workflow. The service is given by
/// name and resolved (find-or-create) before the insert.
#[derive(Deserialize)]
pub struct AddSubscriptionRequest {
    pub service_name: String,
    pub category: Option<String>,
    pub plan_name: Option<String>,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub renewal_date: NaiveDate,
}

/// Dashboard payload: joined lines ascending by renewal date plus the exact
/// total.
#[derive(Serialize)]
pub struct DashboardResponse {
    pub subscriptions: Vec<SubscriptionLine>,
    pub total_spend: Decimal,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Subscription>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_user_id(id: &str) -> Result<UserId, ApiError> {
    UserId::from_str(id)
        .map_err(|_| ApiError::from(LattError::Validation(ValidationError::MalformedId)))
}

/// `GET /api/users/{user_id}/subscriptions`
pub async fn list<CR, SR, UR>(
    State(state): State<AppState<CR, SR, UR>>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;
    let (subscriptions, total_spend) = state.subscription_service.overview(user_id).await?;
    Ok(Json(DashboardResponse {
        subscriptions,
        total_spend,
    }))
}

/// `POST /api/users/{user_id}/subscriptions`
///
/// The full add workflow: resolve the service name to a stable identifier,
/// then insert the subscription referencing it.
pub async fn create<CR, SR, UR>(
    State(state): State<AppState<CR, SR, UR>>,
    Path(user_id): Path<String>,
    Json(req): Json<AddSubscriptionRequest>,
) -> Result<CreateResponse, ApiError>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;

    let service = state
        .catalog_service
        .resolve(&req.service_name, req.category.as_deref())
        .await?;

    let created = state
        .subscription_service
        .add(NewSubscription {
            user_id,
            service_id: service.id,
            plan_name: req.plan_name,
            price: req.price,
            billing_cycle: req.billing_cycle,
            renewal_date: req.renewal_date,
        })
        .await?;

    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/subscriptions/{id}`
pub async fn delete<CR, SR, UR>(
    State(state): State<AppState<CR, SR, UR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let subscription_id = SubscriptionId::from_str(&id)
        .map_err(|_| ApiError::from(LattError::Validation(ValidationError::MalformedId)))?;
    state.subscription_service.delete(subscription_id).await?;
    Ok(DeleteResponse::NoContent)
}
