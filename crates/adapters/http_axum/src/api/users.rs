//! JSON REST handlers for users.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use latt_app::ports::{ServiceRepository, SubscriptionRepository, UserRepository};
use latt_domain::error::{LattError, ValidationError};
use latt_domain::id::UserId;
use latt_domain::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a user.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<User>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/users`
pub async fn create<CR, SR, UR>(
    State(state): State<AppState<CR, SR, UR>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<CreateResponse, ApiError>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let user = state.user_service.register(&req.email).await?;
    Ok(CreateResponse::Created(Json(user)))
}

/// `GET /api/users/{id}`
pub async fn get<CR, SR, UR>(
    State(state): State<AppState<CR, SR, UR>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError>
where
    CR: ServiceRepository + Send + Sync + 'static,
    SR: SubscriptionRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let user_id = UserId::from_str(&id)
        .map_err(|_| ApiError::from(LattError::Validation(ValidationError::MalformedId)))?;
    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(user))
}
