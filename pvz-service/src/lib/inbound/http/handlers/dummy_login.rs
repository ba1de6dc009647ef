use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Issue a token for the requested role without checking credentials.
pub async fn dummy_login(
    State(state): State<AppState>,
    Json(body): Json<DummyLoginRequest>,
) -> Result<ApiSuccess<String>, ApiError> {
    let token = state.auth_service.generate_token(&body.role).map_err(|e| {
        tracing::warn!(role = %body.role, error = %e, "Dummy login rejected");
        ApiError::from(e)
    })?;

    Ok(ApiSuccess::new(StatusCode::OK, token))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DummyLoginRequest {
    role: String,
}
