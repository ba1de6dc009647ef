use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::access::authorize;
use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Role asserted by the caller's bearer token, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerRole(pub Role);

/// Validates the bearer token and records the caller's role.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?;

    let role = state.auth_service.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(CallerRole(role));

    Ok(next.run(req).await)
}

/// Admits the request only if the caller holds one of `required`.
///
/// Must run inside [`authenticate`].
pub async fn require_roles(
    State(required): State<&'static [Role]>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let CallerRole(role) = req
        .extensions()
        .get::<CallerRole>()
        .copied()
        .ok_or_else(|| ApiError::Unauthorized("Missing authentication".to_string()))?;

    authorize(required, role).map_err(|denied| {
        tracing::warn!(role = %role, path = %req.uri().path(), "Access denied");
        ApiError::Forbidden(denied.to_string())
    })?;

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let value = header_value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}
