use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::errors::ErrorKind;
use crate::domain::pvz::errors::IdError;
use crate::domain::pvz::errors::PvzError;
use crate::domain::user::errors::UserError;

pub mod add_product;
pub mod close_last_reception;
pub mod create_pvz;
pub mod create_reception;
pub mod delete_last_product;
pub mod dummy_login;
pub mod list_pvz;
pub mod login;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::Validation
            | ErrorKind::NotFound
            | ErrorKind::Conflict
            | ErrorKind::Precondition => ApiError::BadRequest(message),
            ErrorKind::Auth => ApiError::Unauthorized(message),
            ErrorKind::Store | ErrorKind::Internal => {
                tracing::error!(error = %message, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string())
    }
}

impl From<PvzError> for ApiError {
    fn from(err: PvzError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string())
    }
}

impl From<IdError> for ApiError {
    fn from(err: IdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;
    use crate::domain::pvz::models::PvzId;

    #[test]
    fn test_domain_errors_map_to_status() {
        let pvz_id = PvzId::new();

        assert!(matches!(
            ApiError::from(PvzError::PvzNotFound(pvz_id)),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(PvzError::ActiveReceptionExists(pvz_id)),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert_eq!(
            ApiError::from(PvzError::Store(StoreError::new("pool timed out"))),
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::Forbidden("denied".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
