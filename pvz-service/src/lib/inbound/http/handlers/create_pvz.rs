use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::pvz::models::Pvz;
use crate::inbound::http::router::AppState;

pub async fn create_pvz(
    State(state): State<AppState>,
    Json(body): Json<CreatePvzRequest>,
) -> Result<ApiSuccess<PvzData>, ApiError> {
    state
        .pvz_service
        .create_pvz(&body.city)
        .await
        .map_err(ApiError::from)
        .map(|ref pvz| ApiSuccess::new(StatusCode::CREATED, pvz.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePvzRequest {
    city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PvzData {
    pub id: String,
    pub registration_date: DateTime<Utc>,
    pub city: String,
}

impl From<&Pvz> for PvzData {
    fn from(pvz: &Pvz) -> Self {
        Self {
            id: pvz.id.to_string(),
            registration_date: pvz.registration_date,
            city: pvz.city.as_str().to_string(),
        }
    }
}
