use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::pvz::models::PvzId;
use crate::domain::pvz::models::Reception;
use crate::inbound::http::router::AppState;

pub async fn create_reception(
    State(state): State<AppState>,
    Json(body): Json<CreateReceptionRequest>,
) -> Result<ApiSuccess<ReceptionData>, ApiError> {
    let pvz_id = PvzId::from_string(&body.pvz_id)?;

    state
        .pvz_service
        .create_reception(pvz_id)
        .await
        .map_err(ApiError::from)
        .map(|ref reception| ApiSuccess::new(StatusCode::CREATED, reception.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionRequest {
    pvz_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionData {
    pub id: String,
    pub date_time: DateTime<Utc>,
    pub pvz_id: String,
    pub status: String,
}

impl From<&Reception> for ReceptionData {
    fn from(reception: &Reception) -> Self {
        Self {
            id: reception.id.to_string(),
            date_time: reception.date_time,
            pvz_id: reception.pvz_id.to_string(),
            status: reception.status.as_str().to_string(),
        }
    }
}
