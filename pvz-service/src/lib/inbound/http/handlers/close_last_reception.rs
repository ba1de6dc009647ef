use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_reception::ReceptionData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pvz::models::PvzId;
use crate::inbound::http::router::AppState;

pub async fn close_last_reception(
    State(state): State<AppState>,
    Path(pvz_id): Path<String>,
) -> Result<ApiSuccess<ReceptionData>, ApiError> {
    let pvz_id = PvzId::from_string(&pvz_id)?;

    state
        .pvz_service
        .close_last_reception(pvz_id)
        .await
        .map_err(ApiError::from)
        .map(|ref reception| ApiSuccess::new(StatusCode::OK, reception.into()))
}
