use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::add_product::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pvz::models::PvzId;
use crate::inbound::http::router::AppState;

/// Remove the most recently added product of the PVZ's open reception.
pub async fn delete_last_product(
    State(state): State<AppState>,
    Path(pvz_id): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let pvz_id = PvzId::from_string(&pvz_id)?;

    state
        .pvz_service
        .delete_last_product(pvz_id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
