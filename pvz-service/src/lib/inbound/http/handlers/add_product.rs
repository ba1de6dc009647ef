use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::pvz::models::Product;
use crate::domain::pvz::models::PvzId;
use crate::inbound::http::router::AppState;

pub async fn add_product(
    State(state): State<AppState>,
    Json(body): Json<AddProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let pvz_id = PvzId::from_string(&body.pvz_id)?;

    state
        .pvz_service
        .add_product(pvz_id, &body.product_type)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    #[serde(rename = "type")]
    product_type: String,
    pvz_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub id: String,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub reception_id: String,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            date_time: product.date_time,
            product_type: product.product_type.as_str().to_string(),
            reception_id: product.reception_id.to_string(),
        }
    }
}
