use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::add_product::ProductData;
use super::create_pvz::PvzData;
use super::create_reception::ReceptionData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pvz::models::PvzWithReceptions;
use crate::inbound::http::router::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 30;

/// Page through pickup points with their receptions and products.
///
/// `page` is 1-based; `limit` is capped at 30. Date bounds are RFC 3339 and
/// each may be omitted.
pub async fn list_pvz(
    State(state): State<AppState>,
    Query(params): Query<ListPvzParams>,
) -> Result<ApiSuccess<Vec<PvzWithReceptionsData>>, ApiError> {
    let query = params.parse()?;
    tracing::debug!(
        start = ?query.start,
        end = ?query.end,
        page = query.page,
        limit = query.limit,
        "Listing PVZs"
    );

    state
        .pvz_service
        .list_with_receptions(query.start, query.end, query.offset, query.limit)
        .await
        .map_err(ApiError::from)
        .map(|page| {
            ApiSuccess::new(
                StatusCode::OK,
                page.iter().map(PvzWithReceptionsData::from).collect(),
            )
        })
}

/// Raw query string; every field is optional and parsed by hand so that
/// malformed values produce the usual `{"message"}` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPvzParams {
    start_date: Option<String>,
    end_date: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListPvzQuery {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    page: i64,
    limit: i64,
    offset: i64,
}

impl ListPvzParams {
    fn parse(self) -> Result<ListPvzQuery, ApiError> {
        let start = parse_date(self.start_date.as_deref(), "startDate")?;
        let end = parse_date(self.end_date.as_deref(), "endDate")?;

        let page = match non_empty(self.page.as_deref()) {
            None => DEFAULT_PAGE,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid page: {raw}")))?,
        };

        let limit = match non_empty(self.limit.as_deref()) {
            None => DEFAULT_LIMIT,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|limit| (1..=MAX_LIMIT).contains(limit))
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid limit: {raw}")))?,
        };

        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid page: {page}")))?;

        Ok(ListPvzQuery {
            start,
            end,
            page,
            limit,
            offset,
        })
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

fn parse_date(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    non_empty(raw)
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|_| ApiError::BadRequest(format!("Invalid {field}: {value}")))
        })
        .transpose()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PvzWithReceptionsData {
    pub pvz: PvzData,
    pub receptions: Vec<ReceptionWithProductsData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceptionWithProductsData {
    pub reception: ReceptionData,
    pub products: Vec<ProductData>,
}

impl From<&PvzWithReceptions> for PvzWithReceptionsData {
    fn from(entry: &PvzWithReceptions) -> Self {
        Self {
            pvz: (&entry.pvz).into(),
            receptions: entry
                .receptions
                .iter()
                .map(|r| ReceptionWithProductsData {
                    reception: (&r.reception).into(),
                    products: r.products.iter().map(ProductData::from).collect(),
                })
                .collect(),
        }
    }
}
