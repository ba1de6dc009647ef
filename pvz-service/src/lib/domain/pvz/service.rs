use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::pvz::errors::PvzError;
use crate::domain::pvz::models::City;
use crate::domain::pvz::models::Product;
use crate::domain::pvz::models::ProductType;
use crate::domain::pvz::models::Pvz;
use crate::domain::pvz::models::PvzId;
use crate::domain::pvz::models::PvzListFilter;
use crate::domain::pvz::models::PvzWithReceptions;
use crate::domain::pvz::models::Reception;
use crate::domain::pvz::models::ReceptionStatus;
use crate::domain::pvz::ports::PvzRepository;
use crate::domain::pvz::ports::PvzServicePort;

/// Domain service for pickup points and their reception lifecycle.
///
/// Every mutation reads current state, decides, then writes. The
/// one-active-reception rule is additionally enforced by the store, so a
/// lost race surfaces as `ActiveReceptionExists` from `create_reception`.
pub struct PvzService<PR>
where
    PR: PvzRepository,
{
    repository: Arc<PR>,
}

impl<PR> PvzService<PR>
where
    PR: PvzRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn require_pvz(&self, pvz_id: PvzId) -> Result<Pvz, PvzError> {
        self.repository
            .find_by_id(pvz_id)
            .await?
            .ok_or(PvzError::PvzNotFound(pvz_id))
    }

    async fn require_active_reception(&self, pvz_id: PvzId) -> Result<Reception, PvzError> {
        self.repository
            .find_active_reception(pvz_id)
            .await?
            .ok_or(PvzError::NoActiveReception(pvz_id))
    }
}

#[async_trait]
impl<PR> PvzServicePort for PvzService<PR>
where
    PR: PvzRepository,
{
    async fn create_pvz(&self, city: &str) -> Result<Pvz, PvzError> {
        let city = City::parse(city)?;

        let pvz = self.repository.create(Pvz::register(city, Utc::now())).await?;
        tracing::info!(pvz_id = %pvz.id, city = %pvz.city, "PVZ registered");

        Ok(pvz)
    }

    async fn create_reception(&self, pvz_id: PvzId) -> Result<Reception, PvzError> {
        self.require_pvz(pvz_id).await?;

        if let Some(active) = self.repository.find_active_reception(pvz_id).await? {
            tracing::warn!(pvz_id = %pvz_id, reception_id = %active.id, "Reception already in progress");
            return Err(PvzError::ActiveReceptionExists(pvz_id));
        }

        let reception = self
            .repository
            .create_reception(Reception::open(pvz_id, Utc::now()))
            .await?;
        tracing::info!(pvz_id = %pvz_id, reception_id = %reception.id, "Reception opened");

        Ok(reception)
    }

    async fn add_product(&self, pvz_id: PvzId, product_type: &str) -> Result<Product, PvzError> {
        let product_type = ProductType::parse(product_type)?;

        self.require_pvz(pvz_id).await?;
        let reception = self.require_active_reception(pvz_id).await?;

        let product = self
            .repository
            .create_product(Product::new(reception.id, product_type, Utc::now()))
            .await?;
        tracing::debug!(
            reception_id = %reception.id,
            product_id = %product.id,
            product_type = %product.product_type,
            "Product added"
        );

        Ok(product)
    }

    async fn delete_last_product(&self, pvz_id: PvzId) -> Result<Product, PvzError> {
        self.require_pvz(pvz_id).await?;
        let reception = self.require_active_reception(pvz_id).await?;

        // Unreachable while the store honours the active-reception lookup.
        if !reception.is_open() {
            return Err(PvzError::ReceptionClosed(reception.id));
        }

        let product = self
            .repository
            .find_last_product(reception.id)
            .await?
            .ok_or(PvzError::NoProductsToDelete(reception.id))?;

        self.repository.delete_product(product.id).await?;
        tracing::debug!(reception_id = %reception.id, product_id = %product.id, "Product deleted");

        Ok(product)
    }

    async fn close_last_reception(&self, pvz_id: PvzId) -> Result<Reception, PvzError> {
        self.require_pvz(pvz_id).await?;
        let mut reception = self.require_active_reception(pvz_id).await?;

        // Unreachable while the store honours the active-reception lookup;
        // a repeated close surfaces as NoActiveReception instead.
        if reception.status == ReceptionStatus::Closed {
            return Err(PvzError::ReceptionAlreadyClosed(reception.id));
        }

        reception.status = ReceptionStatus::Closed;
        let reception = self.repository.update_reception(reception).await?;
        tracing::info!(pvz_id = %pvz_id, reception_id = %reception.id, "Reception closed");

        Ok(reception)
    }

    async fn list_with_receptions(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PvzWithReceptions>, PvzError> {
        let filter = PvzListFilter::new(start, end, offset, limit)?;

        self.repository.list_with_receptions(&filter).await
    }
}
