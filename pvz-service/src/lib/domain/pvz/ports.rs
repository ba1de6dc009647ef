use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::pvz::errors::PvzError;
use crate::domain::pvz::models::Product;
use crate::domain::pvz::models::ProductId;
use crate::domain::pvz::models::Pvz;
use crate::domain::pvz::models::PvzId;
use crate::domain::pvz::models::PvzListFilter;
use crate::domain::pvz::models::PvzWithReceptions;
use crate::domain::pvz::models::Reception;
use crate::domain::pvz::models::ReceptionId;

/// Port for pickup-point, reception and product operations.
#[async_trait]
pub trait PvzServicePort: Send + Sync + 'static {
    /// Register a new pickup point.
    ///
    /// # Errors
    /// * `InvalidCity` - City is not supported
    /// * `Store` - Store operation failed
    async fn create_pvz(&self, city: &str) -> Result<Pvz, PvzError>;

    /// Open a reception at a pickup point.
    ///
    /// # Errors
    /// * `PvzNotFound` - Pickup point does not exist
    /// * `ActiveReceptionExists` - A reception is already in progress
    /// * `Store` - Store operation failed
    async fn create_reception(&self, pvz_id: PvzId) -> Result<Reception, PvzError>;

    /// Log a product in the active reception.
    ///
    /// # Errors
    /// * `InvalidProductType` - Rejected before any store access
    /// * `PvzNotFound` - Pickup point does not exist
    /// * `NoActiveReception` - No reception is in progress
    /// * `Store` - Store operation failed
    async fn add_product(&self, pvz_id: PvzId, product_type: &str) -> Result<Product, PvzError>;

    /// Remove the most recently added product of the active reception.
    ///
    /// # Returns
    /// The deleted product
    ///
    /// # Errors
    /// * `PvzNotFound` - Pickup point does not exist
    /// * `NoActiveReception` - No reception is in progress
    /// * `ReceptionClosed` - Active lookup returned a closed reception
    /// * `NoProductsToDelete` - Reception has no products
    /// * `Store` - Store operation failed
    async fn delete_last_product(&self, pvz_id: PvzId) -> Result<Product, PvzError>;

    /// Close the active reception.
    ///
    /// # Errors
    /// * `PvzNotFound` - Pickup point does not exist
    /// * `NoActiveReception` - No reception is in progress
    /// * `ReceptionAlreadyClosed` - Reception was already closed
    /// * `Store` - Store operation failed
    async fn close_last_reception(&self, pvz_id: PvzId) -> Result<Reception, PvzError>;

    /// Page through pickup points with nested receptions and products.
    ///
    /// # Arguments
    /// * `start` / `end` - Optional inclusive bounds on reception time
    /// * `offset` - Rows to skip (must be >= 0)
    /// * `limit` - Maximum rows (must be > 0)
    ///
    /// # Errors
    /// * `InvalidDateRange` - Both bounds given and start is after end
    /// * `InvalidPagination` - Negative offset or non-positive limit
    /// * `Store` - Store operation failed
    async fn list_with_receptions(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PvzWithReceptions>, PvzError>;
}

/// Persistence operations for pickup points, receptions and products.
#[async_trait]
pub trait PvzRepository: Send + Sync + 'static {
    async fn create(&self, pvz: Pvz) -> Result<Pvz, PvzError>;

    /// Retrieve pickup point by identifier.
    ///
    /// # Returns
    /// Optional pickup point (None if not found)
    async fn find_by_id(&self, id: PvzId) -> Result<Option<Pvz>, PvzError>;

    /// Persist a new reception.
    ///
    /// # Errors
    /// * `ActiveReceptionExists` - Store already holds an in-progress reception for the PVZ
    /// * `Store` - Store operation failed
    async fn create_reception(&self, reception: Reception) -> Result<Reception, PvzError>;

    /// Retrieve the in-progress reception of a pickup point, if any.
    async fn find_active_reception(&self, pvz_id: PvzId) -> Result<Option<Reception>, PvzError>;

    async fn update_reception(&self, reception: Reception) -> Result<Reception, PvzError>;

    async fn create_product(&self, product: Product) -> Result<Product, PvzError>;

    /// Retrieve the most recently created product of a reception, if any.
    async fn find_last_product(
        &self,
        reception_id: ReceptionId,
    ) -> Result<Option<Product>, PvzError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), PvzError>;

    /// Page of pickup points ordered by registration date, newest first.
    ///
    /// When the filter carries a date bound, only receptions inside the
    /// bounds are nested and only pickup points with at least one such
    /// reception are returned.
    async fn list_with_receptions(
        &self,
        filter: &PvzListFilter,
    ) -> Result<Vec<PvzWithReceptions>, PvzError>;
}
