use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::pvz::errors::PvzError;
use crate::domain::pvz::models::City;
use crate::domain::pvz::models::Product;
use crate::domain::pvz::models::ProductId;
use crate::domain::pvz::models::ProductType;
use crate::domain::pvz::models::Pvz;
use crate::domain::pvz::models::PvzId;
use crate::domain::pvz::models::PvzListFilter;
use crate::domain::pvz::models::PvzWithReceptions;
use crate::domain::pvz::models::Reception;
use crate::domain::pvz::models::ReceptionId;
use crate::domain::pvz::models::ReceptionStatus;
use crate::domain::pvz::models::ReceptionWithProducts;
use crate::domain::pvz::ports::PvzRepository;
use crate::outbound::repositories::store_error;
use crate::outbound::repositories::violated_unique_constraint;

/// Partial unique index over `receptions(pvz_id) WHERE status = 'in_progress'`.
const ONE_ACTIVE_RECEPTION: &str = "receptions_one_active_per_pvz";

pub struct PostgresPvzRepository {
    pool: PgPool,
}

impl PostgresPvzRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn corrupt(table: &str, err: impl std::fmt::Display) -> StoreError {
        StoreError::new(format!("corrupt {table} row: {err}"))
    }

    fn row_to_pvz(row: &PgRow) -> Result<Pvz, PvzError> {
        let city: String = row.try_get("city").map_err(store_error)?;

        Ok(Pvz {
            id: PvzId(row.try_get("id").map_err(store_error)?),
            registration_date: row.try_get("registration_date").map_err(store_error)?,
            city: City::parse(&city).map_err(|e| Self::corrupt("pvz", e))?,
        })
    }

    fn row_to_reception(row: &PgRow) -> Result<Reception, PvzError> {
        let status: String = row.try_get("status").map_err(store_error)?;

        Ok(Reception {
            id: ReceptionId(row.try_get("id").map_err(store_error)?),
            date_time: row.try_get("date_time").map_err(store_error)?,
            pvz_id: PvzId(row.try_get("pvz_id").map_err(store_error)?),
            status: ReceptionStatus::parse(&status).map_err(|e| Self::corrupt("receptions", e))?,
        })
    }

    fn row_to_product(row: &PgRow) -> Result<Product, PvzError> {
        let product_type: String = row.try_get("type").map_err(store_error)?;

        Ok(Product {
            id: ProductId(row.try_get("id").map_err(store_error)?),
            date_time: row.try_get("date_time").map_err(store_error)?,
            product_type: ProductType::parse(&product_type)
                .map_err(|e| Self::corrupt("products", e))?,
            reception_id: ReceptionId(row.try_get("reception_id").map_err(store_error)?),
        })
    }
}

#[async_trait]
impl PvzRepository for PostgresPvzRepository {
    async fn create(&self, pvz: Pvz) -> Result<Pvz, PvzError> {
        sqlx::query(
            r#"
            INSERT INTO pvz (id, registration_date, city)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(pvz.id.0)
        .bind(pvz.registration_date)
        .bind(pvz.city.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(pvz)
    }

    async fn find_by_id(&self, id: PvzId) -> Result<Option<Pvz>, PvzError> {
        let row = sqlx::query(
            r#"
            SELECT id, registration_date, city
            FROM pvz
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.as_ref().map(Self::row_to_pvz).transpose()
    }

    async fn create_reception(&self, reception: Reception) -> Result<Reception, PvzError> {
        sqlx::query(
            r#"
            INSERT INTO receptions (id, date_time, pvz_id, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(reception.id.0)
        .bind(reception.date_time)
        .bind(reception.pvz_id.0)
        .bind(reception.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violated_unique_constraint(&e).as_deref() == Some(ONE_ACTIVE_RECEPTION) {
                return PvzError::ActiveReceptionExists(reception.pvz_id);
            }
            PvzError::Store(store_error(e))
        })?;

        Ok(reception)
    }

    async fn find_active_reception(&self, pvz_id: PvzId) -> Result<Option<Reception>, PvzError> {
        let row = sqlx::query(
            r#"
            SELECT id, date_time, pvz_id, status
            FROM receptions
            WHERE pvz_id = $1 AND status = $2
            ORDER BY date_time DESC
            LIMIT 1
            "#,
        )
        .bind(pvz_id.0)
        .bind(ReceptionStatus::InProgress.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.as_ref().map(Self::row_to_reception).transpose()
    }

    async fn update_reception(&self, reception: Reception) -> Result<Reception, PvzError> {
        let result = sqlx::query(
            r#"
            UPDATE receptions
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(reception.id.0)
        .bind(reception.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::new(format!("reception {} not found", reception.id)).into());
        }

        Ok(reception)
    }

    async fn create_product(&self, product: Product) -> Result<Product, PvzError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, date_time, type, reception_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.id.0)
        .bind(product.date_time)
        .bind(product.product_type.as_str())
        .bind(product.reception_id.0)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(product)
    }

    async fn find_last_product(
        &self,
        reception_id: ReceptionId,
    ) -> Result<Option<Product>, PvzError> {
        // seq breaks ties between products created within one clock tick.
        let row = sqlx::query(
            r#"
            SELECT id, date_time, type, reception_id
            FROM products
            WHERE reception_id = $1
            ORDER BY date_time DESC, seq DESC
            LIMIT 1
            "#,
        )
        .bind(reception_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), PvzError> {
        sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn list_with_receptions(
        &self,
        filter: &PvzListFilter,
    ) -> Result<Vec<PvzWithReceptions>, PvzError> {
        let start: Option<DateTime<Utc>> = filter.date_range.start;
        let end: Option<DateTime<Utc>> = filter.date_range.end;

        let pvz_rows = sqlx::query(
            r#"
            SELECT p.id, p.registration_date, p.city
            FROM pvz p
            WHERE ($1::timestamptz IS NULL AND $2::timestamptz IS NULL)
               OR EXISTS (
                    SELECT 1
                    FROM receptions r
                    WHERE r.pvz_id = p.id
                      AND ($1::timestamptz IS NULL OR r.date_time >= $1)
                      AND ($2::timestamptz IS NULL OR r.date_time <= $2)
               )
            ORDER BY p.registration_date DESC, p.id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(filter.limit as i64)
        .bind(filter.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let pvzs = pvz_rows
            .iter()
            .map(Self::row_to_pvz)
            .collect::<Result<Vec<_>, _>>()?;
        if pvzs.is_empty() {
            return Ok(Vec::new());
        }

        let pvz_ids: Vec<Uuid> = pvzs.iter().map(|p| p.id.0).collect();
        let reception_rows = sqlx::query(
            r#"
            SELECT id, date_time, pvz_id, status
            FROM receptions
            WHERE pvz_id = ANY($1)
              AND ($2::timestamptz IS NULL OR date_time >= $2)
              AND ($3::timestamptz IS NULL OR date_time <= $3)
            ORDER BY date_time, id
            "#,
        )
        .bind(&pvz_ids)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let receptions = reception_rows
            .iter()
            .map(Self::row_to_reception)
            .collect::<Result<Vec<_>, _>>()?;

        let reception_ids: Vec<Uuid> = receptions.iter().map(|r| r.id.0).collect();
        let product_rows = sqlx::query(
            r#"
            SELECT id, date_time, type, reception_id
            FROM products
            WHERE reception_id = ANY($1)
            ORDER BY seq
            "#,
        )
        .bind(&reception_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut products_by_reception: HashMap<ReceptionId, Vec<Product>> = HashMap::new();
        for row in &product_rows {
            let product = Self::row_to_product(row)?;
            products_by_reception
                .entry(product.reception_id)
                .or_default()
                .push(product);
        }

        let mut receptions_by_pvz: HashMap<PvzId, Vec<ReceptionWithProducts>> = HashMap::new();
        for reception in receptions {
            let products = products_by_reception
                .remove(&reception.id)
                .unwrap_or_default();
            receptions_by_pvz
                .entry(reception.pvz_id)
                .or_default()
                .push(ReceptionWithProducts {
                    reception,
                    products,
                });
        }

        Ok(pvzs
            .into_iter()
            .map(|pvz| PvzWithReceptions {
                receptions: receptions_by_pvz.remove(&pvz.id).unwrap_or_default(),
                pvz,
            })
            .collect())
    }
}
