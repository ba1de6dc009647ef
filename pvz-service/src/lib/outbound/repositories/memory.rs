use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::StoreError;
use crate::domain::pvz::errors::PvzError;
use crate::domain::pvz::models::Product;
use crate::domain::pvz::models::ProductId;
use crate::domain::pvz::models::Pvz;
use crate::domain::pvz::models::PvzId;
use crate::domain::pvz::models::PvzListFilter;
use crate::domain::pvz::models::PvzWithReceptions;
use crate::domain::pvz::models::Reception;
use crate::domain::pvz::models::ReceptionId;
use crate::domain::pvz::models::ReceptionWithProducts;
use crate::domain::pvz::ports::PvzRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    pvzs: Vec<Pvz>,
    receptions: Vec<Reception>,
    // Insertion order doubles as creation order.
    products: Vec<Product>,
}

/// Process-local store backing both ports.
///
/// Enforces the same uniqueness rules as the Postgres schema: one account
/// per email and at most one in-progress reception per pickup point.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.lock().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().await;

        Ok(tables.users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().await;

        Ok(tables.users.get(&id).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.lock().await;

        if tables
            .users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        match tables.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), UserError> {
        let mut tables = self.tables.lock().await;

        tables
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl PvzRepository for InMemoryStore {
    async fn create(&self, pvz: Pvz) -> Result<Pvz, PvzError> {
        self.tables.lock().await.pvzs.push(pvz.clone());

        Ok(pvz)
    }

    async fn find_by_id(&self, id: PvzId) -> Result<Option<Pvz>, PvzError> {
        let tables = self.tables.lock().await;

        Ok(tables.pvzs.iter().find(|p| p.id == id).cloned())
    }

    async fn create_reception(&self, reception: Reception) -> Result<Reception, PvzError> {
        let mut tables = self.tables.lock().await;

        if reception.is_open()
            && tables
                .receptions
                .iter()
                .any(|r| r.pvz_id == reception.pvz_id && r.is_open())
        {
            return Err(PvzError::ActiveReceptionExists(reception.pvz_id));
        }
        tables.receptions.push(reception.clone());

        Ok(reception)
    }

    async fn find_active_reception(&self, pvz_id: PvzId) -> Result<Option<Reception>, PvzError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .receptions
            .iter()
            .find(|r| r.pvz_id == pvz_id && r.is_open())
            .cloned())
    }

    async fn update_reception(&self, reception: Reception) -> Result<Reception, PvzError> {
        let mut tables = self.tables.lock().await;

        let existing = tables
            .receptions
            .iter_mut()
            .find(|r| r.id == reception.id)
            .ok_or_else(|| StoreError::new(format!("reception {} not found", reception.id)))?;
        *existing = reception.clone();

        Ok(reception)
    }

    async fn create_product(&self, product: Product) -> Result<Product, PvzError> {
        self.tables.lock().await.products.push(product.clone());

        Ok(product)
    }

    async fn find_last_product(
        &self,
        reception_id: ReceptionId,
    ) -> Result<Option<Product>, PvzError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .products
            .iter()
            .rev()
            .find(|p| p.reception_id == reception_id)
            .cloned())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), PvzError> {
        self.tables.lock().await.products.retain(|p| p.id != id);

        Ok(())
    }

    async fn list_with_receptions(
        &self,
        filter: &PvzListFilter,
    ) -> Result<Vec<PvzWithReceptions>, PvzError> {
        let tables = self.tables.lock().await;
        let range = filter.date_range;

        let mut pvzs: Vec<&Pvz> = tables.pvzs.iter().collect();
        pvzs.sort_by(|a, b| {
            b.registration_date
                .cmp(&a.registration_date)
                .then(a.id.cmp(&b.id))
        });

        let page = pvzs
            .into_iter()
            .filter_map(|pvz| {
                let mut receptions: Vec<&Reception> = tables
                    .receptions
                    .iter()
                    .filter(|r| r.pvz_id == pvz.id && range.contains(r.date_time))
                    .collect();
                if !range.is_unbounded() && receptions.is_empty() {
                    return None;
                }
                receptions.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.cmp(&b.id)));

                let receptions = receptions
                    .into_iter()
                    .map(|reception| ReceptionWithProducts {
                        products: tables
                            .products
                            .iter()
                            .filter(|p| p.reception_id == reception.id)
                            .cloned()
                            .collect(),
                        reception: reception.clone(),
                    })
                    .collect();

                Some(PvzWithReceptions {
                    pvz: pvz.clone(),
                    receptions,
                })
            })
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();

        Ok(page)
    }
}
