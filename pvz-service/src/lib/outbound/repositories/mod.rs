pub mod memory;
pub mod pvz;
pub mod user;

pub use memory::InMemoryStore;
pub use pvz::PostgresPvzRepository;
pub use user::PostgresUserRepository;

use crate::domain::errors::StoreError;

/// Wrap a driver failure as an opaque store error.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    StoreError::new(err.to_string())
}

/// Constraint name reported by a unique violation, if `err` is one.
pub(crate) fn violated_unique_constraint(err: &sqlx::Error) -> Option<String> {
    let db_err = err.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    db_err.constraint().map(str::to_string)
}
