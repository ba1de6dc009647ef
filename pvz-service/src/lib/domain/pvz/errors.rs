use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::errors::ErrorKind;
use crate::domain::errors::StoreError;
use crate::domain::pvz::models::PvzId;
use crate::domain::pvz::models::ReceptionId;

/// Error type for id parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for City membership failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CityError {
    #[error("Unsupported city: {0}")]
    Unknown(String),
}

/// Error type for ProductType membership failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductTypeError {
    #[error("Unsupported product type: {0}")]
    Unknown(String),
}

/// Error type for stored reception status values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReceptionStatusError {
    #[error("Unknown reception status: {0}")]
    Unknown(String),
}

/// Top-level error type for pickup-point, reception and product operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PvzError {
    // Input validation errors
    #[error("Invalid city: {0}")]
    InvalidCity(#[from] CityError),

    #[error("Invalid product type: {0}")]
    InvalidProductType(#[from] ProductTypeError),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid pagination: offset {offset}, limit {limit}")]
    InvalidPagination { offset: i64, limit: i64 },

    // Domain-level errors
    #[error("PVZ not found: {0}")]
    PvzNotFound(PvzId),

    #[error("PVZ {0} already has an active reception")]
    ActiveReceptionExists(PvzId),

    #[error("Reception {0} is already closed")]
    ReceptionAlreadyClosed(ReceptionId),

    #[error("PVZ {0} has no active reception")]
    NoActiveReception(PvzId),

    #[error("Reception {0} is closed")]
    ReceptionClosed(ReceptionId),

    #[error("Reception {0} has no products to delete")]
    NoProductsToDelete(ReceptionId),

    // Infrastructure errors
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PvzError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PvzError::InvalidCity(_)
            | PvzError::InvalidProductType(_)
            | PvzError::InvalidDateRange { .. }
            | PvzError::InvalidPagination { .. } => ErrorKind::Validation,
            PvzError::PvzNotFound(_) => ErrorKind::NotFound,
            PvzError::ActiveReceptionExists(_) | PvzError::ReceptionAlreadyClosed(_) => {
                ErrorKind::Conflict
            }
            PvzError::NoActiveReception(_)
            | PvzError::ReceptionClosed(_)
            | PvzError::NoProductsToDelete(_) => ErrorKind::Precondition,
            PvzError::Store(_) => ErrorKind::Store,
        }
    }
}
