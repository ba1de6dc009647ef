use thiserror::Error;

/// Coarse classification attached to every domain error.
///
/// Inbound adapters map on this rather than on individual variants, so a new
/// variant only has to pick its kind to get the right external response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input, detected before any store access.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// The request collides with existing state.
    Conflict,
    /// The operation needs a state that is not currently held.
    Precondition,
    /// Bad credentials or an unusable bearer token.
    Auth,
    /// The data store failed.
    Store,
    /// Misconfiguration or a failing primitive (hashing, signing).
    Internal,
}

/// Opaque failure raised by a store adapter.
///
/// The domain never inspects it; it is propagated to the caller unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Store error: {0}")]
pub struct StoreError(String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
