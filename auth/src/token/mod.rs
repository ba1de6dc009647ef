pub mod errors;
pub mod manager;

pub use errors::TokenError;
pub use manager::TokenManager;
