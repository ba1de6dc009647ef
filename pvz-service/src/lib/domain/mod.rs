pub mod access;
pub mod errors;
pub mod pvz;
pub mod user;
