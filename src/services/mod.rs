// Service exports
pub mod connections;
pub mod postgres;
pub mod shelters;
pub mod users;

pub use postgres::{PostgresClient, StoreError};
