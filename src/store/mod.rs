pub mod error;
pub mod filter;
pub mod forecast_store;
