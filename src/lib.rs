pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod limiter;
pub mod models;
pub mod service;
pub mod state;
pub mod upstream;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use api::error::ApiError;
pub use api::route::create_router;
pub use cache::{CacheStore, StoreError};
pub use config::Config;
pub use limiter::{Admission, LookupLimiter};
pub use models::{AddressSummary, EntryType, TransactionDetail, TransactionItem};
pub use service::{AddressLookup, LookupError, LookupService, TransactionLookup};
pub use state::AppState;
pub use upstream::{UpstreamClient, UpstreamError};
