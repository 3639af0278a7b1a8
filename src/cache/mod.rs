pub mod store;

pub use store::{CacheStore, StoreError};
