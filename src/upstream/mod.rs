pub mod client;
pub mod normalize;

pub use client::{UpstreamClient, UpstreamError};
pub use normalize::{normalize_address, normalize_transaction, NormalizeError};
