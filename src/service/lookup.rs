//! Lookup orchestration: cache first, then rate-limited upstream fetch.
//!
//! The two lookup kinds differ only in output schema, cache partition and
//! quota, so the orchestrator is generic over a [`LookupKind`] and
//! instantiated twice. It holds no per-request state; concurrent lookups for
//! the same subject are not deduplicated and may each fetch upstream.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{CacheStore, StoreError};
use crate::limiter::{Admission, LookupLimiter};
use crate::models::{AddressSummary, EntryType, TransactionDetail};
use crate::upstream::{normalize_address, normalize_transaction, NormalizeError, UpstreamClient, UpstreamError};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    SubjectNotFound(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<UpstreamError> for LookupError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::BadRequest(subject) => {
                LookupError::InvalidInput(format!("upstream rejected subject {subject}"))
            }
            UpstreamError::NotFound(subject) => LookupError::SubjectNotFound(subject),
            UpstreamError::Unavailable(message) => LookupError::Upstream(message),
        }
    }
}

impl From<NormalizeError> for LookupError {
    fn from(err: NormalizeError) -> Self {
        LookupError::Upstream(err.to_string())
    }
}

/// Capability set distinguishing the two lookup variants: the result schema,
/// the cache/quota partition they live in, and the normalization step.
pub trait LookupKind {
    type Output: Serialize + DeserializeOwned + Send;

    const ENTRY_TYPE: EntryType;

    fn normalize(subject: &str, raw: &Value) -> Result<Self::Output, NormalizeError>;
}

pub struct AddressLookup;

impl LookupKind for AddressLookup {
    type Output = AddressSummary;

    const ENTRY_TYPE: EntryType = EntryType::Address;

    fn normalize(subject: &str, raw: &Value) -> Result<Self::Output, NormalizeError> {
        normalize_address(subject, raw)
    }
}

pub struct TransactionLookup;

impl LookupKind for TransactionLookup {
    type Output = TransactionDetail;

    const ENTRY_TYPE: EntryType = EntryType::Transaction;

    fn normalize(_subject: &str, raw: &Value) -> Result<Self::Output, NormalizeError> {
        normalize_transaction(raw)
    }
}

pub struct LookupService<K: LookupKind> {
    store: CacheStore,
    limiter: Arc<LookupLimiter>,
    upstream: Arc<UpstreamClient>,
    _kind: PhantomData<K>,
}

impl<K: LookupKind> LookupService<K> {
    pub fn new(store: CacheStore, limiter: Arc<LookupLimiter>, upstream: Arc<UpstreamClient>) -> Self {
        Self {
            store,
            limiter,
            upstream,
            _kind: PhantomData,
        }
    }

    /// Resolve a subject, serving from cache when possible. Cache hits never
    /// consume rate budget; the limiter is consulted only on the miss path,
    /// before the upstream fetch.
    pub async fn lookup(&self, subject: &str, client: &str) -> Result<K::Output, LookupError> {
        if subject.trim().is_empty() {
            return Err(LookupError::InvalidInput("missing subject parameter".to_string()));
        }

        if let Some(cached) = self.store.get(subject, K::ENTRY_TYPE).await? {
            return Ok(cached);
        }

        if self.limiter.try_acquire(client, K::ENTRY_TYPE) == Admission::Rejected {
            return Err(LookupError::RateLimited);
        }

        let raw = self.upstream.fetch(K::ENTRY_TYPE, subject).await?;

        // The upstream answers unknown subjects with an empty document rather
        // than a 404.
        if payload_is_empty(&raw) {
            debug!("empty upstream payload for {} {}", K::ENTRY_TYPE, subject);
            return Err(LookupError::SubjectNotFound(subject.to_string()));
        }

        let result = K::normalize(subject, &raw).map_err(|err| {
            warn!("failed to normalize {} payload for {}: {}", K::ENTRY_TYPE, subject, err);
            err
        })?;

        self.store.put(subject, K::ENTRY_TYPE, &result).await?;

        Ok(result)
    }
}

fn payload_is_empty(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
