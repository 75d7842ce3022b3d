use moka::future::Cache;
use moka::Expiry;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct Entry<V> {
    value: V,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl<K, V> Expiry<K, Entry<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &K,
        entry: &Entry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Memoizes async results per key, each entry with its own expiry.
///
/// Expired entries are dropped lazily on lookup; there is no capacity
/// bound. A failed computation is handed back to the caller and not
/// stored, so callers that want negative caching must encode the failure
/// in `V` themselves.
#[derive(Clone)]
pub struct ResultCache<K, V> {
    inner: Cache<K, Entry<V>>,
}

impl<K, V> ResultCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().expire_after(PerEntryTtl).build(),
        }
    }

    /// Return the live value for `key`, or run `compute` and store its
    /// success for `ttl`.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: K,
        ttl: Duration,
        compute: F,
    ) -> Result<V, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        self.inner
            .try_get_with(key, async move {
                compute().await.map(|value| Entry { value, ttl })
            })
            .await
            .map(|entry| entry.value)
    }
}

impl<K, V> Default for ResultCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
