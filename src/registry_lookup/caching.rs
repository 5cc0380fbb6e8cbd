use super::{config::CacheConfig, lookup::RegistryLookup, VerificationResult};
use crate::observability::metrics::record_registry_cache_hit;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;

/// Memoizes successful lookups of an inner [RegistryLookup].
///
/// Failed lookups are never cached, so a registry that was unreachable is asked again next time.
/// Concurrent lookups of the same identifier share a single request to the inner registry.
pub struct CachingRegistryLookup<L> {
    inner: L,
    cache: Cache<String, VerificationResult>,
}

impl<L: RegistryLookup> CachingRegistryLookup<L> {
    pub fn new(inner: L, config: &CacheConfig) -> Self {
        CachingRegistryLookup {
            inner,
            cache: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(config.time_to_live)
                .build(),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl<L: RegistryLookup> RegistryLookup for CachingRegistryLookup<L> {
    async fn lookup(&self, normalized_identifier: &str) -> VerificationResult {
        let entry = self
            .cache
            .entry_by_ref(normalized_identifier)
            .or_try_insert_with(async {
                let result = self.inner.lookup(normalized_identifier).await;
                if result.success {
                    Ok(result)
                } else {
                    Err(result)
                }
            })
            .await;

        match entry {
            Ok(entry) => {
                if !entry.is_fresh() {
                    record_registry_cache_hit();
                }
                entry.into_value()
            }
            Err(failed) => Arc::unwrap_or_clone(failed),
        }
    }
}
