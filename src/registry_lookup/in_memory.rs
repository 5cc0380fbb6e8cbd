use super::{lookup::RegistryLookup, VerificationResult};
use crate::normalization::normalize;
use crate::observability::metrics::record_registry_lookup;
use ahash::AHashMap;
use async_trait::async_trait;

/// A deterministic, table-backed registry. Stands in for a remote registry in tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    entries: AHashMap<String, VerificationResult>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `result` under the normalized form of `identifier`.
    pub fn with_entry(mut self, identifier: &str, result: VerificationResult) -> Self {
        self.insert(identifier, result);
        self
    }

    pub fn insert(&mut self, identifier: &str, result: VerificationResult) {
        self.entries.insert(normalize(identifier), result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RegistryLookup for InMemoryRegistry {
    async fn lookup(&self, normalized_identifier: &str) -> VerificationResult {
        let result = self
            .entries
            .get(normalized_identifier)
            .cloned()
            .unwrap_or_else(|| VerificationResult::failed("identifier not found in registry"));
        record_registry_lookup(&result);
        result
    }
}
