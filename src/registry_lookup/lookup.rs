use crate::registry_lookup::VerificationResult;
use async_trait::async_trait;

#[async_trait]
pub trait RegistryLookup: Send + Sync {
    // Looks up a normalized identifier in a registry.
    // Failures (not found, unreachable, bad response) are reported as an unsuccessful
    // VerificationResult; the trait has no error channel.
    async fn lookup(&self, normalized_identifier: &str) -> VerificationResult;
}
