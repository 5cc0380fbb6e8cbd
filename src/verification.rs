use crate::cross_verification::{cross_verify_identifier_and_domain, CrossVerificationOutcome};
use crate::registry_lookup::{RegistryLookup, VerificationResult};
use crate::tokio::TOKIO_RUNTIME;
use crate::validation::{validate_fiscal_identifier, ValidationResult};
use futures::future::join_all;
use serde::Serialize;

/// Everything learnt about one identifier: local validation, then (only when valid) the registry
/// lookup, then (only when a domain was given) the cross-verification.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub validation: ValidationResult,
    pub verification: Option<VerificationResult>,
    pub cross_verification: Option<CrossVerificationOutcome>,
}

impl VerificationReport {
    /// True when the identifier is valid, the registry knows it, and the domain (if any) matches.
    pub fn is_trusted(&self) -> bool {
        self.validation.is_valid
            && self.verification.as_ref().is_some_and(|x| x.success)
            && self.cross_verification.as_ref().map_or(true, |x| x.matches)
    }
}

/// Validates `raw` and, when it is valid, looks it up. Invalid identifiers never reach the
/// registry.
pub async fn verify_identifier<L: RegistryLookup + ?Sized>(
    lookup: &L,
    raw: &str,
) -> VerificationReport {
    let validation = validate_fiscal_identifier(raw);
    let verification = if validation.is_valid {
        Some(lookup.lookup(&validation.normalized_value).await)
    } else {
        None
    };
    VerificationReport {
        validation,
        verification,
        cross_verification: None,
    }
}

/// Like [verify_identifier], then cross-verifies the registrant against `domain`.
///
/// An unsuccessful lookup still gets an outcome (the "could not verify" one).
pub async fn verify_identifier_and_domain<L: RegistryLookup + ?Sized>(
    lookup: &L,
    raw: &str,
    domain: &str,
) -> VerificationReport {
    let mut report = verify_identifier(lookup, raw).await;
    report.cross_verification = report
        .verification
        .as_ref()
        .map(|verification| cross_verify_identifier_and_domain(verification, domain));
    report
}

/// Verifies many identifiers, with all lookups in flight concurrently. Keeps input order.
pub async fn verify_identifiers<L: RegistryLookup + ?Sized, S: AsRef<str>>(
    lookup: &L,
    raws: &[S],
) -> Vec<VerificationReport> {
    join_all(raws.iter().map(|raw| verify_identifier(lookup, raw.as_ref()))).await
}

/// Blocking form of [verify_identifier].
///
/// Must not be called from within an async runtime.
pub fn verify_identifier_blocking<L: RegistryLookup + ?Sized>(
    lookup: &L,
    raw: &str,
) -> VerificationReport {
    TOKIO_RUNTIME.block_on(verify_identifier(lookup, raw))
}

/// Blocking form of [verify_identifier_and_domain].
///
/// Must not be called from within an async runtime.
pub fn verify_identifier_and_domain_blocking<L: RegistryLookup + ?Sized>(
    lookup: &L,
    raw: &str,
    domain: &str,
) -> VerificationReport {
    TOKIO_RUNTIME.block_on(verify_identifier_and_domain(lookup, raw, domain))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{IdentifierKind, InMemoryRegistry};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new()
            .with_entry(
                "A58818501",
                VerificationResult::found("Telefónica S.A.", IdentifierKind::Cif),
            )
            .with_entry(
                "12345678Z",
                VerificationResult::found("Ana García López", IdentifierKind::Nif),
            )
    }

    struct PanickingLookup;

    #[async_trait]
    impl RegistryLookup for PanickingLookup {
        async fn lookup(&self, normalized_identifier: &str) -> VerificationResult {
            panic!("invalid identifier {normalized_identifier} reached the registry");
        }
    }

    #[test]
    fn should_verify_and_cross_verify() {
        let report =
            verify_identifier_and_domain_blocking(&registry(), "a-58818501", "movistar.es");
        assert!(report.validation.is_valid);
        assert_eq!(report.validation.normalized_value, "A58818501");
        assert!(report.verification.as_ref().unwrap().success);
        let outcome = report.cross_verification.as_ref().unwrap();
        assert!(outcome.matches);
        assert_eq!(outcome.confidence_score, 95);
        assert!(report.is_trusted());
    }

    #[test]
    fn should_not_look_up_invalid_identifiers() {
        let report = verify_identifier_and_domain_blocking(&PanickingLookup, "A58818502", "x.es");
        assert!(!report.validation.is_valid);
        assert_eq!(report.verification, None);
        assert_eq!(report.cross_verification, None);
        assert!(!report.is_trusted());
    }

    #[test]
    fn should_cross_verify_unknown_registrants_with_zero_confidence() {
        let report = verify_identifier_and_domain_blocking(&registry(), "B12345674", "acme.es");
        assert!(report.validation.is_valid);
        assert!(!report.verification.as_ref().unwrap().success);
        assert_eq!(
            report.cross_verification,
            Some(CrossVerificationOutcome {
                matches: false,
                confidence_score: 0,
                reason: Some("could not verify identifier".to_string()),
            })
        );
    }

    #[test]
    fn should_trust_verified_identifier_without_domain() {
        let report = verify_identifier_blocking(&registry(), "12345678z");
        assert!(report.is_trusted());
        assert_eq!(report.cross_verification, None);
    }

    #[tokio::test]
    async fn should_verify_batches_in_order() {
        struct CountingLookup(AtomicUsize);

        #[async_trait]
        impl RegistryLookup for CountingLookup {
            async fn lookup(&self, _: &str) -> VerificationResult {
                self.0.fetch_add(1, Ordering::SeqCst);
                VerificationResult::failed("identifier not found in registry")
            }
        }

        let lookup = CountingLookup(AtomicUsize::new(0));
        let reports =
            verify_identifiers(&lookup, &["12345678Z", "nope", "X1234567L", "X1234567A"]).await;
        let valid: Vec<bool> = reports.iter().map(|r| r.validation.is_valid).collect();
        assert_eq!(valid, vec![true, false, true, false]);
        assert_eq!(lookup.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn should_accept_trait_objects() {
        let lookup: Box<dyn RegistryLookup> = Box::new(registry());
        let report = verify_identifier_and_domain(lookup.as_ref(), "12345678Z", "gmail.com").await;
        assert_eq!(report.cross_verification.unwrap().confidence_score, 30);
    }
}
