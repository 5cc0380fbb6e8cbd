use crate::cross_verification::CrossVerificationPath;
use crate::observability::labels::Labels;
use crate::registry_lookup::VerificationResult;
use crate::validation::ValidationResult;
use metrics::{counter, Counter};

const KIND: &str = "kind";
const VALID: &str = "valid";
const REASON: &str = "reason";
const PATH: &str = "path";
const OUTCOME: &str = "outcome";

pub struct ValidationMetrics {
    pub validations: Counter,
    pub validation_errors: Option<Counter>,
}

impl ValidationMetrics {
    pub fn new(result: &ValidationResult) -> Self {
        let labels = Labels::new(&[(KIND, result.kind.to_string())]);
        let validation_errors = result.error.as_ref().map(|err| {
            let reason = if err.is_checksum() {
                "checksum"
            } else {
                "structural"
            };
            counter!(
                "fiscal_id.validation_errors",
                labels.clone_with_labels(&[(REASON, reason)])
            )
        });
        ValidationMetrics {
            validations: counter!(
                "fiscal_id.validations",
                labels.clone_with_labels(&[(VALID, result.is_valid.to_string())])
            ),
            validation_errors,
        }
    }

    pub fn record(&self) {
        self.validations.increment(1);
        if let Some(errors) = &self.validation_errors {
            errors.increment(1);
        }
    }
}

pub fn record_cross_verification(path: CrossVerificationPath) {
    counter!(
        "fiscal_id.cross_verifications",
        Labels::new(&[(PATH, path.to_string())])
    )
    .increment(1);
}

pub fn record_registry_lookup(result: &VerificationResult) {
    let outcome = if result.success { "found" } else { "failed" };
    counter!(
        "fiscal_id.registry_lookups",
        Labels::new(&[(OUTCOME, outcome)])
    )
    .increment(1);
}

pub fn record_registry_cache_hit() {
    counter!("fiscal_id.registry_cache_hits").increment(1);
}

#[cfg(test)]
mod test {
    use crate::{
        cross_verify_identifier_and_domain, validate_fiscal_identifier, CacheConfig,
        CachingRegistryLookup, IdentifierKind, InMemoryRegistry, RegistryLookup,
        VerificationResult,
    };
    use futures::executor::block_on;
    use metrics::Label;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use metrics_util::MetricKind;

    fn counter_value(
        snapshot: &[(metrics_util::CompositeKey, DebugValue)],
        name: &str,
        labels: &[(&str, &str)],
    ) -> Option<u64> {
        snapshot.iter().find_map(|(key, value)| {
            let key_labels: Vec<&Label> = key.key().labels().collect();
            let same_labels = key_labels.len() == labels.len()
                && labels
                    .iter()
                    .all(|(k, v)| key_labels.contains(&&Label::new(k.to_string(), v.to_string())));
            match value {
                DebugValue::Counter(count)
                    if key.kind() == MetricKind::Counter
                        && key.key().name() == name
                        && same_labels =>
                {
                    Some(*count)
                }
                _ => None,
            }
        })
    }

    #[test]
    fn should_submit_validation_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            validate_fiscal_identifier("12345678Z");
            validate_fiscal_identifier("12345678Z");
            validate_fiscal_identifier("12345678A");
            validate_fiscal_identifier("I12345678");
        });

        let snapshot: Vec<_> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| (key, value))
            .collect();

        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.validations",
                &[("kind", "NIF"), ("valid", "true")]
            ),
            Some(2)
        );
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.validations",
                &[("kind", "NIF"), ("valid", "false")]
            ),
            Some(1)
        );
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.validation_errors",
                &[("kind", "NIF"), ("reason", "checksum")]
            ),
            Some(1)
        );
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.validation_errors",
                &[("kind", "UNKNOWN"), ("reason", "structural")]
            ),
            Some(1)
        );
    }

    #[test]
    fn should_submit_cross_verification_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            cross_verify_identifier_and_domain(
                &VerificationResult::failed("timeout"),
                "example.com",
            );
            let mercadona = VerificationResult::found("Mercadona S.A.", IdentifierKind::Cif);
            cross_verify_identifier_and_domain(&mercadona, "mercadona.es");
            cross_verify_identifier_and_domain(&mercadona, "example.com");
            cross_verify_identifier_and_domain(&mercadona, "example.org");
            cross_verify_identifier_and_domain(
                &VerificationResult::found("Telefónica S.A.", IdentifierKind::Cif),
                "movistar.es",
            );
        });

        let snapshot: Vec<_> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| (key, value))
            .collect();
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.cross_verifications",
                &[("path", "unverified")]
            ),
            Some(1)
        );
        for (path, count) in [("substring", 1), ("alias", 1), ("no_relation", 2)] {
            assert_eq!(
                counter_value(&snapshot, "fiscal_id.cross_verifications", &[("path", path)]),
                Some(count),
                "path {path}"
            );
        }
    }

    #[test]
    fn should_submit_registry_lookup_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let registry = InMemoryRegistry::new().with_entry(
                "A58818501",
                VerificationResult::found("Telefónica S.A.", IdentifierKind::Cif),
            );
            block_on(async {
                assert!(registry.lookup("A58818501").await.success);
                assert!(!registry.lookup("B12345674").await.success);
            });
        });

        let snapshot: Vec<_> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| (key, value))
            .collect();
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.registry_lookups",
                &[("outcome", "found")]
            ),
            Some(1)
        );
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.registry_lookups",
                &[("outcome", "failed")]
            ),
            Some(1)
        );
        assert_eq!(
            counter_value(&snapshot, "fiscal_id.registry_cache_hits", &[]),
            None
        );
    }

    #[test]
    fn should_submit_registry_cache_hit_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let lookup = CachingRegistryLookup::new(
                InMemoryRegistry::new().with_entry(
                    "A58818501",
                    VerificationResult::found("Telefónica S.A.", IdentifierKind::Cif),
                ),
                &CacheConfig::default(),
            );
            block_on(async {
                assert!(lookup.lookup("A58818501").await.success);
                assert!(lookup.lookup("A58818501").await.success);
                // failures are not cached, so they never count as hits
                assert!(!lookup.lookup("B12345674").await.success);
                assert!(!lookup.lookup("B12345674").await.success);
            });
        });

        let snapshot: Vec<_> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| (key, value))
            .collect();
        assert_eq!(
            counter_value(&snapshot, "fiscal_id.registry_cache_hits", &[]),
            Some(1)
        );
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.registry_lookups",
                &[("outcome", "found")]
            ),
            Some(1)
        );
        assert_eq!(
            counter_value(
                &snapshot,
                "fiscal_id.registry_lookups",
                &[("outcome", "failed")]
            ),
            Some(2)
        );
    }
}
