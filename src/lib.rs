// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod cross_verification;
mod format;
mod identifier;
mod normalization;
mod observability;
mod registry_lookup;
mod secondary_validation;
mod tokio;
mod validation;
mod verification;

// This is the public API of the fiscal identifier library
pub use cross_verification::{
    cross_verify_identifier_and_domain, CrossVerificationOutcome, CrossVerificationPath,
    CrossVerifier, CrossVerifierConfig, DomainAlias, BUILTIN_DOMAIN_ALIASES,
};
pub use format::format_fiscal_identifier;
pub use identifier::IdentifierKind;
pub use normalization::normalize;
pub use registry_lookup::{
    CacheConfig, CachingRegistryLookup, HttpRegistryConfig, HttpRegistryLookup,
    InMemoryRegistry, LookupError, RegistrationStatus, RegistryLookup, VerificationResult,
    DEFAULT_HTTPS_TIMEOUT_SEC,
};
pub use secondary_validation::{
    SpanishCifChecksum, SpanishNieChecksum, SpanishNifChecksum, Validator, CIF_CONTROL_LETTERS,
    IDENTIFIER_LENGTH, NIE_LEADING_LETTERS, NIF_CONTROL_LETTERS, VALID_CIF_LETTERS,
};
pub use validation::{
    classify, validate_fiscal_identifier, validate_fiscal_identifiers, ValidationError,
    ValidationResult,
};
pub use verification::{
    verify_identifier, verify_identifier_and_domain, verify_identifier_and_domain_blocking,
    verify_identifier_blocking, verify_identifiers, VerificationReport,
};
