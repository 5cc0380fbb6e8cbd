use crate::identifier::IdentifierKind;
use crate::normalization::normalize;
use crate::observability::metrics::ValidationMetrics;
use crate::secondary_validation::{Validator, IDENTIFIER_LENGTH};
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("identifier must not be empty")]
    Empty,

    #[error("identifier must be exactly 9 characters")]
    InvalidLength,

    #[error("unrecognized format")]
    UnrecognizedFormat,

    #[error("identifier body must contain only digits")]
    NonDigitBody,

    #[error("control character mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: char },
}

impl ValidationError {
    /// Wrong length, wrong leading character or non-digit body
    pub fn is_structural(&self) -> bool {
        !self.is_checksum()
    }

    /// Well-formed, but the control character does not match
    pub fn is_checksum(&self) -> bool {
        matches!(self, ValidationError::ChecksumMismatch { .. })
    }
}

/// Outcome of validating one identifier. Failures are data, never a panic.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub kind: IdentifierKind,
    pub normalized_value: String,
    #[serde(
        rename = "errorReason",
        serialize_with = "serialize_error_reason",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<ValidationError>,
}

impl ValidationResult {
    fn valid(kind: IdentifierKind, normalized_value: &str) -> Self {
        debug_assert!(kind != IdentifierKind::Unknown);
        debug_assert_eq!(normalized_value.chars().count(), IDENTIFIER_LENGTH);
        Self {
            is_valid: true,
            kind,
            normalized_value: normalized_value.to_string(),
            error: None,
        }
    }

    fn invalid(kind: IdentifierKind, normalized_value: &str, error: ValidationError) -> Self {
        Self {
            is_valid: false,
            kind,
            normalized_value: normalized_value.to_string(),
            error: Some(error),
        }
    }

    /// Human-readable reason of the failure, if any
    pub fn error_reason(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

fn serialize_error_reason<S: Serializer>(
    error: &Option<ValidationError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.collect_str(error),
        None => serializer.serialize_none(),
    }
}

/// Length gate and classification of an already normalized candidate, followed by the checksum
/// of the detected kind.
pub fn classify(candidate: &str) -> ValidationResult {
    if candidate.is_empty() {
        return ValidationResult::invalid(
            IdentifierKind::Unknown,
            candidate,
            ValidationError::Empty,
        );
    }
    if candidate.chars().count() != IDENTIFIER_LENGTH {
        return ValidationResult::invalid(
            IdentifierKind::Unknown,
            candidate,
            ValidationError::InvalidLength,
        );
    }

    let kind = candidate
        .chars()
        .next()
        .map(IdentifierKind::from_leading_char)
        .unwrap_or_default();
    if kind == IdentifierKind::Unknown {
        return ValidationResult::invalid(kind, candidate, ValidationError::UnrecognizedFormat);
    }

    match kind.validate(candidate) {
        Ok(()) => ValidationResult::valid(kind, candidate),
        Err(err) => ValidationResult::invalid(kind, candidate, err),
    }
}

/// Normalizes, classifies and checks a raw, user-typed identifier.
pub fn validate_fiscal_identifier(raw: &str) -> ValidationResult {
    let result = classify(&normalize(raw));
    ValidationMetrics::new(&result).record();
    result
}

/// Validates many identifiers in parallel. The output keeps the input order.
pub fn validate_fiscal_identifiers<S: AsRef<str> + Sync>(raws: &[S]) -> Vec<ValidationResult> {
    raws.par_iter()
        .map(|raw| validate_fiscal_identifier(raw.as_ref()))
        .collect()
}
