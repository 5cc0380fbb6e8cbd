use afl::fuzz;
use es_fiscal_id::{
    cross_verify_identifier_and_domain, format_fiscal_identifier, normalize,
    validate_fiscal_identifier, IdentifierKind, VerificationResult, IDENTIFIER_LENGTH,
};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = input.iter().position(|b| *b == b',') {
        Some((&input[0..i], &input[i + 1..]))
    } else {
        None
    }
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (identifier, rest) = split_bytes_once(bytes)?;
    let (registrant_name, domain) = split_bytes_once(rest)?;

    let identifier = std::str::from_utf8(identifier).ok()?;
    let registrant_name = std::str::from_utf8(registrant_name).ok()?;
    let domain = std::str::from_utf8(domain).ok()?;

    run_fuzz(identifier, registrant_name, domain);
    Some(())
}

fn run_fuzz(identifier: &str, registrant_name: &str, domain: &str) {
    let result = validate_fiscal_identifier(identifier);

    // normalization is idempotent
    let normalized = normalize(identifier);
    assert_eq!(normalize(&normalized), normalized);
    assert_eq!(result.normalized_value, normalized);

    if result.is_valid {
        assert_ne!(result.kind, IdentifierKind::Unknown);
        assert_eq!(result.normalized_value.chars().count(), IDENTIFIER_LENGTH);
        assert!(result.error.is_none());

        let formatted = format_fiscal_identifier(&result.normalized_value);
        let stripped: String = formatted.chars().filter(|c| *c != '.').collect();
        assert_eq!(normalize(&stripped), result.normalized_value);
    } else {
        assert!(result.error.is_some());
        if result.normalized_value.chars().count() != IDENTIFIER_LENGTH {
            assert_eq!(result.kind, IdentifierKind::Unknown);
        }
    }

    if identifier.chars().count() != IDENTIFIER_LENGTH {
        assert_eq!(format_fiscal_identifier(identifier), identifier);
    }

    let verification = VerificationResult::found(registrant_name, result.kind);
    let outcome = cross_verify_identifier_and_domain(&verification, domain);
    assert!(outcome.confidence_score <= 100);
    assert!(outcome.reason.is_some());
}
