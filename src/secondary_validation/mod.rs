mod spanish_cif_checksum;
mod spanish_nie_checksum;
mod spanish_nif_checksum;

pub use crate::secondary_validation::spanish_cif_checksum::{
    SpanishCifChecksum, CIF_CONTROL_LETTERS, VALID_CIF_LETTERS,
};
pub use crate::secondary_validation::spanish_nie_checksum::{
    SpanishNieChecksum, NIE_LEADING_LETTERS,
};
pub use crate::secondary_validation::spanish_nif_checksum::{
    SpanishNifChecksum, NIF_CONTROL_LETTERS,
};

use crate::validation::ValidationError;

/// Every Spanish fiscal identifier is 9 characters long once normalized.
pub const IDENTIFIER_LENGTH: usize = 9;

/// A checksum algorithm for one kind of fiscal identifier.
///
/// Implementations expect a normalized candidate (see [crate::normalize]) but are total over any
/// input: malformed strings are rejected with a [ValidationError], never a panic.
pub trait Validator: Send + Sync {
    fn validate(&self, candidate: &str) -> Result<(), ValidationError>;

    fn is_valid_match(&self, candidate: &str) -> bool {
        self.validate(candidate).is_ok()
    }
}

/// Splits a candidate into its fixed 9 characters.
fn identifier_chars(candidate: &str) -> Result<[char; IDENTIFIER_LENGTH], ValidationError> {
    let mut chars = ['\0'; IDENTIFIER_LENGTH];
    let mut count = 0;
    for c in candidate.chars() {
        if count == IDENTIFIER_LENGTH {
            return Err(ValidationError::InvalidLength);
        }
        chars[count] = c;
        count += 1;
    }
    match count {
        0 => Err(ValidationError::Empty),
        IDENTIFIER_LENGTH => Ok(chars),
        _ => Err(ValidationError::InvalidLength),
    }
}

/// Parses exactly `N` ASCII decimal digits.
fn parse_digits<const N: usize>(chars: &[char]) -> Result<[u32; N], ValidationError> {
    if chars.len() != N {
        return Err(ValidationError::NonDigitBody);
    }
    let mut digits = [0; N];
    for (digit, c) in digits.iter_mut().zip(chars) {
        *digit = c.to_digit(10).ok_or(ValidationError::NonDigitBody)?;
    }
    Ok(digits)
}

/// Folds a slice of decimal digits into the number they spell.
#[inline]
fn digits_to_number(digits: &[u32]) -> u32 {
    digits.iter().fold(0, |acc, digit| acc * 10 + digit)
}
