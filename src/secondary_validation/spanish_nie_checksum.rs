use crate::secondary_validation::spanish_nif_checksum::{check_control_letter, control_letter};
use crate::secondary_validation::{digits_to_number, identifier_chars, parse_digits, Validator};
use crate::validation::ValidationError;

/// Validates the control letter of a Spanish NIE (foreign resident number).
pub struct SpanishNieChecksum;

/// Leading letters of a NIE, in the order of the numeric prefix they stand for.
pub const NIE_LEADING_LETTERS: [char; 3] = ['X', 'Y', 'Z'];

const BODY_LENGTH: usize = 7;

impl Validator for SpanishNieChecksum {
    fn validate(&self, candidate: &str) -> Result<(), ValidationError> {
        /*
         * NIE format:
         * X, Y or Z, 7 digits, 1 control letter
         * The leading letter is replaced by 0, 1 or 2 and the resulting 8-digit number
         * is checked exactly like a NIF.
         */
        let chars = identifier_chars(candidate)?;
        let prefix = NIE_LEADING_LETTERS
            .iter()
            .position(|&letter| letter == chars[0])
            .ok_or(ValidationError::UnrecognizedFormat)? as u32;

        let body = parse_digits::<BODY_LENGTH>(&chars[1..=BODY_LENGTH])?;
        let number = prefix * 10_000_000 + digits_to_number(&body);

        check_control_letter(control_letter(number), chars[8])
    }
}
