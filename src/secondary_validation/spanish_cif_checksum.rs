use crate::secondary_validation::{identifier_chars, parse_digits, Validator};
use crate::validation::ValidationError;

/// Validates the control character of a Spanish CIF (legal entity tax ID).
/// See: https://es.wikipedia.org/wiki/C%C3%B3digo_de_identificaci%C3%B3n_fiscal
pub struct SpanishCifChecksum;

/// Letters an organization type may start a CIF with.
pub const VALID_CIF_LETTERS: [char; 17] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'N', 'P', 'Q', 'R', 'S', 'U', 'V', 'W',
];

/// Letter form of the control digit, indexed by the digit.
pub const CIF_CONTROL_LETTERS: &[u8; 10] = b"JABCDEFGHI";

const BODY_LENGTH: usize = 7;

/// Computes the CIF control digit of a 7-digit body.
fn control_digit(body: &[u32; BODY_LENGTH]) -> u32 {
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(idx, &digit)| {
            if idx % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    (10 - sum % 10) % 10
}

impl Validator for SpanishCifChecksum {
    fn validate(&self, candidate: &str) -> Result<(), ValidationError> {
        /*
         * CIF format:
         * 1 organization letter, 7 digits, 1 control character
         * Digits at even positions of the body are doubled (digit sum), odd ones are added as is.
         * The control character is either the control digit itself, or its letter in
         * CIF_CONTROL_LETTERS. Both conventions are in use, so both are accepted.
         */
        let chars = identifier_chars(candidate)?;
        if !VALID_CIF_LETTERS.contains(&chars[0]) {
            return Err(ValidationError::UnrecognizedFormat);
        }

        let body = parse_digits::<BODY_LENGTH>(&chars[1..=BODY_LENGTH])?;
        let control = control_digit(&body);

        let expected_digit = char::from(b'0' + control as u8);
        let expected_letter = char::from(CIF_CONTROL_LETTERS[control as usize]);
        let found = chars[8];

        if found == expected_digit || found == expected_letter {
            Ok(())
        } else {
            Err(ValidationError::ChecksumMismatch {
                expected: format!("{expected_digit} or {expected_letter}"),
                found,
            })
        }
    }
}
