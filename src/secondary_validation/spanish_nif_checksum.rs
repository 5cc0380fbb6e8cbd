use crate::secondary_validation::{digits_to_number, identifier_chars, parse_digits, Validator};
use crate::validation::ValidationError;

/// Validates the control letter of a Spanish NIF (DNI number of an individual).
pub struct SpanishNifChecksum;

/// Control letters, indexed by the identifier number modulo 23.
pub const NIF_CONTROL_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

const NUMBER_LENGTH: usize = 8;

/// Control letter shared by NIF and NIE numbers.
pub(super) fn control_letter(number: u32) -> char {
    char::from(NIF_CONTROL_LETTERS[(number % 23) as usize])
}

/// Compares the trailing character against the expected control letter, ignoring case.
pub(super) fn check_control_letter(expected: char, found: char) -> Result<(), ValidationError> {
    if found.to_ascii_uppercase() == expected {
        Ok(())
    } else {
        Err(ValidationError::ChecksumMismatch {
            expected: expected.to_string(),
            found,
        })
    }
}

impl Validator for SpanishNifChecksum {
    fn validate(&self, candidate: &str) -> Result<(), ValidationError> {
        /*
         * NIF format:
         * 8 digits followed by a letter
         * The letter is calculated by taking the number modulo 23 and using it as an index
         * into NIF_CONTROL_LETTERS
         */
        let chars = identifier_chars(candidate)?;
        let number = parse_digits::<NUMBER_LENGTH>(&chars[..NUMBER_LENGTH])?;

        check_control_letter(control_letter(digits_to_number(&number)), chars[8])
    }
}

#[cfg(test)]
mod test {
    use crate::secondary_validation::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_valid_spanish_nif() {
        let valid_ids = vec![
            "12345678Z", // 12345678 % 23 = 14 -> Z
            "00000000T", // 0 % 23 = 0 -> T
            "99999999R", // 99999999 % 23 = 1 -> R
            "87654321X", // 87654321 % 23 = 10 -> X
            "12345678z", // lowercase control letter
        ];
        for id in valid_ids {
            assert!(SpanishNifChecksum.is_valid_match(id), "{id} should be valid");
        }
    }

    #[test]
    fn test_invalid_spanish_nif() {
        let invalid_ids = vec![
            // Wrong letter
            "12345678A",
            "00000000R",
            "99999999T",
            // Wrong length
            "123456789Z",
            "1234567Z",
            // Non-numeric first 8 chars
            "1234567A9",
            "ABCDEFGHR",
            // Digit where the letter belongs
            "123456789",
        ];
        for id in invalid_ids {
            assert!(!SpanishNifChecksum.is_valid_match(id), "{id} should be invalid");
        }
    }

    #[test]
    fn test_reports_expected_letter() {
        assert_eq!(
            SpanishNifChecksum.validate("12345678A"),
            Err(ValidationError::ChecksumMismatch {
                expected: "Z".to_string(),
                found: 'A',
            })
        );
    }
}
