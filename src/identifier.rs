use crate::secondary_validation::{
    SpanishCifChecksum, SpanishNieChecksum, SpanishNifChecksum, Validator, NIE_LEADING_LETTERS,
    VALID_CIF_LETTERS,
};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// The kind of a Spanish fiscal identifier, decided once from its leading character.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum IdentifierKind {
    /// Legal entity
    Cif,
    /// Individual
    Nif,
    /// Foreign resident
    Nie,
    #[default]
    Unknown,
}

impl IdentifierKind {
    /// Classifies by leading character. CIF letters are checked before NIE letters; the two
    /// sets are disjoint.
    pub fn from_leading_char(c: char) -> Self {
        if VALID_CIF_LETTERS.contains(&c) {
            IdentifierKind::Cif
        } else if NIE_LEADING_LETTERS.contains(&c) {
            IdentifierKind::Nie
        } else if c.is_ascii_digit() {
            IdentifierKind::Nif
        } else {
            IdentifierKind::Unknown
        }
    }
}

impl Validator for IdentifierKind {
    fn validate(&self, candidate: &str) -> Result<(), ValidationError> {
        match self {
            IdentifierKind::Cif => SpanishCifChecksum.validate(candidate),
            IdentifierKind::Nif => SpanishNifChecksum.validate(candidate),
            IdentifierKind::Nie => SpanishNieChecksum.validate(candidate),
            IdentifierKind::Unknown => Err(ValidationError::UnrecognizedFormat),
        }
    }
}
