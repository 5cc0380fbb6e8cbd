mod config;

pub use config::{CrossVerifierConfig, DomainAlias, BUILTIN_DOMAIN_ALIASES};

use crate::observability::metrics::record_cross_verification;
use crate::registry_lookup::VerificationResult;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{AsRefStr, Display};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static DEFAULT_CROSS_VERIFIER: LazyLock<CrossVerifier> = LazyLock::new(CrossVerifier::default);

/// Domain parts this short or shorter ("es", "com", "www") never count as a name match.
const MIN_DOMAIN_PART_LENGTH: usize = 3;

/// How well a verified registrant name relates to a domain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CrossVerificationOutcome {
    pub matches: bool,
    /// Always within 0..=100
    pub confidence_score: u8,
    pub reason: Option<String>,
}

/// The heuristic branch that decided a cross-verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CrossVerificationPath {
    /// The registry could not verify the identifier
    Unverified,
    /// A domain part is a substring of the registrant name
    Substring,
    /// The registrant is a known company and the domain one of its brands
    Alias,
    NoRelation,
}

impl CrossVerificationPath {
    pub fn matches(&self) -> bool {
        matches!(
            self,
            CrossVerificationPath::Substring | CrossVerificationPath::Alias
        )
    }

    pub fn confidence_score(&self) -> u8 {
        match self {
            CrossVerificationPath::Unverified => 0,
            CrossVerificationPath::Substring => 85,
            CrossVerificationPath::Alias => 95,
            CrossVerificationPath::NoRelation => 30,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            CrossVerificationPath::Unverified => "could not verify identifier",
            CrossVerificationPath::Substring => "company name matches domain",
            CrossVerificationPath::Alias => "verified against known domain alias",
            CrossVerificationPath::NoRelation => "no clear relation between identifier and domain",
        }
    }

    pub fn outcome(&self) -> CrossVerificationOutcome {
        CrossVerificationOutcome {
            matches: self.matches(),
            confidence_score: self.confidence_score(),
            reason: Some(self.reason().to_string()),
        }
    }
}

/// Scores the relation between a registrant name and a business email domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossVerifier {
    aliases: Vec<DomainAlias>,
}

impl Default for CrossVerifier {
    fn default() -> Self {
        CrossVerifier::new(&CrossVerifierConfig::default())
    }
}

impl CrossVerifier {
    pub fn new(config: &CrossVerifierConfig) -> Self {
        let builtin: &[(&str, &[&str])] = if config.include_builtin_aliases {
            BUILTIN_DOMAIN_ALIASES
        } else {
            &[]
        };
        let builtin = builtin
            .iter()
            .map(|(company_name, domain_aliases)| DomainAlias::new(company_name, domain_aliases));

        // Custom aliases are checked first, keys and aliases are stored in comparison form.
        let aliases = config
            .aliases
            .iter()
            .cloned()
            .chain(builtin)
            .map(|alias| DomainAlias {
                company_name: fold_diacritics(&alias.company_name),
                domain_aliases: alias
                    .domain_aliases
                    .iter()
                    .map(|x| x.to_lowercase())
                    .filter(|x| !x.is_empty())
                    .collect(),
            })
            .filter(|alias| !alias.company_name.is_empty())
            .collect();

        CrossVerifier { aliases }
    }

    pub fn aliases(&self) -> &[DomainAlias] {
        &self.aliases
    }

    pub fn cross_verify(
        &self,
        verification: &VerificationResult,
        domain: &str,
    ) -> CrossVerificationOutcome {
        let path = self.decide(verification, domain);
        record_cross_verification(path);
        path.outcome()
    }

    /// Picks the branch without side effects.
    pub fn decide(&self, verification: &VerificationResult, domain: &str) -> CrossVerificationPath {
        let registrant_name = match (&verification.registrant_name, verification.success) {
            (Some(name), true) => name.to_lowercase(),
            _ => return CrossVerificationPath::Unverified,
        };
        let domain = email_domain(domain).to_lowercase();

        let name_matches_part = domain
            .split('.')
            .filter(|part| part.chars().count() > MIN_DOMAIN_PART_LENGTH)
            .any(|part| registrant_name.contains(part));
        if name_matches_part {
            return CrossVerificationPath::Substring;
        }

        let folded_name = fold_diacritics(&registrant_name);
        let known_alias = self.aliases.iter().any(|alias| {
            folded_name.contains(&alias.company_name)
                && alias
                    .domain_aliases
                    .iter()
                    .any(|domain_alias| domain.contains(domain_alias.as_str()))
        });
        if known_alias {
            return CrossVerificationPath::Alias;
        }

        CrossVerificationPath::NoRelation
    }
}

/// Cross-verifies with the built-in alias table.
pub fn cross_verify_identifier_and_domain(
    verification: &VerificationResult,
    domain: &str,
) -> CrossVerificationOutcome {
    DEFAULT_CROSS_VERIFIER.cross_verify(verification, domain)
}

/// `user@example.com` -> `example.com`; a bare domain is returned as is.
fn email_domain(domain: &str) -> &str {
    let domain = domain.trim();
    match domain.rfind('@') {
        Some(at) => &domain[at + 1..],
        None => domain,
    }
}

/// Lower-cases and strips diacritics, so "Telefónica" compares equal to "telefonica" whether the
/// accent arrives precomposed or as a separate combining mark.
fn fold_diacritics(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
