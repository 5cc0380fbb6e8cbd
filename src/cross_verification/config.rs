use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Legal names and the consumer brand domains they trade under.
///
/// Keys are matched against the registrant name lower-cased and without diacritics, aliases
/// against the lower-cased domain. Both are substring matches.
pub const BUILTIN_DOMAIN_ALIASES: &[(&str, &[&str])] = &[
    ("telefonica", &["movistar", "telefonica", "o2"]),
    ("banco bilbao vizcaya", &["bbva"]),
    ("banco santander", &["santander", "openbank"]),
    ("industria de diseno textil", &["inditex", "zara"]),
    ("inditex", &["inditex", "zara"]),
    ("repsol", &["repsol", "campsa"]),
    ("iberdrola", &["iberdrola", "i-de"]),
    ("sociedad estatal correos", &["correos"]),
    ("el corte ingles", &["elcorteingles"]),
];

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DomainAlias {
    pub company_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub domain_aliases: Vec<String>,
}

impl DomainAlias {
    pub fn new(company_name: &str, domain_aliases: &[&str]) -> Self {
        DomainAlias {
            company_name: company_name.to_string(),
            domain_aliases: domain_aliases.iter().map(|x| x.to_string()).collect(),
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CrossVerifierConfig {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub aliases: Vec<DomainAlias>,
    #[serde(default = "default_include_builtin_aliases")]
    pub include_builtin_aliases: bool,
}

fn default_include_builtin_aliases() -> bool {
    true
}

impl Default for CrossVerifierConfig {
    fn default() -> Self {
        CrossVerifierConfig {
            aliases: vec![],
            include_builtin_aliases: default_include_builtin_aliases(),
        }
    }
}

impl CrossVerifierConfig {
    pub fn alias(&self, alias: DomainAlias) -> Self {
        self.mutate_clone(|x| x.aliases.push(alias))
    }

    pub fn include_builtin_aliases(&self, include_builtin_aliases: bool) -> Self {
        self.mutate_clone(|x| x.include_builtin_aliases = include_builtin_aliases)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}
