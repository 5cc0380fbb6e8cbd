use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DurationSecondsWithFrac};
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_HTTPS_TIMEOUT_SEC: u64 = 3;
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_CACHE_TTL_SEC: u64 = 60 * 60;

/// `$IDENTIFIER` in the endpoint or in a header value is replaced by the normalized identifier.
pub const IDENTIFIER_PLACEHOLDER: &str = "$IDENTIFIER";

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HttpRegistryConfig {
    pub endpoint: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub request_headers: BTreeMap<String, String>,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_HTTPS_TIMEOUT_SEC)
}

impl Default for HttpRegistryConfig {
    fn default() -> Self {
        HttpRegistryConfig {
            endpoint: String::new(),
            request_headers: BTreeMap::from([(
                "Accept".to_string(),
                "application/json".to_string(),
            )]),
            timeout: default_timeout(),
        }
    }
}

impl HttpRegistryConfig {
    pub fn with_endpoint(&self, endpoint: String) -> Self {
        self.mutate_clone(|x| x.endpoint = endpoint)
    }

    pub fn with_request_headers(&self, request_headers: BTreeMap<String, String>) -> Self {
        self.mutate_clone(|x| x.request_headers = request_headers)
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.mutate_clone(|x| x.timeout = timeout)
    }

    pub fn endpoint_for(&self, normalized_identifier: &str) -> String {
        self.endpoint
            .replace(IDENTIFIER_PLACEHOLDER, normalized_identifier)
    }

    pub fn headers_for(&self, normalized_identifier: &str) -> Vec<(String, String)> {
        self.request_headers
            .iter()
            .map(|(key, value)| {
                (
                    key.clone(),
                    value.replace(IDENTIFIER_PLACEHOLDER, normalized_identifier),
                )
            })
            .collect()
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CacheConfig {
    pub max_capacity: u64,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_to_live: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            max_capacity: DEFAULT_CACHE_CAPACITY,
            time_to_live: Duration::from_secs(DEFAULT_CACHE_TTL_SEC),
        }
    }
}
