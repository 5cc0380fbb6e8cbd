pub mod caching;
pub mod config;
pub mod http_lookup;
pub mod in_memory;
pub mod lookup;
pub mod verification_result;

pub use caching::CachingRegistryLookup;
pub use config::{CacheConfig, HttpRegistryConfig, DEFAULT_HTTPS_TIMEOUT_SEC};
pub use http_lookup::{HttpRegistryLookup, LookupError};
pub use in_memory::InMemoryRegistry;
pub use lookup::RegistryLookup;
pub use verification_result::{RegistrationStatus, VerificationResult};
