use crate::identifier::IdentifierKind;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Active,
    #[default]
    Inactive,
    Suspended,
}

/// What a registry lookup found out about an identifier.
///
/// Produced by a [crate::RegistryLookup], never by the checksum validators.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub success: bool,
    #[serde(default)]
    pub registrant_name: Option<String>,
    #[serde(default)]
    pub kind: IdentifierKind,
    #[serde(default)]
    pub status: RegistrationStatus,
    #[serde(default)]
    pub registered_address: Option<String>,
    #[serde(default)]
    pub activity_description: Option<String>,
    #[serde(default)]
    pub error_reason: Option<String>,
}

impl VerificationResult {
    /// A successful lookup of an active registrant.
    pub fn found(registrant_name: impl Into<String>, kind: IdentifierKind) -> Self {
        VerificationResult {
            success: true,
            registrant_name: Some(registrant_name.into()),
            kind,
            status: RegistrationStatus::Active,
            registered_address: None,
            activity_description: None,
            error_reason: None,
        }
    }

    pub fn failed(error_reason: impl Into<String>) -> Self {
        VerificationResult {
            success: false,
            registrant_name: None,
            kind: IdentifierKind::Unknown,
            status: RegistrationStatus::Inactive,
            registered_address: None,
            activity_description: None,
            error_reason: Some(error_reason.into()),
        }
    }

    pub fn with_status(mut self, status: RegistrationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_registered_address(mut self, address: impl Into<String>) -> Self {
        self.registered_address = Some(address.into());
        self
    }

    pub fn with_activity_description(mut self, description: impl Into<String>) -> Self {
        self.activity_description = Some(description.into());
        self
    }
}
