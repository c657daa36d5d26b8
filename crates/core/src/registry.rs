//! Identity registry client seam.
//!
//! The registry that maps a voter identifier to its public-key record
//! is an external service; the core only defines the lookup contract
//! and the wire shape of the returned record.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Public-key record returned by the identity registry.
///
/// Wire shape: `{"publicKey": "...", "metadataHash": "...",
/// "permissions": [...]}`. Only `public_key` is consumed by the vote
/// state machine; the record is fetched fresh per vote and never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    /// Encoded public key; the interpretation depends on the
    /// deployment's signature scheme.
    pub public_key: String,
    #[serde(default)]
    pub metadata_hash: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl IdentityRecord {
    /// Parse a raw registry response payload.
    pub fn from_json(payload: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(payload)
            .map_err(|e| Error::IdentityLookupFailed(format!("malformed record: {e}")))
    }
}

/// Synchronous client for the external identity registry.
///
/// A lookup is a blocking, in-transaction call with no timeout of its
/// own; any failure fails the whole submission.
pub trait IdentityRegistry {
    /// Resolve a voter's record within the given channel/namespace.
    fn lookup(&self, voter: &str, channel: &str) -> Result<IdentityRecord, Error>;
}
