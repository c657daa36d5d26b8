//! Ledger access seam.
//!
//! The replicated ledger itself (consensus, transaction ordering, the
//! commit protocol) is an external collaborator. This module defines
//! the transactional get/put primitive the core is written against,
//! plus an in-memory implementation for tests and single-process hosts.

use std::collections::BTreeMap;

use crate::Error;

/// Fixed key under which the Authority Record is stored.
pub const AUTHORITY_KEY: &str = "votingAuthority";

/// Key prefix for voted markers.
pub const VOTED_PREFIX: &str = "voted_";

/// Derive the voted-marker key for a voter identifier.
pub fn voted_key(voter: &str) -> String {
    format!("{VOTED_PREFIX}{voter}")
}

/// Transactional byte-value store keyed by string.
///
/// The host must make every read and write issued during one submission
/// commit or abort as a single unit. The core does no locking of its
/// own: the double-vote check, the tally read, and the two commit
/// writes rely entirely on that contract. A host that cannot provide it
/// must wrap `put` in its own compare-and-swap or optimistic retry.
pub trait Ledger {
    /// Read a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Write a value.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), Error>;
}

/// In-memory ledger over a `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
