//! Authority establishment and checks.
//!
//! A single node/organization per deployment is trusted to submit
//! votes. Its identifier is stored once under a fixed key; an absent
//! record authorizes nobody.

use crate::Error;
use crate::ledger::{AUTHORITY_KEY, Ledger};
use crate::request::CallerIdentity;

/// Persist the caller's node identifier as the Authority Record.
///
/// Re-initialization is rejected: once established, the trusted
/// authority is never silently replaced.
pub fn establish(ledger: &mut impl Ledger, caller: &CallerIdentity) -> Result<(), Error> {
    if ledger.get(AUTHORITY_KEY)?.is_some() {
        return Err(Error::AlreadyInitialized);
    }
    ledger.put(AUTHORITY_KEY, caller.node_id.clone().into_bytes())
}

/// True iff the caller's node identifier equals the stored record.
pub fn is_authorized(ledger: &impl Ledger, caller: &CallerIdentity) -> Result<bool, Error> {
    match ledger.get(AUTHORITY_KEY)? {
        Some(stored) => Ok(stored == caller.node_id.as_bytes()),
        None => Ok(false),
    }
}

/// The stored Authority Record bytes.
pub fn authority(ledger: &impl Ledger) -> Result<Vec<u8>, Error> {
    ledger
        .get(AUTHORITY_KEY)?
        .ok_or_else(|| Error::NotFound("voting authority not yet established".to_string()))
}
