//! Error types for onevote-core.

use thiserror::Error;

/// Core errors.
///
/// Every error is terminal for the submission that raised it: no
/// retries, no partial commits. The host ledger discards any tentative
/// writes from a failed submission.
#[derive(Debug, Error)]
pub enum Error {
    /// Request shape or arity violation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Caller is not the voting authority.
    #[error("caller {0} is not the voting authority")]
    Unauthorized(String),

    /// The voter has already cast a vote.
    #[error("voter {0} has already voted")]
    AlreadyVoted(String),

    /// Queried state is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// The voting authority is already established.
    #[error("voting authority already established")]
    AlreadyInitialized,

    /// The external identity registry failed or returned a malformed record.
    #[error("identity lookup failed: {0}")]
    IdentityLookupFailed(String),

    /// The fetched public key could not be decoded.
    #[error("invalid public key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// The signature did not verify against the vote message.
    #[error("signature invalid")]
    InvalidSignature,

    /// A stored value could not be interpreted.
    #[error("corrupt state: {0}")]
    CorruptState(String),

    /// Ledger read failure.
    #[error("ledger read failed: {0}")]
    ReadFailed(String),

    /// Ledger write failure.
    #[error("ledger write failed: {0}")]
    WriteFailed(String),
}
