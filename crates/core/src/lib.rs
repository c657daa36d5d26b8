//! onevote-core: authorization, signature verification, and tally
//! state machine for a one-vote-per-identity ledger.
//!
//! Each participant may cast at most one vote for a target identity.
//! A vote is accepted only when submitted by the designated authority
//! node and carrying a valid signature over the canonical vote message,
//! checked against a public key resolved from an external identity
//! registry. The replicated ledger, the peer network, and the registry
//! service are external collaborators reached through the [`Ledger`]
//! and [`IdentityRegistry`] seams.

mod authority;
mod engine;
mod error;
mod ledger;
mod message;
mod registry;
mod request;
mod verifier;

pub use authority::{authority, establish, is_authorized};
pub use engine::Engine;
pub use error::Error;
pub use ledger::{AUTHORITY_KEY, Ledger, MemoryLedger, VOTED_PREFIX, voted_key};
pub use message::{message_digest, vote_message};
pub use registry::{IdentityRecord, IdentityRegistry};
pub use request::{CallerIdentity, Request, Transient, VoteRequest};
pub use verifier::{EcdsaSecp256k1Verifier, RsaPkcs1Verifier, SignatureVerifier};
