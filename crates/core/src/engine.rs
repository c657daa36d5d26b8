//! The vote state machine and query interface.

use tracing::{debug, info, warn};

use crate::Error;
use crate::authority;
use crate::ledger::{Ledger, voted_key};
use crate::message::vote_message;
use crate::registry::IdentityRegistry;
use crate::request::{CallerIdentity, Request, VoteRequest};
use crate::verifier::SignatureVerifier;

/// The tally engine.
///
/// Stateless across submissions except through the ledger. Each
/// operation is one synchronous unit of work; the host ledger commits
/// or aborts all of its reads and writes atomically, so the engine
/// never locks or retries on its own.
pub struct Engine<L: Ledger> {
    ledger: L,
    registry: Box<dyn IdentityRegistry>,
    verifier: Box<dyn SignatureVerifier>,
}

impl<L: Ledger> Engine<L> {
    /// Create an engine over a ledger with the deployment's identity
    /// registry client and signature scheme.
    pub fn new(
        ledger: L,
        registry: Box<dyn IdentityRegistry>,
        verifier: Box<dyn SignatureVerifier>,
    ) -> Self {
        Self {
            ledger,
            registry,
            verifier,
        }
    }

    /// Get the underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Get a mutable reference to the underlying ledger.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Dispatch a submission to its operation.
    ///
    /// Mutating operations return `None`; queries return their payload,
    /// with `None` as the tally query's "absent" representation.
    pub fn dispatch(
        &mut self,
        caller: &CallerIdentity,
        request: Request,
    ) -> Result<Option<Vec<u8>>, Error> {
        match request {
            Request::Initialize => self.initialize(caller).map(|_| None),
            Request::Vote(req) => self.vote(caller, &req).map(|_| None),
            Request::GetVotes { target } => self.get_votes(&target),
            Request::GetCreatorIdentity => self.get_creator_identity().map(Some),
        }
    }

    /// Establish the voting authority from the caller's identity.
    /// Called once per deployment; re-initialization is rejected.
    pub fn initialize(&mut self, caller: &CallerIdentity) -> Result<(), Error> {
        authority::establish(&mut self.ledger, caller)?;
        info!(authority = %caller.node_id, "voting authority established");
        Ok(())
    }

    /// Cast a vote.
    ///
    /// Validation order: authorization, double-vote guard, tally read,
    /// identity resolution, signature verification, commit. Every
    /// failure leaves the ledger untouched. On commit the voted marker
    /// is written before the tally, so a partial failure may lose a
    /// vote but can never inflate the tally relative to recorded
    /// voters.
    pub fn vote(&mut self, caller: &CallerIdentity, request: &VoteRequest) -> Result<(), Error> {
        if !authority::is_authorized(&self.ledger, caller)? {
            debug!(caller = %caller.node_id, "vote rejected: unauthorized submitter");
            return Err(Error::Unauthorized(caller.node_id.clone()));
        }

        let marker = voted_key(&request.voter);
        if self.ledger.get(&marker)?.is_some() {
            debug!(voter = %request.voter, "vote rejected: already voted");
            return Err(Error::AlreadyVoted(request.voter.clone()));
        }

        let count = self.read_tally(&request.target)?;

        let record = self.registry.lookup(&request.voter, &request.channel)?;

        let message = vote_message(&request.target);
        let verified =
            self.verifier
                .verify(&message, record.public_key.as_bytes(), &request.signature)?;
        if !verified {
            debug!(voter = %request.voter, "vote rejected: signature invalid");
            return Err(Error::InvalidSignature);
        }

        let count = count.checked_add(1).ok_or_else(|| {
            Error::CorruptState(format!("tally overflow for {}", request.target))
        })?;

        self.ledger.put(&marker, b"true".to_vec())?;
        self.ledger
            .put(&request.target, count.to_string().into_bytes())?;

        info!(voter = %request.voter, to = %request.target, count, "vote recorded");
        Ok(())
    }

    /// Raw stored tally bytes for a target.
    ///
    /// A target nobody has voted for has no record: the result is
    /// `Ok(None)`, not `"0"`.
    pub fn get_votes(&self, target: &str) -> Result<Option<Vec<u8>>, Error> {
        self.ledger.get(target)
    }

    /// The stored Authority Record bytes.
    pub fn get_creator_identity(&self) -> Result<Vec<u8>, Error> {
        authority::authority(&self.ledger)
    }

    /// Parse the stored tally for a target; absent means zero.
    fn read_tally(&self, target: &str) -> Result<u64, Error> {
        let Some(bytes) = self.ledger.get(target)? else {
            return Ok(0);
        };

        std::str::from_utf8(&bytes)
            .ok()
            .and_then(|text| text.parse::<u64>().ok())
            .ok_or_else(|| {
                warn!(key = target, "stored tally is not a decimal integer");
                Error::CorruptState(format!("tally for {target} is not a decimal integer"))
            })
    }
}
