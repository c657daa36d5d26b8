//! Typed submission requests.
//!
//! The wire protocol dispatches operations by name with positional
//! string arguments plus side-channel ("transient") fields. Here that
//! surface becomes a closed set of operations carrying validated
//! argument bundles; arity checking lives in the `from_parts`
//! constructors and hosts match exhaustively on [`Request`].

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::Error;

/// Side-channel fields supplied out of band with a submission. The vote
/// target (and, in one transport, the signature) travel here so they
/// never appear in plaintext transaction logs.
pub type Transient = BTreeMap<String, Vec<u8>>;

/// Authenticated caller context, extracted by the host from the
/// submission's signed envelope and threaded into every mutating
/// operation. Never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Node/organization identifier of the submitting peer.
    pub node_id: String,
    /// Serialized identity credential; opaque to the core.
    pub credential: Vec<u8>,
}

impl CallerIdentity {
    /// Caller context with an empty credential blob.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            credential: Vec::new(),
        }
    }
}

/// A validated vote submission.
#[derive(Debug, Clone)]
pub struct VoteRequest {
    /// Voter identifier; eligible for exactly one vote.
    pub voter: String,
    /// Channel/namespace for the identity registry lookup.
    pub channel: String,
    /// Vote target, from the `to` side-channel field.
    pub target: String,
    /// Decoded signature bytes over the canonical vote message.
    pub signature: Vec<u8>,
}

impl VoteRequest {
    /// Validate positional arguments plus side-channel fields.
    ///
    /// Two transports are accepted: `[voter, channel]` with a base64
    /// `signature` side-channel field, or `[voter, channel, sigHex]`
    /// with the signature hex-encoded in the third argument. The vote
    /// target always arrives via the `to` side-channel field. Any other
    /// shape is a `BadRequest`; an undecodable signature is an
    /// `InvalidSignature`.
    pub fn from_parts(args: &[String], transient: &Transient) -> Result<Self, Error> {
        let signature = match args.len() {
            2 => {
                let raw = transient.get("signature").ok_or_else(|| {
                    Error::BadRequest("missing signature side-channel field".to_string())
                })?;
                STANDARD.decode(raw).map_err(|_| Error::InvalidSignature)?
            }
            3 => hex::decode(&args[2]).map_err(|_| Error::InvalidSignature)?,
            n => {
                return Err(Error::BadRequest(format!(
                    "expected 2 or 3 arguments, got {n}"
                )));
            }
        };

        let target = transient
            .get("to")
            .ok_or_else(|| Error::BadRequest("missing to side-channel field".to_string()))?;
        let target = String::from_utf8(target.clone())
            .map_err(|_| Error::BadRequest("target is not valid UTF-8".to_string()))?;

        Ok(Self {
            voter: args[0].clone(),
            channel: args[1].clone(),
            target,
            signature,
        })
    }
}

/// The closed set of operations a submission can carry.
#[derive(Debug, Clone)]
pub enum Request {
    /// Establish the voting authority from the caller's credential.
    Initialize,
    /// Cast a vote.
    Vote(VoteRequest),
    /// Read a target's current tally.
    GetVotes { target: String },
    /// Read the stored authority record.
    GetCreatorIdentity,
}

impl Request {
    /// Validate a tally query argument list (exactly one target).
    pub fn get_votes_from_parts(args: &[String]) -> Result<Self, Error> {
        match args {
            [target] => Ok(Request::GetVotes {
                target: target.clone(),
            }),
            _ => Err(Error::BadRequest(format!(
                "expected 1 argument, got {}",
                args.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transient(pairs: &[(&str, &[u8])]) -> Transient {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect()
    }

    #[test]
    fn vote_with_transient_signature() {
        let args = vec!["alice".to_string(), "idchannel".to_string()];
        let encoded = STANDARD.encode(b"sigbytes");
        let t = transient(&[("to", b"bob"), ("signature", encoded.as_bytes())]);

        let req = VoteRequest::from_parts(&args, &t).unwrap();
        assert_eq!(req.voter, "alice");
        assert_eq!(req.channel, "idchannel");
        assert_eq!(req.target, "bob");
        assert_eq!(req.signature, b"sigbytes");
    }

    #[test]
    fn vote_with_hex_signature_argument() {
        let args = vec![
            "alice".to_string(),
            "idchannel".to_string(),
            hex::encode(b"sigbytes"),
        ];
        let t = transient(&[("to", b"bob")]);

        let req = VoteRequest::from_parts(&args, &t).unwrap();
        assert_eq!(req.signature, b"sigbytes");
    }

    #[test]
    fn wrong_arity_is_bad_request() {
        let t = transient(&[("to", b"bob")]);

        let err = VoteRequest::from_parts(&["alice".to_string()], &t).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let four: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        let err = VoteRequest::from_parts(&four, &t).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn missing_target_is_bad_request() {
        let args = vec!["alice".to_string(), "idchannel".to_string()];
        let encoded = STANDARD.encode(b"sigbytes");
        let t = transient(&[("signature", encoded.as_bytes())]);

        let err = VoteRequest::from_parts(&args, &t).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn missing_signature_is_bad_request() {
        let args = vec!["alice".to_string(), "idchannel".to_string()];
        let t = transient(&[("to", b"bob")]);

        let err = VoteRequest::from_parts(&args, &t).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn undecodable_signature_is_invalid_signature() {
        let args = vec!["alice".to_string(), "idchannel".to_string()];
        let t = transient(&[("to", b"bob"), ("signature", b"%%% not base64 %%%")]);
        let err = VoteRequest::from_parts(&args, &t).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature));

        let args = vec![
            "alice".to_string(),
            "idchannel".to_string(),
            "zz not hex".to_string(),
        ];
        let t = transient(&[("to", b"bob")]);
        let err = VoteRequest::from_parts(&args, &t).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature));
    }

    #[test]
    fn get_votes_arity() {
        let req = Request::get_votes_from_parts(&["bob".to_string()]).unwrap();
        assert!(matches!(req, Request::GetVotes { target } if target == "bob"));

        let err = Request::get_votes_from_parts(&[]).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let err =
            Request::get_votes_from_parts(&["a".to_string(), "b".to_string()]).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }
}
