//! Canonical vote message construction.
//!
//! The vote message is the exact byte sequence a voter signs and the
//! verifier checks: `{"action":"vote","to":"<target>"}` as UTF-8, no
//! whitespace. Submission and verification must construct it
//! byte-identically, so both go through [`vote_message`].

use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Serialize)]
struct VoteMessage<'a> {
    action: &'a str,
    to: &'a str,
}

/// Build the canonical vote message for a target.
///
/// serde_json emits struct fields in declaration order with no padding,
/// so the encoding cannot drift between construction sites.
pub fn vote_message(target: &str) -> Vec<u8> {
    serde_json::to_vec(&VoteMessage {
        action: "vote",
        to: target,
    })
    .expect("vote message serialization should not fail")
}

/// SHA-256 digest of the canonical vote message for a target.
pub fn message_digest(target: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(vote_message(target));
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_wire_form() {
        assert_eq!(vote_message("bob"), br#"{"action":"vote","to":"bob"}"#);
        assert_eq!(vote_message(""), br#"{"action":"vote","to":""}"#);
    }

    #[test]
    fn digest_deterministic() {
        assert_eq!(message_digest("bob"), message_digest("bob"));
    }

    #[test]
    fn digest_binds_target() {
        assert_ne!(message_digest("bob"), message_digest("carol"));
    }

    proptest! {
        #[test]
        fn message_roundtrips_target(target in "[a-zA-Z0-9_-]{1,32}") {
            let parsed: serde_json::Value =
                serde_json::from_slice(&vote_message(&target)).unwrap();
            prop_assert_eq!(parsed["action"].as_str(), Some("vote"));
            prop_assert_eq!(parsed["to"].as_str(), Some(target.as_str()));
        }

        #[test]
        fn distinct_targets_distinct_digests(
            a in "[a-zA-Z0-9_-]{1,32}",
            b in "[a-zA-Z0-9_-]{1,32}",
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(message_digest(&a), message_digest(&b));
        }
    }
}
