//! Signature verification schemes.
//!
//! Two deployment variants exist in the wild: RSA PKCS#1 v1.5 keys
//! distributed as base64-wrapped PEM, and secp256k1 keys distributed as
//! hex-encoded compressed points. A deployment selects exactly one
//! scheme when the engine is constructed and never mixes them per call.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rsa::RsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use sha2::Sha256;

use crate::Error;

/// Deterministic accept/reject of a signature over a message.
///
/// An undecodable public key is an error; a malformed or mismatching
/// signature is an ordinary negative outcome (`Ok(false)`). Both paths
/// are attacker-reachable and must never panic.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature` over the SHA-256 digest of `message` using
    /// `public_key` as delivered by the identity registry.
    fn verify(&self, message: &[u8], public_key: &[u8], signature: &[u8])
    -> Result<bool, Error>;
}

/// Scheme A: RSA PKCS#1 v1.5 over SHA-256.
///
/// The registry delivers the public key as base64 text wrapping a PEM
/// document whose body is an X.509 SubjectPublicKeyInfo.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaPkcs1Verifier;

impl SignatureVerifier for RsaPkcs1Verifier {
    fn verify(
        &self,
        message: &[u8],
        public_key: &[u8],
        signature: &[u8],
    ) -> Result<bool, Error> {
        let pem_bytes = STANDARD
            .decode(public_key)
            .map_err(|e| Error::InvalidKeyEncoding(format!("base64: {e}")))?;
        let pem = std::str::from_utf8(&pem_bytes)
            .map_err(|e| Error::InvalidKeyEncoding(format!("utf-8: {e}")))?;
        let key = RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| Error::InvalidKeyEncoding(format!("spki: {e}")))?;

        let verifying_key = rsa::pkcs1v15::VerifyingKey::<Sha256>::new(key);
        let signature = match rsa::pkcs1v15::Signature::try_from(signature) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };

        Ok(verifying_key.verify(message, &signature).is_ok())
    }
}

/// Scheme B: ECDSA over secp256k1, SHA-256 digest.
///
/// The registry delivers the public key as hex text of a compressed
/// SEC1 point; the signature is DER-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaSecp256k1Verifier;

impl SignatureVerifier for EcdsaSecp256k1Verifier {
    fn verify(
        &self,
        message: &[u8],
        public_key: &[u8],
        signature: &[u8],
    ) -> Result<bool, Error> {
        let point = hex::decode(public_key)
            .map_err(|e| Error::InvalidKeyEncoding(format!("hex: {e}")))?;
        let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&point)
            .map_err(|e| Error::InvalidKeyEncoding(format!("sec1: {e}")))?;

        let signature = match k256::ecdsa::Signature::from_der(signature) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };

        Ok(verifying_key.verify(message, &signature).is_ok())
    }
}
