//! HMAC-SHA256 signatures, as used by the provider to authenticate payment responses and webhook deliveries.
//!
//! The provider signs two things with a secret shared with the merchant backend:
//! * Checkout responses. The message is `"{order_id}|{payment_id}"` and the key is the API key secret.
//! * Webhook bodies. The message is the raw, unparsed request body and the key is the webhook secret.
//!
//! In both cases the signature is the lowercase hex encoding of the HMAC-SHA256 digest. Comparisons are always
//! performed in constant time.
use std::fmt::Debug;

use hmac::{Hmac, Mac};
use log::trace;
use rcg_common::Secret;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("No signing secret has been configured")]
    MissingSecret,
    #[error("The signing secret cannot be used as an HMAC key")]
    InvalidKey,
}

/// Builds the canonical message that the provider signs when a checkout payment completes. The field order and the
/// `|` separator are fixed by the provider.
pub fn payment_signature_message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Computes the lowercase hex HMAC-SHA256 of `message`, keyed by `secret`.
pub fn compute_signature<M: AsRef<[u8]>>(message: M, secret: &str) -> Result<String, SignatureError> {
    let verifier = SignatureVerifier::new(&Secret::new(secret.to_string()))?;
    Ok(verifier.compute(message))
}

/// Recomputes the signature for `message` and compares it to `candidate` in constant time.
///
/// A malformed candidate simply fails to match. Only a missing secret is an error.
pub fn verify_signature<M: AsRef<[u8]>>(message: M, secret: &str, candidate: &str) -> Result<bool, SignatureError> {
    let verifier = SignatureVerifier::new(&Secret::new(secret.to_string()))?;
    Ok(verifier.verify(message, candidate))
}

/// A signature verifier that is keyed once (typically at startup) so that per-request verification cannot fail.
#[derive(Clone)]
pub struct SignatureVerifier {
    mac: HmacSha256,
}

impl Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SignatureVerifier(****)")
    }
}

impl SignatureVerifier {
    pub fn new(secret: &Secret<String>) -> Result<Self, SignatureError> {
        if secret.is_empty() {
            return Err(SignatureError::MissingSecret);
        }
        let mac = HmacSha256::new_from_slice(secret.reveal().as_bytes()).map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self { mac })
    }

    pub fn compute<M: AsRef<[u8]>>(&self, message: M) -> String {
        let mut mac = self.mac.clone();
        mac.update(message.as_ref());
        hex::encode(mac.finalize().into_bytes())
    }

    pub fn verify<M: AsRef<[u8]>>(&self, message: M, candidate: &str) -> bool {
        let expected = self.compute(message);
        // Lengths are public (always 64 hex chars), so only the contents are compared in constant time.
        let matched: bool = expected.as_bytes().ct_eq(candidate.as_bytes()).into();
        trace!("🔏️ Signature check {}", if matched { "passed" } else { "failed" });
        matched
    }

    /// Verifies a checkout payment signature over `"{order_id}|{payment_id}"`.
    pub fn verify_payment(&self, order_id: &str, payment_id: &str, candidate: &str) -> bool {
        self.verify(payment_signature_message(order_id, payment_id), candidate)
    }
}
