use std::{env, fs, path::PathBuf};

use anyhow::{anyhow, Result};
use checkout_engine::helpers::{compute_signature, payment_signature_message};
use rcg_common::Secret;

/// Uses the secret given on the command line, falling back to the named environment variable.
pub fn secret_or_env(secret: Option<String>, var: &str) -> Result<Secret<String>> {
    let secret = secret.or_else(|| env::var(var).ok()).map(Secret::new).unwrap_or_default();
    if secret.is_empty() {
        return Err(anyhow!("No secret was given, and {var} is not set"));
    }
    Ok(secret)
}

/// The signature the provider would return to the client for this payment.
pub fn sign_payment(secret: &Secret<String>, order_id: &str, payment_id: &str) -> Result<String> {
    let message = payment_signature_message(order_id, payment_id);
    Ok(compute_signature(message, secret.reveal())?)
}

/// The `X-Razorpay-Signature` value for a webhook body. The body is signed byte for byte, as it will be sent.
pub fn sign_webhook(secret: &Secret<String>, body: Option<String>, file: Option<PathBuf>) -> Result<String> {
    let body = match (body, file) {
        (Some(body), None) => body.into_bytes(),
        (None, Some(path)) => fs::read(&path).map_err(|e| anyhow!("Could not read {}. {e}", path.display()))?,
        _ => return Err(anyhow!("Provide exactly one of --body or --file")),
    };
    Ok(compute_signature(body, secret.reveal())?)
}
