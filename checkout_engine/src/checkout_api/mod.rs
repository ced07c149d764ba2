//! # Checkout engine public API
//!
//! The `checkout_api` module exposes the programmatic API for the checkout flow. Each API covers one part of the flow,
//! so that callers only need to supply the backends that part requires.
//!
//! * [`order_flow_api`] registers orders with the payment provider and records them.
//! * [`payment_api`] verifies the signature that the provider's widget returns when a payment completes, and marks the
//!   order as paid.
//! * [`order_query_api`] looks up orders and their verified payments.
//! * [`webhook_api`] authenticates and dispatches the provider's asynchronous webhook events.
//!
//! # API usage
//!
//! An API instance is created by supplying the backends it needs:
//!
//! ```rust,ignore
//! use checkout_engine::{PaymentVerificationApi, SqliteDatabase, SignatureVerifier};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let verifier = SignatureVerifier::new(&key_secret)?;
//! let api = PaymentVerificationApi::new(db, verifier, producers);
//! let verified = api.verify_payment(confirmation).await?;
//! ```
use std::{future::Future, time::Duration};

use crate::traits::CheckoutDatabaseError;

pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod order_query_api;
pub mod payment_api;
pub mod webhook_api;
pub mod webhook_objects;

/// The default bound on any single store call made through the API.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs a store call, failing with [`CheckoutDatabaseError::Timeout`] if it does not complete within `limit`.
pub(crate) async fn with_store_timeout<T, F>(limit: Duration, call: F) -> Result<T, CheckoutDatabaseError>
where F: Future<Output = Result<T, CheckoutDatabaseError>> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(CheckoutDatabaseError::Timeout(limit.as_millis() as u64)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn slow_store_calls_time_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, CheckoutDatabaseError>(1)
        };
        let result = with_store_timeout(Duration::from_millis(20), slow).await;
        assert!(matches!(result, Err(CheckoutDatabaseError::Timeout(20))));
        let fast = async { Ok::<_, CheckoutDatabaseError>(2) };
        assert_eq!(with_store_timeout(Duration::from_millis(20), fast).await.unwrap(), 2);
    }
}
