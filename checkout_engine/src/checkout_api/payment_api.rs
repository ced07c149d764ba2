use std::{fmt::Debug, time::Duration};

use log::*;

use crate::{
    checkout_api::{
        errors::PaymentVerificationError,
        order_objects::{PaymentConfirmation, PaymentVerified},
        with_store_timeout,
        DEFAULT_STORE_TIMEOUT,
    },
    db_types::{NewPayment, OrderId},
    events::{EventProducers, OrderPaidEvent},
    helpers::SignatureVerifier,
    traits::{CheckoutDatabase, VerificationOutcome},
};

/// `PaymentVerificationApi` checks the signature that the provider's widget returns to the client when a payment
/// completes, and records the payment.
///
/// The verifier must be keyed with the API key secret.
pub struct PaymentVerificationApi<B> {
    db: B,
    verifier: SignatureVerifier,
    producers: EventProducers,
    timeout: Duration,
}

impl<B> Debug for PaymentVerificationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentVerificationApi ({:?})", self.verifier)
    }
}

impl<B> PaymentVerificationApi<B> {
    pub fn new(db: B, verifier: SignatureVerifier, producers: EventProducers) -> Self {
        Self { db, verifier, producers, timeout: DEFAULT_STORE_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> PaymentVerificationApi<B>
where B: CheckoutDatabase
{
    /// Verifies a completed payment and marks its order as paid.
    ///
    /// The signature over `"{orderId}|{paymentId}"` is computed before the fields are validated, so a malformed
    /// request costs the same as a mismatched one.
    ///
    /// * A mismatched signature returns [`PaymentVerificationError::SignatureMismatch`] and writes nothing.
    /// * An unknown order returns [`PaymentVerificationError::OrderNotFound`] and writes nothing.
    /// * Presenting the same valid payment again succeeds with [`VerificationOutcome::AlreadyVerified`]. No second
    ///   payment is recorded and the order is not transitioned again.
    ///
    /// The `on_order_paid` hook fires only for the call that moves the order to `paid`.
    pub async fn verify_payment(
        &self,
        confirmation: PaymentConfirmation,
    ) -> Result<PaymentVerified, PaymentVerificationError> {
        let PaymentConfirmation { order_id, payment_id, signature } = &confirmation;
        let matched = self.verifier.verify_payment(order_id, payment_id, signature);
        confirmation.validate()?;
        if !matched {
            warn!("🔏️ Invalid payment signature presented for payment {payment_id} on order {order_id}");
            return Err(PaymentVerificationError::SignatureMismatch);
        }
        let payment = NewPayment::new(OrderId::from(order_id.as_str()), payment_id.as_str(), signature.as_str());
        let recorded = with_store_timeout(self.timeout, self.db.record_verified_payment(payment)).await.map_err(|e| {
            warn!("💳️ Verified payment {payment_id} for order {order_id} could not be recorded. {e}");
            PaymentVerificationError::from(e)
        })?;
        match recorded.outcome {
            VerificationOutcome::Verified => info!("💳️ Payment {payment_id} verified for order {order_id}"),
            VerificationOutcome::AlreadyVerified => {
                info!("💳️ Payment {payment_id} for order {order_id} had already been verified")
            },
        }
        if recorded.order_newly_paid {
            debug!("💳️ Notifying order paid hook subscribers for order {order_id}");
            let event = OrderPaidEvent::new(recorded.order.clone(), recorded.payment.clone());
            self.producers.publish_order_paid(event).await;
        }
        Ok(PaymentVerified { order: recorded.order, payment: recorded.payment, outcome: recorded.outcome })
    }
}
