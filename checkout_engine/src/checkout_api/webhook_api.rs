use std::fmt::Debug;

use log::*;

use crate::{
    checkout_api::{errors::WebhookError, webhook_objects::WebhookEvent},
    events::{EventProducers, WebhookReceivedEvent},
    helpers::SignatureVerifier,
};

/// The result of accepting a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOutcome {
    pub event: WebhookEvent,
}

impl WebhookOutcome {
    pub fn is_handled(&self) -> bool {
        self.event.is_handled()
    }
}

/// `WebhookApi` authenticates webhook deliveries against the webhook secret and dispatches them.
#[derive(Clone)]
pub struct WebhookApi {
    verifier: SignatureVerifier,
    producers: EventProducers,
}

impl Debug for WebhookApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WebhookApi ({:?})", self.verifier)
    }
}

impl WebhookApi {
    /// The verifier must be keyed with the webhook secret, which is distinct from the API key secret.
    pub fn new(verifier: SignatureVerifier, producers: EventProducers) -> Self {
        Self { verifier, producers }
    }

    /// Authenticates and dispatches a webhook delivery.
    ///
    /// `body` must be the raw request bytes, exactly as received. The body is only parsed once the signature has been
    /// checked. Events the gateway does not act on are acknowledged, but are not published to the
    /// `on_webhook_event` hook.
    pub async fn handle_webhook(&self, body: &[u8], signature: Option<&str>) -> Result<WebhookOutcome, WebhookError> {
        let Some(signature) = signature else {
            warn!("🪝️ Webhook received without a signature");
            return Err(WebhookError::InvalidSignature);
        };
        if !self.verifier.verify(body, signature) {
            warn!("🪝️ Invalid webhook signature");
            return Err(WebhookError::InvalidSignature);
        }
        let event = WebhookEvent::parse(body).map_err(|e| {
            warn!("🪝️ Authenticated webhook could not be parsed. {e}");
            e
        })?;
        info!("🪝️ Webhook event received: {}", event.name());
        self.dispatch(&event).await;
        Ok(WebhookOutcome { event })
    }

    async fn dispatch(&self, event: &WebhookEvent) {
        match event {
            WebhookEvent::PaymentAuthorized(p) => info!("🪝️ Payment authorized: {}", p.id),
            WebhookEvent::PaymentCaptured(p) => info!("🪝️ Payment captured: {}", p.id),
            WebhookEvent::PaymentFailed(p) => {
                let reason = p.error_description.as_deref().unwrap_or("no reason given");
                info!("🪝️ Payment failed: {}. {reason}", p.id)
            },
            WebhookEvent::RefundProcessed(r) => info!("🪝️ Refund processed: {}", r.id),
            WebhookEvent::Unhandled(name) => {
                info!("🪝️ Unhandled event type: {name}");
                return;
            },
        }
        self.producers.publish_webhook_event(WebhookReceivedEvent::new(event.clone())).await;
    }
}
