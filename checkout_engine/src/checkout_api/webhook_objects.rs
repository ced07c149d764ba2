use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checkout_api::errors::WebhookError;

/// The `payload.payment.entity` object of a payment webhook. Only the fields the gateway reads are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntity {
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// The `payload.refund.entity` object of a refund webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundEntity {
    pub id: String,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// An authenticated webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum WebhookEvent {
    PaymentAuthorized(PaymentEntity),
    PaymentCaptured(PaymentEntity),
    PaymentFailed(PaymentEntity),
    RefundProcessed(RefundEntity),
    /// Any event the gateway does not act on. Holds the event name.
    Unhandled(String),
}

#[derive(Deserialize)]
struct RawWebhook {
    event: String,
    #[serde(default)]
    payload: Value,
}

impl WebhookEvent {
    /// Parses a webhook body. Call this only once the body's signature has been checked.
    pub fn parse(body: &[u8]) -> Result<Self, WebhookError> {
        let raw: RawWebhook = serde_json::from_slice(body).map_err(|e| WebhookError::MalformedEvent(e.to_string()))?;
        let event = match raw.event.as_str() {
            "payment.authorized" => Self::PaymentAuthorized(entity(&raw.payload, "payment")?),
            "payment.captured" => Self::PaymentCaptured(entity(&raw.payload, "payment")?),
            "payment.failed" => Self::PaymentFailed(entity(&raw.payload, "payment")?),
            "refund.processed" => Self::RefundProcessed(entity(&raw.payload, "refund")?),
            _ => Self::Unhandled(raw.event),
        };
        Ok(event)
    }

    /// The provider's name for this event, e.g. `payment.captured`.
    pub fn name(&self) -> &str {
        match self {
            Self::PaymentAuthorized(_) => "payment.authorized",
            Self::PaymentCaptured(_) => "payment.captured",
            Self::PaymentFailed(_) => "payment.failed",
            Self::RefundProcessed(_) => "refund.processed",
            Self::Unhandled(name) => name.as_str(),
        }
    }

    /// The id of the payment or refund that the event concerns.
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Self::PaymentAuthorized(p) | Self::PaymentCaptured(p) | Self::PaymentFailed(p) => Some(p.id.as_str()),
            Self::RefundProcessed(r) => Some(r.id.as_str()),
            Self::Unhandled(_) => None,
        }
    }

    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Unhandled(_))
    }
}

fn entity<T: serde::de::DeserializeOwned>(payload: &Value, kind: &str) -> Result<T, WebhookError> {
    let value = payload
        .get(kind)
        .and_then(|v| v.get("entity"))
        .ok_or_else(|| WebhookError::MalformedEvent(format!("payload.{kind}.entity is missing")))?;
    T::deserialize(value).map_err(|e| WebhookError::MalformedEvent(format!("payload.{kind}.entity is invalid. {e}")))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_payment_captured() {
        let body = br#"{"entity":"event","event":"payment.captured","payload":{"payment":{"entity":{"id":"pay_123","order_id":"order_abc","amount":49900,"currency":"INR","status":"captured"}}}}"#;
        let event = WebhookEvent::parse(body).unwrap();
        assert_eq!(event.name(), "payment.captured");
        assert_eq!(event.entity_id(), Some("pay_123"));
        match event {
            WebhookEvent::PaymentCaptured(p) => {
                assert_eq!(p.order_id.as_deref(), Some("order_abc"));
                assert_eq!(p.amount, Some(49_900));
            },
            _ => panic!("Expected PaymentCaptured"),
        }
    }

    #[test]
    fn parse_refund_processed() {
        let body = br#"{"event":"refund.processed","payload":{"refund":{"entity":{"id":"rfnd_1","payment_id":"pay_123","amount":100}}}}"#;
        let event = WebhookEvent::parse(body).unwrap();
        assert_eq!(event, WebhookEvent::RefundProcessed(RefundEntity {
            id: "rfnd_1".into(),
            payment_id: Some("pay_123".into()),
            amount: Some(100),
            status: None,
        }));
    }

    #[test]
    fn unknown_events_are_unhandled() {
        let event = WebhookEvent::parse(br#"{"event":"subscription.renewed","payload":{}}"#).unwrap();
        assert_eq!(event, WebhookEvent::Unhandled("subscription.renewed".into()));
        assert!(!event.is_handled());
        assert_eq!(event.name(), "subscription.renewed");
        assert_eq!(event.entity_id(), None);
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        assert!(matches!(WebhookEvent::parse(b"not json"), Err(WebhookError::MalformedEvent(_))));
        assert!(matches!(WebhookEvent::parse(br#"{"payload":{}}"#), Err(WebhookError::MalformedEvent(_))));
        let err = WebhookEvent::parse(br#"{"event":"payment.failed","payload":{}}"#).unwrap_err();
        assert_eq!(err, WebhookError::MalformedEvent("payload.payment.entity is missing".into()));
        let err = WebhookEvent::parse(br#"{"event":"refund.processed","payload":{"refund":{"entity":{"amount":1}}}}"#);
        assert!(matches!(err, Err(WebhookError::MalformedEvent(_))));
    }
}
