use serde::{Deserialize, Serialize};

use crate::{
    checkout_api::webhook_objects::WebhookEvent,
    db_types::{Order, Payment},
};

/// Published when a verified payment moves an order from `created` to `paid`. Replays of an already-verified
/// payment do not publish this event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    pub order: Order,
    pub payment: Payment,
}

impl OrderPaidEvent {
    pub fn new(order: Order, payment: Payment) -> Self {
        Self { order, payment }
    }
}

/// Published for every authenticated webhook event that the gateway recognises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookReceivedEvent {
    pub event: WebhookEvent,
}

impl WebhookReceivedEvent {
    pub fn new(event: WebhookEvent) -> Self {
        Self { event }
    }
}
