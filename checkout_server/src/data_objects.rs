use std::fmt::Display;

use checkout_engine::order_objects::{NewCheckoutOrder, PaymentConfirmation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The body of `POST /api/create-order`. The amount is in major units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub notes: Option<Map<String, Value>>,
}

impl From<CreateOrderRequest> for NewCheckoutOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self { amount: req.amount, currency: req.currency, receipt: req.receipt, notes: req.notes }
    }
}

/// The body of `POST /api/verify-payment`, as forwarded by the client from the provider's widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl From<VerifyPaymentRequest> for PaymentConfirmation {
    fn from(req: VerifyPaymentRequest) -> Self {
        PaymentConfirmation::new(req.order_id, req.payment_id, req.signature)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
