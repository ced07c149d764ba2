use rcg_common::{Currency, MinorUnits};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    checkout_api::errors::ValidationError,
    db_types::{Order, OrderId, Payment},
    traits::VerificationOutcome,
};

/// The provider rejects receipts longer than this.
pub const MAX_RECEIPT_LENGTH: usize = 40;

/// A purchase intent, as submitted by the checkout client. The amount is in major units (e.g. rupees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCheckoutOrder {
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub notes: Option<Map<String, Value>>,
}

impl NewCheckoutOrder {
    pub fn new<S: Into<String>>(amount: i64, currency: S) -> Self {
        Self { amount, currency: currency.into(), receipt: None, notes: None }
    }

    pub fn with_receipt<S: Into<String>>(mut self, receipt: S) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn with_notes(mut self, notes: Map<String, Value>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Checks every field and converts the amount to minor units.
    pub fn validate(&self) -> Result<(MinorUnits, Currency), ValidationError> {
        let amount = MinorUnits::try_from_major(self.amount).map_err(|e| ValidationError::new("amount", e.to_string()))?;
        let currency =
            self.currency.parse::<Currency>().map_err(|e| ValidationError::new("currency", e.to_string()))?;
        if let Some(receipt) = &self.receipt {
            if receipt.chars().count() > MAX_RECEIPT_LENGTH {
                return Err(ValidationError::new(
                    "receipt",
                    format!("must be at most {MAX_RECEIPT_LENGTH} characters"),
                ));
            }
        }
        Ok((amount, currency))
    }
}

/// The order as returned to the checkout client, which hands these values to the provider's payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_id: OrderId,
    /// Minor units
    pub amount: MinorUnits,
    pub currency: String,
}

impl From<Order> for CreatedOrder {
    fn from(order: Order) -> Self {
        Self { order_id: order.order_id, amount: order.amount, currency: order.currency }
    }
}

/// The triple that the provider's widget hands back to the client when a payment completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl PaymentConfirmation {
    pub fn new<S1: Into<String>, S2: Into<String>, S3: Into<String>>(order_id: S1, payment_id: S2, signature: S3) -> Self {
        Self { order_id: order_id.into(), payment_id: payment_id.into(), signature: signature.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_blank("orderId", &self.order_id)?;
        check_not_blank("paymentId", &self.payment_id)?;
        check_not_blank("signature", &self.signature)?;
        if self.order_id.contains('|') {
            return Err(ValidationError::new("orderId", "must not contain '|'"));
        }
        if self.payment_id.contains('|') {
            return Err(ValidationError::new("paymentId", "must not contain '|'"));
        }
        Ok(())
    }
}

fn check_not_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, "is required"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerified {
    pub order: Order,
    pub payment: Payment,
    pub outcome: VerificationOutcome,
}
