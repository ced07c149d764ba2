//! The provider's client-side payment widget, as seen by the checkout flow.
//!
//! In a browser the widget is a script that the provider serves. Here it is an injected [`PaymentWidget`], which has
//! to be loaded explicitly before it can collect a payment.
use chrono::Utc;
use checkout_engine::{
    db_types::OrderId,
    helpers::{compute_signature, payment_signature_message},
};
use log::*;
use rcg_common::{MinorUnits, Secret};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("The payment widget could not be loaded. {0}")]
    LoadFailed(String),
}

/// The options the widget is opened with. Field names follow the provider's checkout options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// The public key id. Never the key secret.
    pub key: String,
    pub amount: MinorUnits,
    pub currency: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub order_id: OrderId,
    pub prefill: Prefill,
    pub notes: Map<String, Value>,
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self { color: "#3395ff".into() }
    }
}

/// What the widget hands back to the client when a payment completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentResult {
    Completed(PaymentResponse),
    /// The provider reported a failed payment, with its description
    Failed(String),
    /// The customer closed the widget
    Dismissed,
}

#[allow(async_fn_in_trait)]
pub trait PaymentWidget {
    /// Makes the widget ready for use. Must succeed before [`PaymentWidget::collect_payment`] is called.
    async fn load(&mut self) -> Result<(), WidgetError>;

    /// Opens the widget for the given order and waits for the customer to finish.
    async fn collect_payment(&mut self, options: &CheckoutOptions) -> PaymentResult;
}

/// How a [`SimulatedWidget`] should behave when it is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedPayment {
    Succeed,
    Fail(String),
    Dismiss,
}

/// A stand-in for the provider's widget, for exercising a backend that is running with test credentials. It signs
/// payments with the key secret, exactly as the provider does.
pub struct SimulatedWidget {
    key_secret: Secret<String>,
    behaviour: SimulatedPayment,
    loaded: bool,
}

impl SimulatedWidget {
    pub fn new(key_secret: Secret<String>, behaviour: SimulatedPayment) -> Self {
        Self { key_secret, behaviour, loaded: false }
    }
}

impl PaymentWidget for SimulatedWidget {
    async fn load(&mut self) -> Result<(), WidgetError> {
        if self.key_secret.is_empty() {
            return Err(WidgetError::LoadFailed("no key secret was provided".into()));
        }
        self.loaded = true;
        Ok(())
    }

    async fn collect_payment(&mut self, options: &CheckoutOptions) -> PaymentResult {
        if !self.loaded {
            return PaymentResult::Failed("The payment widget has not been loaded".into());
        }
        info!("Simulating payment of {} {} for order {}", options.amount, options.currency, options.order_id);
        match &self.behaviour {
            SimulatedPayment::Succeed => {
                let payment_id = format!("pay_sim{}", Utc::now().timestamp_millis());
                let message = payment_signature_message(options.order_id.as_str(), &payment_id);
                match compute_signature(message, self.key_secret.reveal()) {
                    Ok(signature) => PaymentResult::Completed(PaymentResponse {
                        razorpay_order_id: options.order_id.to_string(),
                        razorpay_payment_id: payment_id,
                        razorpay_signature: signature,
                    }),
                    Err(e) => PaymentResult::Failed(e.to_string()),
                }
            },
            SimulatedPayment::Fail(reason) => PaymentResult::Failed(reason.clone()),
            SimulatedPayment::Dismiss => PaymentResult::Dismissed,
        }
    }
}
