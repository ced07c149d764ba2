//! The client side of a checkout: create an order, hand it to the payment widget, and have the backend verify the
//! result.
use std::fmt::Display;

use anyhow::Result;
use checkout_engine::{db_types::OrderId, order_objects::CreatedOrder};
use checkout_server::data_objects::{CreateOrderRequest, JsonResponse, VerifyPaymentRequest};
use log::*;
use serde_json::{Map, Value};

use crate::widget::{CheckoutOptions, PaymentResponse, PaymentResult, PaymentWidget, Prefill, Theme};

/// The two backend calls that a checkout needs.
#[allow(async_fn_in_trait)]
pub trait CheckoutBackend {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<CreatedOrder>;
    async fn verify_payment(&self, request: VerifyPaymentRequest) -> Result<JsonResponse>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Paid { order_id: OrderId, payment_id: String },
    Failed { reason: String },
    Cancelled,
}

impl Display for CheckoutOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid { order_id, payment_id } => {
                write!(f, "Payment Successful! ✅ Transaction ID: {payment_id}. Order ID: {order_id}")
            },
            Self::Failed { reason } => write!(f, "Payment Failed ❌ Payment failed: {reason}"),
            Self::Cancelled => write!(f, "Payment cancelled"),
        }
    }
}

/// Merchant details shown in the payment widget.
#[derive(Debug, Clone, Default)]
pub struct MerchantDetails {
    /// The provider's public key id
    pub key_id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub prefill: Prefill,
    pub notes: Map<String, Value>,
    pub theme: Theme,
}

impl MerchantDetails {
    pub fn options_for(&self, order: &CreatedOrder) -> CheckoutOptions {
        CheckoutOptions {
            key: self.key_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            order_id: order.order_id.clone(),
            prefill: self.prefill.clone(),
            notes: self.notes.clone(),
            theme: self.theme.clone(),
        }
    }
}

pub struct CheckoutFlow<B, W> {
    backend: B,
    widget: W,
    merchant: MerchantDetails,
}

impl<B, W> CheckoutFlow<B, W>
where
    B: CheckoutBackend,
    W: PaymentWidget,
{
    pub fn new(backend: B, widget: W, merchant: MerchantDetails) -> Self {
        Self { backend, widget, merchant }
    }

    /// Runs a checkout to completion. Every failure along the way ends in [`CheckoutOutcome::Failed`]. Only the
    /// customer closing the widget ends in [`CheckoutOutcome::Cancelled`].
    pub async fn pay(&mut self, request: CreateOrderRequest) -> CheckoutOutcome {
        let order = match self.backend.create_order(request).await {
            Ok(order) => order,
            Err(e) => return failed(e),
        };
        info!("Order {} created for {} {}", order.order_id, order.amount, order.currency);
        if let Err(e) = self.widget.load().await {
            return failed(e);
        }
        let options = self.merchant.options_for(&order);
        match self.widget.collect_payment(&options).await {
            PaymentResult::Completed(response) => self.verify(response).await,
            PaymentResult::Failed(description) => failed(description),
            PaymentResult::Dismissed => {
                info!("Payment modal closed");
                CheckoutOutcome::Cancelled
            },
        }
    }

    async fn verify(&self, response: PaymentResponse) -> CheckoutOutcome {
        let request = VerifyPaymentRequest {
            order_id: response.razorpay_order_id.clone(),
            payment_id: response.razorpay_payment_id.clone(),
            signature: response.razorpay_signature,
        };
        match self.backend.verify_payment(request).await {
            Ok(res) if res.success => CheckoutOutcome::Paid {
                order_id: OrderId::from(response.razorpay_order_id),
                payment_id: response.razorpay_payment_id,
            },
            Ok(_) => failed("Payment verification failed"),
            Err(e) => failed(format!("Error verifying payment: {e}")),
        }
    }
}

fn failed<S: Display>(reason: S) -> CheckoutOutcome {
    let reason = reason.to_string();
    warn!("Checkout failed. {reason}");
    CheckoutOutcome::Failed { reason }
}
