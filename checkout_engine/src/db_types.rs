//! Data types that are stored in, and fetched from, the checkout database.
use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use rcg_common::{Currency, MinorUnits};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(String);

//--------------------------------------        OrderId        ---------------------------------------------------------
/// The order id assigned by the payment provider, e.g. `order_EKwxwAgItmmXdp`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been registered with the provider and is awaiting payment.
    Created,
    /// A payment for the order has been received and its signature verified.
    Paid,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Created => write!(f, "created"),
            OrderStatusType::Paid => write!(f, "paid"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "paid" => Ok(Self::Paid),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        Order       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub amount: MinorUnits,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------        NewOrder       ---------------------------------------------------------
/// An order that the provider has accepted, and which is about to be recorded.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// The order id as assigned by the provider
    pub order_id: OrderId,
    /// The amount, in minor units, as confirmed by the provider
    pub amount: MinorUnits,
    pub currency: Currency,
    pub receipt: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new(order_id: OrderId, amount: MinorUnits, currency: Currency) -> Self {
        Self { order_id, amount, currency, receipt: None, created_at: Utc::now() }
    }

    pub fn with_receipt<S: Into<String>>(mut self, receipt: S) -> Self {
        self.receipt = Some(receipt.into());
        self
    }
}

//-----------------------------------------   PaymentStatusType   -----------------------------------------------------
/// Only verified payments are ever stored, but the status is kept explicit so that the table can grow new states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatusType {
    Verified,
}

impl Display for PaymentStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatusType::Verified => write!(f, "verified"),
        }
    }
}

//--------------------------------------        Payment       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    /// The provider order id this payment was made against
    pub order_id: OrderId,
    /// The payment id as assigned by the provider, e.g. `pay_29QQoUBi66xm2f`
    pub payment_id: String,
    /// The signature that the client presented, and that was successfully verified
    pub signature: String,
    pub status: PaymentStatusType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub payment_id: String,
    pub signature: String,
}

impl NewPayment {
    pub fn new<S1: Into<String>, S2: Into<String>>(order_id: OrderId, payment_id: S1, signature: S2) -> Self {
        Self { order_id, payment_id: payment_id.into(), signature: signature.into() }
    }
}

//--------------------------------------   OrderWithPayments   ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithPayments {
    pub order: Order,
    pub payments: Vec<Payment>,
}
