use thiserror::Error;

use crate::{
    db_types::OrderId,
    traits::{CheckoutDatabaseError, ProviderError},
};

/// A request field failed validation. The message always names the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self { field: field.into(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("The payment provider could not create the order. {0}")]
    ProviderError(#[from] ProviderError),
    #[error("The order could not be stored. {0}")]
    StoreError(#[from] CheckoutDatabaseError),
}

#[derive(Debug, Clone, Error)]
pub enum PaymentVerificationError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid payment signature")]
    SignatureMismatch,
    #[error("Order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("The payment could not be recorded. {0}")]
    StoreError(CheckoutDatabaseError),
}

impl From<CheckoutDatabaseError> for PaymentVerificationError {
    fn from(e: CheckoutDatabaseError) -> Self {
        match e {
            CheckoutDatabaseError::OrderNotFound(id) => Self::OrderNotFound(id),
            e => Self::StoreError(e),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderQueryError {
    #[error("Order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("The order could not be fetched. {0}")]
    StoreError(#[from] CheckoutDatabaseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("Invalid webhook signature")]
    InvalidSignature,
    #[error("The webhook event could not be understood. {0}")]
    MalformedEvent(String),
}
