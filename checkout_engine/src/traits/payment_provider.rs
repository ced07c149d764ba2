use rcg_common::{Currency, MinorUnits};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::db_types::OrderId;

/// An order creation request, as sent to the payment provider. Amounts are always in minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderOrderRequest {
    pub amount: MinorUnits,
    pub currency: Currency,
    pub receipt: Option<String>,
    pub notes: Option<Map<String, Value>>,
}

/// The provider's view of an order that it has accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOrder {
    pub id: OrderId,
    pub amount: MinorUnits,
    pub currency: String,
    pub receipt: Option<String>,
    /// The provider's order status, e.g. `created`
    pub status: String,
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Could not reach the payment provider. {0}")]
    Network(String),
    #[error("The payment provider did not respond in time")]
    Timeout,
    #[error("The payment provider rejected the request. Status {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("The payment provider sent an unexpected response. {0}")]
    InvalidResponse(String),
}

/// The Provider Client: the part of the payment provider's API that the checkout engine needs.
#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    /// Registers a new order with the provider and returns the provider's order record.
    async fn create_order(&self, request: ProviderOrderRequest) -> Result<ProviderOrder, ProviderError>;
}
