use std::{fmt::Debug, time::Duration};

use log::*;
use rcg_common::Currency;

use crate::{
    checkout_api::{
        errors::OrderFlowError,
        order_objects::{CreatedOrder, NewCheckoutOrder},
        with_store_timeout,
        DEFAULT_STORE_TIMEOUT,
    },
    db_types::NewOrder,
    traits::{CheckoutDatabase, PaymentProvider, ProviderError, ProviderOrderRequest},
};

/// `OrderFlowApi` turns a purchase intent into a provider order, and records it in the store with `created` status.
pub struct OrderFlowApi<B, P> {
    db: B,
    provider: P,
    timeout: Duration,
}

impl<B, P> Debug for OrderFlowApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, P> OrderFlowApi<B, P> {
    pub fn new(db: B, provider: P) -> Self {
        Self { db, provider, timeout: DEFAULT_STORE_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, P> OrderFlowApi<B, P>
where
    B: CheckoutDatabase,
    P: PaymentProvider,
{
    /// Creates an order with the payment provider and records it.
    ///
    /// The request is validated first; the amount is given in major units and converted to minor units before it is
    /// sent to the provider. The stored order uses the provider's id, amount and currency.
    ///
    /// If the provider call fails, nothing is written. If the provider returns an order id that is already stored, the
    /// existing record is left untouched and a store error is returned.
    pub async fn create_order(&self, order: NewCheckoutOrder) -> Result<CreatedOrder, OrderFlowError> {
        let (amount, currency) = order.validate()?;
        let request = ProviderOrderRequest {
            amount,
            currency: currency.clone(),
            receipt: order.receipt.clone(),
            notes: order.notes.clone(),
        };
        trace!("💳️ Requesting a new {currency} order for {amount} from the payment provider");
        let provider_order = self.provider.create_order(request).await.map_err(|e| {
            error!("💳️ The payment provider could not create a {currency} order for {amount}. {e}");
            e
        })?;
        let stored_currency = provider_order.currency.parse::<Currency>().map_err(|e| {
            error!("💳️ The payment provider returned order {} with an unusable currency. {e}", provider_order.id);
            ProviderError::InvalidResponse(format!("unexpected currency. {e}"))
        })?;
        let mut new_order = NewOrder::new(provider_order.id, provider_order.amount, stored_currency);
        if let Some(receipt) = provider_order.receipt.or(order.receipt) {
            new_order = new_order.with_receipt(receipt);
        }
        let order = with_store_timeout(self.timeout, self.db.insert_order(new_order)).await.map_err(|e| {
            error!("💳️ Order could not be stored after the provider accepted it. {e}");
            e
        })?;
        info!("💳️ Order {} created for {} {}", order.order_id, order.amount, order.currency);
        Ok(CreatedOrder::from(order))
    }
}
