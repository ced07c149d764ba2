use std::{fmt::Debug, time::Duration};

use crate::{
    checkout_api::{errors::OrderQueryError, with_store_timeout, DEFAULT_STORE_TIMEOUT},
    db_types::{OrderId, OrderWithPayments},
    traits::CheckoutDatabase,
};

/// Read-only access to orders and their verified payments.
pub struct OrderQueryApi<B> {
    db: B,
    timeout: Duration,
}

impl<B> Debug for OrderQueryApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderQueryApi")
    }
}

impl<B> OrderQueryApi<B> {
    pub fn new(db: B) -> Self {
        Self { db, timeout: DEFAULT_STORE_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<B> OrderQueryApi<B>
where B: CheckoutDatabase
{
    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<OrderWithPayments, OrderQueryError> {
        let order = with_store_timeout(self.timeout, self.db.fetch_order_by_order_id(order_id))
            .await?
            .ok_or_else(|| OrderQueryError::OrderNotFound(order_id.clone()))?;
        let payments = with_store_timeout(self.timeout, self.db.fetch_payments_for_order(order_id)).await?;
        Ok(OrderWithPayments { order, payments })
    }
}
