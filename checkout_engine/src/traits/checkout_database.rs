use thiserror::Error;

use crate::{
    db_types::{NewOrder, NewPayment, Order, OrderId, Payment},
    traits::data_objects::RecordedPayment,
};

/// The Order Store.
///
/// Backends persist orders as they are created with the provider, and verified payments as they are presented by
/// clients. The store is the single source of truth for order status, and MUST enforce the following at the storage
/// level (unique constraints, conditional updates and transactions), not merely in application logic:
/// * An `order_id` is recorded at most once.
/// * A payment is recorded at most once per `(order_id, payment_id)` pair.
/// * An order moves from `created` to `paid` at most once.
#[allow(async_fn_in_trait)]
pub trait CheckoutDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Records a newly created order with `created` status.
    ///
    /// Returns [`CheckoutDatabaseError::OrderAlreadyExists`] if an order with the same provider id is already stored.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, CheckoutDatabaseError>;

    /// Fetches the order with the given provider order id.
    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, CheckoutDatabaseError>;

    /// Fetches all verified payments recorded against the given order, oldest first.
    async fn fetch_payments_for_order(&self, order_id: &OrderId) -> Result<Vec<Payment>, CheckoutDatabaseError>;

    /// Records a payment whose signature has already been verified, and marks its order as paid. In a single atomic
    /// transaction:
    /// * The order status is changed from `created` to `paid`. If the order is already paid, it is left unchanged.
    /// * The payment is inserted, unless the same `(order_id, payment_id)` pair is already stored.
    ///
    /// If there is no order with the payment's `order_id`, nothing is written and
    /// [`CheckoutDatabaseError::OrderNotFound`] is returned.
    async fn record_verified_payment(&self, payment: NewPayment) -> Result<RecordedPayment, CheckoutDatabaseError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), CheckoutDatabaseError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CheckoutDatabaseError {
    #[error("We have an internal database engine (configuration/uptime etc.) error: {0}")]
    DatabaseError(String),
    #[error("Cannot insert order, since it already exists with id {0}")]
    OrderAlreadyExists(OrderId),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("The database did not respond within {0} ms")]
    Timeout(u64),
}

impl From<sqlx::Error> for CheckoutDatabaseError {
    fn from(e: sqlx::Error) -> Self {
        CheckoutDatabaseError::DatabaseError(e.to_string())
    }
}
