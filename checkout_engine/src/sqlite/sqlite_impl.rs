//! `SqliteDatabase` is a concrete implementation of a checkout engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
use std::{fmt::Debug, time::Duration};

use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::db::{db_url, new_pool, orders, payments};
use crate::{
    db_types::{NewOrder, NewPayment, Order, OrderId, Payment},
    traits::{CheckoutDatabase, CheckoutDatabaseError, RecordedPayment, VerificationOutcome},
};

/// The default bound on how long any single store call may wait for a connection or a lock.
pub const DEFAULT_DB_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl CheckoutDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, CheckoutDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order {} has been saved in the DB with id {}", order.order_id, order.id);
        Ok(order)
    }

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, CheckoutDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_order_id(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_payments_for_order(&self, order_id: &OrderId) -> Result<Vec<Payment>, CheckoutDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let payments = payments::fetch_payments_for_order(order_id, &mut conn).await?;
        Ok(payments)
    }

    /// The status update is issued first, so that the transaction takes SQLite's write lock immediately. Concurrent
    /// verifications of the same order are then serialised by the lock (bounded by the busy timeout), and the
    /// conditional update and unique index decide which one performs each write.
    async fn record_verified_payment(&self, payment: NewPayment) -> Result<RecordedPayment, CheckoutDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let order_id = payment.order_id.clone();
        let payment_id = payment.payment_id.clone();
        let (order, order_newly_paid) = match orders::mark_order_paid(&order_id, &mut tx).await? {
            Some(order) => (order, true),
            None => {
                let order = orders::fetch_order_by_order_id(&order_id, &mut tx)
                    .await?
                    .ok_or_else(|| CheckoutDatabaseError::OrderNotFound(order_id.clone()))?;
                (order, false)
            },
        };
        let (payment, outcome) = match payments::insert_if_absent(payment, &mut tx).await? {
            Some(p) => (p, VerificationOutcome::Verified),
            None => {
                let existing = payments::fetch_payment(&order_id, &payment_id, &mut tx).await?.ok_or_else(|| {
                    CheckoutDatabaseError::DatabaseError(format!(
                        "Payment {payment_id} for {order_id} was reported as a duplicate but could not be fetched"
                    ))
                })?;
                (existing, VerificationOutcome::AlreadyVerified)
            },
        };
        tx.commit().await?;
        debug!(
            "🗃️ Payment {payment_id} recorded for order {order_id}. Outcome: {outcome:?}. Order newly paid: \
             {order_newly_paid}"
        );
        Ok(RecordedPayment { order, payment, outcome, order_newly_paid })
    }

    async fn close(&mut self) -> Result<(), CheckoutDatabaseError> {
        self.pool.close().await;
        Ok(())
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using the URL in `RCG_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        Self::new_with_timeout(url, max_connections, DEFAULT_DB_TIMEOUT).await
    }

    pub async fn new_with_timeout(url: &str, max_connections: u32, timeout: Duration) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections, timeout).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date. This is idempotent and is called when the server starts.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
