use chrono::Utc;
use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderId},
    traits::CheckoutDatabaseError,
};

/// Inserts a new order into the database using the given connection. This is not atomic. You can embed this call
/// inside a transaction if you need to ensure atomicity, and pass `&mut *tx` as the connection argument.
///
/// The order status is always `created`. If the provider order id is already stored,
/// [`CheckoutDatabaseError::OrderAlreadyExists`] is returned.
///
/// The insert is executed to completion before the new row is read back. A `RETURNING` row fetched with `fetch_one`
/// leaves the statement open, which holds back SQLite's commit.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, CheckoutDatabaseError> {
    let order_id = order.order_id.clone();
    sqlx::query(
        r#"
            INSERT INTO orders (
                order_id,
                amount,
                currency,
                receipt,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, 'created', $5, $5);
        "#,
    )
    .bind(order.order_id.as_str())
    .bind(order.amount)
    .bind(order.currency.as_str())
    .bind(order.receipt)
    .bind(order.created_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => {
            CheckoutDatabaseError::OrderAlreadyExists(order_id.clone())
        },
        _ => CheckoutDatabaseError::from(e),
    })?;
    let order = fetch_order_by_order_id(&order_id, conn).await?.ok_or_else(|| {
        CheckoutDatabaseError::DatabaseError(format!("Order {order_id} was inserted but could not be fetched"))
    })?;
    debug!("📝️ Order [{}] inserted with id {}", order.order_id, order.id);
    Ok(order)
}

/// Returns the order with the given provider `order_id`, if it exists.
pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE order_id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

/// Moves the order from `created` to `paid`. This is a compare-and-swap: the update only applies if the order is
/// currently `created`, so concurrent callers cannot both observe "unpaid" and both perform the transition.
///
/// Returns the updated order if this call performed the transition, and `None` if the order does not exist or was
/// already paid.
pub async fn mark_order_paid(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders SET status = 'paid', updated_at = $1
            WHERE order_id = $2 AND status = 'created'
            RETURNING *;
        "#,
    )
    .bind(Utc::now())
    .bind(order_id.as_str())
    .fetch_optional(conn)
    .await?;
    trace!("📝️ Mark order [{order_id}] as paid: {}", if order.is_some() { "updated" } else { "no change" });
    Ok(order)
}
