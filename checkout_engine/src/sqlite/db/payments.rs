use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewPayment, OrderId, Payment};

/// Inserts a verified payment, unless a payment with the same `(order_id, payment_id)` already exists.
///
/// Returns the new record, or `None` if the pair was already stored. Uniqueness is enforced by the
/// `payments_order_payment_uidx` index, so this is safe under concurrent calls.
pub async fn insert_if_absent(
    payment: NewPayment,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let result: Option<Payment> = sqlx::query_as(
        r#"
            INSERT INTO payments (order_id, payment_id, signature, status, created_at)
            VALUES ($1, $2, $3, 'verified', $4)
            ON CONFLICT (order_id, payment_id) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(payment.order_id.as_str())
    .bind(&payment.payment_id)
    .bind(&payment.signature)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;
    match &result {
        Some(p) => debug!("📝️ Payment [{}] for order [{}] inserted with id {}", p.payment_id, p.order_id, p.id),
        None => debug!("📝️ Payment [{}] for order [{}] already exists", payment.payment_id, payment.order_id),
    }
    Ok(result)
}

pub async fn fetch_payment(
    order_id: &OrderId,
    payment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE order_id = $1 AND payment_id = $2")
        .bind(order_id.as_str())
        .bind(payment_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

pub async fn fetch_payments_for_order(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<Payment>, sqlx::Error> {
    let payments = sqlx::query_as("SELECT * FROM payments WHERE order_id = $1 ORDER BY id ASC")
        .bind(order_id.as_str())
        .fetch_all(conn)
        .await?;
    Ok(payments)
}
