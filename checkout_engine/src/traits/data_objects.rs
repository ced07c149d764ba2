use serde::{Deserialize, Serialize};

use crate::db_types::{Order, Payment};

/// Whether a verified payment caused a state change, or was a replay of a payment that had already been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The payment was recorded for the first time.
    Verified,
    /// The `(order_id, payment_id)` pair was already recorded. Nothing was written.
    AlreadyVerified,
}

/// The result of [`crate::traits::CheckoutDatabase::record_verified_payment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPayment {
    /// The order, after the status update
    pub order: Order,
    /// The stored payment record. For replays this is the original record.
    pub payment: Payment,
    pub outcome: VerificationOutcome,
    /// True iff this call moved the order from `created` to `paid`.
    pub order_newly_paid: bool,
}

impl RecordedPayment {
    pub fn is_replay(&self) -> bool {
        self.outcome == VerificationOutcome::AlreadyVerified
    }
}
