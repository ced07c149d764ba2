use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The body of `POST /orders`. Amounts are in minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRazorpayOrder {
    pub amount: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Map<String, Value>>,
}

impl NewRazorpayOrder {
    pub fn new<S: Into<String>>(amount: i64, currency: S) -> Self {
        Self { amount, currency: currency.into(), receipt: None, notes: None }
    }
}

/// An order, as returned by the Razorpay Orders API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    #[serde(default)]
    pub entity: String,
    pub amount: i64,
    #[serde(default)]
    pub amount_paid: i64,
    #[serde(default)]
    pub amount_due: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
    #[serde(default)]
    pub attempts: i64,
    /// Razorpay sends an empty array rather than an empty object when there are no notes.
    #[serde(default)]
    pub notes: Value,
    /// Unix timestamp
    #[serde(default)]
    pub created_at: i64,
}

impl RazorpayOrder {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

/// The error envelope of a failed API call, e.g. `{"error":{"code":"BAD_REQUEST_ERROR","description":"..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorpayErrorResponse {
    pub error: RazorpayErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorpayErrorDetail {
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub field: Option<String>,
}

impl RazorpayErrorResponse {
    /// Extracts a readable message from an error body, falling back to the raw text.
    pub fn message_from_body(body: &str) -> String {
        match serde_json::from_str::<RazorpayErrorResponse>(body) {
            Ok(e) => format!("{}: {}", e.error.code, e.error.description),
            Err(_) => body.to_string(),
        }
    }
}
