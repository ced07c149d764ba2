//! Razorpay Checkout Engine
//!
//! The checkout engine holds the core logic of a Razorpay checkout backend. It is framework-agnostic: the HTTP surface
//! lives in `checkout_server`, and the provider's REST client in `razorpay_tools`.
//!
//! The library is divided into these main sections:
//! 1. Storage ([`traits::CheckoutDatabase`] and its SQLite implementation, `SqliteDatabase`). The store enforces the
//!    idempotency guarantees of the checkout flow with unique indexes and conditional updates. The data types used in
//!    the database are defined in the [`db_types`] module and are public.
//! 2. Signatures ([`helpers`]). HMAC-SHA256 computation and constant-time verification of payment and webhook
//!    signatures.
//! 3. The public API ([`mod@checkout_api`]). Order creation, payment verification, order lookups and webhook handling.
//!
//! The engine also provides a set of events that can be subscribed to ([`events`]). For example, when a verified
//! payment marks an order as paid, an `OrderPaidEvent` is emitted.
pub mod checkout_api;
pub mod db_types;
pub mod events;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use checkout_api::{
    errors::{OrderFlowError, OrderQueryError, PaymentVerificationError, ValidationError, WebhookError},
    order_flow_api::OrderFlowApi,
    order_objects,
    order_query_api::OrderQueryApi,
    payment_api::PaymentVerificationApi,
    webhook_api::{WebhookApi, WebhookOutcome},
    webhook_objects,
    DEFAULT_STORE_TIMEOUT,
};
pub use helpers::{SignatureError, SignatureVerifier};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteDatabase, DEFAULT_DB_TIMEOUT};
