//! # Backend contracts
//!
//! This module defines the interfaces that the checkout engine depends on, but does not implement itself.
//!
//! * [`CheckoutDatabase`] is the Order Store. It persists orders and verified payments, and is responsible for
//!   enforcing idempotency of the payment verification flow. [`crate::SqliteDatabase`] is the provided backend.
//! * [`PaymentProvider`] is the client for the payment provider's order-creation API. The server wires in a Razorpay
//!   REST client; tests use mocks.
mod checkout_database;
mod data_objects;
mod payment_provider;

pub use checkout_database::{CheckoutDatabase, CheckoutDatabaseError};
pub use data_objects::{RecordedPayment, VerificationOutcome};
pub use payment_provider::{PaymentProvider, ProviderError, ProviderOrder, ProviderOrderRequest};
