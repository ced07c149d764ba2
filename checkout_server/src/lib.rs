//! # Razorpay checkout gateway server
//! This crate hosts the HTTP surface of the checkout gateway. It is responsible for:
//! * Creating orders with Razorpay on behalf of the storefront.
//! * Verifying the payment signatures that the Razorpay checkout widget hands back to the client.
//! * Receiving and authenticating Razorpay webhooks.
//!
//! The business logic lives in `checkout_engine`. This crate only translates between HTTP and the engine's APIs.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/create-order`, `/api/verify-payment`, `/api/orders/{order_id}` and `/api/webhook`. See [routes].
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
