//! A thin client for the parts of the Razorpay REST API that the checkout gateway uses.
mod api;
mod config;
mod data_objects;
mod error;

pub use api::RazorpayApi;
pub use config::{RazorpayConfig, DEFAULT_RAZORPAY_API_URL, DEFAULT_RAZORPAY_TIMEOUT};
pub use data_objects::{NewRazorpayOrder, RazorpayErrorResponse, RazorpayOrder};
pub use error::RazorpayApiError;
