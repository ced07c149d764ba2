use std::time::Duration;

use rcg_common::Secret;

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";
pub const DEFAULT_RAZORPAY_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// The public key id, e.g. `rzp_test_1DP5mmOlF5G5ag`. The browser widget is given the same id.
    pub key_id: String,
    /// The API key secret. It authenticates API calls and also keys checkout payment signatures.
    pub key_secret: Secret<String>,
    /// The base URL of the REST API, without a trailing slash
    pub api_url: String,
    /// Upper bound on any single API call
    pub timeout: Duration,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self {
            key_id: String::default(),
            key_secret: Secret::default(),
            api_url: DEFAULT_RAZORPAY_API_URL.to_string(),
            timeout: DEFAULT_RAZORPAY_TIMEOUT,
        }
    }
}
