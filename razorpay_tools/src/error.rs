use thiserror::Error;

#[derive(Debug, Error)]
pub enum RazorpayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The Razorpay API did not respond in time")]
    Timeout,
    #[error("Could not reach the Razorpay API: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

impl From<reqwest::Error> for RazorpayApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RazorpayApiError::Timeout
        } else if e.is_decode() {
            RazorpayApiError::JsonError(e.to_string())
        } else {
            RazorpayApiError::RestRequestError(e.to_string())
        }
    }
}
