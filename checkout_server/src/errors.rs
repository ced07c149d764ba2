use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use checkout_engine::{OrderFlowError, OrderQueryError, PaymentVerificationError, WebhookError};
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Invalid payment signature")]
    InvalidPaymentSignature,
    #[error("Invalid webhook signature")]
    InvalidWebhookSignature,
    #[error("Invalid webhook event. {0}")]
    MalformedWebhook(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Failed to create order")]
    OrderCreationFailed,
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPaymentSignature => StatusCode::BAD_REQUEST,
            Self::InvalidWebhookSignature => StatusCode::BAD_REQUEST,
            Self::MalformedWebhook(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::OrderCreationFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "success": false, "error": self.to_string() }).to_string())
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::Validation(e) => Self::ValidationError(e.to_string()),
            // Details have been logged by the engine. Callers only learn that order creation failed.
            OrderFlowError::ProviderError(_) | OrderFlowError::StoreError(_) => Self::OrderCreationFailed,
        }
    }
}

impl From<PaymentVerificationError> for ServerError {
    fn from(e: PaymentVerificationError) -> Self {
        match e {
            PaymentVerificationError::Validation(e) => Self::ValidationError(e.to_string()),
            PaymentVerificationError::SignatureMismatch => Self::InvalidPaymentSignature,
            PaymentVerificationError::OrderNotFound(id) => Self::NoRecordFound(format!("Order {id} does not exist")),
            PaymentVerificationError::StoreError(e) => {
                error!("💻️ Payment verification failed in the store. {e}");
                Self::BackendError("The payment could not be recorded".into())
            },
        }
    }
}

impl From<OrderQueryError> for ServerError {
    fn from(e: OrderQueryError) -> Self {
        match e {
            OrderQueryError::OrderNotFound(id) => Self::NoRecordFound(format!("Order {id} does not exist")),
            OrderQueryError::StoreError(e) => {
                error!("💻️ Order lookup failed in the store. {e}");
                Self::BackendError("The order could not be fetched".into())
            },
        }
    }
}

impl From<WebhookError> for ServerError {
    fn from(e: WebhookError) -> Self {
        match e {
            WebhookError::InvalidSignature => Self::InvalidWebhookSignature,
            WebhookError::MalformedEvent(s) => Self::MalformedWebhook(s),
        }
    }
}

#[cfg(test)]
mod test {
    use actix_web::body::MessageBody;
    use checkout_engine::{traits::CheckoutDatabaseError, ValidationError};

    use super::*;

    fn body_of(err: ServerError) -> String {
        let res = err.error_response();
        String::from_utf8(res.into_body().try_into_bytes().unwrap().to_vec()).unwrap()
    }

    #[test]
    fn engine_errors_map_to_status_codes() {
        let err = ServerError::from(OrderFlowError::Validation(ValidationError::new("amount", "must be positive")));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err = ServerError::from(OrderFlowError::StoreError(CheckoutDatabaseError::Timeout(5000)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = ServerError::from(PaymentVerificationError::OrderNotFound("order_x".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        let err = ServerError::from(PaymentVerificationError::SignatureMismatch);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err = ServerError::from(WebhookError::MalformedEvent("bad".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_bodies_are_json() {
        let body: serde_json::Value = serde_json::from_str(&body_of(ServerError::OrderCreationFailed)).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "error": "Failed to create order"}));
        let body: serde_json::Value = serde_json::from_str(&body_of(ServerError::InvalidPaymentSignature)).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "error": "Invalid payment signature"}));
    }
}
