use actix_web::{http::StatusCode, web, web::ServiceConfig};
use checkout_engine::{
    db_types::OrderStatusType,
    events::EventProducers,
    traits::{CheckoutDatabaseError, RecordedPayment, VerificationOutcome},
    PaymentVerificationApi,
    SignatureVerifier,
};
use rcg_common::Secret;
use serde_json::{json, Value};

use super::{
    helpers::{order, payment, payment_signature, post_request, KEY_SECRET},
    mocks::MockCheckoutDb,
};
use crate::{config::ProxyConfig, routes::VerifyPaymentRoute};

fn configure(db: MockCheckoutDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let verifier = SignatureVerifier::new(&Secret::from(KEY_SECRET)).unwrap();
        let api = PaymentVerificationApi::new(db, verifier, EventProducers::default());
        cfg.app_data(web::Data::new(api))
            .app_data(web::Data::new(ProxyConfig::default()))
            .service(VerifyPaymentRoute::<MockCheckoutDb>::new());
    }
}

fn request_body(order_id: &str, payment_id: &str, signature: &str) -> String {
    json!({"orderId": order_id, "paymentId": payment_id, "signature": signature}).to_string()
}

fn recorded(outcome: VerificationOutcome, order_newly_paid: bool) -> RecordedPayment {
    RecordedPayment {
        order: order("order_abc", OrderStatusType::Paid),
        payment: payment("order_abc", "pay_123"),
        outcome,
        order_newly_paid,
    }
}

#[actix_web::test]
async fn verify_valid_payment() {
    let _ = env_logger::try_init().ok();
    let signature = payment_signature("order_abc", "pay_123");
    assert_eq!(signature, "aba246955ff7ef54d1583781e3ac8479326ddde95daf546a3c53793b286b4b82");
    let mut db = MockCheckoutDb::new();
    db.expect_record_verified_payment()
        .times(1)
        .withf(|p| p.order_id.as_str() == "order_abc" && p.payment_id == "pay_123")
        .returning(|_| Ok(recorded(VerificationOutcome::Verified, true)));
    let (status, body) =
        post_request("/verify-payment", &request_body("order_abc", "pay_123", &signature), &[], configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": true, "message": "Payment verified successfully"}));
}

#[actix_web::test]
async fn verify_payment_twice() {
    let _ = env_logger::try_init().ok();
    let signature = payment_signature("order_abc", "pay_123");
    let mut db = MockCheckoutDb::new();
    db.expect_record_verified_payment()
        .times(1)
        .returning(|_| Ok(recorded(VerificationOutcome::AlreadyVerified, false)));
    let (status, body) =
        post_request("/verify-payment", &request_body("order_abc", "pay_123", &signature), &[], configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": true, "message": "Payment already verified"}));
}

#[actix_web::test]
async fn verify_tampered_payment() {
    let _ = env_logger::try_init().ok();
    // A valid signature for pay_124 does not authorise pay_123
    let signature = payment_signature("order_abc", "pay_124");
    let mut db = MockCheckoutDb::new();
    db.expect_record_verified_payment().never();
    let (status, body) =
        post_request("/verify-payment", &request_body("order_abc", "pay_123", &signature), &[], configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": false, "error": "Invalid payment signature"}));
}

#[actix_web::test]
async fn verify_payment_for_unknown_order() {
    let _ = env_logger::try_init().ok();
    let signature = payment_signature("order_missing", "pay_123");
    let mut db = MockCheckoutDb::new();
    db.expect_record_verified_payment()
        .times(1)
        .returning(|p| Err(CheckoutDatabaseError::OrderNotFound(p.order_id)));
    let (status, body) =
        post_request("/verify-payment", &request_body("order_missing", "pay_123", &signature), &[], configure(db))
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("order_missing"));
}

#[actix_web::test]
async fn verify_payment_with_missing_fields() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCheckoutDb::new();
    db.expect_record_verified_payment().never();
    let (status, body) =
        post_request("/verify-payment", r#"{"orderId": "order_abc", "signature": "00"}"#, &[], configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Could not read request body"));
    let mut db = MockCheckoutDb::new();
    db.expect_record_verified_payment().never();
    let (status, body) =
        post_request("/verify-payment", &request_body("order_abc", " ", "00"), &[], configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("paymentId"));
}

#[actix_web::test]
async fn verify_payment_when_store_times_out() {
    let _ = env_logger::try_init().ok();
    let signature = payment_signature("order_abc", "pay_123");
    let mut db = MockCheckoutDb::new();
    db.expect_record_verified_payment().times(1).returning(|_| Err(CheckoutDatabaseError::Timeout(5000)));
    let (status, body) =
        post_request("/verify-payment", &request_body("order_abc", "pay_123", &signature), &[], configure(db)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], json!(false));
}
