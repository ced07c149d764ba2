use actix_web::{http::StatusCode, web, web::ServiceConfig};
use checkout_engine::{
    db_types::{OrderId, OrderStatusType},
    traits::{CheckoutDatabaseError, ProviderError, ProviderOrder},
    OrderFlowApi,
    OrderQueryApi,
};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, order, payment, post_request},
    mocks::{MockCheckoutDb, MockProvider},
};
use crate::routes::{CreateOrderRoute, OrderByIdRoute};

fn configure_create_order(db: MockCheckoutDb, provider: MockProvider) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderFlowApi::new(db, provider);
        cfg.app_data(web::Data::new(api)).service(CreateOrderRoute::<MockCheckoutDb, MockProvider>::new());
    }
}

fn configure_order_query(db: MockCheckoutDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(OrderQueryApi::new(db))).service(OrderByIdRoute::<MockCheckoutDb>::new());
    }
}

fn accepting_provider() -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_create_order().times(1).returning(|req| {
        Ok(ProviderOrder {
            id: OrderId::from("order_abc"),
            amount: req.amount,
            currency: req.currency.as_str().to_string(),
            receipt: req.receipt,
            status: "created".into(),
        })
    });
    provider
}

#[actix_web::test]
async fn create_order() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCheckoutDb::new();
    db.expect_insert_order()
        .times(1)
        .withf(|o| o.order_id.as_str() == "order_abc" && o.amount.value() == 49_900 && o.currency.as_str() == "INR")
        .returning(|_| Ok(order("order_abc", OrderStatusType::Created)));
    let (status, body) = post_request(
        "/create-order",
        r#"{"amount": 499, "currency": "INR"}"#,
        &[],
        configure_create_order(db, accepting_provider()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"orderId": "order_abc", "amount": 49900, "currency": "INR"}));
}

#[actix_web::test]
async fn create_order_with_invalid_amount() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_order().never();
    let mut db = MockCheckoutDb::new();
    db.expect_insert_order().never();
    let (status, body) =
        post_request("/create-order", r#"{"amount": 0, "currency": "INR"}"#, &[], configure_create_order(db, provider))
            .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Invalid amount"));
}

#[actix_web::test]
async fn create_order_with_unsupported_currency() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_order().never();
    let (status, body) = post_request(
        "/create-order",
        r#"{"amount": 10, "currency": "XYZ"}"#,
        &[],
        configure_create_order(MockCheckoutDb::new(), provider),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid currency"));
}

#[actix_web::test]
async fn create_order_with_malformed_body() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request(
        "/create-order",
        r#"{"amount": "lots"}"#,
        &[],
        configure_create_order(MockCheckoutDb::new(), MockProvider::new()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Could not read request body"));
}

#[actix_web::test]
async fn create_order_when_provider_fails() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_order().times(1).returning(|_| Err(ProviderError::Timeout));
    let mut db = MockCheckoutDb::new();
    db.expect_insert_order().never();
    let (status, body) =
        post_request("/create-order", r#"{"amount": 499, "currency": "INR"}"#, &[], configure_create_order(db, provider))
            .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": false, "error": "Failed to create order"}));
}

#[actix_web::test]
async fn create_order_when_store_fails() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCheckoutDb::new();
    db.expect_insert_order()
        .times(1)
        .returning(|_| Err(CheckoutDatabaseError::DatabaseError("disk I/O error".into())));
    let (status, body) = post_request(
        "/create-order",
        r#"{"amount": 499, "currency": "INR"}"#,
        &[],
        configure_create_order(db, accepting_provider()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("disk I/O error"));
}

#[actix_web::test]
async fn fetch_order_with_payments() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCheckoutDb::new();
    db.expect_fetch_order_by_order_id()
        .times(1)
        .returning(|id| Ok(Some(order(id.as_str(), OrderStatusType::Paid))));
    db.expect_fetch_payments_for_order().times(1).returning(|id| Ok(vec![payment(id.as_str(), "pay_123")]));
    let (status, body) = get_request("/orders/order_abc", configure_order_query(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["order"]["orderId"], json!("order_abc"));
    assert_eq!(body["order"]["status"], json!("paid"));
    assert_eq!(body["payments"][0]["paymentId"], json!("pay_123"));
}

#[actix_web::test]
async fn fetch_unknown_order() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCheckoutDb::new();
    db.expect_fetch_order_by_order_id().times(1).returning(|_| Ok(None));
    db.expect_fetch_payments_for_order().never();
    let (status, body) = get_request("/orders/order_missing", configure_order_query(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("order_missing"));
}
