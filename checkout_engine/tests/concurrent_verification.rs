use std::sync::Arc;

use checkout_engine::{
    db_types::{OrderStatusType, PaymentStatusType},
    events::{EventHandlers, EventHooks},
    order_objects::{NewCheckoutOrder, PaymentConfirmation},
    traits::{CheckoutDatabase, VerificationOutcome},
    OrderFlowApi,
    PaymentVerificationApi,
    SignatureVerifier,
};
use futures_util::future::join_all;
use log::*;
use rcg_common::Secret;
use support::{accepting_provider, new_database, payment_signature, tear_down, HookCalled, KEY_SECRET};

mod support;

const NUM_REQUESTS: usize = 12;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_verifications_record_one_payment() {
    let db = new_database().await;
    OrderFlowApi::new(db.clone(), accepting_provider("order_abc"))
        .create_order(NewCheckoutOrder::new(499, "INR"))
        .await
        .unwrap();

    let paid = HookCalled::default();
    let paid_copy = paid.clone();
    let mut hooks = EventHooks::default();
    hooks.on_order_paid(move |ev| {
        info!("🪝️ Order {} paid", ev.order.order_id);
        let paid = paid_copy.clone();
        Box::pin(async move { paid.called() })
    });
    let handlers = EventHandlers::new(NUM_REQUESTS, hooks);
    let producers = handlers.producers();
    let handle = tokio::spawn(handlers.start_handlers());

    let verifier = SignatureVerifier::new(&Secret::new(KEY_SECRET.to_string())).unwrap();
    let api = Arc::new(PaymentVerificationApi::new(db.clone(), verifier, producers));
    let signature = payment_signature("order_abc", "pay_123");
    let tasks = (0..NUM_REQUESTS).map(|_| {
        let api = Arc::clone(&api);
        let confirmation = PaymentConfirmation::new("order_abc", "pay_123", signature.clone());
        tokio::spawn(async move { api.verify_payment(confirmation).await })
    });
    let results = join_all(tasks).await;
    let outcomes = results
        .into_iter()
        .map(|r| r.expect("Task panicked").expect("Verification failed").outcome)
        .collect::<Vec<_>>();
    let first_time = outcomes.iter().filter(|o| **o == VerificationOutcome::Verified).count();
    assert_eq!(first_time, 1);
    assert_eq!(outcomes.len() - first_time, NUM_REQUESTS - 1);

    let payments = db.fetch_payments_for_order(&"order_abc".into()).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].status, PaymentStatusType::Verified);
    let order = db.fetch_order_by_order_id(&"order_abc".into()).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatusType::Paid);

    // Dropping the last producer lets the handler drain and shut down
    drop(api);
    handle.await.unwrap();
    for _ in 0..20 {
        if paid.count() > 0 {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
    assert_eq!(paid.count(), 1);
    tear_down(db).await;
}
