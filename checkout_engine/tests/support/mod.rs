#![allow(dead_code)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use checkout_engine::{
    db_types::OrderId,
    helpers::compute_signature,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::{CheckoutDatabase, PaymentProvider, ProviderError, ProviderOrder, ProviderOrderRequest},
    SqliteDatabase,
};
use log::*;
use mockall::mock;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub const KEY_SECRET: &str = "test_key_secret";
pub const WEBHOOK_SECRET: &str = "test_webhook_secret";

mock! {
    pub Provider {}
    impl PaymentProvider for Provider {
        async fn create_order(&self, request: ProviderOrderRequest) -> Result<ProviderOrder, ProviderError>;
    }
}

/// A provider that accepts every order and assigns it the given id.
pub fn accepting_provider(order_id: &'static str) -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_create_order().returning(move |req| {
        Ok(ProviderOrder {
            id: OrderId::from(order_id),
            amount: req.amount,
            currency: req.currency.to_string(),
            receipt: req.receipt,
            status: "created".into(),
        })
    });
    provider
}

pub async fn new_database() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await
}

pub async fn tear_down(mut db: SqliteDatabase) {
    if let Err(e) = db.close().await {
        error!("🚀️ Failed to close database: {e}");
    }
    let _ = Sqlite::drop_database(db.url()).await;
}

pub fn payment_signature(order_id: &str, payment_id: &str) -> String {
    compute_signature(format!("{order_id}|{payment_id}"), KEY_SECRET).unwrap()
}

#[derive(Default, Clone)]
pub struct HookCalled {
    called: Arc<AtomicUsize>,
}

impl HookCalled {
    pub fn called(&self) {
        self.called.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.called.load(Ordering::SeqCst)
    }
}
