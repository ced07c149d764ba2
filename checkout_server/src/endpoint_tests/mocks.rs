use checkout_engine::{
    db_types::{NewOrder, NewPayment, Order, OrderId, Payment},
    traits::{
        CheckoutDatabase,
        CheckoutDatabaseError,
        PaymentProvider,
        ProviderError,
        ProviderOrder,
        ProviderOrderRequest,
        RecordedPayment,
    },
};
use mockall::mock;

mock! {
    pub CheckoutDb {}
    impl Clone for CheckoutDb {
        fn clone(&self) -> Self;
    }
    impl CheckoutDatabase for CheckoutDb {
        fn url(&self) -> &str;
        async fn insert_order(&self, order: NewOrder) -> Result<Order, CheckoutDatabaseError>;
        async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, CheckoutDatabaseError>;
        async fn fetch_payments_for_order(&self, order_id: &OrderId) -> Result<Vec<Payment>, CheckoutDatabaseError>;
        async fn record_verified_payment(&self, payment: NewPayment) -> Result<RecordedPayment, CheckoutDatabaseError>;
    }
}

mock! {
    pub Provider {}
    impl PaymentProvider for Provider {
        async fn create_order(&self, request: ProviderOrderRequest) -> Result<ProviderOrder, ProviderError>;
    }
}
