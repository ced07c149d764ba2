//! Bridges the Razorpay REST client to the checkout engine's [`PaymentProvider`] trait.
use checkout_engine::traits::{PaymentProvider, ProviderError, ProviderOrder, ProviderOrderRequest};
use log::*;
use razorpay_tools::{NewRazorpayOrder, RazorpayApi, RazorpayApiError, RazorpayConfig, RazorpayOrder};

#[derive(Clone)]
pub struct RazorpayProvider {
    api: RazorpayApi,
}

impl RazorpayProvider {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let api = RazorpayApi::new(config)?;
        Ok(Self { api })
    }

    pub fn api(&self) -> &RazorpayApi {
        &self.api
    }
}

impl PaymentProvider for RazorpayProvider {
    async fn create_order(&self, request: ProviderOrderRequest) -> Result<ProviderOrder, ProviderError> {
        let order = new_razorpay_order(request);
        trace!("💳️ Creating Razorpay order for {} {}", order.amount, order.currency);
        let order = self.api.create_order(&order).await.map_err(provider_error)?;
        info!("💳️ Razorpay order {} created ({} {})", order.id, order.amount, order.currency);
        Ok(provider_order(order))
    }
}

pub fn new_razorpay_order(request: ProviderOrderRequest) -> NewRazorpayOrder {
    let mut order = NewRazorpayOrder::new(request.amount.value(), request.currency.as_str());
    order.receipt = request.receipt;
    order.notes = request.notes;
    order
}

pub fn provider_order(order: RazorpayOrder) -> ProviderOrder {
    ProviderOrder {
        id: order.id.into(),
        amount: order.amount.into(),
        currency: order.currency,
        receipt: order.receipt,
        status: order.status,
    }
}

pub fn provider_error(e: RazorpayApiError) -> ProviderError {
    match e {
        RazorpayApiError::Timeout => ProviderError::Timeout,
        RazorpayApiError::QueryError { status, message } => ProviderError::Rejected { status, message },
        RazorpayApiError::JsonError(s) | RazorpayApiError::RestResponseError(s) => ProviderError::InvalidResponse(s),
        RazorpayApiError::Initialization(s) | RazorpayApiError::RestRequestError(s) => ProviderError::Network(s),
    }
}
