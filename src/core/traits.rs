use crate::core::errors::ExchangeError;
use crate::core::types::{
    AccountRequest, LoanRequest, MarginAccount, MarginTransaction, NewOrderRequest,
    ProcessedOrder,
};
use async_trait::async_trait;

#[async_trait]
pub trait MarginLending {
    /// Borrow an asset into the cross-margin account
    async fn borrow(&self, request: LoanRequest) -> Result<MarginTransaction, ExchangeError>;

    /// Repay a cross-margin loan
    async fn repay(&self, request: LoanRequest) -> Result<MarginTransaction, ExchangeError>;
}

#[async_trait]
pub trait MarginAccountInfo {
    async fn get_margin_account(
        &self,
        request: AccountRequest,
    ) -> Result<MarginAccount, ExchangeError>;
}

#[async_trait]
pub trait MarginOrderPlacer {
    /// Place a new cross-margin order
    async fn place_margin_order(
        &self,
        order: NewOrderRequest,
    ) -> Result<ProcessedOrder, ExchangeError>;
}

// Composite trait for callers that need every margin capability
#[async_trait]
pub trait MarginConnector: MarginLending + MarginAccountInfo + MarginOrderPlacer {}
