use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{MarginAccountInfo, MarginConnector, MarginLending, MarginOrderPlacer};
use crate::core::types::{
    AccountRequest, LoanRequest, MarginAccount, MarginTransaction, NewOrderRequest,
    ProcessedOrder,
};
use async_trait::async_trait;

pub mod account;
pub mod lending;
pub mod trading;

pub use account::Account;
pub use lending::Loans;
pub use trading::Trading;

/// Binance cross-margin connector that composes all sub-trait implementations
pub struct BinanceMarginConnector<R: RestClient> {
    pub loans: Loans<R>,
    pub account: Account<R>,
    pub trading: Trading<R>,
}

impl<R: RestClient + Clone> BinanceMarginConnector<R> {
    /// Every component shares one transport (and its connection pool)
    pub fn new(rest: R) -> Self {
        Self {
            loans: Loans::new(&rest),
            account: Account::new(&rest),
            trading: Trading::new(&rest),
        }
    }
}

// Implement traits for the connector by delegating to sub-components

#[async_trait]
impl<R: RestClient> MarginLending for BinanceMarginConnector<R> {
    async fn borrow(&self, request: LoanRequest) -> Result<MarginTransaction, ExchangeError> {
        self.loans.borrow(request).await
    }

    async fn repay(&self, request: LoanRequest) -> Result<MarginTransaction, ExchangeError> {
        self.loans.repay(request).await
    }
}

#[async_trait]
impl<R: RestClient> MarginAccountInfo for BinanceMarginConnector<R> {
    async fn get_margin_account(
        &self,
        request: AccountRequest,
    ) -> Result<MarginAccount, ExchangeError> {
        self.account.get_margin_account(request).await
    }
}

#[async_trait]
impl<R: RestClient> MarginOrderPlacer for BinanceMarginConnector<R> {
    async fn place_margin_order(
        &self,
        order: NewOrderRequest,
    ) -> Result<ProcessedOrder, ExchangeError> {
        self.trading.place_margin_order(order).await
    }
}

impl<R: RestClient> MarginConnector for BinanceMarginConnector<R> {}
