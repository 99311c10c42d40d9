use crate::core::{
    errors::ExchangeError,
    kernel::RestClient,
    traits::MarginLending,
    types::{LoanRequest, MarginTransaction},
};
use crate::exchanges::binance_margin::{
    converters::convert_transaction, rest::BinanceMarginRestClient,
};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Borrow and repay against the cross-margin account
pub struct Loans<R: RestClient> {
    rest: BinanceMarginRestClient<R>,
}

impl<R: RestClient> Loans<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self {
            rest: BinanceMarginRestClient::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient> MarginLending for Loans<R> {
    #[instrument(
        skip(self, request),
        fields(exchange = "binance_margin", asset = %request.asset, amount = %request.amount)
    )]
    async fn borrow(&self, request: LoanRequest) -> Result<MarginTransaction, ExchangeError> {
        let transaction = convert_transaction(self.rest.borrow(request).await?);
        info!(tran_id = transaction.tran_id, "margin loan created");
        Ok(transaction)
    }

    #[instrument(
        skip(self, request),
        fields(exchange = "binance_margin", asset = %request.asset, amount = %request.amount)
    )]
    async fn repay(&self, request: LoanRequest) -> Result<MarginTransaction, ExchangeError> {
        let transaction = convert_transaction(self.rest.repay(request).await?);
        info!(tran_id = transaction.tran_id, "margin loan repaid");
        Ok(transaction)
    }
}
