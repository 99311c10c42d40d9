use crate::core::{
    errors::ExchangeError,
    kernel::RestClient,
    traits::MarginAccountInfo,
    types::{AccountRequest, MarginAccount},
};
use crate::exchanges::binance_margin::{
    converters::convert_margin_account, rest::BinanceMarginRestClient,
};
use async_trait::async_trait;
use tracing::instrument;

/// Cross-margin account details
pub struct Account<R: RestClient> {
    rest: BinanceMarginRestClient<R>,
}

impl<R: RestClient> Account<R> {
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
impl<R: RestClient> MarginAccountInfo for Account<R> {
    #[instrument(skip(self, request), fields(exchange = "binance_margin"))]
    async fn get_margin_account(
        &self,
        request: AccountRequest,
    ) -> Result<MarginAccount, ExchangeError> {
        let raw = self.rest.get_account(request).await?;
        Ok(convert_margin_account(raw))
    }
}
