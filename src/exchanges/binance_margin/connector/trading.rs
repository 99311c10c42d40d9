use crate::core::{
    errors::ExchangeError,
    kernel::RestClient,
    traits::MarginOrderPlacer,
    types::{NewOrderRequest, ProcessedOrder},
};
use crate::exchanges::binance_margin::{
    converters::convert_order_response, rest::BinanceMarginRestClient,
};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Order placement on the cross-margin account
pub struct Trading<R: RestClient> {
    rest: BinanceMarginRestClient<R>,
}

impl<R: RestClient> Trading<R> {
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
impl<R: RestClient> MarginOrderPlacer for Trading<R> {
    #[instrument(
        skip(self, order),
        fields(
            exchange = "binance_margin",
            symbol = %order.symbol,
            side = %order.side,
            order_type = %order.order_type
        )
    )]
    async fn place_margin_order(
        &self,
        order: NewOrderRequest,
    ) -> Result<ProcessedOrder, ExchangeError> {
        let response = self.rest.new_order(order).await?;
        let processed = convert_order_response(response)?;
        info!(
            order_id = processed.order_id,
            client_order_id = %processed.client_order_id,
            "margin order accepted"
        );
        Ok(processed)
    }
}
