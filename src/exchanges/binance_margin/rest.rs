use crate::core::errors::ExchangeError;
use crate::core::kernel::{decode_response, RestClient};
use crate::core::types::{AccountRequest, LoanRequest, NewOrderRequest};
use crate::exchanges::binance_margin::converters::handle_error;
use crate::exchanges::binance_margin::requests::MarginRequest;
use crate::exchanges::binance_margin::types::{
    BinanceMarginAccount, BinanceMarginOrderResponse, BinanceMarginTransaction,
};
use serde::de::DeserializeOwned;
use tracing::instrument;

/// REST API operations for Binance cross margin
pub struct BinanceMarginRestClient<R: RestClient> {
    rest: R,
}

impl<R: RestClient> BinanceMarginRestClient<R> {
    /// Create a new REST client wrapper
    pub fn new(rest: R) -> Self {
        Self { rest }
    }

    /// Build, send and decode one request. Parameters are validated before
    /// anything touches the network.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: &MarginRequest,
    ) -> Result<T, ExchangeError> {
        let params = request.build_params()?;
        let raw = self
            .rest
            .send(
                request.method(),
                request.endpoint(),
                &params,
                request.security(),
            )
            .await?;

        decode_response(&raw, handle_error)
    }

    #[instrument(skip(self, request), fields(exchange = "binance_margin", asset = %request.asset))]
    pub async fn borrow(
        &self,
        request: LoanRequest,
    ) -> Result<BinanceMarginTransaction, ExchangeError> {
        self.execute(&MarginRequest::Borrow(request)).await
    }

    #[instrument(skip(self, request), fields(exchange = "binance_margin", asset = %request.asset))]
    pub async fn repay(
        &self,
        request: LoanRequest,
    ) -> Result<BinanceMarginTransaction, ExchangeError> {
        self.execute(&MarginRequest::Repay(request)).await
    }

    #[instrument(skip(self, request), fields(exchange = "binance_margin"))]
    pub async fn get_account(
        &self,
        request: AccountRequest,
    ) -> Result<BinanceMarginAccount, ExchangeError> {
        self.execute(&MarginRequest::Account(request)).await
    }

    #[instrument(
        skip(self, request),
        fields(
            exchange = "binance_margin",
            symbol = %request.symbol,
            side = %request.side,
            order_type = %request.order_type
        )
    )]
    pub async fn new_order(
        &self,
        request: NewOrderRequest,
    ) -> Result<BinanceMarginOrderResponse, ExchangeError> {
        self.execute(&MarginRequest::NewOrder(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::{RawResponse, SecurityType};
    use crate::core::types::{OrderSide, ParameterSet};
    use async_trait::async_trait;
    use reqwest::Method;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Mutex;

    type Call = (Method, String, ParameterSet, SecurityType);

    /// Records every call and answers with a canned response
    struct FakeRest {
        response: RawResponse,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeRest {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: RawResponse::new(status, body.as_bytes()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RestClient for FakeRest {
        async fn send(
            &self,
            method: Method,
            endpoint: &str,
            params: &ParameterSet,
            security: SecurityType,
        ) -> Result<RawResponse, ExchangeError> {
            self.calls.lock().unwrap().push((
                method,
                endpoint.to_string(),
                params.clone(),
                security,
            ));
            Ok(self.response.clone())
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_borrow_posts_signed_loan() {
        let fake = FakeRest::new(200, r#"{"tranId":100000001}"#);
        let client = BinanceMarginRestClient::new(fake);

        let tx = client
            .borrow(LoanRequest::new("BTC", dec("1.5")))
            .await
            .unwrap();
        assert_eq!(tx.tran_id, 100_000_001);

        let calls = client.rest.calls();
        assert_eq!(calls.len(), 1);
        let (method, endpoint, params, security) = &calls[0];
        assert_eq!(*method, Method::POST);
        assert_eq!(endpoint, "/sapi/v1/margin/loan");
        assert_eq!(*security, SecurityType::Signed);
        assert_eq!(params.to_query_string(), "amount=1.5&asset=BTC");
    }

    #[tokio::test]
    async fn test_repay_uses_repay_endpoint() {
        let fake = FakeRest::new(200, r#"{"tranId":7}"#);
        let client = BinanceMarginRestClient::new(fake);

        client
            .repay(LoanRequest::new("USDT", dec("25")))
            .await
            .unwrap();
        assert_eq!(client.rest.calls()[0].1, "/sapi/v1/margin/repay");
    }

    #[tokio::test]
    async fn test_get_account_is_a_get() {
        let fake = FakeRest::new(
            200,
            r#"{"borrowEnabled":true,"marginLevel":"999","totalAssetOfBtc":"0","totalLiabilityOfBtc":"0","totalNetAssetOfBtc":"0","tradeEnabled":true,"transferEnabled":true,"userAssets":[]}"#,
        );
        let client = BinanceMarginRestClient::new(fake);

        let account = client.get_account(AccountRequest::new()).await.unwrap();
        assert!(account.user_assets.is_empty());

        let calls = client.rest.calls();
        assert_eq!(calls[0].0, Method::GET);
        assert_eq!(calls[0].1, "/sapi/v1/margin/account");
        assert!(calls[0].2.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_never_sent() {
        let fake = FakeRest::new(200, r#"{"tranId":1}"#);
        let client = BinanceMarginRestClient::new(fake);

        let result = client.borrow(LoanRequest::new("", dec("1"))).await;
        assert!(matches!(result, Err(ExchangeError::InvalidRequest(_))));

        let result = client
            .new_order(NewOrderRequest::limit(
                "BTCUSDT",
                OrderSide::Buy,
                dec("1"),
                Decimal::ZERO,
            ))
            .await;
        assert!(matches!(result, Err(ExchangeError::InvalidRequest(_))));

        assert!(client.rest.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejection_maps_code_and_message() {
        let fake = FakeRest::new(418, r#"{"code":-1021,"msg":"Timestamp outside recvWindow"}"#);
        let client = BinanceMarginRestClient::new(fake);

        let err = client
            .borrow(LoanRequest::new("BTC", dec("1")))
            .await
            .unwrap_err();
        assert_eq!(err.api_code(), Some(-1021));
        assert!(err.to_string().contains("Timestamp outside recvWindow"));
    }

    #[tokio::test]
    async fn test_non_200_success_shape_is_still_an_error() {
        let fake = FakeRest::new(201, r#"{"tranId":1}"#);
        let client = BinanceMarginRestClient::new(fake);

        let err = client
            .borrow(LoanRequest::new("BTC", dec("1")))
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ResponseDecodeError(_)));
    }

    #[tokio::test]
    async fn test_garbage_success_body() {
        let fake = FakeRest::new(200, "not json");
        let client = BinanceMarginRestClient::new(fake);

        let err = client
            .get_account(AccountRequest::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ResponseDecodeError(_)));
    }
}
