//! Shared helpers for the mock-server tests

#![allow(dead_code)]

use lotusx_margin::core::kernel::hmac_sha256_hex;
use lotusx_margin::{build_connector, BinanceMarginConnector, ExchangeConfig};
use lotusx_margin::core::kernel::ReqwestRest;
use std::collections::BTreeMap;
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-api-key";
pub const SECRET_KEY: &str = "test-secret-key";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_config(server: &MockServer) -> ExchangeConfig {
    ExchangeConfig::new(API_KEY.to_string(), SECRET_KEY.to_string()).base_url(server.uri())
}

pub fn connector_for(server: &MockServer) -> BinanceMarginConnector<ReqwestRest> {
    build_connector(test_config(server)).expect("connector should build")
}

pub fn connector_with(config: ExchangeConfig) -> BinanceMarginConnector<ReqwestRest> {
    build_connector(config).expect("connector should build")
}

/// The signed parameter string: query for GET, form body otherwise
pub fn signed_payload(request: &Request) -> String {
    if request.method.as_str() == "GET" {
        request.url.query().unwrap_or_default().to_string()
    } else {
        String::from_utf8(request.body.clone()).expect("form body should be utf-8")
    }
}

/// Split `payload` into the part that was signed and the signature, and
/// check the signature against the test secret.
pub fn assert_valid_signature(payload: &str) {
    let (signed, signature) = payload
        .rsplit_once("&signature=")
        .expect("signature should be the last parameter");
    assert_eq!(
        hmac_sha256_hex(SECRET_KEY, signed).unwrap(),
        signature,
        "signature does not cover {:?}",
        signed
    );
}

/// Decoded parameters, signature included
pub fn decoded_params(payload: &str) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(payload.as_bytes())
        .into_owned()
        .collect()
}

pub fn api_key_header(request: &Request) -> Option<String> {
    request
        .headers
        .get("X-MBX-APIKEY")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub fn account_body() -> serde_json::Value {
    serde_json::json!({
        "borrowEnabled": true,
        "marginLevel": "1.5",
        "totalAssetOfBtc": "10.12345678",
        "totalLiabilityOfBtc": "6.74897119",
        "totalNetAssetOfBtc": "3.37448559",
        "tradeEnabled": true,
        "transferEnabled": true,
        "userAssets": [
            {
                "asset": "BTC",
                "borrowed": "0.00000000",
                "free": "0.5",
                "interest": "0.00000000",
                "locked": "0.00000000",
                "netAsset": "0.5"
            },
            {
                "asset": "USDT",
                "borrowed": "1000.00000000",
                "free": "1200.00000000",
                "interest": "0.12500000",
                "locked": "0.00000000",
                "netAsset": "199.87500000"
            }
        ]
    })
}
