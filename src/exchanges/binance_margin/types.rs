use crate::core::types::WireDecimal;
use serde::Deserialize;

// Raw response shapes. Decimal fields arrive as strings and are parsed
// through `WireDecimal`, so a malformed number fails the whole decode.

#[derive(Debug, Deserialize)]
pub struct BinanceMarginTransaction {
    #[serde(rename = "tranId")]
    pub tran_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceMarginAccount {
    pub borrow_enabled: bool,
    pub margin_level: WireDecimal,
    pub total_asset_of_btc: WireDecimal,
    pub total_liability_of_btc: WireDecimal,
    pub total_net_asset_of_btc: WireDecimal,
    pub trade_enabled: bool,
    pub transfer_enabled: bool,
    pub user_assets: Vec<BinanceUserAsset>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceUserAsset {
    pub asset: String,
    pub borrowed: WireDecimal,
    pub free: WireDecimal,
    pub interest: WireDecimal,
    pub locked: WireDecimal,
    pub net_asset: WireDecimal,
}

/// Order acknowledgement; the exchange may send more fields, only these are read
#[derive(Debug, Deserialize)]
pub struct BinanceMarginOrderResponse {
    pub symbol: String,
    #[serde(rename = "orderId")]
    pub order_id: i64,
    #[serde(rename = "clientOrderId")]
    pub client_order_id: String,
    /// Epoch milliseconds, possibly with a fractional part
    #[serde(rename = "transactTime")]
    pub transact_time: f64,
}

/// Error body returned with any non-200 status
#[derive(Debug, Deserialize)]
pub struct BinanceApiError {
    pub code: i64,
    pub msg: String,
}
