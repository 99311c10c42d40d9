use crate::core::errors::ExchangeError;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Decimal value as the exchange puts it on the wire: a decimal string.
///
/// Amounts and prices travel as strings so that no binary floating point sits
/// between the caller and the exchange. Parsing is exact; a string that is not
/// a plain decimal literal is rejected rather than rounded or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WireDecimal(pub Decimal);

impl WireDecimal {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a decimal literal such as `"0.00012"` or `"-3"`.
    ///
    /// Scientific notation, empty strings and anything that would lose digits
    /// fail with [`ExchangeError::MalformedNumber`].
    pub fn decode(s: &str) -> Result<Self, ExchangeError> {
        if s.is_empty() || s.contains(['e', 'E', '_']) {
            return Err(ExchangeError::MalformedNumber(s.to_string()));
        }
        Decimal::from_str_exact(s)
            .or_else(|_| Decimal::from_str_exact(trim_fraction_zeros(s)))
            .map(Self)
            .map_err(|_| ExchangeError::MalformedNumber(s.to_string()))
    }

    /// Minimal exact form: no exponent, no trailing zeros.
    pub fn encode(&self) -> String {
        self.0.normalize().to_string()
    }

    /// Exactly `decimal_places` fractional digits, rounding half to even.
    ///
    /// `None` when the value is too large to carry that many digits.
    pub fn encode_fixed(&self, decimal_places: u32) -> Option<String> {
        let mut rounded = self.0.round_dp_with_strategy(
            decimal_places,
            RoundingStrategy::MidpointNearestEven,
        );
        rounded.rescale(decimal_places);
        (rounded.scale() == decimal_places).then(|| rounded.to_string())
    }
}

/// `"0.1000"` -> `"0.1"`; trailing fraction zeros carry no value but count
/// against the 28-digit scale limit.
fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl From<Decimal> for WireDecimal {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<WireDecimal> for Decimal {
    fn from(value: WireDecimal) -> Self {
        value.0
    }
}

impl FromStr for WireDecimal {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for WireDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for WireDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for WireDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::decode(&raw).map_err(serde::de::Error::custom)
    }
}

/// Request parameters keyed by name.
///
/// Keys are kept sorted so the serialized form, and therefore the signature
/// computed over it, is the same regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet(BTreeMap<String, String>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical `application/x-www-form-urlencoded` serialization
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
}

impl OrderType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::StopLoss => "STOP_LOSS",
            Self::StopLossLimit => "STOP_LOSS_LIMIT",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            Self::LimitMaker => "LIMIT_MAKER",
        }
    }

    /// Order types the exchange rejects without a limit price
    pub const fn requires_price(&self) -> bool {
        matches!(
            self,
            Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit | Self::LimitMaker
        )
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    GTC, // Good Till Canceled
    IOC, // Immediate or Cancel
    FOK, // Fill or Kill
}

impl TimeInForce {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GTC => "GTC",
            Self::IOC => "IOC",
            Self::FOK => "FOK",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(OrderSide, OrderType, TimeInForce);

/// Borrow and repay take the same parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub asset: String,
    pub amount: Decimal,
    /// Validity window in milliseconds; zero or unset leaves it to the exchange
    pub recv_window: Option<u64>,
    /// Defaults to the send time when unset
    pub timestamp: Option<DateTime<Utc>>,
}

impl LoanRequest {
    pub fn new(asset: impl Into<String>, amount: Decimal) -> Self {
        Self {
            asset: asset.into(),
            amount,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRequest {
    pub recv_window: Option<u64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl AccountRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// New cross-margin order.
///
/// Optional fields left unset or at zero are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    /// Ignored for `MARKET` orders
    pub price: Option<Decimal>,
    pub new_client_order_id: Option<String>,
    pub time_in_force: Option<TimeInForce>,
    pub stop_price: Option<Decimal>,
    pub iceberg_qty: Option<Decimal>,
    pub recv_window: Option<u64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewOrderRequest {
    pub fn new(
        symbol: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            new_client_order_id: None,
            time_in_force: None,
            stop_price: None,
            iceberg_qty: None,
            recv_window: None,
            timestamp: None,
        }
    }

    /// Good-till-cancel limit order
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::new(symbol, side, OrderType::Limit, quantity)
            .with_price(price)
            .with_time_in_force(TimeInForce::GTC)
    }

    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(symbol, side, OrderType::Market, quantity)
    }

    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(client_order_id.into());
        self
    }

    #[must_use]
    pub const fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    #[must_use]
    pub const fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    #[must_use]
    pub const fn with_iceberg_qty(mut self, iceberg_qty: Decimal) -> Self {
        self.iceberg_qty = Some(iceberg_qty);
        self
    }

    #[must_use]
    pub const fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Result of a borrow or repay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginTransaction {
    pub tran_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAsset {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
    pub borrowed: Decimal,
    pub interest: Decimal,
    pub net_asset: Decimal,
}

/// Cross-margin account snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginAccount {
    pub borrow_enabled: bool,
    pub trade_enabled: bool,
    pub transfer_enabled: bool,
    pub margin_level: Decimal,
    pub total_asset_of_btc: Decimal,
    pub total_liability_of_btc: Decimal,
    pub total_net_asset_of_btc: Decimal,
    /// In the order the exchange listed them
    pub user_assets: Vec<UserAsset>,
}

impl MarginAccount {
    pub fn asset(&self, asset: &str) -> Option<&UserAsset> {
        self.user_assets.iter().find(|a| a.asset == asset)
    }
}

/// Acknowledgement of a placed margin order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedOrder {
    pub symbol: String,
    pub order_id: i64,
    pub client_order_id: String,
    pub transact_time: DateTime<Utc>,
}
