use crate::core::errors::ExchangeError;
use crate::core::kernel::SecurityType;
use crate::core::types::{
    AccountRequest, LoanRequest, NewOrderRequest, OrderType, ParameterSet, WireDecimal,
};
use chrono::{DateTime, Utc};
use reqwest::Method;
use rust_decimal::Decimal;

pub const LOAN_ENDPOINT: &str = "/sapi/v1/margin/loan";
pub const REPAY_ENDPOINT: &str = "/sapi/v1/margin/repay";
pub const ACCOUNT_ENDPOINT: &str = "/sapi/v1/margin/account";
pub const ORDER_ENDPOINT: &str = "/sapi/v1/margin/order";

/// Order quantity and price are always sent with this many fractional digits;
/// other decimals use their minimal form.
pub const ORDER_DECIMAL_PLACES: u32 = 3;

/// One variant per endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarginRequest {
    Borrow(LoanRequest),
    Repay(LoanRequest),
    Account(AccountRequest),
    NewOrder(NewOrderRequest),
}

impl MarginRequest {
    pub fn method(&self) -> Method {
        match self {
            Self::Account(_) => Method::GET,
            Self::Borrow(_) | Self::Repay(_) | Self::NewOrder(_) => Method::POST,
        }
    }

    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Borrow(_) => LOAN_ENDPOINT,
            Self::Repay(_) => REPAY_ENDPOINT,
            Self::Account(_) => ACCOUNT_ENDPOINT,
            Self::NewOrder(_) => ORDER_ENDPOINT,
        }
    }

    /// Every margin endpoint is `USER_DATA`/`MARGIN` and must be signed
    pub const fn security(&self) -> SecurityType {
        SecurityType::Signed
    }

    /// Build the parameter set, validating mandatory fields first
    pub fn build_params(&self) -> Result<ParameterSet, ExchangeError> {
        match self {
            Self::Borrow(request) | Self::Repay(request) => build_loan_params(request),
            Self::Account(request) => build_account_params(request),
            Self::NewOrder(request) => build_order_params(request),
        }
    }
}

pub fn build_loan_params(request: &LoanRequest) -> Result<ParameterSet, ExchangeError> {
    require_non_empty("asset", &request.asset)?;
    require_positive("amount", request.amount)?;

    let mut params = ParameterSet::new();
    params.insert("asset", request.asset.as_str());
    params.insert("amount", WireDecimal::new(request.amount).encode());
    insert_freshness(&mut params, request.recv_window, request.timestamp)?;
    Ok(params)
}

pub fn build_account_params(request: &AccountRequest) -> Result<ParameterSet, ExchangeError> {
    let mut params = ParameterSet::new();
    insert_freshness(&mut params, request.recv_window, request.timestamp)?;
    Ok(params)
}

pub fn build_order_params(request: &NewOrderRequest) -> Result<ParameterSet, ExchangeError> {
    require_non_empty("symbol", &request.symbol)?;
    require_positive("quantity", request.quantity)?;

    let quantity = fixed_order_decimal("quantity", request.quantity)?;

    let mut params = ParameterSet::new();
    params.insert("symbol", request.symbol.as_str());
    params.insert("side", request.side.as_str());
    params.insert("type", request.order_type.as_str());
    params.insert("quantity", quantity);

    if request.order_type != OrderType::Market {
        match non_zero(request.price) {
            Some(price) => {
                require_positive("price", price)?;
                params.insert("price", fixed_order_decimal("price", price)?);
            }
            None if request.order_type.requires_price() => {
                return Err(ExchangeError::InvalidRequest(format!(
                    "price is required for {} orders",
                    request.order_type
                )));
            }
            None => {}
        }
    }

    if let Some(client_order_id) = request
        .new_client_order_id
        .as_deref()
        .filter(|id| !id.is_empty())
    {
        params.insert("newClientOrderId", client_order_id);
    }
    if let Some(time_in_force) = request.time_in_force {
        params.insert("timeInForce", time_in_force.as_str());
    }
    if let Some(stop_price) = non_zero(request.stop_price) {
        require_positive("stopPrice", stop_price)?;
        params.insert("stopPrice", WireDecimal::new(stop_price).encode());
    }
    if let Some(iceberg_qty) = non_zero(request.iceberg_qty) {
        require_positive("icebergQty", iceberg_qty)?;
        params.insert("icebergQty", WireDecimal::new(iceberg_qty).encode());
    }

    insert_freshness(&mut params, request.recv_window, request.timestamp)?;
    Ok(params)
}

/// `recvWindow` when non-zero, `timestamp` when set. An unset timestamp is
/// filled in by the transport at send time.
fn insert_freshness(
    params: &mut ParameterSet,
    recv_window: Option<u64>,
    timestamp: Option<DateTime<Utc>>,
) -> Result<(), ExchangeError> {
    if let Some(recv_window) = recv_window.filter(|window| *window != 0) {
        params.insert("recvWindow", recv_window.to_string());
    }
    if let Some(timestamp) = timestamp {
        let millis = timestamp.timestamp_millis();
        if millis < 0 {
            return Err(ExchangeError::InvalidTimestamp(format!(
                "timestamp {} is before the Unix epoch",
                timestamp
            )));
        }
        params.insert("timestamp", millis.to_string());
    }
    Ok(())
}

fn fixed_order_decimal(field: &str, value: Decimal) -> Result<String, ExchangeError> {
    let encoded = WireDecimal::new(value)
        .encode_fixed(ORDER_DECIMAL_PLACES)
        .ok_or_else(|| {
            ExchangeError::InvalidRequest(format!(
                "{} {} is too large for {} decimal places",
                field, value, ORDER_DECIMAL_PLACES
            ))
        })?;
    // 0.0004 would go out as "0.000"
    if WireDecimal::decode(&encoded)?.is_zero() {
        return Err(ExchangeError::InvalidRequest(format!(
            "{} {} rounds to zero at {} decimal places",
            field, value, ORDER_DECIMAL_PLACES
        )));
    }
    Ok(encoded)
}

fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ExchangeError> {
    if value.trim().is_empty() {
        return Err(ExchangeError::InvalidRequest(format!("{} is required", field)));
    }
    Ok(())
}

fn require_positive(field: &str, value: Decimal) -> Result<(), ExchangeError> {
    if value.is_zero() {
        return Err(ExchangeError::InvalidRequest(format!("{} is required", field)));
    }
    if value.is_sign_negative() {
        return Err(ExchangeError::InvalidRequest(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(())
}
