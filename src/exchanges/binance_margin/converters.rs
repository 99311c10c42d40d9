use super::types as binance_types;
use crate::core::errors::ExchangeError;
use crate::core::types::{MarginAccount, MarginTransaction, ProcessedOrder, UserAsset};
use chrono::{DateTime, TimeDelta, Utc};

/// Map a non-200 body to `ApiRejected`, or to `ResponseDecodeError` when the
/// body isn't the exchange's `{code, msg}` shape.
pub fn handle_error(body: &[u8]) -> ExchangeError {
    match serde_json::from_slice::<binance_types::BinanceApiError>(body) {
        Ok(error) => ExchangeError::ApiRejected {
            code: error.code,
            message: error.msg,
        },
        Err(e) => ExchangeError::ResponseDecodeError(format!(
            "Failed to parse error response ({}): {}",
            e,
            String::from_utf8_lossy(body)
        )),
    }
}

pub fn convert_transaction(raw: binance_types::BinanceMarginTransaction) -> MarginTransaction {
    MarginTransaction {
        tran_id: raw.tran_id,
    }
}

/// Convert binance margin account to core margin account type
pub fn convert_margin_account(raw: binance_types::BinanceMarginAccount) -> MarginAccount {
    MarginAccount {
        borrow_enabled: raw.borrow_enabled,
        trade_enabled: raw.trade_enabled,
        transfer_enabled: raw.transfer_enabled,
        margin_level: raw.margin_level.value(),
        total_asset_of_btc: raw.total_asset_of_btc.value(),
        total_liability_of_btc: raw.total_liability_of_btc.value(),
        total_net_asset_of_btc: raw.total_net_asset_of_btc.value(),
        user_assets: raw
            .user_assets
            .into_iter()
            .map(|asset| UserAsset {
                asset: asset.asset,
                free: asset.free.value(),
                locked: asset.locked.value(),
                borrowed: asset.borrowed.value(),
                interest: asset.interest.value(),
                net_asset: asset.net_asset.value(),
            })
            .collect(),
    }
}

pub fn convert_order_response(
    raw: binance_types::BinanceMarginOrderResponse,
) -> Result<ProcessedOrder, ExchangeError> {
    Ok(ProcessedOrder {
        transact_time: time_from_epoch_millis(raw.transact_time)?,
        symbol: raw.symbol,
        order_id: raw.order_id,
        client_order_id: raw.client_order_id,
    })
}

/// Epoch milliseconds (possibly fractional) to an absolute time.
///
/// Whole milliseconds are carried exactly; the fractional part is rounded to
/// the nearest nanosecond.
pub fn time_from_epoch_millis(millis: f64) -> Result<DateTime<Utc>, ExchangeError> {
    if !millis.is_finite() || millis < 0.0 {
        return Err(ExchangeError::InvalidTimestamp(format!(
            "epoch milliseconds must be finite and non-negative, got {}",
            millis
        )));
    }

    let whole = millis.trunc();
    let sub_millis_nanos = ((millis - whole) * 1_000_000.0).round() as i64;

    DateTime::from_timestamp_millis(whole as i64)
        .and_then(|time| time.checked_add_signed(TimeDelta::nanoseconds(sub_millis_nanos)))
        .ok_or_else(|| {
            ExchangeError::InvalidTimestamp(format!(
                "epoch milliseconds {} out of range",
                millis
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::decode_json;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const ACCOUNT_BODY: &str = r#"{
        "borrowEnabled": true,
        "marginLevel": "1.5",
        "totalAssetOfBtc": "10.12345678",
        "totalLiabilityOfBtc": "2",
        "totalNetAssetOfBtc": "8.12345678",
        "tradeEnabled": false,
        "transferEnabled": true,
        "userAssets": [
            {"asset":"BTC","free":"0.5","locked":"0.1","borrowed":"0","interest":"0","netAsset":"0.4"}
        ]
    }"#;

    #[test]
    fn test_convert_margin_account() {
        let raw: binance_types::BinanceMarginAccount =
            decode_json(ACCOUNT_BODY.as_bytes()).unwrap();
        let account = convert_margin_account(raw);

        assert!(account.borrow_enabled);
        assert!(!account.trade_enabled);
        assert!(account.transfer_enabled);
        assert_eq!(account.margin_level, dec("1.5"));
        assert_eq!(account.total_asset_of_btc, dec("10.12345678"));
        assert_eq!(account.total_liability_of_btc, dec("2"));
        assert_eq!(account.user_assets.len(), 1);

        let btc = &account.user_assets[0];
        assert_eq!(btc.asset, "BTC");
        assert_eq!(btc.free, dec("0.5"));
        assert_eq!(btc.locked, dec("0.1"));
        assert_eq!(btc.borrowed, Decimal::ZERO);
        assert_eq!(btc.net_asset, dec("0.4"));
    }

    #[test]
    fn test_malformed_decimal_fails_whole_account() {
        let body = ACCOUNT_BODY.replace(r#""marginLevel": "1.5""#, r#""marginLevel": "1.5x""#);
        let result = decode_json::<binance_types::BinanceMarginAccount>(body.as_bytes());

        match result {
            Err(ExchangeError::ResponseDecodeError(message)) => {
                assert!(message.contains("1.5x"), "unexpected message: {}", message);
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_decode_error() {
        let body = ACCOUNT_BODY.replace(r#""totalLiabilityOfBtc": "2","#, "");
        let result = decode_json::<binance_types::BinanceMarginAccount>(body.as_bytes());
        assert!(matches!(result, Err(ExchangeError::ResponseDecodeError(_))));
    }

    #[test]
    fn test_convert_order_response() {
        let body = r#"{"symbol":"BTCUSDT","orderId":28,"clientOrderId":"6gCrw2kRUAF9CvJDGP16IP","transactTime":1609459200123.0,"isIsolated":false}"#;
        let raw: binance_types::BinanceMarginOrderResponse = decode_json(body.as_bytes()).unwrap();
        let order = convert_order_response(raw).unwrap();

        assert_eq!(order.symbol, "BTCUSDT");
        assert_eq!(order.order_id, 28);
        assert_eq!(order.client_order_id, "6gCrw2kRUAF9CvJDGP16IP");
        assert_eq!(order.transact_time.timestamp_millis(), 1_609_459_200_123);
    }

    #[test]
    fn test_time_from_integer_millis() {
        let time = time_from_epoch_millis(1_609_459_200_123.0).unwrap();
        assert_eq!(
            time,
            DateTime::from_timestamp_millis(1_609_459_200_123).unwrap()
        );
        assert_eq!(time.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_time_keeps_sub_millisecond_part() {
        let time = time_from_epoch_millis(1.5).unwrap();
        assert_eq!(time.timestamp_millis(), 1);
        assert_eq!(time.timestamp_subsec_nanos(), 1_500_000);
    }

    #[test]
    fn test_time_rejects_unusable_values() {
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            assert!(
                matches!(
                    time_from_epoch_millis(bad),
                    Err(ExchangeError::InvalidTimestamp(_))
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_handle_error_structured_body() {
        let error = handle_error(br#"{"code":-1021,"msg":"Timestamp outside recvWindow"}"#);
        match error {
            ExchangeError::ApiRejected { code, message } => {
                assert_eq!(code, -1021);
                assert_eq!(message, "Timestamp outside recvWindow");
            }
            other => panic!("expected ApiRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_error_malformed_body() {
        let error = handle_error(b"<html>502 Bad Gateway</html>");
        assert!(matches!(error, ExchangeError::ResponseDecodeError(_)));
        assert!(!error.is_api_rejection());
    }
}
