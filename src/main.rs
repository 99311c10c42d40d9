use anyhow::Context;
use lotusx_margin::core::config::ExchangeConfig;
use lotusx_margin::{build_connector, AccountRequest, MarginAccountInfo};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const ENV_PREFIX: &str = "BINANCE_MARGIN";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials come from BINANCE_MARGIN_API_KEY / BINANCE_MARGIN_SECRET_KEY
    #[cfg(feature = "env-file")]
    let config = ExchangeConfig::from_env_file(ENV_PREFIX);
    #[cfg(not(feature = "env-file"))]
    let config = ExchangeConfig::from_env(ENV_PREFIX);
    let config = config.context("failed to load margin configuration")?;

    info!(testnet = config.testnet, base_url = %config.resolved_base_url(), "connecting");
    let connector = build_connector(config).context("failed to build connector")?;

    // Read-only call; borrowing and order placement are left to callers
    match connector.get_margin_account(AccountRequest::new()).await {
        Ok(account) => {
            println!(
                "Margin level {} | assets {} BTC | liabilities {} BTC | net {} BTC",
                account.margin_level,
                account.total_asset_of_btc,
                account.total_liability_of_btc,
                account.total_net_asset_of_btc
            );
            println!(
                "borrow: {}  trade: {}  transfer: {}",
                account.borrow_enabled, account.trade_enabled, account.transfer_enabled
            );
            for asset in account
                .user_assets
                .iter()
                .filter(|a| !a.net_asset.is_zero() || !a.borrowed.is_zero())
            {
                println!(
                    "{:>8} free {} locked {} borrowed {} interest {} net {}",
                    asset.asset,
                    asset.free,
                    asset.locked,
                    asset.borrowed,
                    asset.interest,
                    asset.net_asset
                );
            }
        }
        Err(e) => {
            error!(error = %e, api_code = ?e.api_code(), "failed to fetch margin account");
            return Err(e.into());
        }
    }

    Ok(())
}
