use crate::models::{Account, Position};
use analysis_core::{AccountSummary, AnalysisError, Holding, PositionFeed};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;

pub struct AlpacaClient {
    client: Client,
    base_url: String,
    api_key: String,
    secret_key: String,
}

impl AlpacaClient {
    pub fn new(api_key: String, secret_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
            secret_key,
        })
    }

    /// Create client from environment variables.
    /// Accepts both APCA_API_KEY_ID / APCA_API_SECRET_KEY (standard Alpaca names)
    /// and ALPACA_API_KEY / ALPACA_SECRET_KEY as fallbacks.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("APCA_API_KEY_ID")
            .or_else(|_| std::env::var("ALPACA_API_KEY"))
            .map_err(|_| anyhow!("APCA_API_KEY_ID (or ALPACA_API_KEY) not set"))?;
        let secret_key = std::env::var("APCA_API_SECRET_KEY")
            .or_else(|_| std::env::var("ALPACA_SECRET_KEY"))
            .map_err(|_| anyhow!("APCA_API_SECRET_KEY (or ALPACA_SECRET_KEY) not set"))?;
        let base_url = std::env::var("ALPACA_BASE_URL")
            .unwrap_or_else(|_| "https://paper-api.alpaca.markets".to_string());

        Self::new(api_key, secret_key, base_url)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(&self.api_key)
                .map_err(|_| anyhow!("API key contains invalid header characters"))?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(&self.secret_key)
                .map_err(|_| anyhow!("Secret key contains invalid header characters"))?,
        );
        Ok(headers)
    }

    pub async fn get_account(&self) -> Result<Account> {
        let url = format!("{}/v2/account", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Alpaca API error: {}", error_text));
        }

        let account = response.json::<Account>().await?;
        Ok(account)
    }

    pub async fn get_positions(&self) -> Result<Vec<Position>> {
        let url = format!("{}/v2/positions", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Failed to get positions: {}", error_text));
        }

        let positions = response.json::<Vec<Position>>().await?;
        Ok(positions)
    }
}

fn parse_money(field: &str, value: &str) -> Result<f64, AnalysisError> {
    value
        .parse::<f64>()
        .map_err(|_| AnalysisError::InvalidData(format!("unparseable {}: {:?}", field, value)))
}

pub(crate) fn holding_from_position(pos: &Position) -> Result<Holding, AnalysisError> {
    Ok(Holding {
        symbol: pos.symbol.clone(),
        quantity: parse_money("qty", &pos.qty)?,
        avg_entry_price: parse_money("avg_entry_price", &pos.avg_entry_price)?,
        current_price: parse_money("current_price", &pos.current_price)?,
        market_value: parse_money("market_value", &pos.market_value)?,
        unrealized_pl: parse_money("unrealized_pl", &pos.unrealized_pl)?,
        // Alpaca reports plpc as a fraction; the feed exposes percent
        unrealized_pl_pct: parse_money("unrealized_plpc", &pos.unrealized_plpc)? * 100.0,
    })
}

#[async_trait]
impl PositionFeed for AlpacaClient {
    async fn account_summary(&self) -> Result<AccountSummary, AnalysisError> {
        let account = self
            .get_account()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        let equity = parse_money("equity", &account.equity)?;
        let cash = parse_money("cash", &account.cash)?;
        Ok(AccountSummary::new(equity, cash))
    }

    async fn open_positions(&self) -> Result<Vec<Holding>, AnalysisError> {
        let positions = self
            .get_positions()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        let mut holdings = Vec::with_capacity(positions.len());
        for pos in &positions {
            match holding_from_position(pos) {
                Ok(h) => holdings.push(h),
                Err(e) => {
                    tracing::warn!("Skipping malformed position {}: {}", pos.symbol, e);
                }
            }
        }
        Ok(holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_position() -> Position {
        Position {
            symbol: "AAPL".to_string(),
            qty: "12".to_string(),
            side: "long".to_string(),
            avg_entry_price: "171.25".to_string(),
            current_price: "175.00".to_string(),
            market_value: "2100.00".to_string(),
            cost_basis: "2055.00".to_string(),
            unrealized_pl: "45.00".to_string(),
            unrealized_plpc: "0.0219".to_string(),
        }
    }

    #[test]
    fn holding_parses_decimal_strings() {
        let holding = holding_from_position(&sample_position()).unwrap();
        assert_eq!(holding.quantity, 12.0);
        assert_eq!(holding.avg_entry_price, 171.25);
        assert_eq!(holding.market_value, 2100.0);
        assert!((holding.unrealized_pl_pct - 2.19).abs() < 1e-9);
    }

    #[test]
    fn holding_rejects_garbage_fields() {
        let mut pos = sample_position();
        pos.qty = "n/a".to_string();
        assert!(holding_from_position(&pos).is_err());
    }
}
