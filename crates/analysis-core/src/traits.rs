use crate::{AccountSummary, AnalysisError, Bar, Holding};
use async_trait::async_trait;

/// Trait for market history providers. A per-symbol failure is expected
/// and handled by the caller; it never aborts a scoring pass.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Ordered daily close/volume series covering `days_back` calendar days
    async fn daily_history(&self, symbol: &str, days_back: i64) -> Result<Vec<Bar>, AnalysisError>;

    /// Most recent daily close, if the provider has one
    async fn latest_close(&self, symbol: &str) -> Result<Option<f64>, AnalysisError>;
}

/// Read-only brokerage account/position feed
#[async_trait]
pub trait PositionFeed: Send + Sync {
    async fn account_summary(&self) -> Result<AccountSummary, AnalysisError>;

    async fn open_positions(&self) -> Result<Vec<Holding>, AnalysisError>;
}
