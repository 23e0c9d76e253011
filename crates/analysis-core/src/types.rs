use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily close/volume sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub volume: f64,
}

/// Discrete recommendation derived from the unadjusted momentum score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationLabel {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl RecommendationLabel {
    pub fn is_buy_class(&self) -> bool {
        matches!(self, RecommendationLabel::Buy | RecommendationLabel::StrongBuy)
    }

    pub fn is_sell_class(&self) -> bool {
        matches!(self, RecommendationLabel::Sell | RecommendationLabel::StrongSell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationLabel::StrongBuy => "STRONG_BUY",
            RecommendationLabel::Buy => "BUY",
            RecommendationLabel::Hold => "HOLD",
            RecommendationLabel::Sell => "SELL",
            RecommendationLabel::StrongSell => "STRONG_SELL",
        }
    }
}

/// Scored symbol produced by one scoring pass. Immutable once built;
/// never persisted by the core itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub symbol: String,
    /// Raw additive score, nominal range 0-130
    pub score: f64,
    /// Score after per-symbol jitter; used for the confidence rescale only
    pub adjusted_score: f64,
    pub confidence_pct: f64,
    /// confidence_pct / 100, kept for downstream arithmetic
    pub confidence: f64,
    pub label: RecommendationLabel,
    pub current_price: f64,
    pub weekly_return_pct: f64,
    pub monthly_return_pct: f64,
    pub is_etf: bool,
}

/// Where a resolved conviction reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvictionSource {
    Overnight,
    Live,
    NoData,
}

/// Conviction label: a recommendation, or an explicit no-data marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConvictionLabel {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    NoData,
}

impl From<RecommendationLabel> for ConvictionLabel {
    fn from(label: RecommendationLabel) -> Self {
        match label {
            RecommendationLabel::StrongBuy => ConvictionLabel::StrongBuy,
            RecommendationLabel::Buy => ConvictionLabel::Buy,
            RecommendationLabel::Hold => ConvictionLabel::Hold,
            RecommendationLabel::Sell => ConvictionLabel::Sell,
            RecommendationLabel::StrongSell => ConvictionLabel::StrongSell,
        }
    }
}

/// Best-available conviction reading for a held symbol, resolved once per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvictionEntry {
    pub symbol: String,
    pub confidence_pct: f64,
    pub label: ConvictionLabel,
    pub source: ConvictionSource,
}

impl ConvictionEntry {
    pub fn no_data(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            confidence_pct: 0.0,
            label: ConvictionLabel::NoData,
            source: ConvictionSource::NoData,
        }
    }
}

/// A brokerage-reported holding, normalized to numeric fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    pub avg_entry_price: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub unrealized_pl: f64,
    pub unrealized_pl_pct: f64,
}

/// Account equity/cash snapshot from the position feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub equity: f64,
    pub cash: f64,
    pub margin_used: f64,
    pub margin_pct: f64,
}

impl AccountSummary {
    /// Negative cash means the account is on margin
    pub fn new(equity: f64, cash: f64) -> Self {
        let margin_used = if cash < 0.0 { cash.abs() } else { 0.0 };
        let margin_pct = if equity > 0.0 {
            margin_used / equity * 100.0
        } else {
            0.0
        };
        Self {
            equity,
            cash,
            margin_used,
            margin_pct,
        }
    }
}

/// Display-ready position row: a holding merged with its resolved conviction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRow {
    pub symbol: String,
    pub quantity: f64,
    pub avg_cost: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub unrealized_pl: f64,
    pub unrealized_pl_pct: f64,
    pub conviction_pct: f64,
    pub conviction_label: ConvictionLabel,
}
