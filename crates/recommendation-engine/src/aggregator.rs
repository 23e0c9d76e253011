use analysis_core::{RecommendationLabel, ScoreRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub max_stock_longs: usize,
    pub max_etf_longs: usize,
    pub max_shorts: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_stock_longs: 5,
            max_etf_longs: 5,
            max_shorts: 10,
        }
    }
}

/// One row of a ranked top list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    pub symbol: String,
    pub label: RecommendationLabel,
    pub confidence_pct: f64,
    pub current_price: f64,
}

impl From<&ScoreRecord> for RankedEntry {
    fn from(record: &ScoreRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            label: record.label,
            confidence_pct: record.confidence_pct,
            current_price: record.current_price,
        }
    }
}

/// Ranked, size-bounded output lists. Empty when scoring produced no
/// buy/sell candidates: an empty list is a legitimate terminal state and
/// is never backfilled with placeholder data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopLists {
    /// Top stock longs followed by top ETF longs
    pub longs: Vec<RankedEntry>,
    /// Top sell-class records regardless of stock/ETF split
    pub shorts: Vec<RankedEntry>,
}

/// Partition scored symbols into long/short and stock/ETF groups, rank by
/// confidence, and truncate to the configured sizes. The sort is stable,
/// so confidence ties keep their input order.
pub fn rank(records: &[ScoreRecord], config: &AggregatorConfig) -> TopLists {
    let mut stock_longs: Vec<RankedEntry> = Vec::new();
    let mut etf_longs: Vec<RankedEntry> = Vec::new();
    let mut shorts: Vec<RankedEntry> = Vec::new();

    for record in records {
        if record.label.is_buy_class() {
            if record.is_etf {
                etf_longs.push(record.into());
            } else {
                stock_longs.push(record.into());
            }
        } else if record.label.is_sell_class() {
            shorts.push(record.into());
        }
    }

    sort_by_confidence(&mut stock_longs);
    sort_by_confidence(&mut etf_longs);
    sort_by_confidence(&mut shorts);

    stock_longs.truncate(config.max_stock_longs);
    etf_longs.truncate(config.max_etf_longs);
    shorts.truncate(config.max_shorts);

    let mut longs = stock_longs;
    longs.extend(etf_longs);

    TopLists { longs, shorts }
}

fn sort_by_confidence(entries: &mut [RankedEntry]) {
    entries.sort_by(|a, b| {
        b.confidence_pct
            .partial_cmp(&a.confidence_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
