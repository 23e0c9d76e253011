use analysis_core::{AccountSummary, ConvictionEntry, Holding, PositionRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Account snapshot plus enriched position rows, ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioView {
    pub account: AccountSummary,
    /// Sorted by market value, largest first
    pub rows: Vec<PositionRow>,
    pub total_value: f64,
    pub total_pnl: f64,
}

/// Merge live position data with the resolved convictions. A holding
/// without a conviction entry gets the explicit no-data marker.
pub fn enrich(
    account: AccountSummary,
    holdings: &[Holding],
    convictions: &[ConvictionEntry],
) -> PortfolioView {
    let by_symbol: HashMap<&str, &ConvictionEntry> = convictions
        .iter()
        .map(|c| (c.symbol.as_str(), c))
        .collect();

    let mut rows: Vec<PositionRow> = holdings
        .iter()
        .map(|holding| {
            let conviction = by_symbol.get(holding.symbol.as_str());
            let fallback = ConvictionEntry::no_data(holding.symbol.clone());
            let conviction = conviction.copied().unwrap_or(&fallback);

            PositionRow {
                symbol: holding.symbol.clone(),
                quantity: holding.quantity,
                avg_cost: holding.avg_entry_price,
                current_price: holding.current_price,
                market_value: holding.market_value,
                unrealized_pl: holding.unrealized_pl,
                unrealized_pl_pct: holding.unrealized_pl_pct,
                conviction_pct: conviction.confidence_pct,
                conviction_label: conviction.label,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.market_value
            .partial_cmp(&a.market_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_value = rows.iter().map(|r| r.market_value).sum();
    let total_pnl = rows.iter().map(|r| r.unrealized_pl).sum();

    PortfolioView {
        account,
        rows,
        total_value,
        total_pnl,
    }
}
