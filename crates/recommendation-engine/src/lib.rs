//! Session orchestration: universe -> sample -> score -> rank, plus the
//! conviction/position enrichment for whatever the account currently holds.

pub mod aggregator;
pub mod conviction;
pub mod positions;


pub use aggregator::{rank, AggregatorConfig, RankedEntry, TopLists};
pub use conviction::ConvictionResolver;
pub use positions::{enrich, PortfolioView};

use analysis_core::PositionFeed;
use chrono::{DateTime, Utc};
use momentum_scorer::ScoringEngine;
use serde::{Deserialize, Serialize};
use universe::{UniverseProvider, UniverseSampler};

/// Everything one analysis session produced
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionReport {
    pub timestamp: DateTime<Utc>,
    pub universe_size: usize,
    pub symbols_selected: usize,
    pub symbols_scored: usize,
    pub top: TopLists,
    /// Present only when a position feed was supplied and reachable
    pub portfolio: Option<PortfolioView>,
    pub elapsed_seconds: f64,
}

pub struct RecommendationEngine {
    universe_provider: UniverseProvider,
    sampler: UniverseSampler,
    scorer: ScoringEngine,
    resolver: ConvictionResolver,
    aggregator: AggregatorConfig,
}

impl RecommendationEngine {
    pub fn new(
        universe_provider: UniverseProvider,
        sampler: UniverseSampler,
        scorer: ScoringEngine,
        resolver: ConvictionResolver,
        aggregator: AggregatorConfig,
    ) -> Self {
        Self {
            universe_provider,
            sampler,
            scorer,
            resolver,
            aggregator,
        }
    }

    /// Run one full analysis session. Every failure mode inside the pass
    /// degrades to a smaller result set; this never returns an error.
    pub async fn run_session(&self, feed: Option<&dyn PositionFeed>) -> SessionReport {
        let started = std::time::Instant::now();
        let timestamp = Utc::now();

        let universe = self.universe_provider.load();
        let sample = self.sampler.partition_today(&universe);
        let symbols = sample.all_symbols();

        tracing::info!(
            "Session start: universe {}, analysing {} symbols",
            universe.len(),
            symbols.len()
        );

        let records = self.scorer.score_universe(&symbols).await;
        let top = rank(&records, &self.aggregator);

        let portfolio = match feed {
            Some(feed) => self.build_portfolio(feed, &records).await,
            None => None,
        };

        tracing::info!(
            "Session done in {:.1}s: {} longs, {} shorts",
            started.elapsed().as_secs_f64(),
            top.longs.len(),
            top.shorts.len()
        );

        SessionReport {
            timestamp,
            universe_size: universe.len(),
            symbols_selected: symbols.len(),
            symbols_scored: records.len(),
            top,
            portfolio,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        }
    }

    async fn build_portfolio(
        &self,
        feed: &dyn PositionFeed,
        records: &[analysis_core::ScoreRecord],
    ) -> Option<PortfolioView> {
        let account = match feed.account_summary().await {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!("Position feed unavailable (account): {}", e);
                return None;
            }
        };
        let holdings = match feed.open_positions().await {
            Ok(holdings) => holdings,
            Err(e) => {
                tracing::warn!("Position feed unavailable (positions): {}", e);
                return None;
            }
        };

        let held: Vec<String> = holdings.iter().map(|h| h.symbol.clone()).collect();
        let convictions = self.resolver.resolve(&held, records);

        Some(enrich(account, &holdings, &convictions))
    }
}
