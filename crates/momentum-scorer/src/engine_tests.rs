use crate::config::ScoringConfig;
use crate::engine::ScoringEngine;
use analysis_core::{AnalysisError, Bar, HistoryProvider, RecommendationLabel};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

struct MockHistory {
    bars: HashMap<String, Vec<Bar>>,
    latest: HashMap<String, f64>,
    failing: HashSet<String>,
}

impl MockHistory {
    fn new() -> Self {
        Self {
            bars: HashMap::new(),
            latest: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    fn with_series(mut self, symbol: &str, closes: Vec<f64>, volumes: Vec<f64>) -> Self {
        let bars = closes
            .into_iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (close, volume))| Bar {
                timestamp: Utc::now() - chrono::Duration::days(90 - i as i64),
                close,
                volume,
            })
            .collect();
        self.bars.insert(symbol.to_string(), bars);
        self
    }

    fn with_latest(mut self, symbol: &str, close: f64) -> Self {
        self.latest.insert(symbol.to_string(), close);
        self
    }

    fn with_failure(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }
}

#[async_trait]
impl HistoryProvider for MockHistory {
    async fn daily_history(&self, symbol: &str, _days_back: i64) -> Result<Vec<Bar>, AnalysisError> {
        if self.failing.contains(symbol) {
            return Err(AnalysisError::ApiError("connection reset".to_string()));
        }
        self.bars
            .get(symbol)
            .cloned()
            .ok_or_else(|| AnalysisError::ApiError(format!("no data for {}", symbol)))
    }

    async fn latest_close(&self, symbol: &str) -> Result<Option<f64>, AnalysisError> {
        Ok(self.latest.get(symbol).copied())
    }
}

fn engine(provider: MockHistory) -> ScoringEngine {
    ScoringEngine::new(Arc::new(provider), ScoringConfig::default())
}

/// 60 closes where the current price of 120 is +20% monthly, +6% weekly,
/// and above both moving averages
fn bullish_closes() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..60).map(|i| 95.0 + i as f64 * 0.4).collect();
    closes[40] = 100.0; // 20 samples back
    closes[55] = 120.0 / 1.06; // 5 samples back
    closes
}

/// Volume ratio of exactly 1.6: last 5 sessions at double the baseline
fn surging_volumes() -> Vec<f64> {
    let mut volumes = vec![1_000_000.0; 55];
    volumes.extend(vec![2_000_000.0; 5]);
    volumes
}

#[tokio::test]
async fn strong_momentum_maxes_the_score() {
    let provider = MockHistory::new()
        .with_series("XYZ", bullish_closes(), surging_volumes())
        .with_latest("XYZ", 120.0);

    let records = engine(provider).score_universe(&["XYZ".to_string()]).await;
    assert_eq!(records.len(), 1);

    let record = &records[0];
    // 50 base + 15 + 15 MAs + 25 monthly + 15 weekly + 10 volume
    assert!((record.score - 130.0).abs() < 1e-9);
    assert_eq!(record.label, RecommendationLabel::StrongBuy);
    assert!(record.confidence_pct > 90.0 && record.confidence_pct <= 100.0);
    assert!(!record.is_etf);
}

#[tokio::test]
async fn confidence_clamps_at_one_hundred_above_the_ceiling() {
    // A ceiling below the max score guarantees adjusted_score overshoots
    // it whatever sign the jitter takes
    let config = ScoringConfig {
        score_ceiling: 100.0,
        ..ScoringConfig::default()
    };

    let provider = MockHistory::new()
        .with_series("XYZ", bullish_closes(), surging_volumes())
        .with_latest("XYZ", 120.0);

    let records = ScoringEngine::new(Arc::new(provider), config)
        .score_universe(&["XYZ".to_string()])
        .await;

    let record = &records[0];
    assert!(record.adjusted_score > 100.0);
    assert_eq!(record.confidence_pct, 100.0);
    assert_eq!(record.confidence, 1.0);
}

#[tokio::test]
async fn short_history_is_skipped_not_failed() {
    let provider = MockHistory::new()
        .with_series("NEWCO", vec![10.0; 19], vec![1000.0; 19])
        .with_series("XYZ", bullish_closes(), surging_volumes())
        .with_latest("XYZ", 120.0);

    let records = engine(provider)
        .score_universe(&["NEWCO".to_string(), "XYZ".to_string()])
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].symbol, "XYZ");
}

#[tokio::test]
async fn short_series_long_ma_falls_back_to_short_ma_above() {
    // 30 bars: enough for the 20-period average, not the 50-period one.
    // Flat closes at 100 with a 120 snapshot: both MA checks must see
    // the same 100.0 average and both bonuses must land.
    let provider = MockHistory::new()
        .with_series("MIDCO", vec![100.0; 30], vec![1_000_000.0; 30])
        .with_latest("MIDCO", 120.0);

    let records = engine(provider).score_universe(&["MIDCO".to_string()]).await;
    assert_eq!(records.len(), 1);

    // 50 base + 15 + 15 MAs + 25 monthly (+20%) + 15 weekly (+20%)
    assert!((records[0].score - 120.0).abs() < 1e-9);
}

#[tokio::test]
async fn short_series_long_ma_falls_back_to_short_ma_below() {
    // Same 30-bar shape with the price below the average: neither MA
    // bonus may fire. A fallback to zero instead of the 20-period value
    // would leak a spurious +15 here.
    let provider = MockHistory::new()
        .with_series("MIDCO", vec![130.0; 30], vec![1_000_000.0; 30])
        .with_latest("MIDCO", 120.0);

    let records = engine(provider).score_universe(&["MIDCO".to_string()]).await;
    assert_eq!(records.len(), 1);

    // 50 base - 10 monthly (-7.7%) - 15 weekly (-7.7%), no MA bonuses
    assert!((records[0].score - 25.0).abs() < 1e-9);
}

#[tokio::test]
async fn fetch_failure_drops_only_that_symbol() {
    let provider = MockHistory::new()
        .with_failure("FLAKY")
        .with_series("XYZ", bullish_closes(), surging_volumes())
        .with_latest("XYZ", 120.0);

    let records = engine(provider)
        .score_universe(&["FLAKY".to_string(), "XYZ".to_string()])
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].symbol, "XYZ");
}

#[tokio::test]
async fn snapshot_failure_falls_back_to_last_close() {
    // No latest_close registered: current price must be the last history close
    let provider = MockHistory::new().with_series("XYZ", bullish_closes(), surging_volumes());

    let records = engine(provider).score_universe(&["XYZ".to_string()]).await;
    assert_eq!(records.len(), 1);
    let expected = bullish_closes()[59];
    assert!((records[0].current_price - expected).abs() < 1e-9);
}

#[tokio::test]
async fn scoring_is_deterministic_per_symbol() {
    let build = || {
        MockHistory::new()
            .with_series("XYZ", bullish_closes(), surging_volumes())
            .with_latest("XYZ", 120.0)
    };

    let first = engine(build()).score_universe(&["XYZ".to_string()]).await;
    let second = engine(build()).score_universe(&["XYZ".to_string()]).await;

    assert_eq!(first[0].adjusted_score, second[0].adjusted_score);
    assert_eq!(first[0].confidence_pct, second[0].confidence_pct);
    assert_eq!(first[0].label, second[0].label);
}

#[tokio::test]
async fn jitter_never_moves_the_label() {
    let provider = MockHistory::new()
        .with_series("XYZ", bullish_closes(), surging_volumes())
        .with_latest("XYZ", 120.0);

    let records = engine(provider).score_universe(&["XYZ".to_string()]).await;
    let record = &records[0];

    assert!((record.adjusted_score - record.score).abs() <= 5.0);
    assert_eq!(
        record.label,
        ScoringConfig::default().labels.label_for(record.score)
    );
}

/// Declining series: current price of 120 is -20% monthly, -6% weekly,
/// and below both moving averages
fn bearish_closes() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..60).map(|i| 160.0 - i as f64 * 0.5).collect();
    closes[40] = 150.0;
    closes[55] = 120.0 / 0.94;
    closes
}

#[tokio::test]
async fn deep_downtrend_clamps_confidence_at_zero() {
    let mut config = ScoringConfig::default();
    config
        .downtrend_penalties
        .insert("BADCO".to_string(), 60.0);

    let provider = MockHistory::new()
        .with_series("BADCO", bearish_closes(), vec![1_000_000.0; 60])
        .with_latest("BADCO", 120.0);

    let records = ScoringEngine::new(Arc::new(provider), config)
        .score_universe(&["BADCO".to_string()])
        .await;

    let record = &records[0];
    // 50 base - 25 monthly - 15 weekly - 60 penalty
    assert!(record.score < 0.0);
    assert_eq!(record.confidence_pct, 0.0);
    assert_eq!(record.label, RecommendationLabel::StrongSell);
}

#[tokio::test]
async fn unreliable_penalty_only_applies_in_downtrends() {
    let mut config = ScoringConfig::default();
    config
        .downtrend_penalties
        .insert("XYZ".to_string(), 15.0);

    let provider = MockHistory::new()
        .with_series("XYZ", bullish_closes(), surging_volumes())
        .with_latest("XYZ", 120.0);

    let records = ScoringEngine::new(Arc::new(provider), config)
        .score_universe(&["XYZ".to_string()])
        .await;

    // Monthly return is positive, so the exception table stays dormant
    assert!((records[0].score - 130.0).abs() < 1e-9);
}

#[tokio::test]
async fn etf_symbols_are_flagged() {
    let provider = MockHistory::new()
        .with_series("SPY", bullish_closes(), surging_volumes())
        .with_latest("SPY", 120.0);

    let records = engine(provider).score_universe(&["SPY".to_string()]).await;
    assert!(records[0].is_etf);
}
