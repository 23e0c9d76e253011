use crate::config::ScoringConfig;
use crate::indicators::{pct_change_from, trailing_mean, volume_ratio};
use crate::jitter::symbol_jitter;
use analysis_core::{AnalysisError, Bar, HistoryProvider, ScoreRecord};
use std::sync::Arc;
use universe::EtfClassifier;

/// Trading-day lookbacks for the return calculations
const WEEKLY_LOOKBACK: usize = 5;
const MONTHLY_LOOKBACK: usize = 20;

/// Rule-based momentum/volume scorer. Symbols with too little history or
/// a failed fetch are skipped, never surfaced as errors: a scoring pass
/// always degrades to a smaller, still-valid result set.
pub struct ScoringEngine {
    provider: Arc<dyn HistoryProvider>,
    classifier: EtfClassifier,
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(provider: Arc<dyn HistoryProvider>, config: ScoringConfig) -> Self {
        Self {
            provider,
            classifier: EtfClassifier::default(),
            config,
        }
    }

    /// Score every symbol sequentially, in input order. Downstream ranking
    /// breaks confidence ties by input order, so completion order must not
    /// leak into the output.
    pub async fn score_universe(&self, symbols: &[String]) -> Vec<ScoreRecord> {
        let mut records = Vec::new();

        for symbol in symbols {
            match tokio::time::timeout(self.config.fetch_timeout, self.score_symbol(symbol)).await
            {
                Ok(Ok(record)) => records.push(record),
                Ok(Err(e)) => {
                    tracing::debug!("Skipping {}: {}", symbol, e);
                }
                Err(_) => {
                    tracing::debug!("Skipping {}: fetch timed out", symbol);
                }
            }
        }

        tracing::info!("Scored {}/{} symbols", records.len(), symbols.len());
        records
    }

    async fn score_symbol(&self, symbol: &str) -> Result<ScoreRecord, AnalysisError> {
        let bars = self
            .provider
            .daily_history(symbol, self.config.history_days)
            .await?;

        if bars.len() < self.config.min_samples {
            return Err(AnalysisError::InsufficientData(format!(
                "{}: {} samples, need {}",
                symbol,
                bars.len(),
                self.config.min_samples
            )));
        }

        // Snapshot close is authoritative when present; a snapshot failure
        // falls back to the last history close rather than skipping.
        let snapshot = self.provider.latest_close(symbol).await.ok().flatten();

        Ok(self.build_record(symbol, snapshot, &bars))
    }

    fn build_record(&self, symbol: &str, snapshot: Option<f64>, bars: &[Bar]) -> ScoreRecord {
        let cfg = &self.config;
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        let last_close = *closes.last().unwrap_or(&0.0);
        let current_price = snapshot.unwrap_or(last_close);

        let sma_short = trailing_mean(&closes, cfg.short_window).unwrap_or(last_close);
        // 50-period average falls back to the 20-period value on short series
        let sma_long = trailing_mean(&closes, cfg.long_window).unwrap_or(sma_short);

        let weekly_return = pct_change_from(&closes, current_price, WEEKLY_LOOKBACK);
        let monthly_return = pct_change_from(&closes, current_price, MONTHLY_LOOKBACK);
        let vol_ratio = volume_ratio(&volumes, WEEKLY_LOOKBACK, MONTHLY_LOOKBACK);

        let mut score = cfg.base_score;

        if current_price > sma_short {
            score += cfg.ma_bonus;
        }
        if current_price > sma_long {
            score += cfg.ma_bonus;
        }

        score += band_adjustment(
            monthly_return,
            &cfg.monthly_gain_bands,
            &cfg.monthly_loss_bands,
        );
        score += band_adjustment(
            weekly_return,
            &cfg.weekly_gain_bands,
            &cfg.weekly_loss_bands,
        );

        if vol_ratio > cfg.volume_surge.0 {
            score += cfg.volume_surge.1;
        } else if vol_ratio > cfg.volume_elevated.0 {
            score += cfg.volume_elevated.1;
        }

        if monthly_return < 0.0 {
            if let Some(penalty) = cfg.downtrend_penalties.get(symbol) {
                tracing::debug!("{}: unreliable-symbol penalty -{}", symbol, penalty);
                score -= penalty;
            }
        }

        let adjusted_score = score + symbol_jitter(symbol, cfg.jitter_span) as f64;
        let confidence_pct = (adjusted_score / cfg.score_ceiling * 100.0).clamp(0.0, 100.0);

        ScoreRecord {
            symbol: symbol.to_string(),
            score,
            adjusted_score,
            confidence_pct,
            confidence: confidence_pct / 100.0,
            // Label comes from the unadjusted score: jitter never flips it
            label: cfg.labels.label_for(score),
            current_price,
            weekly_return_pct: weekly_return,
            monthly_return_pct: monthly_return,
            is_etf: self.classifier.is_etf(symbol),
        }
    }
}

/// First matching gain band (`value > threshold`) wins; otherwise first
/// matching loss band (`value < threshold`); otherwise 0.
fn band_adjustment(value: f64, gains: &[(f64, f64)], losses: &[(f64, f64)]) -> f64 {
    for (threshold, adjustment) in gains {
        if value > *threshold {
            return *adjustment;
        }
    }
    for (threshold, adjustment) in losses {
        if value < *threshold {
            return *adjustment;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::band_adjustment;

    #[test]
    fn monthly_bands_follow_thresholds() {
        let gains = vec![(15.0, 25.0), (10.0, 20.0), (5.0, 15.0), (0.0, 10.0)];
        let losses = vec![(-15.0, -25.0), (-10.0, -20.0), (-5.0, -10.0)];

        assert_eq!(band_adjustment(20.0, &gains, &losses), 25.0);
        assert_eq!(band_adjustment(12.0, &gains, &losses), 20.0);
        assert_eq!(band_adjustment(7.0, &gains, &losses), 15.0);
        assert_eq!(band_adjustment(2.0, &gains, &losses), 10.0);
        assert_eq!(band_adjustment(0.0, &gains, &losses), 0.0);
        assert_eq!(band_adjustment(-3.0, &gains, &losses), 0.0);
        assert_eq!(band_adjustment(-7.0, &gains, &losses), -10.0);
        assert_eq!(band_adjustment(-12.0, &gains, &losses), -20.0);
        assert_eq!(band_adjustment(-20.0, &gains, &losses), -25.0);
    }
}
