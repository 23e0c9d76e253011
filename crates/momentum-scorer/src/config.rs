use analysis_core::RecommendationLabel;
use std::collections::HashMap;
use std::time::Duration;

/// Label thresholds applied to the unadjusted score, so the per-symbol
/// jitter can never flip a recommendation.
#[derive(Debug, Clone)]
pub struct LabelBands {
    pub strong_buy: f64,
    pub buy: f64,
    pub hold: f64,
    pub sell: f64,
}

impl Default for LabelBands {
    fn default() -> Self {
        Self {
            strong_buy: 85.0,
            buy: 75.0,
            hold: 55.0,
            sell: 40.0,
        }
    }
}

impl LabelBands {
    pub fn label_for(&self, score: f64) -> RecommendationLabel {
        if score >= self.strong_buy {
            RecommendationLabel::StrongBuy
        } else if score >= self.buy {
            RecommendationLabel::Buy
        } else if score >= self.hold {
            RecommendationLabel::Hold
        } else if score >= self.sell {
            RecommendationLabel::Sell
        } else {
            RecommendationLabel::StrongSell
        }
    }
}

/// Immutable scoring policy. The coefficients are a hand-tuned, fixed
/// policy, passed in explicitly rather than read from ambient state.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Calendar days of daily history to request (three months)
    pub history_days: i64,
    /// Below this many samples a symbol is skipped, not scored
    pub min_samples: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub base_score: f64,
    /// Added once per moving average the current price sits above
    pub ma_bonus: f64,
    /// Monthly-return bonus bands: first `return > threshold` wins
    pub monthly_gain_bands: Vec<(f64, f64)>,
    /// Monthly-return penalty bands: first `return < threshold` wins
    pub monthly_loss_bands: Vec<(f64, f64)>,
    pub weekly_gain_bands: Vec<(f64, f64)>,
    pub weekly_loss_bands: Vec<(f64, f64)>,
    /// (ratio threshold, bonus) for strong volume confirmation
    pub volume_surge: (f64, f64),
    /// (ratio threshold, bonus) for mild volume confirmation
    pub volume_elevated: (f64, f64),
    /// Nominal top of the additive score range, used for the confidence rescale
    pub score_ceiling: f64,
    /// Jitter is drawn from [-jitter_span, +jitter_span]
    pub jitter_span: i64,
    /// Exception table: symbols with historically unreliable prints take
    /// this extra penalty whenever their monthly return is negative.
    pub downtrend_penalties: HashMap<String, f64>,
    /// Per-symbol budget for history + snapshot fetches; a timeout is
    /// treated exactly like a fetch failure
    pub fetch_timeout: Duration,
    pub labels: LabelBands,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            history_days: 92,
            min_samples: 20,
            short_window: 20,
            long_window: 50,
            base_score: 50.0,
            ma_bonus: 15.0,
            monthly_gain_bands: vec![(15.0, 25.0), (10.0, 20.0), (5.0, 15.0), (0.0, 10.0)],
            monthly_loss_bands: vec![(-15.0, -25.0), (-10.0, -20.0), (-5.0, -10.0)],
            weekly_gain_bands: vec![(5.0, 15.0), (3.0, 10.0), (0.0, 5.0)],
            weekly_loss_bands: vec![(-5.0, -15.0), (-3.0, -10.0)],
            volume_surge: (1.5, 10.0),
            volume_elevated: (1.2, 5.0),
            score_ceiling: 130.0,
            jitter_span: 5,
            // SMCI: repeated restatement/guidance issues made its rallies
            // unreliable; penalize it while its monthly trend is negative.
            downtrend_penalties: HashMap::from([("SMCI".to_string(), 15.0)]),
            fetch_timeout: Duration::from_secs(20),
            labels: LabelBands::default(),
        }
    }
}
