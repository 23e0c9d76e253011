//! analysis-cli: run one momentum analysis session and print the report.
//!
//! Resolves the universe from local artifacts (with fallbacks), scores a
//! bounded daily sample against Polygon history, ranks top longs/shorts,
//! and - when Alpaca credentials are present - attaches per-position
//! conviction figures from the latest overnight run.
//!
//! Usage:
//!   cargo run -p analysis-cli
//!   cargo run -p analysis-cli -- --data-dir data --overnight-dir data/overnight
//!   cargo run -p analysis-cli -- --no-positions

use alpaca_feed::AlpacaClient;
use analysis_core::PositionFeed;
use market_data::PolygonClient;
use momentum_scorer::{ScoringConfig, ScoringEngine};
use recommendation_engine::{AggregatorConfig, ConvictionResolver, RecommendationEngine};
use std::sync::Arc;
use universe::{SamplerConfig, UniverseProvider, UniverseSampler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analysis_cli=info,recommendation_engine=info,momentum_scorer=info,universe=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let no_positions = args.iter().any(|a| a == "--no-positions");

    let data_dir = args
        .iter()
        .position(|a| a == "--data-dir")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
        .unwrap_or("data")
        .to_string();

    let overnight_dir = args
        .iter()
        .position(|a| a == "--overnight-dir")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}/overnight", data_dir));

    let api_key = std::env::var("POLYGON_API_KEY")
        .map_err(|_| anyhow::anyhow!("POLYGON_API_KEY must be set"))?;

    let engine = RecommendationEngine::new(
        UniverseProvider::from_data_dir(&data_dir),
        UniverseSampler::new(SamplerConfig::default()),
        ScoringEngine::new(Arc::new(PolygonClient::new(api_key)), ScoringConfig::default()),
        ConvictionResolver::new(overnight_dir),
        AggregatorConfig::default(),
    );

    // Positions are optional: without broker credentials the session
    // still produces the ranked top lists.
    let feed: Option<AlpacaClient> = if no_positions {
        None
    } else {
        match AlpacaClient::from_env() {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Running without positions: {}", e);
                None
            }
        }
    };

    let report = engine
        .run_session(feed.as_ref().map(|c| c as &dyn PositionFeed))
        .await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
