use analysis_core::AnalysisError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Last-resort universe when every artifact is missing or corrupt
const FALLBACK_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA", "META", "JPM", "SPY", "QQQ",
];

/// Cleaned-universe artifact: already excludes delisted/invalid tickers
#[derive(Debug, Deserialize)]
struct CleanedUniverse {
    symbols: Vec<String>,
    #[serde(default)]
    metadata: Option<CleanedMetadata>,
}

#[derive(Debug, Deserialize)]
struct CleanedMetadata {
    #[serde(default)]
    original_count: Option<usize>,
}

/// Raw market-data dump: category name -> list of ticker records.
/// BTreeMap keeps category iteration order stable across runs.
#[derive(Debug, Deserialize)]
struct MarketDataDump(BTreeMap<String, Vec<DumpRecord>>);

#[derive(Debug, Deserialize)]
struct DumpRecord {
    #[serde(default)]
    symbol: Option<String>,
}

/// One step of the fallback chain. Each step either yields a symbol list
/// or fails, and a failure only means "try the next source".
#[derive(Debug, Clone)]
pub enum UniverseSource {
    /// Pre-cleaned symbol list, used as-is
    CleanedArtifact(PathBuf),
    /// Broad market dump, filtered down to plausible tickers
    MarketDataDump(PathBuf),
    /// Hardcoded list of well-known tickers; never fails
    Builtin,
}

impl UniverseSource {
    fn load(&self) -> Result<Vec<String>, AnalysisError> {
        match self {
            UniverseSource::CleanedArtifact(path) => {
                let cleaned: CleanedUniverse = read_json(path)?;
                if let Some(count) = cleaned.metadata.as_ref().and_then(|m| m.original_count) {
                    tracing::info!(
                        "Cleaned universe: {} symbols ({} before cleaning)",
                        cleaned.symbols.len(),
                        count
                    );
                }
                Ok(cleaned.symbols)
            }
            UniverseSource::MarketDataDump(path) => {
                let dump: MarketDataDump = read_json(path)?;
                let mut symbols = Vec::new();
                for records in dump.0.values() {
                    for record in records {
                        if let Some(symbol) = &record.symbol {
                            if is_plausible_ticker(symbol) {
                                symbols.push(symbol.clone());
                            }
                        }
                    }
                }
                Ok(symbols)
            }
            UniverseSource::Builtin => {
                Ok(FALLBACK_SYMBOLS.iter().map(|s| s.to_string()).collect())
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AnalysisError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AnalysisError::ArtifactError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AnalysisError::ArtifactError(format!("{}: {}", path.display(), e)))
}

/// Index futures and the like come through as `$SPX`; anything long or
/// punctuated is an option chain or a data vendor quirk.
fn is_plausible_ticker(symbol: &str) -> bool {
    !symbol.starts_with('$')
        && !symbol.is_empty()
        && symbol.len() <= 5
        && symbol.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Resolves the analysis universe by walking an ordered source chain and
/// stopping at the first source that loads.
pub struct UniverseProvider {
    sources: Vec<UniverseSource>,
}

impl UniverseProvider {
    pub fn new(sources: Vec<UniverseSource>) -> Self {
        Self { sources }
    }

    /// Standard chain over a data directory: cleaned artifact, then raw
    /// dump, then the builtin list.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(vec![
            UniverseSource::CleanedArtifact(dir.join("cleaned_universe.json")),
            UniverseSource::MarketDataDump(dir.join("comprehensive_market_data.json")),
            UniverseSource::Builtin,
        ])
    }

    /// Ordered, deduplicated universe. Never empty: the builtin list is
    /// the floor even when every artifact is unreadable.
    pub fn load(&self) -> Vec<String> {
        for source in &self.sources {
            match source.load() {
                Ok(symbols) if !symbols.is_empty() => {
                    tracing::info!("Universe: {} symbols from {:?}", symbols.len(), source_name(source));
                    return dedupe(symbols);
                }
                Ok(_) => {
                    tracing::debug!("Universe source {:?} was empty, trying next", source_name(source));
                }
                Err(e) => {
                    tracing::debug!("Universe source unavailable ({:?}): {}", source_name(source), e);
                }
            }
        }
        dedupe(FALLBACK_SYMBOLS.iter().map(|s| s.to_string()).collect())
    }
}

fn source_name(source: &UniverseSource) -> &'static str {
    match source {
        UniverseSource::CleanedArtifact(_) => "cleaned_artifact",
        UniverseSource::MarketDataDump(_) => "market_data_dump",
        UniverseSource::Builtin => "builtin",
    }
}

fn dedupe(symbols: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
