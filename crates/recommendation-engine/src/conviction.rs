use analysis_core::{ConvictionEntry, ConvictionSource, RecommendationLabel, ScoreRecord};
use serde::Deserialize;
use std::path::PathBuf;

/// Overnight artifacts are named `overnight_analysis_<run_id>.json` where
/// the run id is a sortable timestamp.
const ARTIFACT_PREFIX: &str = "overnight_analysis_";

#[derive(Debug, Deserialize)]
struct OvernightEntry {
    symbol: String,
    /// Confidence percentage, 0-100
    confidence: f64,
    recommendation: RecommendationLabel,
}

#[derive(Debug, Deserialize)]
struct OvernightArtifact {
    #[serde(default)]
    all_recommendations: Vec<OvernightEntry>,
    #[serde(default)]
    top_100_longs: Vec<OvernightEntry>,
    #[serde(default)]
    top_100_shorts: Vec<OvernightEntry>,
}

impl OvernightArtifact {
    fn find(&self, symbol: &str) -> Option<&OvernightEntry> {
        self.all_recommendations
            .iter()
            .chain(self.top_100_longs.iter())
            .chain(self.top_100_shorts.iter())
            .find(|entry| entry.symbol == symbol)
    }
}

/// Resolves a best-available conviction reading for each held symbol,
/// preferring the persisted overnight analysis over the live pass.
pub struct ConvictionResolver {
    artifact_dir: PathBuf,
}

impl ConvictionResolver {
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
        }
    }

    /// Lexicographically-last matching filename approximates "most
    /// recent". That only holds while run ids stay zero-padded and
    /// sortable; a non-sortable name would silently pick the wrong run.
    fn latest_artifact_path(&self) -> Option<PathBuf> {
        let entries = std::fs::read_dir(&self.artifact_dir).ok()?;
        entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(ARTIFACT_PREFIX) && n.ends_with(".json"))
                    .unwrap_or(false)
            })
            .max()
    }

    /// Any read/parse failure is "no overnight data", never an error
    fn load_latest(&self) -> Option<OvernightArtifact> {
        let path = self.latest_artifact_path()?;
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Overnight artifact unreadable ({}): {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(artifact) => {
                tracing::info!("Using overnight analysis from {}", path.display());
                Some(artifact)
            }
            Err(e) => {
                tracing::debug!("Overnight artifact corrupt ({}): {}", path.display(), e);
                None
            }
        }
    }

    /// Exactly one entry per held symbol: overnight value if the symbol
    /// appears in the artifact, else the live record, else NO_DATA.
    pub fn resolve(&self, held: &[String], live: &[ScoreRecord]) -> Vec<ConvictionEntry> {
        let overnight = self.load_latest();

        held.iter()
            .map(|symbol| {
                if let Some(entry) = overnight.as_ref().and_then(|a| a.find(symbol)) {
                    return ConvictionEntry {
                        symbol: symbol.clone(),
                        confidence_pct: entry.confidence,
                        label: entry.recommendation.into(),
                        source: ConvictionSource::Overnight,
                    };
                }
                if let Some(record) = live.iter().find(|r| &r.symbol == symbol) {
                    return ConvictionEntry {
                        symbol: symbol.clone(),
                        confidence_pct: record.confidence_pct,
                        label: record.label.into(),
                        source: ConvictionSource::Live,
                    };
                }
                ConvictionEntry::no_data(symbol.clone())
            })
            .collect()
    }
}
