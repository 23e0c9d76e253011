use crate::etf::EtfClassifier;
use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// Hand-curated names that are always analysed regardless of what the
/// universe artifacts contain.
const SEED_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "AMD", "AVGO", "CRM", "NFLX", "JPM",
    "V", "MA", "UNH", "HD", "COST", "LLY", "ORCL",
];

#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub seed_symbols: Vec<String>,
    /// Cap on the ETF group
    pub max_etfs: usize,
    /// Cap on the daily-rotating random sample
    pub max_sample: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed_symbols: SEED_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            max_etfs: 30,
            max_sample: 150,
        }
    }
}

/// Three disjoint symbol groups produced from one universe
#[derive(Debug, Clone)]
pub struct UniverseSample {
    /// Fixed known-quality seed list
    pub core: Vec<String>,
    /// ETFs found in the universe, capped
    pub etfs: Vec<String>,
    /// Daily-rotating random sample of everything else
    pub rotating: Vec<String>,
}

impl UniverseSample {
    pub fn all_symbols(&self) -> Vec<String> {
        let mut all = self.core.clone();
        all.extend(self.etfs.iter().cloned());
        all.extend(self.rotating.iter().cloned());
        all
    }

    pub fn len(&self) -> usize {
        self.core.len() + self.etfs.len() + self.rotating.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions the universe into core/ETF/rotating groups. The rotating
/// sample's RNG is seeded by the calendar day-of-month: stable within a
/// day, different parts of the universe across days.
pub struct UniverseSampler {
    config: SamplerConfig,
    classifier: EtfClassifier,
}

impl UniverseSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            classifier: EtfClassifier::default(),
        }
    }

    pub fn partition_today(&self, universe: &[String]) -> UniverseSample {
        self.partition(universe, Utc::now().day())
    }

    pub fn partition(&self, universe: &[String], day_of_month: u32) -> UniverseSample {
        let seeds: HashSet<&str> = self.config.seed_symbols.iter().map(|s| s.as_str()).collect();

        let mut etfs = Vec::new();
        let mut pool = Vec::new();
        let mut seen = HashSet::new();

        for symbol in universe {
            if seeds.contains(symbol.as_str()) || !seen.insert(symbol.as_str()) {
                continue;
            }
            if self.classifier.is_etf(symbol) {
                if etfs.len() < self.config.max_etfs {
                    etfs.push(symbol.clone());
                }
            } else {
                pool.push(symbol.clone());
            }
        }

        let take = self.config.max_sample.min(pool.len());
        let mut rng = StdRng::seed_from_u64(day_of_month as u64);
        let rotating: Vec<String> = pool.choose_multiple(&mut rng, take).cloned().collect();

        tracing::debug!(
            "Universe sample (day {}): {} core, {} ETFs, {} rotating of {} pool",
            day_of_month,
            self.config.seed_symbols.len(),
            etfs.len(),
            rotating.len(),
            pool.len()
        );

        UniverseSample {
            core: self.config.seed_symbols.clone(),
            etfs,
            rotating,
        }
    }
}
