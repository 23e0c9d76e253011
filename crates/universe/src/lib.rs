//! Universe resolution and sampling.
//!
//! The provider resolves the candidate symbol set from an ordered chain of
//! sources, each a fallback for the previous. The sampler splits that set
//! into a hand-curated core, an ETF group, and a daily-rotating random
//! sample so a single pass stays bounded in cost.

pub mod etf;
pub mod provider;
pub mod sampler;

pub use etf::EtfClassifier;
pub use provider::{UniverseProvider, UniverseSource};
pub use sampler::{SamplerConfig, UniverseSample, UniverseSampler};
