pub mod config;
pub mod engine;
pub mod indicators;
pub mod jitter;

#[cfg(test)]
mod engine_tests;

pub use config::{LabelBands, ScoringConfig};
pub use engine::ScoringEngine;
