//! Configuration types and loading.
//!
//! Provides all configuration structures for rule-pilot:
//! - `LoaderConfig`: Top-level configuration with validation
//! - `ScoringConfig`: Relevance weights and the selection floor
//! - `OrchestratorConfig`, `TokenizerConfig`: Pipeline and estimation settings

mod settings;

pub use settings::{
    LoaderConfig, OrchestratorConfig, ScoringConfig, TokenEncoding, TokenizerConfig,
};
