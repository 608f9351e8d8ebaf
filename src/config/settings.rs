use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{LoaderError, Result};
use crate::prompt::PromptCategory;

/// Top-level configuration for the rule loading pipeline.
///
/// All sections have defaults so a missing or partial config file works.
/// Budget and repository settings are validated at startup: per-request
/// failures degrade gracefully, configuration mistakes do not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Document store reference: path to a local mirror of the rules repository.
    pub rules_repo: String,
    /// Optional branch subdirectory inside the rules repository.
    pub rules_branch: Option<String>,
    /// Master switch for the pipeline; disabled means "never inject".
    pub enable_auto_load: bool,
    /// Enable the fetch cache.
    pub cache_enabled: bool,
    /// Cache entry time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Maximum number of rules injected per request.
    pub max_rules: usize,
    /// Maximum combined estimated tokens of injected rules.
    pub max_tokens: usize,
    /// Verbose logging.
    pub verbose: bool,
    pub scoring: ScoringConfig,
    pub orchestrator: OrchestratorConfig,
    pub tokenizer: TokenizerConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            rules_repo: ".claude/rules".into(),
            rules_branch: None,
            enable_auto_load: true,
            cache_enabled: true,
            cache_ttl_secs: 300,
            max_rules: 5,
            max_tokens: 10_000,
            verbose: false,
            scoring: ScoringConfig::default(),
            orchestrator: OrchestratorConfig::default(),
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist. Validation failures surface immediately.
    pub async fn load(config_path: &Path) -> Result<Self> {
        let config: Self = if config_path.exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, config_path: &Path) -> Result<()> {
        self.validate()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| LoaderError::Config(e.to_string()))?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    /// Validate configuration values for consistency and safety.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.rules_repo.is_empty() {
            errors.push("rules_repo must not be empty");
        }
        if self.cache_enabled && self.cache_ttl_secs == 0 {
            errors.push("cache_ttl_secs must be greater than 0 when cache_enabled");
        }
        if self.max_rules == 0 {
            errors.push("max_rules must be greater than 0");
        }
        if self.max_tokens == 0 {
            errors.push("max_tokens must be greater than 0");
        }

        if self.scoring.relevance_floor < 0.0 {
            errors.push("scoring.relevance_floor must not be negative");
        }
        if self.scoring.relevance_floor <= self.scoring.base_bonus {
            errors.push("scoring.relevance_floor must exceed base_bonus (base-only rules are noise)");
        }
        if self.scoring.topic_overlap_weight <= self.scoring.maturity_match_weight {
            errors.push("scoring.topic_overlap_weight must exceed maturity_match_weight");
        }

        if self.orchestrator.latency_warn_ms == 0 {
            errors.push("orchestrator.latency_warn_ms must be greater than 0");
        }
        if self.tokenizer.heuristic_chars_per_token == 0 {
            errors.push("tokenizer.heuristic_chars_per_token must be greater than 0");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LoaderError::Config(errors.join("; ")))
        }
    }
}

/// Relevance weights for rule scoring.
///
/// The absolute values are tuning parameters; the selector only contracts
/// the relative ordering (language/framework > cloud > maturity > base, and
/// topic overlap dominating base/maturity).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Flat bonus for base-category rules.
    pub base_bonus: f32,
    /// Exact language match against the detected context.
    pub language_match_weight: f32,
    /// Exact framework match against the detected context.
    pub framework_match_weight: f32,
    /// Exact cloud-provider match against the detected context.
    pub cloud_match_weight: f32,
    /// Rule lists the detected maturity level.
    pub maturity_match_weight: f32,
    /// Per overlapping topic between the rule and the extracted intent.
    pub topic_overlap_weight: f32,
    /// Extra bonus for security-tagged rules on high-urgency requests.
    pub urgency_security_bonus: f32,
    /// Per overlapping topic between the rule and the prompt category's
    /// affinity set.
    pub category_boost_weight: f32,
    /// Minimum score required to be considered for selection.
    pub relevance_floor: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_bonus: 10.0,
            language_match_weight: 30.0,
            framework_match_weight: 30.0,
            cloud_match_weight: 20.0,
            maturity_match_weight: 15.0,
            topic_overlap_weight: 25.0,
            urgency_security_bonus: 20.0,
            category_boost_weight: 10.0,
            relevance_floor: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Warn when total pipeline latency exceeds this threshold.
    pub latency_warn_ms: u64,
    /// Categories that short-circuit the pipeline with no injection.
    pub early_exit_categories: Vec<PromptCategory>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            latency_warn_ms: 2_000,
            early_exit_categories: vec![
                PromptCategory::LegalBusiness,
                PromptCategory::GeneralQuestion,
                PromptCategory::Unclear,
            ],
        }
    }
}

/// Token counting strategy for content estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEncoding {
    Cl100kBase,
    O200kBase,
    P50kBase,
    /// Character-count heuristic, no BPE table load.
    Heuristic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub encoding: TokenEncoding,
    /// Chars per token when `encoding` is `Heuristic`.
    pub heuristic_chars_per_token: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            encoding: TokenEncoding::Cl100kBase,
            heuristic_chars_per_token: 4,
        }
    }
}
