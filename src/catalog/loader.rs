//! Catalog loading from the rules index document.
//!
//! The index is declarative JSON grouping entries by category:
//!
//! ```json
//! {
//!   "rules": {
//!     "base": [{ "name": "code-quality", "path": "base/code-quality.md" }],
//!     "languages": { "python": [{ "name": "python-style", "path": "languages/python/style.md" }] },
//!     "frameworks": { "fastapi": [...] },
//!     "cloud": { "aws": [...] }
//!   }
//! }
//! ```
//!
//! Missing token estimates fall back to a per-category default; missing
//! topics are inferred from the path stem.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::context::Maturity;
use crate::error::Result;
use crate::prompt::topics_in;

use super::types::{Catalog, RuleCategory, RuleInfo};

/// Default token estimates when the index omits `estimatedTokens`.
fn default_tokens(category: RuleCategory) -> usize {
    match category {
        RuleCategory::Base => 800,
        RuleCategory::Language => 1_000,
        RuleCategory::Framework => 1_200,
        RuleCategory::Cloud => 1_400,
    }
}

#[derive(Debug, Deserialize)]
struct IndexDoc {
    #[serde(default)]
    rules: IndexRules,
}

#[derive(Debug, Default, Deserialize)]
struct IndexRules {
    #[serde(default)]
    base: Vec<IndexEntry>,
    #[serde(default)]
    languages: BTreeMap<String, Vec<IndexEntry>>,
    #[serde(default)]
    frameworks: BTreeMap<String, Vec<IndexEntry>>,
    #[serde(default)]
    cloud: BTreeMap<String, Vec<IndexEntry>>,
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    name: String,
    /// Older indexes use `file` instead of `path`.
    #[serde(alias = "file")]
    path: String,
    #[serde(rename = "estimatedTokens")]
    estimated_tokens: Option<usize>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    maturity: Vec<Maturity>,
}

impl IndexEntry {
    fn into_rule(self, category: RuleCategory) -> RuleInfo {
        let topics = if self.topics.is_empty() {
            infer_topics(&self.path)
        } else {
            self.topics
        };
        let maturity = if self.maturity.is_empty() {
            Maturity::all()
        } else {
            self.maturity
        };

        RuleInfo::new(self.path, self.name, category)
            .with_topics(topics)
            .with_maturity(maturity)
            .with_estimated_tokens(self.estimated_tokens.unwrap_or(default_tokens(category)))
    }
}

/// Infer topic tags from the path stem, e.g. `base/security-principles.md`
/// carries `security`.
fn infer_topics(path: &str) -> Vec<String> {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    topics_in(stem).into_iter().collect()
}

/// Load and validate the catalog from an index file.
///
/// Called once at startup; validation failures are configuration errors and
/// surface to the operator rather than degrading per request.
pub async fn load_catalog(index_path: &Path) -> Result<Catalog> {
    let content = tokio::fs::read_to_string(index_path).await?;
    let doc: IndexDoc = serde_json::from_str(&content)?;

    let mut rules = Vec::new();

    for entry in doc.rules.base {
        rules.push(entry.into_rule(RuleCategory::Base));
    }
    for (language, entries) in doc.rules.languages {
        for entry in entries {
            rules.push(
                entry
                    .into_rule(RuleCategory::Language)
                    .with_language(language.clone()),
            );
        }
    }
    for (framework, entries) in doc.rules.frameworks {
        for entry in entries {
            rules.push(
                entry
                    .into_rule(RuleCategory::Framework)
                    .with_framework(framework.clone()),
            );
        }
    }
    for (provider, entries) in doc.rules.cloud {
        for entry in entries {
            rules.push(
                entry
                    .into_rule(RuleCategory::Cloud)
                    .with_cloud_provider(provider.clone()),
            );
        }
    }

    let catalog = Catalog::from_rules(rules)?;
    debug!(count = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
