use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::context::Maturity;
use crate::error::{LoaderError, Result};

/// Rule category: what kind of affinity the rule carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Generally applicable guidance; minimally relevant everywhere.
    Base,
    Language,
    Framework,
    Cloud,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Language => "language",
            Self::Framework => "framework",
            Self::Cloud => "cloud",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry: metadata about one selectable rule document.
///
/// `path` is the identity: unique across the catalog and resolvable
/// against the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInfo {
    pub path: String,
    pub name: String,
    pub category: RuleCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<String>,
    pub maturity: Vec<Maturity>,
    pub topics: Vec<String>,
    pub estimated_tokens: usize,
}

impl RuleInfo {
    pub fn new(path: impl Into<String>, name: impl Into<String>, category: RuleCategory) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            category,
            language: None,
            framework: None,
            cloud_provider: None,
            maturity: Maturity::all(),
            topics: Vec::new(),
            estimated_tokens: 0,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn with_cloud_provider(mut self, provider: impl Into<String>) -> Self {
        self.cloud_provider = Some(provider.into());
        self
    }

    pub fn with_maturity(mut self, maturity: Vec<Maturity>) -> Self {
        self.maturity = maturity;
        self
    }

    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_estimated_tokens(mut self, tokens: usize) -> Self {
        self.estimated_tokens = tokens;
        self
    }
}

/// Immutable, validated collection of rule metadata.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rules: Vec<RuleInfo>,
}

impl Catalog {
    /// Build a catalog, enforcing the load-time invariants: globally unique
    /// paths, positive token estimates, non-empty maturity sets.
    pub fn from_rules(rules: Vec<RuleInfo>) -> Result<Self> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for rule in &rules {
            if rule.path.is_empty() {
                errors.push(format!("rule '{}' has an empty path", rule.name));
            } else if !seen.insert(rule.path.as_str()) {
                errors.push(format!("duplicate rule path '{}'", rule.path));
            }
            if rule.estimated_tokens == 0 {
                errors.push(format!("rule '{}' has estimated_tokens = 0", rule.path));
            }
            if rule.maturity.is_empty() {
                errors.push(format!("rule '{}' has an empty maturity set", rule.path));
            }
        }

        if errors.is_empty() {
            Ok(Self { rules })
        } else {
            Err(LoaderError::Catalog(errors.join("; ")))
        }
    }

    pub fn rules(&self) -> &[RuleInfo] {
        &self.rules
    }

    pub fn get(&self, path: &str) -> Option<&RuleInfo> {
        self.rules.iter().find(|r| r.path == path)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Shared handle to the current catalog.
///
/// Readers clone an `Arc` and keep using their snapshot; a reload swaps the
/// reference atomically and never mutates a catalog in place.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn current(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    pub fn swap(&self, catalog: Catalog) {
        *self.current.write() = Arc::new(catalog);
    }
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}
